fn main() {
    // Emits ESP-IDF cfg/link args when the esp build environment is present;
    // a no-op for host-target builds.
    embuild::espidf::sysenv::output();
}
