//! Health indicator LED driver.
//!
//! One discrete output per monitored rail, wired active-low-off: the pin is
//! held HIGH in the healthy state and driven LOW to light the fault LED.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives a real GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

pub struct HealthIndicator {
    gpio: i32,
    ok: bool,
}

impl HealthIndicator {
    /// hw_init parks indicator pins HIGH (healthy) at boot.
    pub fn new(gpio: i32) -> Self {
        Self { gpio, ok: true }
    }

    /// `true` = healthy (pin HIGH, LED dark); `false` = fault (pin LOW,
    /// LED lit).
    pub fn set_ok(&mut self, ok: bool) {
        hw_init::gpio_write(self.gpio, ok);
        self.ok = ok;
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }
}
