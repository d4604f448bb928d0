//! Actuator drivers and one-shot hardware initialization.
//!
//! Every driver follows the dual-target pattern: state is tracked
//! in-memory, and hardware writes go through the cfg-gated `hw_init`
//! helpers (real registers on ESP-IDF, no-ops on the host).

pub mod drive;
pub mod hw_init;
pub mod indicator;
pub mod servo;
pub mod stirrer;
