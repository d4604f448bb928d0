//! Start switch input.
//!
//! A toggle switch on the vehicle flank, read as a plain GPIO level once per
//! control cycle.  Deliberately **not debounced**: the run state machine's
//! own transition logic is the only filtering, and a noisy reading flipping
//! the state for one cycle is a documented limitation of the vehicle.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the real GPIO level via hw_init helpers.
//! On host/test: reads from a static `AtomicBool` for injection.

use core::sync::atomic::AtomicBool;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

static SIM_SWITCH: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_switch(on: bool) {
    SIM_SWITCH.store(on, Ordering::Relaxed);
}

pub struct StartSwitch {
    _gpio: i32,
    last: bool,
}

impl StartSwitch {
    pub fn new(gpio: i32) -> Self {
        Self { _gpio: gpio, last: false }
    }

    /// Instantaneous switch level. HIGH = run commanded.
    pub fn read(&mut self) -> bool {
        self.last = self.read_gpio();
        self.last
    }

    /// Level captured by the most recent `read()`.
    pub fn last(&self) -> bool {
        self.last
    }

    #[cfg(target_os = "espidf")]
    fn read_gpio(&self) -> bool {
        hw_init::gpio_read(pins::START_SWITCH_GPIO)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_gpio(&self) -> bool {
        SIM_SWITCH.load(Ordering::Relaxed)
    }
}
