//! Power-rail voltage monitor.
//!
//! Samples the battery and fuel-cell rails once at startup through resistive
//! dividers into ESP32-S3 ADC channels, converts to rail voltage via the
//! fixed divider formula, and compares against per-rail minimums.  Advisory
//! only: a failed check drives the health indicator and logs a diagnostic
//! but never blocks a run.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH5/CH6 via the oneshot API (initialised by hw_init).
//! On host/test: reads from per-rail static `AtomicU16`s for injection.

use core::fmt;
use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

use crate::config::SystemConfig;

const ADC_MAX: f32 = 4095.0;
const V_REF: f32 = 3.3;

static SIM_BATTERY_ADC: AtomicU16 = AtomicU16::new(4095);
static SIM_FUELCELL_ADC: AtomicU16 = AtomicU16::new(4095);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_battery_adc(raw: u16) {
    SIM_BATTERY_ADC.store(raw, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_fuelcell_adc(raw: u16) {
    SIM_FUELCELL_ADC.store(raw, Ordering::Relaxed);
}

/// Monitored power rails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rail {
    /// Servo/logic battery pack.
    Battery,
    /// Reaction fuel cell driving the motor converter.
    FuelCell,
}

impl fmt::Display for Rail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Battery => write!(f, "battery"),
            Self::FuelCell => write!(f, "fuel cell"),
        }
    }
}

/// Outcome of a single startup rail check.
#[derive(Debug, Clone, Copy)]
pub struct RailStatus {
    pub rail: Rail,
    pub raw: u16,
    pub volts: f32,
    pub ok: bool,
}

/// ADC counts → voltage at the ADC pin.
pub fn adc_to_pin_volts(raw: u16) -> f32 {
    (raw as f32 / ADC_MAX) * V_REF
}

/// ADC counts → rail voltage through the divider.
pub fn rail_volts(raw: u16, divider: f32) -> f32 {
    adc_to_pin_volts(raw) * divider
}

/// Inclusive threshold comparison: a rail sitting exactly at its minimum
/// still passes.
pub fn rail_ok(volts: f32, min_volts: f32) -> bool {
    volts >= min_volts
}

/// Evaluate one rail sample against its configured divider and minimum.
pub fn check_rail(rail: Rail, raw: u16, config: &SystemConfig) -> RailStatus {
    let (divider, min_volts) = match rail {
        Rail::Battery => (config.battery_divider, config.battery_min_volts),
        Rail::FuelCell => (config.fuelcell_divider, config.fuelcell_min_volts),
    };
    let volts = rail_volts(raw, divider);
    RailStatus {
        rail,
        raw,
        volts,
        ok: rail_ok(volts, min_volts),
    }
}

/// ADC access for the two rails. Each rail is sampled exactly once during
/// the startup sequence; there is no periodic re-check.
pub struct PowerRails {
    _battery_gpio: i32,
    _fuelcell_gpio: i32,
}

impl PowerRails {
    pub fn new(battery_gpio: i32, fuelcell_gpio: i32) -> Self {
        Self {
            _battery_gpio: battery_gpio,
            _fuelcell_gpio: fuelcell_gpio,
        }
    }

    pub fn read_raw(&mut self, rail: Rail) -> u16 {
        match rail {
            Rail::Battery => self.read_battery_adc(),
            Rail::FuelCell => self.read_fuelcell_adc(),
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_battery_adc(&self) -> u16 {
        hw_init::adc1_read(hw_init::ADC1_CH_BATTERY)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_battery_adc(&self) -> u16 {
        SIM_BATTERY_ADC.load(Ordering::Relaxed)
    }

    #[cfg(target_os = "espidf")]
    fn read_fuelcell_adc(&self) -> u16 {
        hw_init::adc1_read(hw_init::ADC1_CH_FUELCELL)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_fuelcell_adc(&self) -> u16 {
        SIM_FUELCELL_ADC.load(Ordering::Relaxed)
    }
}
