//! System configuration parameters
//!
//! All tunable parameters for the chem-car run-control logic. Values are
//! fixed at build time — there is no provisioning channel and nothing is
//! persisted across power cycles.

use serde::{Deserialize, Serialize};

/// Upper bound on the calibration sample buffer (fixed-capacity, no heap).
pub const MAX_CALIB_SAMPLES: usize = 64;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Light calibration ---
    /// Number of optical samples averaged into the baseline
    pub calib_samples: u16,
    /// Blocking delay before each calibration sample (milliseconds)
    pub calib_interval_ms: u32,

    // --- Endpoint detection ---
    /// Fraction of the baseline below which the reaction endpoint is declared
    pub endpoint_fraction: f32,

    // --- Power rails ---
    /// Minimum acceptable battery-rail voltage (inclusive)
    pub battery_min_volts: f32,
    /// Minimum acceptable fuel-cell-rail voltage (inclusive)
    pub fuelcell_min_volts: f32,
    /// Battery divider ratio (rail volts per ADC-pin volt)
    pub battery_divider: f32,
    /// Fuel-cell divider ratio (rail volts per ADC-pin volt)
    pub fuelcell_divider: f32,

    // --- Drive ---
    /// Left servo forward-drive setpoint (degrees, 0-180)
    pub drive_left_deg: u8,
    /// Right servo forward-drive setpoint (degrees, 0-180; mirrored)
    pub drive_right_deg: u8,
    /// Stirring motor PWM duty cycle (0-100%)
    pub stir_duty_percent: u8,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// On/off period of the startup indicator flash (milliseconds)
    pub indicator_flash_ms: u32,
    /// Number of startup indicator flashes
    pub indicator_flash_count: u8,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Light calibration
            calib_samples: 16,
            calib_interval_ms: 50,

            // Endpoint detection
            endpoint_fraction: 0.8,

            // Power rails (20k/10k divider on battery, 30k/10k on fuel cell)
            battery_min_volts: 5.5,
            fuelcell_min_volts: 7.0,
            battery_divider: 3.0,
            fuelcell_divider: 4.0,

            // Drive (continuous-rotation servos, mirrored forward setpoints)
            drive_left_deg: 180,
            drive_right_deg: 0,
            stir_duty_percent: 60,

            // Timing
            control_loop_interval_ms: 50, // 20 Hz
            indicator_flash_ms: 150,
            indicator_flash_count: 3,
        }
    }
}
