//! GPIO / peripheral pin assignments for the chem-car main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Drive servos (continuous-rotation, LEDC PWM at 50 Hz)
// ---------------------------------------------------------------------------

/// LEDC PWM output for the left drive servo.
pub const SERVO_LEFT_GPIO: i32 = 1;
/// LEDC PWM output for the right drive servo.
pub const SERVO_RIGHT_GPIO: i32 = 2;
/// Digital output: enables the drive-power buck converter (active HIGH).
pub const DRIVE_POWER_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// Stirring motor (DC motor via MOSFET, LEDC PWM)
// ---------------------------------------------------------------------------

/// LEDC PWM output for the reaction-vessel stirring motor.
pub const STIR_PWM_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// Photoresistor divider across the reaction vessel — ADC1 channel 4.
pub const LIGHT_ADC_GPIO: i32 = 5;
/// Battery rail through a resistive divider — ADC1 channel 5.
pub const BATTERY_ADC_GPIO: i32 = 6;
/// Fuel-cell rail through a resistive divider — ADC1 channel 6.
pub const FUELCELL_ADC_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Sensors — Digital
// ---------------------------------------------------------------------------

/// Start switch on the vehicle flank. HIGH = run commanded.
pub const START_SWITCH_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// Discrete outputs
// ---------------------------------------------------------------------------

/// Battery health indicator LED. Held HIGH normally, driven LOW on fault.
pub const BATTERY_LED_GPIO: i32 = 11;
/// Fuel-cell health indicator LED. Held HIGH normally, driven LOW on fault.
pub const FUELCELL_LED_GPIO: i32 = 12;
/// Illumination LED for the optical sensor (lights the reaction vessel).
pub const SENSOR_LAMP_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC frequency for the drive servos (standard RC servo frame rate).
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// LEDC timer resolution for the servo timer (14-bit → 16384 counts/frame).
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;
/// LEDC base frequency for the stirring motor (25 kHz — inaudible).
pub const STIR_PWM_FREQ_HZ: u32 = 25_000;
/// LEDC timer resolution for the stirrer timer (8-bit → 0–255 duty levels).
pub const STIR_PWM_RESOLUTION_BITS: u32 = 8;
