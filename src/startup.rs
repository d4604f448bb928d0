//! One-time initialization sequence.
//!
//! Everything here runs sequentially and is allowed to block — this is the
//! only part of the firmware that sleeps.  The steady-state control loop is
//! never re-entered by any of it.
//!
//! Order:
//! 1. Indicator flash (lamp test for both health LEDs).
//! 2. Rail voltage checks → health indicators (advisory only).
//! 3. Sensor lamp on (controlled illumination for the optical sensor).
//! 4. Stirring motor start (runs until power-off).
//! 5. Light calibration → baseline.

use embedded_hal::delay::DelayNs;
use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::{ActuatorPort, EventSink, SensorPort};
use crate::config::{SystemConfig, MAX_CALIB_SAMPLES};
use crate::sensors::light::integer_mean;
use crate::sensors::power::{check_rail, Rail};

/// Run the full startup sequence and return the calibrated baseline.
pub fn run(
    hw: &mut (impl SensorPort + ActuatorPort),
    sink: &mut impl EventSink,
    config: &SystemConfig,
    delay: &mut impl DelayNs,
) -> u16 {
    flash_indicators(hw, config, delay);
    check_rails(hw, sink, config);

    // Illumination must be stable before the first calibration sample; the
    // per-sample delay below also covers LED turn-on settling.
    hw.set_sensor_lamp(true);

    hw.start_stirrer(config.stir_duty_percent);

    calibrate_baseline(hw, sink, config, delay)
}

/// Blink both health LEDs as a visual lamp test before they take on their
/// real meaning.
fn flash_indicators(hw: &mut impl ActuatorPort, config: &SystemConfig, delay: &mut impl DelayNs) {
    for _ in 0..config.indicator_flash_count {
        hw.set_health_indicator(Rail::Battery, false);
        hw.set_health_indicator(Rail::FuelCell, false);
        delay.delay_ms(config.indicator_flash_ms);
        hw.set_health_indicator(Rail::Battery, true);
        hw.set_health_indicator(Rail::FuelCell, true);
        delay.delay_ms(config.indicator_flash_ms);
    }
}

/// Sample each rail once and drive its indicator. Advisory: a failed rail
/// lights the LED and logs, but the run is never gated on it.
fn check_rails(
    hw: &mut (impl SensorPort + ActuatorPort),
    sink: &mut impl EventSink,
    config: &SystemConfig,
) {
    for rail in [Rail::Battery, Rail::FuelCell] {
        let raw = hw.read_rail_raw(rail);
        let status = check_rail(rail, raw, config);
        hw.set_health_indicator(rail, status.ok);
        sink.emit(&AppEvent::RailChecked {
            rail,
            volts: status.volts,
            ok: status.ok,
        });
    }
}

/// Take `calib_samples` sequential optical readings with a fixed blocking
/// delay before each (sensor settling / noise decorrelation) and return the
/// integer mean.
///
/// No outlier rejection and no variance check: a saturated or disconnected
/// sensor yields a wrong baseline, and that is an accepted limitation of
/// the vehicle — not something to paper over here.
fn calibrate_baseline(
    hw: &mut impl SensorPort,
    sink: &mut impl EventSink,
    config: &SystemConfig,
    delay: &mut impl DelayNs,
) -> u16 {
    let n = (config.calib_samples as usize).min(MAX_CALIB_SAMPLES);
    let mut samples: heapless::Vec<u16, MAX_CALIB_SAMPLES> = heapless::Vec::new();

    for _ in 0..n {
        delay.delay_ms(config.calib_interval_ms);
        // Capacity matches the loop bound; push cannot fail.
        let _ = samples.push(hw.read_light_raw());
    }

    let baseline = integer_mean(&samples);
    info!("calibration: baseline={} from {} samples", baseline, n);
    sink.emit(&AppEvent::BaselineCalibrated {
        baseline,
        samples: n as u16,
    });
    baseline
}
