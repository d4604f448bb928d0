//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and all actuator drivers, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  This is the only module in the
//! system that touches actual hardware.  On non-espidf targets, the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::drive::DriveTrain;
use crate::drivers::indicator::HealthIndicator;
use crate::drivers::stirrer::StirMotor;
use crate::fsm::context::SensorSnapshot;
use crate::sensors::power::Rail;
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    drive: DriveTrain,
    stirrer: StirMotor,
    battery_led: HealthIndicator,
    fuelcell_led: HealthIndicator,
}

impl HardwareAdapter {
    pub fn new(
        sensor_hub: SensorHub,
        drive: DriveTrain,
        stirrer: StirMotor,
        battery_led: HealthIndicator,
        fuelcell_led: HealthIndicator,
    ) -> Self {
        Self {
            sensor_hub,
            drive,
            stirrer,
            battery_led,
            fuelcell_led,
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_all(&mut self) -> SensorSnapshot {
        self.sensor_hub.read_all()
    }

    fn read_light_raw(&mut self) -> u16 {
        self.sensor_hub.light.read_raw()
    }

    fn read_rail_raw(&mut self, rail: Rail) -> u16 {
        self.sensor_hub.read_rail_raw(rail)
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn engage_drive(&mut self) {
        self.drive.engage();
    }

    fn disengage_drive(&mut self) {
        self.drive.disengage();
    }

    fn is_drive_engaged(&self) -> bool {
        self.drive.is_engaged()
    }

    fn start_stirrer(&mut self, duty_percent: u8) {
        self.stirrer.start(duty_percent);
    }

    fn set_health_indicator(&mut self, rail: Rail, ok: bool) {
        match rail {
            Rail::Battery => self.battery_led.set_ok(ok),
            Rail::FuelCell => self.fuelcell_led.set_ok(ok),
        }
    }

    fn set_sensor_lamp(&mut self, on: bool) {
        self.sensor_hub.light.set_lamp(on);
    }
}
