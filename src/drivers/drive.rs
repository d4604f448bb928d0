//! Drive train — the vehicle's actuation interface.
//!
//! Owns the drive-power rail and both drive servos and exposes the two
//! idempotent operations the run state machine needs:
//!
//! - [`engage`](DriveTrain::engage): rail up, servos armed (only if not
//!   already armed), forward setpoints commanded.
//! - [`disengage`](DriveTrain::disengage): neutral commanded **before** the
//!   servos are released, release **before** the rail drops.  Commanding
//!   neutral first prevents an uncontrolled coast while the servos still
//!   hold their last drive pulse.
//!
//! Both operations are called every control cycle while their state is
//! requested, so both must be no-ops once the drive is already in the
//! requested posture.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real GPIO and LEDC channels via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::config::SystemConfig;
use crate::drivers::hw_init;
use crate::drivers::servo::{ServoDriver, NEUTRAL_DEG};
use crate::pins;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveState {
    Released,
    Engaged,
}

pub struct DriveTrain {
    left: ServoDriver,
    right: ServoDriver,
    left_setpoint_deg: u8,
    right_setpoint_deg: u8,
    state: DriveState,
}

impl DriveTrain {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            left: ServoDriver::new(hw_init::LEDC_CH_SERVO_LEFT),
            right: ServoDriver::new(hw_init::LEDC_CH_SERVO_RIGHT),
            left_setpoint_deg: config.drive_left_deg,
            right_setpoint_deg: config.drive_right_deg,
            // hw_init parks the rail low and LEDC duty at zero, so the
            // released posture already holds at construction time.
            state: DriveState::Released,
        }
    }

    /// Power the drive rail and command forward motion. Idempotent: servos
    /// that are already armed are not re-armed (re-arming glitches the
    /// output), and repeat calls only rewrite the same setpoints.
    pub fn engage(&mut self) {
        hw_init::gpio_write(pins::DRIVE_POWER_GPIO, true);
        if !self.left.is_armed() {
            self.left.arm();
        }
        if !self.right.is_armed() {
            self.right.arm();
        }
        self.left.set_angle(self.left_setpoint_deg);
        self.right.set_angle(self.right_setpoint_deg);
        self.state = DriveState::Engaged;
    }

    /// Neutralize, release, and power down — in that order. Idempotent: a
    /// drive that is already released is left untouched.
    pub fn disengage(&mut self) {
        if self.state == DriveState::Released {
            return;
        }
        if self.left.is_armed() {
            self.left.set_angle(NEUTRAL_DEG);
            self.left.detach();
        }
        if self.right.is_armed() {
            self.right.set_angle(NEUTRAL_DEG);
            self.right.detach();
        }
        hw_init::gpio_write(pins::DRIVE_POWER_GPIO, false);
        self.state = DriveState::Released;
    }

    pub fn is_engaged(&self) -> bool {
        self.state == DriveState::Engaged
    }

    pub fn state(&self) -> DriveState {
        self.state
    }
}
