//! Drive servo driver (continuous-rotation RC servo on LEDC PWM).
//!
//! A standard RC servo frame: 50 Hz, pulse width 1000–2000 µs mapped from a
//! 0–180° command, 1500 µs (90°) = neutral.  "Arming" starts pulse output on
//! the channel; "detaching" stops it entirely (`ledc_stop`), leaving the
//! servo unpowered rather than holding neutral.
//!
//! ## Safety contract
//!
//! Re-arming an already-armed servo can glitch the output shaft; callers
//! must check [`is_armed`](ServoDriver::is_armed) first.  The drive train
//! enforces this.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives a real LEDC channel via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

/// Neutral command for a continuous-rotation servo (no motion).
pub const NEUTRAL_DEG: u8 = 90;

const MIN_PULSE_US: u32 = 1000;
const MAX_PULSE_US: u32 = 2000;
const FRAME_US: u32 = 20_000;
const DUTY_COUNTS: u32 = 1 << 14; // 14-bit LEDC resolution

pub struct ServoDriver {
    channel: u32,
    armed: bool,
    angle_deg: u8,
}

impl ServoDriver {
    pub fn new(channel: u32) -> Self {
        Self {
            channel,
            armed: false,
            angle_deg: NEUTRAL_DEG,
        }
    }

    /// Begin pulse output at the last commanded angle.
    pub fn arm(&mut self) {
        hw_init::ledc_set(self.channel, angle_to_duty(self.angle_deg));
        self.armed = true;
    }

    /// Stop pulse output entirely, releasing the shaft.
    pub fn detach(&mut self) {
        hw_init::ledc_stop_channel(self.channel);
        self.armed = false;
    }

    /// Command an angular setpoint (clamped to 0–180°). Takes effect on the
    /// wire only while armed; the setpoint is retained across detach/arm.
    pub fn set_angle(&mut self, deg: u8) {
        self.angle_deg = deg.min(180);
        if self.armed {
            hw_init::ledc_set(self.channel, angle_to_duty(self.angle_deg));
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn angle(&self) -> u8 {
        self.angle_deg
    }
}

/// Map an angle to LEDC duty counts for one 20 ms frame.
fn angle_to_duty(deg: u8) -> u32 {
    let span = MAX_PULSE_US - MIN_PULSE_US;
    let pulse_us = MIN_PULSE_US + span * u32::from(deg) / 180;
    pulse_us * DUTY_COUNTS / FRAME_US
}
