//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, event sinks) implement these traits.
//! The [`AppService`](super::service::AppService) and the startup sequence
//! consume them via generics, so the domain core never touches hardware
//! directly.
//!
//! All port operations are infallible by design: every failure in this
//! system is represented as state (a health flag, a wrong baseline), never
//! as a signaled error.  There is no retry anywhere.

use crate::fsm::context::SensorSnapshot;
use crate::sensors::power::Rail;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Read the per-cycle inputs (start switch, optical sensor).
    fn read_all(&mut self) -> SensorSnapshot;

    /// Single raw optical reading — the calibration sampling path.
    fn read_light_raw(&mut self) -> u16;

    /// Single raw rail sample — the one-shot startup voltage check.
    fn read_rail_raw(&mut self, rail: Rail) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
///
/// `engage_drive` / `disengage_drive` are applied every control cycle while
/// their posture is requested, so implementations MUST be idempotent: an
/// engage on an engaged drive must not re-arm the servos, and a disengage
/// on a released drive must be a no-op.
pub trait ActuatorPort {
    /// Power the drive rail, arm the servos (if not already armed), and
    /// command the forward setpoints.
    fn engage_drive(&mut self);

    /// Command neutral, release the servos, drop the drive rail — in that
    /// order.
    fn disengage_drive(&mut self);

    /// Query whether the drive is currently engaged.
    fn is_drive_engaged(&self) -> bool;

    /// One-shot stirring motor start (runs for the rest of the session).
    fn start_stirrer(&mut self, duty_percent: u8);

    /// Drive a rail health indicator: `true` = healthy, `false` = fault.
    fn set_health_indicator(&mut self, rail: Rail, ok: bool);

    /// Switch the optical sensor's illumination LED.
    fn set_sensor_lamp(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → diagnostics)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log in
/// production, a recording vec in tests).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
