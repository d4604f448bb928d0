//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) and the startup sequence
//! emit these through the [`EventSink`](super::ports::EventSink) port.  The
//! adapter on the other side decides what to do with them — in production
//! they are rendered through the `log` facade, filtered by the build-time
//! diagnostics verbosity.

use crate::fsm::StateId;
use crate::sensors::power::Rail;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy)]
pub enum AppEvent {
    /// The application service has started (carries initial state).
    Started(StateId),

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// Startup rail check result (advisory; never gates the run).
    RailChecked { rail: Rail, volts: f32, ok: bool },

    /// Baseline light level captured during calibration.
    BaselineCalibrated { baseline: u16, samples: u16 },

    /// The start switch engaged the drive.
    RunStarted { light_raw: u16 },

    /// The start switch was released mid-run.
    RunAborted,

    /// The optical endpoint stopped the vehicle.
    EndpointReached {
        elapsed_ms: u64,
        light_raw: u16,
        threshold: u16,
    },

    /// Per-cycle optical reading while the vehicle is running.
    LightLevel { raw: u16, threshold: u16 },
}
