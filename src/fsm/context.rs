//! Shared mutable context threaded through every FSM handler.
//!
//! `RunContext` is the single struct that state handlers read from and
//! write to.  It contains the latest sensor snapshot, the drive command
//! output, the calibrated baseline, run timing, and configuration.  Think
//! of it as the "blackboard" in a blackboard architecture.

use crate::config::SystemConfig;

// ---------------------------------------------------------------------------
// Sensor snapshot (read-only to state handlers; written by the sensor hub)
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of the per-cycle inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensorSnapshot {
    /// Start switch level. Instantaneous, not debounced.
    pub switch_on: bool,
    /// Raw ADC value from the optical sensor (0 – 4095).
    pub light_raw: u16,
}

// ---------------------------------------------------------------------------
// Drive command (written by state handlers; applied by the service)
// ---------------------------------------------------------------------------

/// Requested drive-train posture. Applied to the actuation interface each
/// tick; the interface itself is idempotent, so repeated application of the
/// same command has no further side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriveCommand {
    /// Power rail up, servos armed at forward setpoints.
    Engage,
    /// Servos neutral and released, power rail down.
    #[default]
    Disengage,
}

// ---------------------------------------------------------------------------
// RunContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct RunContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Monotonic total tick count.
    pub total_ticks: u64,
    /// Wall-clock uptime of the current cycle (milliseconds, monotonic).
    /// Written by the service before each FSM tick.
    pub now_ms: u64,

    // -- Sensor data --
    /// Latest sensor readings.  Updated before each FSM tick.
    pub sensors: SensorSnapshot,

    // -- Actuator output --
    /// Drive command to be applied after the FSM tick.
    pub drive: DriveCommand,

    // -- Calibration --
    /// Baseline optical reading captured once at startup. Immutable.
    pub baseline: u16,
    /// Endpoint threshold in raw sensor units: `endpoint_fraction × baseline`.
    pub endpoint_threshold: u16,

    // -- Run timing (diagnostics only; never feeds control decisions) --
    /// Uptime at `Running` entry; 0 while no run is in progress.
    pub run_started_ms: u64,
    /// Duration of the last completed run, set on endpoint detection.
    pub last_run_elapsed_ms: u64,

    // -- Configuration --
    /// System configuration (build-time tunables).
    pub config: SystemConfig,
}

impl RunContext {
    /// Create a new context from the configuration and the calibrated
    /// baseline light level.
    pub fn new(config: SystemConfig, baseline: u16) -> Self {
        let endpoint_threshold = (baseline as f32 * config.endpoint_fraction) as u16;
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            now_ms: 0,
            sensors: SensorSnapshot::default(),
            drive: DriveCommand::Disengage,
            baseline,
            endpoint_threshold,
            run_started_ms: 0,
            last_run_elapsed_ms: 0,
            config,
        }
    }

    /// True while the optical reading is below the endpoint threshold.
    pub fn endpoint_reached(&self) -> bool {
        self.sensors.light_raw < self.endpoint_threshold
    }
}
