//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the FSM and the shared run context.  It exposes a
//! clean, hardware-agnostic API; all I/O flows through port traits injected
//! at call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       AppService        │
//! ActuatorPort ◀──│   run state machine     │
//!                 └────────────────────────┘
//! ```

use log::info;

use crate::config::SystemConfig;
use crate::fsm::context::{DriveCommand, RunContext};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};

use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates the steady-state control loop.
pub struct AppService {
    fsm: Fsm,
    ctx: RunContext,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration and the baseline captured
    /// by the startup sequence.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn new(config: SystemConfig, baseline: u16) -> Self {
        let ctx = RunContext::new(config, baseline);
        let fsm = Fsm::new(build_state_table(), StateId::Idle);

        Self {
            fsm,
            ctx,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in its initial state (Idle).
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!(
            "AppService started in {:?} (baseline={}, threshold={})",
            self.fsm.current_state(),
            self.ctx.baseline,
            self.ctx.endpoint_threshold
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full control cycle: read sensors → FSM → actuators → events.
    ///
    /// `now_ms` is the monotonic uptime of this cycle; it feeds the run
    /// timer, which is diagnostics-only and never influences a transition.
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] — this avoids a double mutable borrow while keeping
    /// the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        let prev_state = self.fsm.current_state();

        // 1. Read sensors via SensorPort
        self.ctx.sensors = hw.read_all();
        self.ctx.now_ms = now_ms;

        // 2. FSM tick (pure state logic)
        self.fsm.tick(&mut self.ctx);

        // 3. Apply the drive command via ActuatorPort. Applied every cycle:
        //    the port is idempotent, and in Idle this doubles as the
        //    "ensure disengaged" assertion.
        match self.ctx.drive {
            DriveCommand::Engage => hw.engage_drive(),
            DriveCommand::Disengage => hw.disengage_drive(),
        }

        // 4. Emit transition + per-cycle diagnostics
        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
            match (prev_state, new_state) {
                (StateId::Idle, StateId::Running) => {
                    sink.emit(&AppEvent::RunStarted {
                        light_raw: self.ctx.sensors.light_raw,
                    });
                }
                (StateId::Running, StateId::Idle) => {
                    sink.emit(&AppEvent::RunAborted);
                }
                (StateId::Running, StateId::Stopped) => {
                    sink.emit(&AppEvent::EndpointReached {
                        elapsed_ms: self.ctx.last_run_elapsed_ms,
                        light_raw: self.ctx.sensors.light_raw,
                        threshold: self.ctx.endpoint_threshold,
                    });
                }
                _ => {}
            }
        }

        if new_state == StateId::Running {
            sink.emit(&AppEvent::LightLevel {
                raw: self.ctx.sensors.light_raw,
                threshold: self.ctx.endpoint_threshold,
            });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Baseline light level the endpoint threshold derives from.
    pub fn baseline(&self) -> u16 {
        self.ctx.baseline
    }

    /// Endpoint threshold in raw sensor units.
    pub fn endpoint_threshold(&self) -> u16 {
        self.ctx.endpoint_threshold
    }

    /// Duration of the last completed run (0 until an endpoint is reached).
    pub fn last_run_elapsed_ms(&self) -> u64 {
        self.ctx.last_run_elapsed_ms
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
