//! Concrete state handler functions and table builder.
//!
//! Each state is defined by three plain `fn` pointers — no closures, no
//! dynamic dispatch, no heap.  This is the classic embedded C FSM pattern
//! expressed in safe Rust.
//!
//! ```text
//!  IDLE ──[switch on]──▶ RUNNING ──[light < threshold]──▶ STOPPED
//!    ▲                      │
//!    └────[switch off]──────┘
//!
//!  STOPPED is terminal: no event leaves it until physical power-off.
//! ```
//!
//! Rule precedence inside `running_update` matters: the switch rule is
//! evaluated before the endpoint rule, so a simultaneous abort + endpoint
//! cycle resolves as an abort.

use super::context::{DriveCommand, RunContext};
use super::{StateDescriptor, StateId};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1 — Running
        StateDescriptor {
            id: StateId::Running,
            name: "Running",
            on_enter: Some(running_enter),
            on_exit: None,
            on_update: running_update,
        },
        // Index 2 — Stopped
        StateDescriptor {
            id: StateId::Stopped,
            name: "Stopped",
            on_enter: Some(stopped_enter),
            on_exit: None,
            on_update: stopped_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state — waiting for the start switch
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut RunContext) {
    ctx.drive = DriveCommand::Disengage;
    ctx.run_started_ms = 0;
    info!("IDLE: drive released, waiting for start switch");
}

fn idle_update(ctx: &mut RunContext) -> Option<StateId> {
    if ctx.sensors.switch_on {
        return Some(StateId::Running);
    }

    // Switch off: keep asserting the disengaged posture every cycle rather
    // than only on entry — a glitched actuator command self-corrects within
    // one control period.
    ctx.drive = DriveCommand::Disengage;
    ctx.run_started_ms = 0;
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  RUNNING state — drive engaged, watching the optical endpoint
// ═══════════════════════════════════════════════════════════════════════════

fn running_enter(ctx: &mut RunContext) {
    ctx.drive = DriveCommand::Engage;
    ctx.run_started_ms = ctx.now_ms;
    info!(
        "RUNNING: drive engaged, light={} threshold={}",
        ctx.sensors.light_raw, ctx.endpoint_threshold
    );
}

fn running_update(ctx: &mut RunContext) -> Option<StateId> {
    // Switch rule first: releasing the switch aborts the run even if the
    // endpoint condition is also satisfied this cycle.
    if !ctx.sensors.switch_on {
        return Some(StateId::Idle);
    }

    if ctx.endpoint_reached() {
        return Some(StateId::Stopped);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  STOPPED state — endpoint reached, terminal for the session
// ═══════════════════════════════════════════════════════════════════════════

fn stopped_enter(ctx: &mut RunContext) {
    ctx.drive = DriveCommand::Disengage;
    ctx.last_run_elapsed_ms = ctx.now_ms.saturating_sub(ctx.run_started_ms);
    ctx.run_started_ms = 0;
    info!(
        "STOPPED: endpoint at light={} (threshold={}), run took {} ms",
        ctx.sensors.light_raw, ctx.endpoint_threshold, ctx.last_run_elapsed_ms
    );
}

fn stopped_update(_ctx: &mut RunContext) -> Option<StateId> {
    // Latched: only a physical power cycle (and recalibration) resumes.
    None
}
