//! Integration tests for the startup sequence and the AppService → FSM →
//! actuator pipeline.
//!
//! These run on the host (x86_64) and verify the full chain from scripted
//! sensor inputs down to effective actuator side effects without any real
//! hardware.

use crate::mock_hw::{ActuatorCall, MockHardware, NoopDelay, RecordingSink};

use chemcar::app::events::AppEvent;
use chemcar::app::ports::ActuatorPort;
use chemcar::app::service::AppService;
use chemcar::config::SystemConfig;
use chemcar::fsm::StateId;
use chemcar::sensors::power::Rail;
use chemcar::startup;

const TICK_MS: u64 = 50;

fn make_app(baseline: u16) -> (AppService, MockHardware, RecordingSink) {
    let mut app = AppService::new(SystemConfig::default(), baseline);
    let hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    (app, hw, sink)
}

/// Drive one control cycle with explicit inputs; returns the uptime used.
fn cycle(
    app: &mut AppService,
    hw: &mut MockHardware,
    sink: &mut RecordingSink,
    tick: &mut u64,
    switch_on: bool,
    light: u16,
) -> u64 {
    hw.switch_on = switch_on;
    hw.set_light(light);
    *tick += TICK_MS;
    app.tick(*tick, hw, sink);
    *tick
}

// ── Switch-on engagement ─────────────────────────────────────

#[test]
fn switch_on_while_idle_engages_once() {
    let (mut app, mut hw, mut sink) = make_app(1000);
    let mut t = 0;

    cycle(&mut app, &mut hw, &mut sink, &mut t, true, 1000);

    assert_eq!(app.state(), StateId::Running);
    assert_eq!(hw.arm_count, 1, "exactly one effective arm");
    assert!(hw.drive_engaged());
    assert_eq!(
        sink.events
            .iter()
            .filter(|e| matches!(e, AppEvent::RunStarted { .. }))
            .count(),
        1
    );
}

#[test]
fn engagement_holds_without_rearming() {
    let (mut app, mut hw, mut sink) = make_app(1000);
    let mut t = 0;

    for _ in 0..10 {
        cycle(&mut app, &mut hw, &mut sink, &mut t, true, 1000);
    }

    assert_eq!(app.state(), StateId::Running);
    // engage_drive is applied every cycle, but only the first arms.
    assert_eq!(hw.arm_count, 1);
    assert!(hw.calls.iter().filter(|c| **c == ActuatorCall::EngageDrive).count() >= 10);
}

// ── Abort ────────────────────────────────────────────────────

#[test]
fn switch_off_while_running_aborts() {
    let (mut app, mut hw, mut sink) = make_app(1000);
    let mut t = 0;

    cycle(&mut app, &mut hw, &mut sink, &mut t, true, 1000);
    cycle(&mut app, &mut hw, &mut sink, &mut t, false, 1000);

    assert_eq!(app.state(), StateId::Idle);
    assert_eq!(hw.release_count, 1, "exactly one effective release");
    assert_eq!(sink.count_aborted(), 1, "aborted diagnostic exactly once");
    assert!(!hw.drive_engaged());
}

#[test]
fn idle_keeps_asserting_disengage_without_new_releases() {
    let (mut app, mut hw, mut sink) = make_app(1000);
    let mut t = 0;

    cycle(&mut app, &mut hw, &mut sink, &mut t, true, 1000);
    for _ in 0..5 {
        cycle(&mut app, &mut hw, &mut sink, &mut t, false, 1000);
    }

    // Rule 2 fires every Idle cycle (continuous disengage assertion)...
    assert!(hw.calls.iter().filter(|c| **c == ActuatorCall::DisengageDrive).count() >= 5);
    // ...but only the abort itself released anything.
    assert_eq!(hw.release_count, 1);
    assert_eq!(sink.count_aborted(), 1, "no repeat aborted diagnostics");
}

#[test]
fn abort_allows_restart() {
    let (mut app, mut hw, mut sink) = make_app(1000);
    let mut t = 0;

    cycle(&mut app, &mut hw, &mut sink, &mut t, true, 1000);
    cycle(&mut app, &mut hw, &mut sink, &mut t, false, 1000);
    cycle(&mut app, &mut hw, &mut sink, &mut t, true, 1000);

    assert_eq!(app.state(), StateId::Running);
    assert_eq!(hw.arm_count, 2, "a fresh run re-arms after an abort");
}

// ── Endpoint detection ───────────────────────────────────────

#[test]
fn light_crossing_threshold_stops_once() {
    let (mut app, mut hw, mut sink) = make_app(1000);
    let mut t = 0;

    let start_t = cycle(&mut app, &mut hw, &mut sink, &mut t, true, 1000);
    cycle(&mut app, &mut hw, &mut sink, &mut t, true, 850);
    let stop_t = cycle(&mut app, &mut hw, &mut sink, &mut t, true, 750);

    assert_eq!(app.state(), StateId::Stopped);
    assert_eq!(hw.release_count, 1);
    assert_eq!(sink.count_endpoint(), 1);
    assert_eq!(
        sink.last_endpoint_elapsed_ms(),
        Some(stop_t - start_t),
        "elapsed = stop-cycle timestamp - run-start timestamp"
    );
    assert_eq!(app.last_run_elapsed_ms(), stop_t - start_t);
}

#[test]
fn light_at_exact_threshold_keeps_running() {
    let (mut app, mut hw, mut sink) = make_app(1000);
    let mut t = 0;

    cycle(&mut app, &mut hw, &mut sink, &mut t, true, 1000);
    cycle(&mut app, &mut hw, &mut sink, &mut t, true, 800);

    assert_eq!(app.state(), StateId::Running, "threshold itself is not below");
}

#[test]
fn abort_beats_endpoint_in_same_cycle() {
    let (mut app, mut hw, mut sink) = make_app(1000);
    let mut t = 0;

    cycle(&mut app, &mut hw, &mut sink, &mut t, true, 1000);
    cycle(&mut app, &mut hw, &mut sink, &mut t, false, 500);

    assert_eq!(app.state(), StateId::Idle, "switch rule is evaluated first");
    assert_eq!(sink.count_endpoint(), 0);
    assert_eq!(sink.count_aborted(), 1);
}

#[test]
fn start_with_light_already_low_stops_next_cycle() {
    let (mut app, mut hw, mut sink) = make_app(1000);
    let mut t = 0;

    cycle(&mut app, &mut hw, &mut sink, &mut t, true, 500);
    assert_eq!(app.state(), StateId::Running, "start rule wins its cycle");
    assert_eq!(hw.arm_count, 1);

    cycle(&mut app, &mut hw, &mut sink, &mut t, true, 500);
    assert_eq!(app.state(), StateId::Stopped);
    assert_eq!(hw.release_count, 1);
}

// ── Latching ─────────────────────────────────────────────────

#[test]
fn stopped_latches_against_any_switch_cycling() {
    let (mut app, mut hw, mut sink) = make_app(1000);
    let mut t = 0;

    cycle(&mut app, &mut hw, &mut sink, &mut t, true, 1000);
    cycle(&mut app, &mut hw, &mut sink, &mut t, true, 700);
    assert_eq!(app.state(), StateId::Stopped);

    let arms_at_stop = hw.arm_count;
    for &(sw, light) in &[
        (false, 1000),
        (true, 1000),
        (false, 700),
        (true, 700),
        (true, 4095),
    ] {
        cycle(&mut app, &mut hw, &mut sink, &mut t, sw, light);
        assert_eq!(app.state(), StateId::Stopped);
        assert!(!hw.drive_engaged());
    }
    assert_eq!(hw.arm_count, arms_at_stop, "no re-arm after latching stop");
}

// ── Worked example: full input schedule ──────────────────────

#[test]
fn end_to_end_worked_example() {
    // baseline=1000, fraction=0.8 → threshold=800
    // switch=[off,on,on,on], light=[1000,1000,1000,750]
    // expected states per cycle: Idle, Running, Running, Stopped
    let (mut app, mut hw, mut sink) = make_app(1000);
    assert_eq!(app.endpoint_threshold(), 800);
    let mut t = 0;

    let inputs = [(false, 1000), (true, 1000), (true, 1000), (true, 750)];
    let expected = [
        StateId::Idle,
        StateId::Running,
        StateId::Running,
        StateId::Stopped,
    ];

    let mut arm_history = Vec::new();
    for (&(sw, light), &want) in inputs.iter().zip(&expected) {
        cycle(&mut app, &mut hw, &mut sink, &mut t, sw, light);
        assert_eq!(app.state(), want);
        arm_history.push(hw.arm_count);
    }

    assert_eq!(arm_history, vec![0, 1, 1, 1], "single arm at cycle 2");
    assert_eq!(hw.release_count, 1, "single release at cycle 4");
}

// ── Startup sequence ─────────────────────────────────────────

#[test]
fn calibration_of_identical_samples_is_exact() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    hw.set_light(877);

    let baseline = startup::run(&mut hw, &mut sink, &SystemConfig::default(), &mut NoopDelay);

    assert_eq!(baseline, 877);
    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::BaselineCalibrated {
            baseline: 877,
            samples: 16
        }
    )));
}

#[test]
fn calibration_averages_varying_samples() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    // 8× 900 then 8× 1100 → mean 1000
    hw.script_light((0..8).map(|_| 900).chain((0..8).map(|_| 1100)));

    let baseline = startup::run(&mut hw, &mut sink, &SystemConfig::default(), &mut NoopDelay);

    assert_eq!(baseline, 1000);
}

#[test]
fn startup_checks_rails_and_sets_indicators() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    hw.set_light(1000);
    hw.battery_raw = 4095; // 9.9 V — healthy
    hw.fuelcell_raw = 1000; // ~3.2 V — below the 7 V minimum

    startup::run(&mut hw, &mut sink, &SystemConfig::default(), &mut NoopDelay);

    // The last indicator write per rail reflects the check outcome.
    let last_batt = hw.calls.iter().rev().find_map(|c| match c {
        ActuatorCall::SetIndicator { rail: Rail::Battery, ok } => Some(*ok),
        _ => None,
    });
    let last_fc = hw.calls.iter().rev().find_map(|c| match c {
        ActuatorCall::SetIndicator { rail: Rail::FuelCell, ok } => Some(*ok),
        _ => None,
    });
    assert_eq!(last_batt, Some(true));
    assert_eq!(last_fc, Some(false));

    let rail_events: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::RailChecked { rail, ok, .. } => Some((*rail, *ok)),
            _ => None,
        })
        .collect();
    assert_eq!(rail_events, vec![(Rail::Battery, true), (Rail::FuelCell, false)]);
}

#[test]
fn startup_indicator_write_sequence() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    hw.set_light(1000);

    startup::run(&mut hw, &mut sink, &SystemConfig::default(), &mut NoopDelay);

    // 3 flashes × (2 off + 2 on) + 2 final check writes
    let indicator_writes = hw
        .calls
        .iter()
        .filter(|c| matches!(c, ActuatorCall::SetIndicator { .. }))
        .count();
    assert_eq!(indicator_writes, 14);
}

#[test]
fn startup_starts_stirrer_and_lamp_once() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    hw.set_light(1000);

    startup::run(&mut hw, &mut sink, &SystemConfig::default(), &mut NoopDelay);

    assert_eq!(hw.stirrer_duty, Some(60));
    assert!(hw.lamp_on);
    assert_eq!(
        hw.calls
            .iter()
            .filter(|c| matches!(c, ActuatorCall::StartStirrer { .. }))
            .count(),
        1
    );
}

// ── Boot-to-endpoint ─────────────────────────────────────────

#[test]
fn full_session_from_boot_to_endpoint() {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    hw.set_light(1000);

    let config = SystemConfig::default();
    let baseline = startup::run(&mut hw, &mut sink, &config, &mut NoopDelay);
    assert_eq!(baseline, 1000);

    let mut app = AppService::new(config, baseline);
    app.start(&mut sink);
    let mut t = 0;

    // A few idle cycles, then the marshal flips the switch.
    for _ in 0..3 {
        cycle(&mut app, &mut hw, &mut sink, &mut t, false, 1000);
    }
    assert_eq!(app.state(), StateId::Idle);
    assert_eq!(hw.arm_count, 0);

    // Reaction running: light decays toward the endpoint.
    for light in [1000, 980, 950, 920, 890, 850, 820, 801] {
        cycle(&mut app, &mut hw, &mut sink, &mut t, true, light);
        assert_eq!(app.state(), StateId::Running);
    }
    cycle(&mut app, &mut hw, &mut sink, &mut t, true, 790);
    assert_eq!(app.state(), StateId::Stopped);
    assert!(!hw.is_drive_engaged());
    assert_eq!(hw.arm_count, 1);
    assert_eq!(hw.release_count, 1);
    assert_eq!(sink.count_endpoint(), 1);
    assert_eq!(sink.last_endpoint_elapsed_ms(), Some(8 * TICK_MS));
}
