//! Mock hardware adapter for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO/PWM registers.  The drive model also
//! tracks *effective* side effects: `arm_count` / `release_count` only move
//! when the engage/disengage actually changes the drive posture, mirroring
//! the idempotence contract of the real drive train.

use std::collections::VecDeque;

use chemcar::app::events::AppEvent;
use chemcar::app::ports::{ActuatorPort, EventSink, SensorPort};
use chemcar::fsm::context::SensorSnapshot;
use chemcar::sensors::power::Rail;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    EngageDrive,
    DisengageDrive,
    StartStirrer { duty: u8 },
    SetIndicator { rail: Rail, ok: bool },
    SetLamp { on: bool },
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,

    // Scripted sensor inputs
    pub switch_on: bool,
    /// Per-read light script; the last value repeats once exhausted.
    pub light_script: VecDeque<u16>,
    last_light: u16,
    pub battery_raw: u16,
    pub fuelcell_raw: u16,

    // Effective drive model
    engaged: bool,
    pub arm_count: u32,
    pub release_count: u32,

    pub stirrer_duty: Option<u8>,
    pub lamp_on: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            switch_on: false,
            light_script: VecDeque::new(),
            last_light: 4095,
            battery_raw: 4095,
            fuelcell_raw: 4095,
            engaged: false,
            arm_count: 0,
            release_count: 0,
            stirrer_duty: None,
            lamp_on: false,
        }
    }

    pub fn script_light<I: IntoIterator<Item = u16>>(&mut self, values: I) {
        self.light_script.extend(values);
    }

    pub fn set_light(&mut self, raw: u16) {
        self.light_script.clear();
        self.last_light = raw;
    }

    fn next_light(&mut self) -> u16 {
        if let Some(v) = self.light_script.pop_front() {
            self.last_light = v;
        }
        self.last_light
    }

    pub fn drive_engaged(&self) -> bool {
        self.engaged
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

// ── SensorPort ────────────────────────────────────────────────

impl SensorPort for MockHardware {
    fn read_all(&mut self) -> SensorSnapshot {
        SensorSnapshot {
            switch_on: self.switch_on,
            light_raw: self.next_light(),
        }
    }

    fn read_light_raw(&mut self) -> u16 {
        self.next_light()
    }

    fn read_rail_raw(&mut self, rail: Rail) -> u16 {
        match rail {
            Rail::Battery => self.battery_raw,
            Rail::FuelCell => self.fuelcell_raw,
        }
    }
}

// ── ActuatorPort ──────────────────────────────────────────────

impl ActuatorPort for MockHardware {
    fn engage_drive(&mut self) {
        self.calls.push(ActuatorCall::EngageDrive);
        if !self.engaged {
            self.engaged = true;
            self.arm_count += 1;
        }
    }

    fn disengage_drive(&mut self) {
        self.calls.push(ActuatorCall::DisengageDrive);
        if self.engaged {
            self.engaged = false;
            self.release_count += 1;
        }
    }

    fn is_drive_engaged(&self) -> bool {
        self.engaged
    }

    fn start_stirrer(&mut self, duty_percent: u8) {
        self.calls.push(ActuatorCall::StartStirrer { duty: duty_percent });
        self.stirrer_duty = Some(duty_percent);
    }

    fn set_health_indicator(&mut self, rail: Rail, ok: bool) {
        self.calls.push(ActuatorCall::SetIndicator { rail, ok });
    }

    fn set_sensor_lamp(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetLamp { on });
        self.lamp_on = on;
    }
}

// ── Recording event sink ──────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count_aborted(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::RunAborted))
            .count()
    }

    pub fn count_endpoint(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::EndpointReached { .. }))
            .count()
    }

    pub fn last_endpoint_elapsed_ms(&self) -> Option<u64> {
        self.events.iter().rev().find_map(|e| match e {
            AppEvent::EndpointReached { elapsed_ms, .. } => Some(*elapsed_ms),
            _ => None,
        })
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── No-op delay (init-phase delays compressed to zero) ────────

pub struct NoopDelay;

impl embedded_hal::delay::DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
