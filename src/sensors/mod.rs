//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces a [`SensorSnapshot`] each
//! control cycle that gets written into `RunContext.sensors`.  The power
//! rails are also owned here but sampled only during the startup sequence.

pub mod light;
pub mod power;
pub mod switch;

use crate::fsm::context::SensorSnapshot;
use light::LightSensor;
use power::{PowerRails, Rail};
use switch::StartSwitch;

/// Aggregates all sensor drivers and produces a unified snapshot.
pub struct SensorHub {
    pub light: LightSensor,
    pub switch: StartSwitch,
    pub rails: PowerRails,
}

impl SensorHub {
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(light: LightSensor, switch: StartSwitch, rails: PowerRails) -> Self {
        Self { light, switch, rails }
    }

    /// Read the per-cycle inputs: start switch level and optical sensor.
    /// Both reads are synchronous and instantaneous relative to the loop
    /// cadence; neither is filtered.
    pub fn read_all(&mut self) -> SensorSnapshot {
        SensorSnapshot {
            switch_on: self.switch.read(),
            light_raw: self.light.read_raw(),
        }
    }

    /// One-shot startup rail sample.
    pub fn read_rail_raw(&mut self, rail: Rail) -> u16 {
        self.rails.read_raw(rail)
    }
}
