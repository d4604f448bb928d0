//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production), filtered by the build-time
//! diagnostics verbosity.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::diagnostics::Verbosity;

/// Adapter that logs every permitted [`AppEvent`] to the serial console.
pub struct LogEventSink {
    verbosity: Verbosity,
}

impl LogEventSink {
    /// Use the verbosity selected at build time.
    pub fn new() -> Self {
        Self {
            verbosity: Verbosity::from_build(),
        }
    }

    /// Explicit verbosity, for tests.
    pub fn with_verbosity(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        if !self.verbosity.allows(event) {
            return;
        }

        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::RailChecked { rail, volts, ok } => {
                if *ok {
                    info!("RAIL  | {} at {:.2} V — OK", rail, volts);
                } else {
                    warn!("RAIL  | {} at {:.2} V — LOW", rail, volts);
                }
            }
            AppEvent::BaselineCalibrated { baseline, samples } => {
                info!("CALIB | baseline={} ({} samples)", baseline, samples);
            }
            AppEvent::RunStarted { light_raw } => {
                info!("RUN   | started, light={}", light_raw);
            }
            AppEvent::RunAborted => {
                info!("RUN   | aborted by switch");
            }
            AppEvent::EndpointReached {
                elapsed_ms,
                light_raw,
                threshold,
            } => {
                info!(
                    "RUN   | endpoint: light={} < {} after {} ms",
                    light_raw, threshold, elapsed_ms
                );
            }
            AppEvent::LightLevel { raw, threshold } => {
                info!("LIGHT | {} (threshold {})", raw, threshold);
            }
        }
    }
}
