//! Build-time diagnostics verbosity.
//!
//! The diagnostics channel carries a single fixed verbosity level chosen at
//! build time via cargo features (`diag-none`, `diag-light-levels`,
//! `diag-voltage`, `diag-timing`; none enabled = everything).  There is no
//! runtime configuration surface — pick the level when flashing.

use crate::app::events::AppEvent;

/// Recognized verbosity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Suppress every diagnostic.
    None,
    /// Optical readings and the calibration result only.
    LightLevelsOnly,
    /// Startup rail checks only.
    VoltageOnly,
    /// Run start/abort/endpoint timing only.
    TimingOnly,
    /// Everything, including state transitions.
    All,
}

impl Verbosity {
    /// The level selected by the enabled cargo feature.  With several
    /// enabled (a misconfigured build) the quietest wins; with none
    /// enabled everything is emitted.
    pub const fn from_build() -> Self {
        if cfg!(feature = "diag-none") {
            Self::None
        } else if cfg!(feature = "diag-light-levels") {
            Self::LightLevelsOnly
        } else if cfg!(feature = "diag-voltage") {
            Self::VoltageOnly
        } else if cfg!(feature = "diag-timing") {
            Self::TimingOnly
        } else {
            Self::All
        }
    }

    /// Pure filter: does this level let the event through?
    pub fn allows(self, event: &AppEvent) -> bool {
        match self {
            Self::None => false,
            Self::All => true,
            Self::LightLevelsOnly => matches!(
                event,
                AppEvent::LightLevel { .. } | AppEvent::BaselineCalibrated { .. }
            ),
            Self::VoltageOnly => matches!(event, AppEvent::RailChecked { .. }),
            Self::TimingOnly => matches!(
                event,
                AppEvent::RunStarted { .. } | AppEvent::RunAborted | AppEvent::EndpointReached { .. }
            ),
        }
    }
}
