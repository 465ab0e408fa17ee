//! # Intake control module
//!
//! Drives the two rollers which pull cubes in and the tray which tips the stack upright.
//!
//! Pushing the tray up at full power topples the stack, while at low power the motor stalls, so
//! while the tray is held up it is pulsed: one cycle at full power followed by a number of cycles
//! at the slow power. The position in this pattern is kept between presses.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during IntakeCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum IntakeCtrlError {
    #[error("Failed to load IntakeCtrl parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("IntakeCtrl parameters are invalid: {0}")]
    InvalidParams(String),
}
