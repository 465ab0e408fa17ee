//! # Drive control module
//!
//! Arcade mix of the operator's forward and turn axes into left and right drive powers. The right
//! hand motors face the opposite way to the left hand ones, so their demands are inverted here and
//! nowhere else.
//!
//! Two sources can take over the drive for a cycle:
//!
//! - The backup override, which reverses the bot at a fixed speed.
//! - An external override (the drop off macro), which supplies the left and right powers directly.

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

/// Possible errors that can occur during DriveCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum DriveCtrlError {
    #[error("Failed to load DriveCtrl parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("DriveCtrl parameters are invalid: {0}")]
    InvalidParams(String),
}
