//! # Arm control module
//!
//! Holds the arm at a target position set by the operator. The raise and lower buttons move the
//! target rather than the motors, and each cycle the arm motors are driven to bring the measured
//! potentiometer position towards the target.
//!
//! Two ways of deriving the motor power are available, selected by `Params::strategy`:
//!
//! - [`PowerStrategy::Proportional`] - power proportional to the position error, recomputed from
//!   scratch each cycle.
//! - [`PowerStrategy::Incremental`] - power is kept between cycles and stepped towards the target
//!   by an amount which depends on how far away the arm is.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;
mod strategy;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use state::*;
pub use strategy::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during ArmCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum ArmCtrlError {
    #[error("Failed to load ArmCtrl parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("ArmCtrl parameters are invalid: {0}")]
    InvalidParams(String),

    #[error("Could not open the ArmCtrl archive: {0}")]
    ArchiveError(util::archive::ArchiveError),

    #[error("Could not create the ArmCtrl archive directory: {0}")]
    SessionError(util::session::SessionError),
}
