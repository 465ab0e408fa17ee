//! # Light signalling module
//!
//! The debug button drives the debug actuator while it is held, and when it is released writes a
//! frame of zero bits to the addressable light strip to clear it.
//!
//! This module only decides when a frame is due and what it looks like. Writing the frame out is
//! done by a [`SignalEmitter`], either on real hardware through [`PinEmitter`] or to the log
//! through [`LogEmitter`].

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod emitter;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use emitter::*;
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during LightSig operation.
#[derive(Debug, thiserror::Error)]
pub enum LightSigError {
    #[error("Failed to load LightSig parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("LightSig parameters are invalid: {0}")]
    InvalidParams(String),
}
