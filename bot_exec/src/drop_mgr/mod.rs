//! # Drop off manager
//!
//! Runs the macro which sets a finished stack of cubes down in a scoring zone. The macro is a
//! sequence of timed stages, stepped once per cycle so the rest of the bot keeps running while it
//! executes:
//!
//! - `RaisingTray` - tip the tray upright, ramping the power down as it rises.
//! - `Settling` - wait for the stack to stop swaying.
//! - `BumpForward`, `BumpBack` - nudge the bot forwards and back to seat the stack.
//! - `Pausing` - wait again before letting go.
//! - `Retreating` - roll the cubes out while backing away from the stack.
//! - `Done` - stop everything, the manager goes idle on the next cycle.
//!
//! While the macro runs it owns the drive, rollers and tray. It can be aborted at any stage.

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

/// Possible errors that can occur during DropMgr operation.
#[derive(Debug, thiserror::Error)]
pub enum DropMgrError {
    #[error("Failed to load DropMgr parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("DropMgr parameters are invalid: {0}")]
    InvalidParams(String),
}
