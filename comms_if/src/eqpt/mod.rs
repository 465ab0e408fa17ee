//! # Equipment Interface
//!
//! This module defines the interface structures which are sent to equipment drivers.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Motor demands
pub mod mech;

/// Light signal patterns
pub mod light;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use mech::{ActId, MechDems, MAX_POWER, MIN_POWER};
pub use light::{Level, Pulse, SignalPattern};
