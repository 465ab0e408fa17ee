//! # Communications interface crate.
//!
//! Provides the interface types shared between the bot executable and the things around it: the
//! operator's joystick, the actuators, and the signalling light.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Operator joystick state
pub mod joy;

/// Demand and pattern definitions for equipment (motors, light)
pub mod eqpt;
