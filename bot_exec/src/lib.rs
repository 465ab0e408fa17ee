//! # Bot library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to access items defined
//! inside the bot crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Arm control module - holds the arm at the operator's target position
pub mod arm_ctrl;

/// Arm simulation - provides a simulated arm potentiometer when no bot is attached
pub mod arm_sim;

/// Control cycle - processes every control module for one cycle
pub mod ctrl_cycle;

/// Global data store
pub mod data_store;

/// Drive control module - arcade mix of the joystick axes into drive motor demands
pub mod drive_ctrl;

/// Drop off manager - the stack drop off macro
pub mod drop_mgr;

/// Input processor - maps the joystick onto module inputs
pub mod input_processor;

/// Intake control module - rollers and tray
pub mod intake_ctrl;

/// Light signalling module - debug toggle and light frame
pub mod light_sig;

/// Mechanisms client - sends actuator demands to the motors
pub mod mech_client;

/// Executable parameters
pub mod params;
