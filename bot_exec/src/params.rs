//! # Bot Executable Parameters
//!
//! This module provide parameters for the bot executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Serialize, Deserialize};
use std::time::Duration;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotExecParams {

    /// Target period of one cycle
    ///
    /// Units: milliseconds
    pub cycle_period_ms: u64,

    /// Time the last state of an input script is held before the executable stops
    ///
    /// Units: seconds
    pub script_end_hold_s: f64,

    /// Number of consecutive cycle overruns after which the executable gives up, 0 to never give
    /// up
    pub max_consec_cycle_overruns: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for BotExecParams {
    fn default() -> Self {
        Self {
            cycle_period_ms: 20,
            script_end_hold_s: util::script_interpreter::DEFAULT_END_HOLD_S,
            max_consec_cycle_overruns: 0,
        }
    }
}

impl BotExecParams {
    pub fn cycle_period(&self) -> Duration {
        Duration::from_millis(self.cycle_period_ms)
    }
}
