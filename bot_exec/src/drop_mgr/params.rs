//! Parameters structure for DropMgr

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::mech::MAX_POWER;
use serde::{Deserialize, Serialize};

use super::DropMgrError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the drop off macro.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    // ---- TRAY ----

    /// Tray power on the first cycle of the macro.
    pub tray_start_power: i32,

    /// Amount the tray power drops each cycle.
    pub tray_power_step: i32,

    /// The tray is raised while the power is at or above this.
    pub tray_min_power: i32,

    // ---- TIMINGS ----

    /// Units: milliseconds
    pub settle_time_ms: u64,

    /// Units: milliseconds
    pub bump_forward_time_ms: u64,

    /// Units: milliseconds
    pub bump_back_time_ms: u64,

    /// Units: milliseconds
    pub pause_time_ms: u64,

    /// Units: milliseconds
    pub retreat_time_ms: u64,

    // ---- POWERS ----

    /// Drive power of both bumps.
    pub bump_power: i32,

    /// Reverse drive power while retreating.
    pub retreat_drive_power: i32,

    /// Roller power while retreating, positive rolls cubes out.
    pub retreat_roller_power: i32,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            tray_start_power: 127,
            tray_power_step: 2,
            tray_min_power: 30,
            settle_time_ms: 2000,
            bump_forward_time_ms: 200,
            bump_back_time_ms: 200,
            pause_time_ms: 2000,
            retreat_time_ms: 700,
            bump_power: 60,
            retreat_drive_power: 70,
            retreat_roller_power: 80,
        }
    }
}

impl Params {
    /// Determines if the parameters are valid.
    pub fn are_valid(&self) -> Result<(), DropMgrError> {
        if self.tray_power_step <= 0 {
            return Err(DropMgrError::InvalidParams(format!(
                "tray_power_step must be positive, found {}",
                self.tray_power_step
            )));
        }

        if self.tray_min_power > self.tray_start_power {
            return Err(DropMgrError::InvalidParams(format!(
                "tray_min_power ({}) must not be above tray_start_power ({})",
                self.tray_min_power, self.tray_start_power
            )));
        }

        let powers = [
            self.tray_start_power,
            self.bump_power,
            self.retreat_drive_power,
            self.retreat_roller_power,
        ];
        if powers.iter().any(|p| *p < 0 || *p > MAX_POWER) {
            return Err(DropMgrError::InvalidParams(format!(
                "Macro powers must be between 0 and {}",
                MAX_POWER
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_params_validity() {
        assert!(Params::default().are_valid().is_ok());

        let mut p = Params::default();
        p.tray_power_step = 0;
        assert!(p.are_valid().is_err());

        let mut p = Params::default();
        p.tray_min_power = 128;
        assert!(p.are_valid().is_err());
    }
}
