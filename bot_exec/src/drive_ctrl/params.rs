//! Parameters structure for DriveCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::mech::MAX_POWER;
use serde::{Deserialize, Serialize};

use super::DriveCtrlError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for drive control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// The turn axis is divided by this to make turning less sensitive.
    pub turn_scale: f64,

    /// Axis values strictly inside `(-deadband, deadband)` are treated as zero, to remove stick
    /// drift.
    pub deadband: i32,

    /// Power the drive reverses at while the backup override is held.
    pub backup_speed: i32,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            turn_scale: 1.4,
            deadband: 15,
            backup_speed: 70,
        }
    }
}

impl Params {
    /// Determines if the parameters are valid.
    pub fn are_valid(&self) -> Result<(), DriveCtrlError> {
        if !(self.turn_scale > 0.0) {
            return Err(DriveCtrlError::InvalidParams(format!(
                "turn_scale must be positive, found {}",
                self.turn_scale
            )));
        }

        if self.deadband < 0 {
            return Err(DriveCtrlError::InvalidParams(format!(
                "deadband must not be negative, found {}",
                self.deadband
            )));
        }

        if self.backup_speed < 0 || self.backup_speed > MAX_POWER {
            return Err(DriveCtrlError::InvalidParams(format!(
                "backup_speed must be between 0 and {}, found {}",
                MAX_POWER, self.backup_speed
            )));
        }

        Ok(())
    }
}
