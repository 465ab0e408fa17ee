//! Parameters structure for IntakeCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::mech::MAX_POWER;
use serde::{Deserialize, Serialize};

use super::IntakeCtrlError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for intake control.
///
/// Roller powers are given as positive magnitudes, the module applies the signs for each side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Roller power when pulling cubes in.
    pub roller_in_power: i32,

    /// Roller power when releasing cubes, slower for precise placement.
    pub roller_out_power: i32,

    /// Roller power while the backup override is held.
    pub backup_roller_power: i32,

    /// Tray power on the first cycle of each pulse.
    pub tray_full_power: i32,

    /// Tray power on the remaining cycles of each pulse.
    pub tray_slow_power: i32,

    /// Number of slow cycles following each full power cycle.
    pub tray_slow_cycles: u32,

    /// Tray power when lowering.
    pub tray_down_power: i32,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            roller_in_power: 127,
            roller_out_power: 60,
            backup_roller_power: 80,
            tray_full_power: 127,
            tray_slow_power: 40,
            tray_slow_cycles: 3,
            tray_down_power: 127,
        }
    }
}

impl Params {
    /// Determines if the parameters are valid.
    pub fn are_valid(&self) -> Result<(), IntakeCtrlError> {
        let powers = [
            ("roller_in_power", self.roller_in_power),
            ("roller_out_power", self.roller_out_power),
            ("backup_roller_power", self.backup_roller_power),
            ("tray_full_power", self.tray_full_power),
            ("tray_slow_power", self.tray_slow_power),
            ("tray_down_power", self.tray_down_power),
        ];

        for (name, power) in powers.iter() {
            if *power < 0 || *power > MAX_POWER {
                return Err(IntakeCtrlError::InvalidParams(format!(
                    "{} must be between 0 and {}, found {}",
                    name, MAX_POWER, power
                )));
            }
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
        p.roller_out_power = -60;
        assert!(p.are_valid().is_err());
    }
}
