//! Parameters structure for ArmCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Serialize, Deserialize};
use std::str::FromStr;

use super::ArmCtrlError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Arm control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    // ---- TARGET ----

    /// Lowest target position, the arm's calibrated lowered position.
    ///
    /// Units: potentiometer counts
    pub lower_bound: i32,

    /// Highest target position.
    ///
    /// Units: potentiometer counts
    pub upper_bound: i32,

    /// Amount the target moves on each cycle a raise or lower button is held.
    ///
    /// Units: potentiometer counts/cycle
    pub increment: i32,

    // ---- POWER ----

    /// How the motor power is derived from the position error.
    pub strategy: PowerStrategy,

    /// Sign of the motor power which raises the arm. With the motors as mounted a negative
    /// power raises the arm.
    pub raise_sign: f64,

    /// Gain of the proportional strategy.
    ///
    /// Units: power/count
    pub prop_gain: f64,

    /// Width of the safety zone above the lower bound, as a number of increments. While the
    /// measured position is in the zone the incremental strategy does not drive the arm.
    pub safety_zone_increments: i32,

    /// Step sizes of the incremental strategy, ordered by increasing error.
    pub step_tiers: Vec<StepTier>,

    /// Step size used by the incremental strategy when the error is beyond every tier.
    ///
    /// Units: power/cycle
    pub max_step: f64,

    /// Errors with a magnitude at or below this do not step the incremental strategy's power.
    ///
    /// Units: potentiometer counts
    pub dead_band: i32,
}

/// One entry of the incremental strategy's step table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepTier {
    /// The tier applies to errors strictly below this magnitude.
    ///
    /// Units: potentiometer counts
    pub below: i32,

    /// Units: power/cycle
    pub step: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerStrategy {
    /// Power proportional to the error, no memory between cycles.
    Proportional,

    /// Power is integrated between cycles in steps sized by the error.
    Incremental,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            lower_bound: 0,
            upper_bound: 4000,
            increment: 30,
            strategy: PowerStrategy::Proportional,
            raise_sign: -1.0,
            prop_gain: 0.1,
            safety_zone_increments: 3,
            step_tiers: vec![
                StepTier { below: 500, step: 0.1 },
                StepTier { below: 1500, step: 1.0 },
                StepTier { below: 2500, step: 3.0 },
            ],
            max_step: 5.0,
            dead_band: 0,
        }
    }
}

impl Params {
    /// Determines if the parameters are valid.
    pub fn are_valid(&self) -> Result<(), ArmCtrlError> {
        if self.lower_bound >= self.upper_bound {
            return Err(ArmCtrlError::InvalidParams(format!(
                "lower_bound ({}) must be below upper_bound ({})",
                self.lower_bound, self.upper_bound
            )));
        }

        if self.increment <= 0 {
            return Err(ArmCtrlError::InvalidParams(format!(
                "increment must be positive, found {}",
                self.increment
            )));
        }

        if self.raise_sign.abs() != 1.0 {
            return Err(ArmCtrlError::InvalidParams(format!(
                "raise_sign must be -1 or 1, found {}",
                self.raise_sign
            )));
        }

        if self.prop_gain < 0.0 || self.max_step < 0.0 || self.dead_band < 0 {
            return Err(ArmCtrlError::InvalidParams(String::from(
                "prop_gain, max_step and dead_band must not be negative"
            )));
        }

        if self.safety_zone_increments < 0 {
            return Err(ArmCtrlError::InvalidParams(String::from(
                "safety_zone_increments must not be negative"
            )));
        }

        let mut last_below = 0;
        for tier in self.step_tiers.iter() {
            if tier.below <= last_below || tier.step < 0.0 {
                return Err(ArmCtrlError::InvalidParams(format!(
                    "step tiers must have strictly increasing positive bounds and non-negative \
                    steps, found {:?}",
                    tier
                )));
            }
            last_below = tier.below;
        }

        Ok(())
    }

    /// Lowest measured position which is outside the safety zone.
    pub fn safety_zone_top(&self) -> i32 {
        self.lower_bound + self.safety_zone_increments * self.increment
    }
}

impl FromStr for PowerStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "proportional" | "prop" | "a" => Ok(PowerStrategy::Proportional),
            "incremental" | "inc" | "b" => Ok(PowerStrategy::Incremental),
            _ => Err(format!(
                "{} is not a power strategy, expected proportional or incremental", s
            )),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_params_valid() {
        assert!(Params::default().are_valid().is_ok());
        assert_eq!(Params::default().safety_zone_top(), 90);
    }

    #[test]
    fn test_invalid_params() {
        let mut p = Params::default();
        p.upper_bound = p.lower_bound;
        assert!(p.are_valid().is_err());

        let mut p = Params::default();
        p.increment = 0;
        assert!(p.are_valid().is_err());

        let mut p = Params::default();
        p.step_tiers[1].below = 400;
        assert!(p.are_valid().is_err());

        let mut p = Params::default();
        p.raise_sign = 0.5;
        assert!(p.are_valid().is_err());
    }

    #[test]
    fn test_parse_toml() {
        let p: Params = util::params::from_str(
            r#"
            lower_bound = 0
            upper_bound = 4000
            increment = 30
            strategy = "incremental"
            raise_sign = -1.0
            prop_gain = 0.1
            safety_zone_increments = 3
            max_step = 5.0
            dead_band = 0

            [[step_tiers]]
            below = 500
            step = 0.1

            [[step_tiers]]
            below = 1500
            step = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(p.strategy, PowerStrategy::Incremental);
        assert_eq!(p.step_tiers.len(), 2);
        assert!(p.are_valid().is_ok());
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("Incremental".parse::<PowerStrategy>(), Ok(PowerStrategy::Incremental));
        assert_eq!("prop".parse::<PowerStrategy>(), Ok(PowerStrategy::Proportional));
        assert!("pid".parse::<PowerStrategy>().is_err());
    }
}
