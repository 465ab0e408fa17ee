//! # Arm Simulation
//!
//! Provides a simulated arm potentiometer reading to the bot software, so the executable can be
//! run without the bot attached. The arm is modelled as a first order system: the arm's speed lags
//! behind a speed proportional to the motor power, and the position is held between the arm's
//! hard stops.
//!
//! It is to be used for testing and tuning of `arm_ctrl` rather than as a faithful model.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::trace;
use serde::{Deserialize, Serialize};

use comms_if::eqpt::mech::MAX_POWER;
use util::maths::clamp;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters of the simulated arm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmSimParams {
    /// Starting position.
    ///
    /// Units: potentiometer counts
    pub initial_pos: f64,

    /// Lowest and highest reachable positions.
    ///
    /// Units: potentiometer counts
    pub hard_stops: (f64, f64),

    /// Speed of the arm at full power once it has settled.
    ///
    /// Units: potentiometer counts/cycle
    pub full_power_speed: f64,

    /// Fraction of the difference between the current and settled speed removed each cycle,
    /// between 0 and 1.
    pub response: f64,

    /// Sign of the motor power which raises the arm.
    pub raise_sign: f64,
}

pub struct ArmSim {
    params: ArmSimParams,

    /// Units: potentiometer counts
    pos: f64,

    /// Units: potentiometer counts/cycle
    speed: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ArmSimError {
    #[error("Failed to load ArmSim parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("ArmSim parameters are invalid: {0}")]
    InvalidParams(String),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for ArmSimParams {
    fn default() -> Self {
        Self {
            initial_pos: 0.0,
            hard_stops: (0.0, 4095.0),
            full_power_speed: 40.0,
            response: 0.3,
            raise_sign: -1.0,
        }
    }
}

impl ArmSim {
    /// Create a new simulated arm from a parameter file.
    pub fn load(params_path: &str) -> Result<Self, ArmSimError> {
        let params: ArmSimParams = util::params::load(params_path)
            .map_err(ArmSimError::ParamLoadError)?;

        Self::new(params)
    }

    pub fn new(params: ArmSimParams) -> Result<Self, ArmSimError> {
        if params.hard_stops.0 >= params.hard_stops.1 {
            return Err(ArmSimError::InvalidParams(format!(
                "hard stops {:?} must be increasing",
                params.hard_stops
            )));
        }
        if params.response <= 0.0 || params.response > 1.0 {
            return Err(ArmSimError::InvalidParams(format!(
                "response must be in (0, 1], found {}",
                params.response
            )));
        }

        Ok(Self {
            pos: clamp(params.initial_pos, params.hard_stops.0, params.hard_stops.1),
            speed: 0.0,
            params,
        })
    }

    /// Potentiometer reading of the arm.
    pub fn measured(&self) -> i32 {
        self.pos.round() as i32
    }

    /// Advance the simulation by one cycle with the given arm power applied.
    pub fn step(&mut self, power: i32) {
        let p = &self.params;

        let settled_speed =
            p.raise_sign * p.full_power_speed * (power as f64 / MAX_POWER as f64);
        self.speed += p.response * (settled_speed - self.speed);

        let pos = self.pos + self.speed;
        self.pos = clamp(pos, p.hard_stops.0, p.hard_stops.1);

        // Hitting a stop kills the arm's speed
        if self.pos != pos {
            self.speed = 0.0;
        }

        trace!("ArmSim power {}, speed {:.2}, pos {:.1}", power, self.speed, self.pos);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::arm_ctrl::{self, ArmCtrl, PowerStrategy};
    use util::module::State;

    #[test]
    fn test_negative_power_raises() {
        let mut sim = ArmSim::new(ArmSimParams::default()).unwrap();

        for _ in 0..10 {
            sim.step(-127);
        }
        assert!(sim.measured() > 100);

        // Stops at the lower hard stop
        for _ in 0..100 {
            sim.step(127);
        }
        assert_eq!(sim.measured(), 0);
    }

    #[test]
    fn test_invalid_params() {
        let params = ArmSimParams {
            hard_stops: (10.0, 10.0),
            ..ArmSimParams::default()
        };
        assert!(ArmSim::new(params).is_err());
    }

    #[test]
    fn test_proportional_ctrl_reaches_target() {
        let mut sim = ArmSim::new(ArmSimParams::default()).unwrap();
        let mut ctrl = ArmCtrl::with_params(arm_ctrl::Params::default()).unwrap();

        // Raise the target for one second, then hold for three
        for i in 0..200 {
            let input = arm_ctrl::InputData {
                raise: i < 50,
                measured: sim.measured(),
                ..Default::default()
            };
            let (out, _) = ctrl.proc(&input).unwrap();
            sim.step(out.get(comms_if::eqpt::mech::ActId::ArmLeft));
        }

        assert_eq!(ctrl.target(), 1500);
        assert!((sim.measured() - 1500).abs() < 20, "arm at {}", sim.measured());
    }

    #[test]
    fn test_incremental_ctrl_stuck_in_safety_zone() {
        let mut sim = ArmSim::new(ArmSimParams::default()).unwrap();
        let mut ctrl = ArmCtrl::with_params(arm_ctrl::Params {
            strategy: PowerStrategy::Incremental,
            ..arm_ctrl::Params::default()
        })
        .unwrap();

        for _ in 0..100 {
            let input = arm_ctrl::InputData {
                raise: true,
                measured: sim.measured(),
                ..Default::default()
            };
            let (out, rpt) = ctrl.proc(&input).unwrap();
            assert!(rpt.in_safety_zone);
            sim.step(out.get(comms_if::eqpt::mech::ActId::ArmLeft));
        }

        assert_eq!(sim.measured(), 0);
    }
}
