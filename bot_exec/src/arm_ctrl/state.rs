//! Implementations for the ArmCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};
use serde::Serialize;

// Internal
use super::{
    adjust_target, incremental_power, proportional_power, reset_target, to_demand, ArmCtrlError,
    Params, PowerStrategy,
};
use comms_if::eqpt::mech::{ActId, MechDems};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    module::State,
    params,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Arm control module state
#[derive(Default)]
pub struct ArmCtrl {
    pub(crate) params: Params,

    pub(crate) report: StatusReport,
    arch_report: Archiver,

    /// Position the arm is being driven to.
    ///
    /// Units: potentiometer counts
    pub(crate) target: i32,

    /// Power calculated on the last cycle, before truncation.
    pub(crate) power: f64,
}

/// Input data to Arm Control.
#[derive(Default, Debug, Clone, Copy)]
pub struct InputData {
    /// Move the target up by one increment
    pub raise: bool,

    /// Move the target down by one increment
    pub lower: bool,

    /// Return the target to the lower bound
    pub reset: bool,

    /// Potentiometer reading of the arm on this cycle.
    ///
    /// Units: potentiometer counts
    pub measured: i32,

    /// Ignore the raise, lower and reset requests and keep the current target
    pub hold_target: bool,
}

/// Status report for ArmCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    pub target: i32,
    pub measured: i32,

    /// Power demanded of both arm motors
    pub power: i32,

    /// The measured position is too low for the incremental strategy to drive the arm
    pub in_safety_zone: bool,

    /// A raise or lower request was clipped by the target bounds
    pub target_limited: bool,
}

#[derive(Serialize)]
struct ArchRecord {
    cycle: u64,
    target: i32,
    measured: i32,
    power: i32,
    in_safety_zone: bool,
    target_limited: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for ArmCtrl {
    type InitData = &'static str;
    type InitError = ArmCtrlError;

    type InputData = InputData;
    type OutputData = MechDems;
    type StatusReport = StatusReport;
    type ProcError = ArmCtrlError;

    /// Initialise the ArmCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, session: &Session) 
        -> Result<(), Self::InitError> 
    {
        let params: Params = params::load(init_data)
            .map_err(ArmCtrlError::ParamLoadError)?;

        *self = Self::with_params(params)?;

        session.arch_dir("arm_ctrl").map_err(ArmCtrlError::SessionError)?;
        self.arch_report = Archiver::from_path(session, "arm_ctrl/status_report.csv")
            .map_err(ArmCtrlError::ArchiveError)?;

        Ok(())
    }

    /// Perform cyclic processing of Arm Control.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> 
    {
        self.report = StatusReport::default();

        // ---- TARGET ----

        if !input_data.hold_target {
            let p = &self.params;
            let target = adjust_target(
                self.target,
                input_data.raise,
                input_data.lower,
                p.increment,
                p.lower_bound,
                p.upper_bound,
            );

            // Limited if the target didn't move by a full increment
            self.report.target_limited = (input_data.raise || input_data.lower)
                && (target - self.target).abs() != p.increment;

            let target = reset_target(target, input_data.reset, p.lower_bound);

            if target != self.target {
                trace!("ArmCtrl target {} -> {}", self.target, target);
            }
            if input_data.reset && self.target != p.lower_bound {
                debug!("ArmCtrl target reset to {}", p.lower_bound);
            }

            self.target = target;
        }

        // ---- POWER ----

        match self.params.strategy {
            PowerStrategy::Proportional => {
                self.power = proportional_power(self.target, input_data.measured, &self.params);
            }
            PowerStrategy::Incremental => {
                let (power, in_zone) = incremental_power(
                    self.power,
                    self.target,
                    input_data.measured,
                    &self.params,
                );
                self.power = power;
                self.report.in_safety_zone = in_zone;
            }
        }

        let demand = to_demand(self.power);

        self.report.target = self.target;
        self.report.measured = input_data.measured;
        self.report.power = demand;

        let mut output = MechDems::empty();
        for id in ActId::arm_ids().iter() {
            output.set(*id, demand);
        }

        Ok((output, self.report))
    }
}

impl Archived for ArmCtrl {
    fn write(&mut self, cycle: u64) -> Result<(), ArchiveError> {
        self.arch_report.serialise(ArchRecord {
            cycle,
            target: self.report.target,
            measured: self.report.measured,
            power: self.report.power,
            in_safety_zone: self.report.in_safety_zone,
            target_limited: self.report.target_limited,
        })
    }
}

impl ArmCtrl {
    /// Create a controller from already loaded parameters, without archiving.
    ///
    /// The target starts at the lower bound.
    pub fn with_params(params: Params) -> Result<Self, ArmCtrlError> {
        params.are_valid()?;

        Ok(Self {
            target: params.lower_bound,
            params,
            ..Default::default()
        })
    }

    /// Current target position.
    pub fn target(&self) -> i32 {
        self.target
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Change the power strategy, clearing the power carried between cycles.
    pub fn set_strategy(&mut self, strategy: PowerStrategy) {
        self.params.strategy = strategy;
        self.power = 0.0;
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn raise(measured: i32) -> InputData {
        InputData {
            raise: true,
            measured,
            ..Default::default()
        }
    }

    fn idle(measured: i32) -> InputData {
        InputData {
            measured,
            ..Default::default()
        }
    }

    #[test]
    fn test_proportional_cycle() {
        let mut ctrl = ArmCtrl::with_params(Params::default()).unwrap();

        let (out, rpt) = ctrl.proc(&raise(0)).unwrap();
        assert_eq!(rpt.target, 30);
        assert_eq!(rpt.power, -3);
        assert_eq!(out.get(ActId::ArmLeft), -3);
        assert_eq!(out.get(ActId::ArmRight), -3);
        assert!(!out.contains(ActId::DrvLeftFront));

        // Target reached, no power
        let (_, rpt) = ctrl.proc(&idle(30)).unwrap();
        assert_eq!(rpt.power, 0);
    }

    #[test]
    fn test_target_at_1000() {
        let mut ctrl = ArmCtrl::with_params(Params::default()).unwrap();
        ctrl.target = 1000;

        let (out, rpt) = ctrl.proc(&idle(0)).unwrap();
        assert_eq!(rpt.power, -100);
        assert_eq!(out.get(ActId::ArmLeft), out.get(ActId::ArmRight));
    }

    #[test]
    fn test_target_saturates() {
        let mut ctrl = ArmCtrl::with_params(Params::default()).unwrap();

        for _ in 0..200 {
            let (_, rpt) = ctrl.proc(&raise(0)).unwrap();
            assert!(rpt.power >= -127 && rpt.power <= 127);
        }
        assert_eq!(ctrl.target(), 4000);

        let (_, rpt) = ctrl.proc(&raise(0)).unwrap();
        assert!(rpt.target_limited);
        assert_eq!(rpt.power, -127);

        // Lowering from the bottom is limited as well
        let mut ctrl = ArmCtrl::with_params(Params::default()).unwrap();
        let input = InputData {
            lower: true,
            ..Default::default()
        };
        let (_, rpt) = ctrl.proc(&input).unwrap();
        assert_eq!(rpt.target, 0);
        assert!(rpt.target_limited);
    }

    #[test]
    fn test_reset_wins_over_raise() {
        let mut ctrl = ArmCtrl::with_params(Params::default()).unwrap();
        ctrl.target = 2000;

        let input = InputData {
            raise: true,
            reset: true,
            measured: 2000,
            ..Default::default()
        };
        let (_, rpt) = ctrl.proc(&input).unwrap();

        assert_eq!(rpt.target, 0);
        assert_eq!(rpt.power, 127);
    }

    #[test]
    fn test_hold_target() {
        let mut ctrl = ArmCtrl::with_params(Params::default()).unwrap();
        ctrl.target = 600;

        let input = InputData {
            raise: true,
            reset: true,
            measured: 500,
            hold_target: true,
            ..Default::default()
        };
        let (_, rpt) = ctrl.proc(&input).unwrap();

        assert_eq!(rpt.target, 600);
        assert_eq!(rpt.power, -10);
    }

    #[test]
    fn test_incremental_cycle() {
        let mut ctrl = ArmCtrl::with_params(Params {
            strategy: PowerStrategy::Incremental,
            ..Params::default()
        })
        .unwrap();
        ctrl.target = 3000;

        // In the safety zone nothing is driven
        let (_, rpt) = ctrl.proc(&idle(50)).unwrap();
        assert!(rpt.in_safety_zone);
        assert_eq!(rpt.power, 0);

        // Power builds up over several cycles
        for _ in 0..4 {
            ctrl.proc(&idle(200)).unwrap();
        }
        let (out, rpt) = ctrl.proc(&idle(200)).unwrap();
        assert!(!rpt.in_safety_zone);
        assert_eq!(rpt.power, -25);
        assert_eq!(out.get(ActId::ArmRight), -25);

        // Switching strategy clears the carried power
        ctrl.set_strategy(PowerStrategy::Proportional);
        ctrl.set_strategy(PowerStrategy::Incremental);
        let (_, rpt) = ctrl.proc(&idle(200)).unwrap();
        assert_eq!(rpt.power, -5);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let p = Params {
            increment: -1,
            ..Params::default()
        };
        assert!(ArmCtrl::with_params(p).is_err());
    }

    #[test]
    fn test_write_without_session() {
        let mut ctrl = ArmCtrl::with_params(Params::default()).unwrap();
        ctrl.proc(&idle(0)).unwrap();
        assert!(ctrl.write(1).is_ok());
    }
}
