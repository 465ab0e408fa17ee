//! Implementations for the DriveCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use super::{DriveCtrlError, Params};
use comms_if::eqpt::mech::{clamp_power, ActId, MechDems};
use util::{maths::deadband, module::State, params, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Drive control module state
#[derive(Default)]
pub struct DriveCtrl {
    pub(crate) params: Params,

    pub(crate) report: StatusReport,
}

/// Input data to drive control.
#[derive(Default, Debug, Clone, Copy)]
pub struct InputData {
    /// Forward axis, positive forwards.
    pub forward: i32,

    /// Turn axis, positive to the right.
    pub turn: i32,

    /// Reverse at the backup speed instead of following the axes.
    pub backup: bool,

    /// Left and right powers which replace everything else, if any.
    pub override_lr: Option<(i32, i32)>,
}

/// Status report for DriveCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    /// Power of the left side, positive forwards
    pub left: i32,

    /// Power of the right side, positive forwards, before the motor inversion
    pub right: i32,

    pub backup: bool,
    pub overridden: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for DriveCtrl {
    type InitData = &'static str;
    type InitError = DriveCtrlError;

    type InputData = InputData;
    type OutputData = MechDems;
    type StatusReport = StatusReport;
    type ProcError = DriveCtrlError;

    /// Initialise the DriveCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session) 
        -> Result<(), Self::InitError> 
    {
        let params: Params = params::load(init_data)
            .map_err(DriveCtrlError::ParamLoadError)?;

        *self = Self::with_params(params)?;

        Ok(())
    }

    /// Perform cyclic processing of drive control.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> 
    {
        self.report = StatusReport::default();

        let (left, right) = match input_data.override_lr {
            Some(lr) => {
                self.report.overridden = true;
                lr
            }
            None if input_data.backup => {
                self.report.backup = true;
                (-self.params.backup_speed, -self.params.backup_speed)
            }
            None => self.mix(input_data.forward, input_data.turn),
        };

        let left = clamp_power(left);
        let right = clamp_power(right);

        trace!("DriveCtrl left {}, right {}", left, right);

        self.report.left = left;
        self.report.right = right;

        Ok((Self::side_dems(left, right), self.report))
    }
}

impl DriveCtrl {
    /// Create the module from already loaded parameters.
    pub fn with_params(params: Params) -> Result<Self, DriveCtrlError> {
        params.are_valid()?;

        Ok(Self {
            params,
            ..Default::default()
        })
    }

    /// Arcade mix of the two axes into left and right powers.
    fn mix(&self, forward: i32, turn: i32) -> (i32, i32) {
        let forward = clamp_power(forward);
        let turn = clamp_power(turn);

        // Truncated towards zero
        let turn = (turn as f64 / self.params.turn_scale) as i32;

        let forward = deadband(forward, self.params.deadband);
        let turn = deadband(turn, self.params.deadband);

        (forward + turn, forward - turn)
    }

    /// Demands for all drive motors given the left and right side powers.
    pub fn side_dems(left: i32, right: i32) -> MechDems {
        let mut dems = MechDems::empty();

        for id in ActId::left_drv_ids().iter() {
            dems.set(*id, left);
        }

        // Right hand motors are mounted facing the other way
        for id in ActId::right_drv_ids().iter() {
            dems.set(*id, -right);
        }

        dems
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
