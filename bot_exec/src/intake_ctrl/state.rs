//! Implementations for the IntakeCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use super::{IntakeCtrlError, Params};
use comms_if::eqpt::mech::{ActId, MechDems};
use util::{module::State, params, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Intake control module state
#[derive(Default)]
pub struct IntakeCtrl {
    pub(crate) params: Params,

    pub(crate) report: StatusReport,

    /// Position in the tray pulse pattern, 0 is the full power cycle.
    pub(crate) tray_counter: u32,
}

/// Input data to intake control.
#[derive(Default, Debug, Clone, Copy)]
pub struct InputData {
    pub roller_in: bool,
    pub roller_out: bool,

    pub tray_up: bool,
    pub tray_down: bool,

    /// Roll cubes out at the backup power, takes precedence over the roller buttons.
    pub backup: bool,

    /// Demands which replace the operator's, if any.
    pub override_dems: Option<IntakeOverride>,
}

/// Intake demands supplied from outside the module.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct IntakeOverride {
    /// Tray power, positive raises the tray.
    pub tray: i32,

    /// Roller power, positive rolls cubes out.
    pub roller_out: i32,
}

/// Status report for IntakeCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    pub tray: i32,

    /// Roller power, positive rolls cubes out
    pub roller_out: i32,

    pub tray_counter: u32,
    pub overridden: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for IntakeCtrl {
    type InitData = &'static str;
    type InitError = IntakeCtrlError;

    type InputData = InputData;
    type OutputData = MechDems;
    type StatusReport = StatusReport;
    type ProcError = IntakeCtrlError;

    /// Initialise the IntakeCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session) 
        -> Result<(), Self::InitError> 
    {
        let params: Params = params::load(init_data)
            .map_err(IntakeCtrlError::ParamLoadError)?;

        *self = Self::with_params(params)?;

        Ok(())
    }

    /// Perform cyclic processing of intake control.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> 
    {
        self.report = StatusReport::default();

        let (tray, roller_out) = match input_data.override_dems {
            Some(o) => {
                self.report.overridden = true;
                (o.tray, o.roller_out)
            }
            None => (self.tray_power(input_data), self.roller_power(input_data)),
        };

        trace!("IntakeCtrl tray {}, roller {}", tray, roller_out);

        let mut dems = MechDems::empty();
        dems.set(ActId::Tray, tray);
        dems.set(ActId::RollerRight, roller_out);
        dems.set(ActId::RollerLeft, -roller_out);

        self.report.tray = dems.get(ActId::Tray);
        self.report.roller_out = dems.get(ActId::RollerRight);
        self.report.tray_counter = self.tray_counter;

        Ok((dems, self.report))
    }
}

impl IntakeCtrl {
    /// Create the module from already loaded parameters.
    pub fn with_params(params: Params) -> Result<Self, IntakeCtrlError> {
        params.are_valid()?;

        Ok(Self {
            params,
            ..Default::default()
        })
    }

    /// Tray power for this cycle, stepping the pulse pattern if the tray is being raised.
    fn tray_power(&mut self, input_data: &InputData) -> i32 {
        if input_data.tray_up {
            if self.tray_counter == 0 {
                self.tray_counter = 1;
                self.params.tray_full_power
            } else {
                self.tray_counter += 1;
                if self.tray_counter > self.params.tray_slow_cycles {
                    self.tray_counter = 0;
                }
                self.params.tray_slow_power
            }
        } else if input_data.tray_down {
            -self.params.tray_down_power
        } else {
            0
        }
    }

    fn roller_power(&self, input_data: &InputData) -> i32 {
        if input_data.backup {
            self.params.backup_roller_power
        } else if input_data.roller_in {
            -self.params.roller_in_power
        } else if input_data.roller_out {
            self.params.roller_out_power
        } else {
            0
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn ctrl() -> IntakeCtrl {
        IntakeCtrl::with_params(Params::default()).unwrap()
    }

    fn rollers(out: &MechDems) -> (i32, i32) {
        (out.get(ActId::RollerRight), out.get(ActId::RollerLeft))
    }

    #[test]
    fn test_rollers() {
        let mut c = ctrl();

        let (out, _) = c.proc(&InputData { roller_in: true, ..Default::default() }).unwrap();
        assert_eq!(rollers(&out), (-127, 127));

        let (out, _) = c.proc(&InputData { roller_out: true, ..Default::default() }).unwrap();
        assert_eq!(rollers(&out), (60, -60));

        // In wins over out
        let (out, _) = c.proc(&InputData { 
            roller_in: true, 
            roller_out: true, 
            ..Default::default() 
        }).unwrap();
        assert_eq!(rollers(&out), (-127, 127));

        let (out, _) = c.proc(&InputData::default()).unwrap();
        assert_eq!(rollers(&out), (0, 0));
        assert_eq!(out.get(ActId::Tray), 0);
    }

    #[test]
    fn test_backup_rollers() {
        let mut c = ctrl();

        let (out, _) = c.proc(&InputData { 
            roller_in: true, 
            backup: true, 
            ..Default::default() 
        }).unwrap();
        assert_eq!(rollers(&out), (80, -80));
    }

    #[test]
    fn test_tray_duty_cycle() {
        let mut c = ctrl();
        let up = InputData { tray_up: true, ..Default::default() };

        let powers: Vec<i32> = (0..5)
            .map(|_| c.proc(&up).unwrap().0.get(ActId::Tray))
            .collect();
        assert_eq!(powers, vec![127, 40, 40, 40, 127]);

        // Release in the middle of a pulse, the pattern carries on where it was
        let (out, rpt) = c.proc(&InputData::default()).unwrap();
        assert_eq!(out.get(ActId::Tray), 0);
        assert_eq!(rpt.tray_counter, 1);

        let (out, _) = c.proc(&up).unwrap();
        assert_eq!(out.get(ActId::Tray), 40);

        let (out, _) = c.proc(&InputData { tray_down: true, ..Default::default() }).unwrap();
        assert_eq!(out.get(ActId::Tray), -127);
    }

    #[test]
    fn test_override() {
        let mut c = ctrl();

        let input = InputData {
            tray_up: true,
            roller_in: true,
            override_dems: Some(IntakeOverride { tray: 99, roller_out: 80 }),
            ..Default::default()
        };
        let (out, rpt) = c.proc(&input).unwrap();

        assert!(rpt.overridden);
        assert_eq!(out.get(ActId::Tray), 99);
        assert_eq!(rollers(&out), (80, -80));

        // The tray pattern doesn't advance while overridden
        assert_eq!(rpt.tray_counter, 0);
    }
}
