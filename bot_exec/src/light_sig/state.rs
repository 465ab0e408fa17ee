//! Implementations for the LightSig state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::Serialize;

// Internal
use super::{LightSigError, Params};
use comms_if::eqpt::{
    light::SignalPattern,
    mech::{ActId, MechDems},
};
use util::{module::State, params, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Light signalling module state
#[derive(Default)]
pub struct LightSig {
    pub(crate) params: Params,

    pub(crate) report: StatusReport,

    /// The debug button was held on the last cycle
    latched: bool,
}

/// Input data to light signalling.
#[derive(Default, Debug, Clone, Copy)]
pub struct InputData {
    pub debug_held: bool,
}

/// Output of light signalling.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputData {
    /// Demand for the debug actuator
    pub dems: MechDems,

    /// Frame to write to the light, if one is due this cycle
    pub frame: Option<SignalPattern>,
}

/// Status report for LightSig processing.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    pub latched: bool,
    pub frame_due: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for LightSig {
    type InitData = &'static str;
    type InitError = LightSigError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = LightSigError;

    /// Initialise the LightSig module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session) 
        -> Result<(), Self::InitError> 
    {
        let params: Params = params::load(init_data)
            .map_err(LightSigError::ParamLoadError)?;

        *self = Self::with_params(params)?;

        Ok(())
    }

    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> 
    {
        self.report = StatusReport::default();

        let mut frame = None;

        if !self.latched && input_data.debug_held {
            debug!("Debug button pressed");
            self.latched = true;
        } else if self.latched && !input_data.debug_held {
            debug!("Debug button released, writing light frame");
            self.latched = false;
            frame = Some(self.params.frame());
        }

        let mut dems = MechDems::empty();
        dems.set(
            ActId::Debug,
            if self.latched { self.params.debug_power } else { 0 },
        );

        self.report.latched = self.latched;
        self.report.frame_due = frame.is_some();

        Ok((OutputData { dems, frame }, self.report))
    }
}

impl LightSig {
    /// Create the module from already loaded parameters.
    pub fn with_params(params: Params) -> Result<Self, LightSigError> {
        params.are_valid()?;

        Ok(Self {
            params,
            ..Default::default()
        })
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn held(debug_held: bool) -> InputData {
        InputData { debug_held }
    }

    #[test]
    fn test_press_and_release() {
        let mut sig = LightSig::with_params(Params::default()).unwrap();

        let (out, rpt) = sig.proc(&held(false)).unwrap();
        assert_eq!(out.dems.get(ActId::Debug), 0);
        assert!(out.frame.is_none());
        assert!(!rpt.latched);

        // Press and hold, the actuator is driven without a frame
        for _ in 0..3 {
            let (out, rpt) = sig.proc(&held(true)).unwrap();
            assert_eq!(out.dems.get(ActId::Debug), 127);
            assert!(out.frame.is_none());
            assert!(rpt.latched);
        }

        // Release, exactly one frame
        let (out, rpt) = sig.proc(&held(false)).unwrap();
        assert_eq!(out.dems.get(ActId::Debug), 0);
        assert!(rpt.frame_due);
        assert_eq!(out.frame.map(|f| f.len()), Some(1 + 1 + 96 + 1));

        let (out, _) = sig.proc(&held(false)).unwrap();
        assert!(out.frame.is_none());
    }

    #[test]
    fn test_invalid_params() {
        let p = Params {
            num_bits: 0,
            ..Params::default()
        };
        assert!(LightSig::with_params(p).is_err());
    }
}
