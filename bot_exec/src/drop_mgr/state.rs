//! Implementations for the DropMgr state machine

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, trace, warn};
use serde::Serialize;
use std::fmt::Display;
use std::time::Duration;

// Internal
use super::{DropMgrError, Params};
use util::{module::State, params, session::Session, time::cycles_for};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Cycle period used until the manager is initialised.
const DEFAULT_CYCLE_PERIOD: Duration = Duration::from_millis(20);

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Drop off manager
pub struct DropMgr {
    pub(crate) params: Params,

    pub(crate) report: StatusReport,

    cycle_period: Duration,

    /// Stage of the macro being executed, `None` while idle.
    state: Option<DropState>,
}

/// Input data to the drop off manager.
#[derive(Default, Debug, Clone, Copy)]
pub struct InputData {
    /// Start the macro if idle.
    pub trigger: bool,

    /// Stop the macro and return to idle.
    pub abort: bool,
}

/// Demands made by the macro while it is running.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct MacroDems {
    /// Left and right drive power, positive forwards
    pub drive_lr: (i32, i32),

    /// Tray power, positive raises the tray
    pub tray: i32,

    /// Roller power, positive rolls cubes out
    pub roller_out: i32,
}

/// Status report for DropMgr processing.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    pub active: bool,
    pub started: bool,
    pub aborted: bool,
    pub finished: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Stages of the drop off macro.
///
/// Timed stages hold the number of cycles they have left to run, including the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropState {
    RaisingTray { power: i32 },
    Settling { remaining: u64 },
    BumpForward { remaining: u64 },
    BumpBack { remaining: u64 },
    Pausing { remaining: u64 },
    Retreating { remaining: u64 },
    Done,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for DropMgr {
    fn default() -> Self {
        Self {
            params: Params::default(),
            report: StatusReport::default(),
            cycle_period: DEFAULT_CYCLE_PERIOD,
            state: None,
        }
    }
}

impl State for DropMgr {
    /// Path to the parameter file and the cycle period of the executable
    type InitData = (&'static str, Duration);
    type InitError = DropMgrError;

    type InputData = InputData;
    type OutputData = Option<MacroDems>;
    type StatusReport = StatusReport;
    type ProcError = DropMgrError;

    fn init(&mut self, init_data: Self::InitData, _session: &Session) 
        -> Result<(), Self::InitError> 
    {
        let params: Params = params::load(init_data.0)
            .map_err(DropMgrError::ParamLoadError)?;

        *self = Self::with_params(params, init_data.1)?;

        Ok(())
    }

    /// Step the macro by one cycle.
    ///
    /// Returns the demands of the current stage, or `None` if the manager is idle and the
    /// operator is in control.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> 
    {
        self.report = StatusReport::default();

        if self.is_active() && input_data.abort {
            warn!("Drop off macro aborted");
            self.state = None;
            self.report.aborted = true;
        } else if !self.is_active() && input_data.trigger {
            info!("Drop off macro started");
            self.state = Some(DropState::RaisingTray {
                power: self.params.tray_start_power,
            });
            self.report.started = true;
        }

        let state = match self.state {
            Some(s) => s,
            None => return Ok((None, self.report)),
        };

        let dems = self.dems(&state);
        let next = self.next(&state);

        if next.map(|n| std::mem::discriminant(&n)) != Some(std::mem::discriminant(&state)) {
            match next {
                Some(n) => info!("DropMgr state change to: {}", n),
                None => {
                    info!("Drop off macro complete");
                    self.report.finished = true;
                }
            }
        }
        trace!("DropMgr {} -> {:?}", state, dems);

        self.state = next;
        self.report.active = true;

        Ok((Some(dems), self.report))
    }
}

impl DropMgr {
    /// Create the manager from already loaded parameters.
    pub fn with_params(params: Params, cycle_period: Duration) -> Result<Self, DropMgrError> {
        params.are_valid()?;

        Ok(Self {
            params,
            cycle_period,
            ..Default::default()
        })
    }

    /// Returns true if the macro is running.
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// The stage which will be executed on the next cycle.
    pub fn state(&self) -> Option<DropState> {
        self.state
    }

    /// Demands of a stage.
    fn dems(&self, state: &DropState) -> MacroDems {
        let p = &self.params;

        match *state {
            DropState::RaisingTray { power } => MacroDems {
                tray: power,
                ..Default::default()
            },
            DropState::BumpForward { .. } => MacroDems {
                drive_lr: (p.bump_power, p.bump_power),
                ..Default::default()
            },
            DropState::BumpBack { .. } => MacroDems {
                drive_lr: (-p.bump_power, -p.bump_power),
                ..Default::default()
            },
            DropState::Retreating { .. } => MacroDems {
                drive_lr: (-p.retreat_drive_power, -p.retreat_drive_power),
                roller_out: p.retreat_roller_power,
                ..Default::default()
            },
            DropState::Settling { .. } | DropState::Pausing { .. } | DropState::Done => {
                MacroDems::default()
            }
        }
    }

    /// Stage to execute after the given one has run for a cycle.
    fn next(&self, state: &DropState) -> Option<DropState> {
        let p = &self.params;

        match *state {
            DropState::RaisingTray { power } => {
                let power = power - p.tray_power_step;
                if power >= p.tray_min_power {
                    Some(DropState::RaisingTray { power })
                } else {
                    Some(DropState::Settling {
                        remaining: self.cycles(p.settle_time_ms),
                    })
                }
            }
            DropState::Settling { remaining } => Some(Self::count_down(remaining, |r| {
                DropState::Settling { remaining: r }
            }).unwrap_or(DropState::BumpForward {
                remaining: self.cycles(p.bump_forward_time_ms),
            })),
            DropState::BumpForward { remaining } => Some(Self::count_down(remaining, |r| {
                DropState::BumpForward { remaining: r }
            }).unwrap_or(DropState::BumpBack {
                remaining: self.cycles(p.bump_back_time_ms),
            })),
            DropState::BumpBack { remaining } => Some(Self::count_down(remaining, |r| {
                DropState::BumpBack { remaining: r }
            }).unwrap_or(DropState::Pausing {
                remaining: self.cycles(p.pause_time_ms),
            })),
            DropState::Pausing { remaining } => Some(Self::count_down(remaining, |r| {
                DropState::Pausing { remaining: r }
            }).unwrap_or(DropState::Retreating {
                remaining: self.cycles(p.retreat_time_ms),
            })),
            DropState::Retreating { remaining } => Some(
                Self::count_down(remaining, |r| DropState::Retreating { remaining: r })
                    .unwrap_or(DropState::Done),
            ),
            DropState::Done => None,
        }
    }

    /// Number of cycles a stage lasting `ms` runs for, at least one.
    fn cycles(&self, ms: u64) -> u64 {
        cycles_for(Duration::from_millis(ms), self.cycle_period).max(1)
    }

    /// The same stage with one less cycle remaining, or `None` if the stage has finished.
    fn count_down<F>(remaining: u64, stage: F) -> Option<DropState>
    where
        F: Fn(u64) -> DropState,
    {
        if remaining > 1 {
            Some(stage(remaining - 1))
        } else {
            None
        }
    }
}

impl Display for DropState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropState::RaisingTray { .. } => write!(f, "DropState::RaisingTray"),
            DropState::Settling { .. } => write!(f, "DropState::Settling"),
            DropState::BumpForward { .. } => write!(f, "DropState::BumpForward"),
            DropState::BumpBack { .. } => write!(f, "DropState::BumpBack"),
            DropState::Pausing { .. } => write!(f, "DropState::Pausing"),
            DropState::Retreating { .. } => write!(f, "DropState::Retreating"),
            DropState::Done => write!(f, "DropState::Done"),
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn mgr() -> DropMgr {
        DropMgr::with_params(Params::default(), Duration::from_millis(20)).unwrap()
    }

    const TRIGGER: InputData = InputData { trigger: true, abort: false };
    const IDLE: InputData = InputData { trigger: false, abort: false };

    /// Run the macro to completion, returning the demands of every cycle it was active.
    fn run(mgr: &mut DropMgr) -> Vec<MacroDems> {
        let mut dems = Vec::new();

        let (out, rpt) = mgr.proc(&TRIGGER).unwrap();
        assert!(rpt.started);
        dems.extend(out);

        for _ in 0..1000 {
            match mgr.proc(&IDLE).unwrap().0 {
                Some(d) => dems.push(d),
                None => return dems,
            }
        }

        panic!("Macro did not finish");
    }

    #[test]
    fn test_idle_without_trigger() {
        let mut m = mgr();

        let (out, rpt) = m.proc(&IDLE).unwrap();
        assert_eq!(out, None);
        assert!(!rpt.active);

        // Abort while idle does nothing
        let (out, rpt) = m.proc(&InputData { trigger: false, abort: true }).unwrap();
        assert_eq!(out, None);
        assert!(!rpt.aborted);
    }

    #[test]
    fn test_full_sequence() {
        let mut m = mgr();
        let dems = run(&mut m);

        // Tray ramp, 127 down to 31 in steps of 2
        let ramp: Vec<i32> = dems.iter().take(49).map(|d| d.tray).collect();
        let expected: Vec<i32> = (0..49).map(|i| 127 - 2 * i).collect();
        assert_eq!(ramp, expected);
        assert_eq!(*ramp.last().unwrap(), 31);
        assert!(dems.iter().take(49).all(|d| d.drive_lr == (0, 0) && d.roller_out == 0));

        let rest = &dems[49..];
        let zero = MacroDems::default();
        let fwd = MacroDems { drive_lr: (60, 60), ..Default::default() };
        let back = MacroDems { drive_lr: (-60, -60), ..Default::default() };
        let retreat = MacroDems { drive_lr: (-70, -70), tray: 0, roller_out: 80 };

        let mut expected = Vec::new();
        expected.extend(std::iter::repeat(zero).take(100));
        expected.extend(std::iter::repeat(fwd).take(10));
        expected.extend(std::iter::repeat(back).take(10));
        expected.extend(std::iter::repeat(zero).take(100));
        expected.extend(std::iter::repeat(retreat).take(35));
        expected.push(zero);

        assert_eq!(rest.len(), expected.len());
        assert_eq!(rest, &expected[..]);

        assert!(!m.is_active());
    }

    #[test]
    fn test_trigger_ignored_while_active() {
        let mut m = mgr();

        m.proc(&TRIGGER).unwrap();
        let (out, rpt) = m.proc(&TRIGGER).unwrap();

        assert!(!rpt.started);
        assert_eq!(out.map(|d| d.tray), Some(125));
    }

    #[test]
    fn test_abort() {
        let mut m = mgr();

        for _ in 0..60 {
            m.proc(&IDLE).unwrap();
        }
        m.proc(&TRIGGER).unwrap();
        for _ in 0..60 {
            assert!(m.proc(&IDLE).unwrap().0.is_some());
        }
        assert!(matches!(m.state(), Some(DropState::Settling { .. })));

        let (out, rpt) = m.proc(&InputData { trigger: false, abort: true }).unwrap();
        assert!(rpt.aborted);
        assert_eq!(out, None);
        assert!(!m.is_active());

        // Can be started again from the beginning
        let (out, _) = m.proc(&TRIGGER).unwrap();
        assert_eq!(out.map(|d| d.tray), Some(127));
    }

    #[test]
    fn test_zero_length_stage_runs_once() {
        let params = Params {
            settle_time_ms: 0,
            ..Params::default()
        };
        let mut m = DropMgr::with_params(params, Duration::from_millis(20)).unwrap();
        let dems = run(&mut m);

        assert_eq!(dems.len(), 49 + 1 + 10 + 10 + 100 + 35 + 1);
    }
}
