//! # Data Store

use comms_if::{
    eqpt::{light::SignalPattern, mech::MechDems},
    joy::JoyState,
};

use crate::{arm_ctrl, drive_ctrl, drop_mgr, intake_ctrl, light_sig};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u64,

    // Inputs
    /// Joystick state for this cycle
    pub joy: JoyState,

    /// Arm potentiometer reading for this cycle
    pub arm_measured: i32,

    // DropMgr
    pub drop_mgr: drop_mgr::DropMgr,
    pub drop_mgr_input: drop_mgr::InputData,
    pub drop_mgr_output: Option<drop_mgr::MacroDems>,
    pub drop_mgr_status_rpt: drop_mgr::StatusReport,

    // DriveCtrl
    pub drive_ctrl: drive_ctrl::DriveCtrl,
    pub drive_ctrl_input: drive_ctrl::InputData,
    pub drive_ctrl_output: MechDems,
    pub drive_ctrl_status_rpt: drive_ctrl::StatusReport,

    // IntakeCtrl
    pub intake_ctrl: intake_ctrl::IntakeCtrl,
    pub intake_ctrl_input: intake_ctrl::InputData,
    pub intake_ctrl_output: MechDems,
    pub intake_ctrl_status_rpt: intake_ctrl::StatusReport,

    // ArmCtrl
    pub arm_ctrl: arm_ctrl::ArmCtrl,
    pub arm_ctrl_input: arm_ctrl::InputData,
    pub arm_ctrl_output: MechDems,
    pub arm_ctrl_status_rpt: arm_ctrl::StatusReport,

    // LightSig
    pub light_sig: light_sig::LightSig,
    pub light_sig_input: light_sig::InputData,
    pub light_sig_status_rpt: light_sig::StatusReport,

    // Outputs
    /// Demands for every actuator, merged from all modules
    pub mech_dems: MechDems,

    /// Frame to write to the light this cycle
    pub light_frame: Option<SignalPattern>,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,

    /// Total number of cycle overruns
    pub num_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Perform actions required at the start of a cycle.
    ///
    /// Clears those items that need clearing at the start of a cycle.
    pub fn cycle_start(&mut self) {
        self.drop_mgr_input = drop_mgr::InputData::default();
        self.drop_mgr_output = None;
        self.drop_mgr_status_rpt = drop_mgr::StatusReport::default();

        self.drive_ctrl_input = drive_ctrl::InputData::default();
        self.drive_ctrl_output = MechDems::empty();
        self.drive_ctrl_status_rpt = drive_ctrl::StatusReport::default();

        self.intake_ctrl_input = intake_ctrl::InputData::default();
        self.intake_ctrl_output = MechDems::empty();
        self.intake_ctrl_status_rpt = intake_ctrl::StatusReport::default();

        self.arm_ctrl_input = arm_ctrl::InputData::default();
        self.arm_ctrl_output = MechDems::empty();
        self.arm_ctrl_status_rpt = arm_ctrl::StatusReport::default();

        self.light_sig_input = light_sig::InputData::default();
        self.light_sig_status_rpt = light_sig::StatusReport::default();

        self.mech_dems = MechDems::default();
        self.light_frame = None;
    }

    /// Perform actions required at the end of a cycle.
    pub fn cycle_end(&mut self) {
        self.num_cycles += 1;
    }
}
