//! # Control cycle
//!
//! Processing of every control module for one cycle, between the inputs being acquired and the
//! demands being sent. Module errors are reported and the module's demands left at zero, so one
//! failing module never stops the others.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::warn;

// Internal
use crate::{data_store::DataStore, input_processor};
use util::module::State;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Process all control modules.
///
/// `ds.joy` and `ds.arm_measured` must be set for this cycle. On return `ds.mech_dems` holds a
/// demand for every actuator and `ds.light_frame` any frame to be written.
pub fn proc(ds: &mut DataStore) {
    // ---- DROP OFF MACRO ----

    input_processor::set_macro_input(ds);

    match ds.drop_mgr.proc(&ds.drop_mgr_input) {
        Ok((o, r)) => {
            ds.drop_mgr_output = o;
            ds.drop_mgr_status_rpt = r;
        }
        Err(e) => warn!("Error during DropMgr processing: {}", e),
    }

    input_processor::set_ctrl_inputs(ds);

    // ---- CONTROL MODULES ----

    match ds.drive_ctrl.proc(&ds.drive_ctrl_input) {
        Ok((o, r)) => {
            ds.drive_ctrl_output = o;
            ds.drive_ctrl_status_rpt = r;
        }
        Err(e) => warn!("Error during DriveCtrl processing: {}", e),
    }

    match ds.intake_ctrl.proc(&ds.intake_ctrl_input) {
        Ok((o, r)) => {
            ds.intake_ctrl_output = o;
            ds.intake_ctrl_status_rpt = r;
        }
        Err(e) => warn!("Error during IntakeCtrl processing: {}", e),
    }

    match ds.arm_ctrl.proc(&ds.arm_ctrl_input) {
        Ok((o, r)) => {
            ds.arm_ctrl_output = o;
            ds.arm_ctrl_status_rpt = r;
        }
        Err(e) => warn!("Error during ArmCtrl processing: {}", e),
    }

    let light_dems = match ds.light_sig.proc(&ds.light_sig_input) {
        Ok((o, r)) => {
            ds.light_frame = o.frame;
            ds.light_sig_status_rpt = r;
            Some(o.dems)
        }
        Err(e) => {
            warn!("Error during LightSig processing: {}", e);
            None
        }
    };

    // ---- MERGE DEMANDS ----

    // Start from everything stopped so actuators no module drove are held at zero
    ds.mech_dems = comms_if::eqpt::mech::MechDems::default();
    ds.mech_dems.merge(&ds.drive_ctrl_output);
    ds.mech_dems.merge(&ds.intake_ctrl_output);
    ds.mech_dems.merge(&ds.arm_ctrl_output);
    if let Some(d) = light_dems {
        ds.mech_dems.merge(&d);
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::{
        eqpt::mech::ActId,
        joy::{ButtonGroup, JoyState},
    };

    fn cycle(ds: &mut DataStore, joy: JoyState, measured: i32) {
        ds.cycle_start();
        ds.joy = joy;
        ds.arm_measured = measured;
        proc(ds);
        ds.cycle_end();
    }

    fn button(up: bool, down: bool, left: bool, right: bool) -> ButtonGroup {
        ButtonGroup { up, down, left, right }
    }

    #[test]
    fn test_neutral_holds_everything() {
        let mut ds = DataStore::default();

        cycle(&mut ds, JoyState::default(), 0);

        for id in ActId::all_ids() {
            assert!(ds.mech_dems.contains(*id));
            assert_eq!(ds.mech_dems.get(*id), 0, "{:?}", id);
        }
        assert!(ds.light_frame.is_none());
        assert_eq!(ds.num_cycles, 1);
    }

    #[test]
    fn test_backup() {
        let mut ds = DataStore::default();
        let joy = JoyState {
            forward: 100,
            grp6: button(true, false, false, false),
            grp8: button(false, true, false, false),
            ..Default::default()
        };

        cycle(&mut ds, joy, 0);

        let d = &ds.mech_dems;
        assert_eq!(d.get(ActId::DrvLeftFront), -70);
        assert_eq!(d.get(ActId::DrvLeftBack), -70);
        assert_eq!(d.get(ActId::DrvRightFront), 70);
        assert_eq!(d.get(ActId::DrvRightBack), 70);
        assert_eq!(d.get(ActId::RollerRight), 80);
        assert_eq!(d.get(ActId::RollerLeft), -80);
    }

    #[test]
    fn test_macro_suspends_operator() {
        let mut ds = DataStore::default();
        let start = JoyState {
            grp8: button(false, false, false, true),
            ..Default::default()
        };

        cycle(&mut ds, start, 0);
        assert!(ds.drop_mgr_status_rpt.started);
        assert_eq!(ds.mech_dems.get(ActId::Tray), 127);

        // Operator tries to drive, roll in and raise the arm
        let busy = JoyState {
            forward: 127,
            turn: 127,
            grp5: button(false, true, false, false),
            grp6: button(true, false, false, false),
            grp7: button(true, false, false, false),
            ..Default::default()
        };
        cycle(&mut ds, busy, 0);

        let d = &ds.mech_dems;
        assert_eq!(d.get(ActId::Tray), 125);
        assert_eq!(d.get(ActId::DrvLeftFront), 0);
        assert_eq!(d.get(ActId::DrvRightFront), 0);
        assert_eq!(d.get(ActId::RollerRight), 0);
        assert_eq!(ds.arm_ctrl_status_rpt.target, 0);

        // The arm is still held at its target
        cycle(&mut ds, busy, 200);
        assert_eq!(ds.mech_dems.get(ActId::ArmLeft), 20);

        // Abort hands control back
        let abort = JoyState {
            grp8: button(false, false, true, false),
            ..Default::default()
        };
        cycle(&mut ds, abort, 0);
        assert!(!ds.drop_mgr.is_active());

        cycle(&mut ds, busy, 0);
        assert_eq!(ds.mech_dems.get(ActId::DrvLeftFront), 127);
        assert_eq!(ds.arm_ctrl_status_rpt.target, 30);
    }

    #[test]
    fn test_debug_toggle_emits_frame() {
        let mut ds = DataStore::default();
        let press = JoyState {
            grp8: button(true, false, false, false),
            ..Default::default()
        };

        cycle(&mut ds, press, 0);
        assert_eq!(ds.mech_dems.get(ActId::Debug), 127);
        assert!(ds.light_frame.is_none());

        cycle(&mut ds, JoyState::default(), 0);
        assert_eq!(ds.mech_dems.get(ActId::Debug), 0);
        assert!(ds.light_frame.is_some());
    }
}
