//! # Input processor module
//!
//! Maps the operator's joystick onto the inputs of each module.
//!
//! | Control        | Action                                        |
//! |----------------|-----------------------------------------------|
//! | Left stick Y   | Drive forward/back                            |
//! | Right stick X  | Turn                                          |
//! | 5 up / down    | Raise (pulsed) / lower the tray               |
//! | 6 up / down    | Rollers in / out                              |
//! | 7 up / down    | Raise / lower the arm target                  |
//! | 7 left         | Reset the arm target                          |
//! | 8 down         | Back up and roll cubes out                    |
//! | 8 right / left | Start / abort the drop off macro              |
//! | 8 up           | Debug actuator, light frame on release        |

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use crate::{
    arm_ctrl, 
    data_store::DataStore, 
    drive_ctrl, 
    drop_mgr, 
    intake_ctrl::{self, IntakeOverride}, 
    light_sig
};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Set the drop off manager's input from the joystick.
pub fn set_macro_input(ds: &mut DataStore) {
    ds.drop_mgr_input = drop_mgr::InputData {
        trigger: ds.joy.grp8.right,
        abort: ds.joy.grp8.left,
    };
}

/// Set the inputs of the control modules from the joystick and the drop off macro's output.
///
/// Must be called after the drop off manager has been processed for this cycle.
pub fn set_ctrl_inputs(ds: &mut DataStore) {
    let joy = ds.joy;
    let macro_dems = ds.drop_mgr_output;

    ds.drive_ctrl_input = drive_ctrl::InputData {
        forward: joy.forward,
        turn: joy.turn,
        backup: joy.grp8.down,
        override_lr: macro_dems.map(|m| m.drive_lr),
    };

    ds.intake_ctrl_input = intake_ctrl::InputData {
        roller_in: joy.grp6.up,
        roller_out: joy.grp6.down,
        tray_up: joy.grp5.up,
        tray_down: joy.grp5.down,
        backup: joy.grp8.down,
        override_dems: macro_dems.map(|m| IntakeOverride {
            tray: m.tray,
            roller_out: m.roller_out,
        }),
    };

    ds.arm_ctrl_input = arm_ctrl::InputData {
        raise: joy.grp7.up,
        lower: joy.grp7.down,
        reset: joy.grp7.left,
        measured: ds.arm_measured,
        hold_target: macro_dems.is_some(),
    };

    ds.light_sig_input = light_sig::InputData {
        debug_held: joy.grp8.up,
    };
}
