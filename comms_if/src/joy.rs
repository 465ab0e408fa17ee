//! # Joystick state
//!
//! The operator's joystick is polled once per cycle. Buttons are level signals, the bot reacts to
//! whether a button is held on this cycle rather than to presses.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Snapshot of the joystick on one cycle.
///
/// Any field missing from a JSON snapshot takes its neutral value (centred axis, released button).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct JoyState {
    /// Forward/backward drive axis (channel 3), roughly -127 to 127
    pub forward: i32,

    /// Turning axis (channel 1), roughly -127 to 127
    pub turn: i32,

    /// Tray buttons
    pub grp5: ButtonGroup,

    /// Roller buttons
    pub grp6: ButtonGroup,

    /// Arm buttons
    pub grp7: ButtonGroup,

    /// Macro and debug buttons
    pub grp8: ButtonGroup,
}

/// A directional group of four buttons.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ButtonGroup {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum JoyParseError {
    #[error("Joystick state contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl JoyState {
    /// Parse a joystick state from a JSON object.
    pub fn from_json(json_str: &str) -> Result<Self, JoyParseError> {
        serde_json::from_str(json_str).map_err(JoyParseError::InvalidJson)
    }

    /// True if no axis is deflected and no button is held.
    pub fn is_neutral(&self) -> bool {
        *self == JoyState::default()
    }
}

impl ButtonGroup {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_partial_json() {
        let joy = JoyState::from_json(r#"{"forward": 100, "grp7": {"up": true}}"#).unwrap();

        assert_eq!(joy.forward, 100);
        assert_eq!(joy.turn, 0);
        assert!(joy.grp7.up);
        assert!(!joy.grp7.down);
        assert!(!joy.grp5.any());
        assert!(!joy.is_neutral());

        assert!(JoyState::from_json("{}").unwrap().is_neutral());
        assert!(JoyState::from_json("{\"forward\": }").is_err());
    }
}
