//! # Input script interpreter module
//!
//! This module provides an interpreter for joystick input scripts, allowing the bot to be driven
//! without an operator. A script is a list of timestamped joystick states:
//!
//! ```text
//! 0.0: {};
//! 1.0: {"forward": 100};
//! 2.5: {"grp7": {"up": true}};
//! ```
//!
//! Each state holds from its timestamp until the next one, in the same way a held button stays
//! held between joystick polls.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use thiserror::Error;

// Internal
use comms_if::joy::{JoyParseError, JoyState};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Default time the final state of a script is held before the script ends.
pub const DEFAULT_END_HOLD_S: f64 = 1.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A joystick state which is scripted to start at a specific time.
struct Entry {
    /// The time the state takes effect
    start_time_s: f64,

    joy: JoyState
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use `.get_input` to
/// acquire the joystick state for the current time.
pub struct ScriptInterpreter {
    _script_path: Option<PathBuf>,
    entries: VecDeque<Entry>,
    current: JoyState,
    end_time_s: f64,
    end_hold_s: f64
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script timestamps must not decrease, found {1} s after {0} s")]
    OutOfOrder(f64, f64),

    #[error("Script contains an invalid joystick state at {0} s: {1}")]
    InvalidJoyState(f64, JoyParseError)
}

pub enum ScriptedInput {
    Some(JoyState),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Get the path in a buffer
        let path = PathBuf::from(script_path.as_ref());
        
        // Check that the script file exists.
        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        // Load the script into a string
        let script = fs::read_to_string(&path)
            .map_err(ScriptError::ScriptLoadError)?;

        let mut si = Self::from_str(&script)?;
        si._script_path = Some(path);

        Ok(si)
    }

    /// Create a new interpreter from the text of a script.
    pub fn from_str(script: &str) -> Result<Self, ScriptError> {

        // Empty queue of entries
        let mut queue: VecDeque<Entry> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .expect("script regex is valid");

        let mut last_time_s = 0.0;

        for cap in re.captures_iter(script) {
            // Parse the start time
            let start_time_s: f64 = cap[1].parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

            if start_time_s < last_time_s {
                return Err(ScriptError::OutOfOrder(last_time_s, start_time_s));
            }
            last_time_s = start_time_s;

            // Parse the joystick state from the payload.
            let joy = JoyState::from_json(&cap[3])
                .map_err(|e| ScriptError::InvalidJoyState(start_time_s, e))?;

            queue.push_back(Entry {
                start_time_s,
                joy
            });
        }

        if queue.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        Ok(ScriptInterpreter {
            _script_path: None,
            entries: queue,
            current: JoyState::default(),
            end_time_s: last_time_s,
            end_hold_s: DEFAULT_END_HOLD_S
        })
    }

    /// Set how long the final state is held before the end of the script is reported.
    pub fn with_end_hold(mut self, end_hold_s: f64) -> Self {
        self.end_hold_s = end_hold_s;
        self
    }

    /// Get the joystick state at `current_time_s`, or `EndOfScript` once the last state has been
    /// held for the end hold time.
    pub fn get_input(&mut self, current_time_s: f64) -> ScriptedInput {

        // Pop every entry which has started, the latest one wins
        while let Some(entry) = self.entries.front() {
            if entry.start_time_s > current_time_s {
                break;
            }

            if let Some(entry) = self.entries.pop_front() {
                self.current = entry.joy;
            }
        }

        if self.entries.is_empty() 
            && current_time_s >= self.end_time_s + self.end_hold_s 
        {
            ScriptedInput::EndOfScript
        }
        else {
            ScriptedInput::Some(self.current)
        }
    }

    /// Get the number of states in the script which have not started yet
    pub fn get_num_pending(&self) -> usize {
        self.entries.len()
    }

    /// Get the length of the script in seconds, including the end hold
    pub fn get_duration(&self) -> f64 {
        self.end_time_s + self.end_hold_s
    }
}
