//! Parameters structure for LightSig

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::{light::SignalPattern, mech::MAX_POWER};
use serde::{Deserialize, Serialize};

use super::LightSigError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for light signalling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Power of the debug actuator while the debug button is held.
    pub debug_power: i32,

    /// Time the line is held low before the frame.
    ///
    /// Units: nanoseconds
    pub preamble_ns: u32,

    /// High time of a zero bit.
    ///
    /// Units: nanoseconds
    pub t0h_ns: u32,

    /// Low time of a zero bit.
    ///
    /// Units: nanoseconds
    pub t0l_ns: u32,

    /// Number of zero bits in the frame.
    pub num_bits: usize,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        // Bit timings are one and eighty instructions at 90 MHz
        Self {
            debug_power: 127,
            preamble_ns: 51_000,
            t0h_ns: 11,
            t0l_ns: 889,
            num_bits: 48,
        }
    }
}

impl Params {
    /// Determines if the parameters are valid.
    pub fn are_valid(&self) -> Result<(), LightSigError> {
        if self.debug_power < 0 || self.debug_power > MAX_POWER {
            return Err(LightSigError::InvalidParams(format!(
                "debug_power must be between 0 and {}, found {}",
                MAX_POWER, self.debug_power
            )));
        }

        if self.num_bits == 0 {
            return Err(LightSigError::InvalidParams(String::from(
                "num_bits must be at least 1"
            )));
        }

        Ok(())
    }

    /// The frame written when the debug button is released.
    pub fn frame(&self) -> SignalPattern {
        SignalPattern::zero_frame(self.preamble_ns, self.t0h_ns, self.t0l_ns, self.num_bits)
    }
}
