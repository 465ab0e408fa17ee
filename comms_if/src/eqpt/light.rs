//! # Light signal patterns
//!
//! The signalling light is driven over a single wire by holding the line at a level for a set
//! time. A [`SignalPattern`] is the list of those holds, independent of how the platform times
//! them.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A single hold of the signal line.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub level: Level,

    /// Units: nanoseconds
    pub duration_ns: u32,
}

/// An ordered sequence of pulses to be written to the signal line.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalPattern {
    pub pulses: Vec<Pulse>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Pulse {
    pub fn high(duration_ns: u32) -> Self {
        Self {
            level: Level::High,
            duration_ns,
        }
    }

    pub fn low(duration_ns: u32) -> Self {
        Self {
            level: Level::Low,
            duration_ns,
        }
    }
}

impl SignalPattern {
    /// Build a frame of `num_bits` zero bits.
    ///
    /// The line is pulled low for `preamble_ns` to reset the peripheral, released high, then each
    /// zero bit is a `t0h_ns` high followed by a `t0l_ns` low. The line is left high at the end.
    pub fn zero_frame(preamble_ns: u32, t0h_ns: u32, t0l_ns: u32, num_bits: usize) -> Self {
        let mut pulses = Vec::with_capacity(2 * num_bits + 3);

        pulses.push(Pulse::low(preamble_ns));
        pulses.push(Pulse::high(0));

        for _ in 0..num_bits {
            pulses.push(Pulse::high(t0h_ns));
            pulses.push(Pulse::low(t0l_ns));
        }

        pulses.push(Pulse::high(0));

        Self { pulses }
    }

    /// Total time taken to write out the pattern.
    pub fn duration_ns(&self) -> u64 {
        self.pulses.iter().map(|p| p.duration_ns as u64).sum()
    }

    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }
}
