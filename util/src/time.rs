//! General time utility functions

use chrono;
use std::time::Duration;

/// Number of nanoseconds in a second
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Convert a duration into a number of seconds, or `None` if overflow
pub fn duration_to_seconds(duration: chrono::Duration) -> Option<f64> {
    duration
        .num_nanoseconds()
        .map(|ns| ns as f64 / NANOS_PER_SECOND as f64)
}

/// Number of whole cycles of `cycle_period` needed to cover `duration`, rounded up.
///
/// A zero cycle period is treated as one cycle per duration.
pub fn cycles_for(duration: Duration, cycle_period: Duration) -> u64 {
    let period_ns = cycle_period.as_nanos();

    if period_ns == 0 {
        return 1;
    }

    let dur_ns = duration.as_nanos();

    ((dur_ns + period_ns - 1) / period_ns) as u64
}
