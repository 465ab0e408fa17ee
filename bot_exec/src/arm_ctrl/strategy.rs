//! Target and power calculations for ArmCtrl
//!
//! These are free functions of the controller's state so that each part of the cycle can be
//! checked on its own.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::mech::{MAX_POWER, MIN_POWER};
use util::maths::{clamp, sign};

use super::{Params, StepTier};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Move the target by one increment if raise or lower is held, saturating at the bounds.
///
/// Raise takes precedence if both are held.
pub fn adjust_target(
    target: i32,
    raise_held: bool,
    lower_held: bool,
    increment: i32,
    lower_bound: i32,
    upper_bound: i32,
) -> i32 {
    if raise_held {
        clamp(target.saturating_add(increment), lower_bound, upper_bound)
    } else if lower_held {
        clamp(target.saturating_sub(increment), lower_bound, upper_bound)
    } else {
        target
    }
}

/// Return the target to the lower bound if reset is held.
pub fn reset_target(target: i32, reset_held: bool, lower_bound: i32) -> i32 {
    if reset_held {
        lower_bound
    } else {
        target
    }
}

/// Power demanded by the proportional strategy.
pub fn proportional_power(target: i32, measured: i32, params: &Params) -> f64 {
    let diff = target as f64 - measured as f64;

    clamp_power(params.raise_sign * params.prop_gain * diff)
}

/// Power demanded by the incremental strategy, given the power demanded on the last cycle.
///
/// Returns the new power and whether the arm is in the safety zone.
pub fn incremental_power(
    last_power: f64,
    target: i32,
    measured: i32,
    params: &Params,
) -> (f64, bool) {
    // Near the bottom the sensor may not read the true zero, so never drive the arm there
    if measured < params.safety_zone_top() {
        return (0.0, true);
    }

    // Widened so that no reading can overflow the difference
    let diff = target as i64 - measured as i64;
    let abs_diff = clamp(diff.abs(), 0, i32::MAX as i64) as i32;

    if abs_diff <= params.dead_band {
        return (clamp_power(last_power), false);
    }

    let step = step_size(abs_diff, &params.step_tiers, params.max_step);
    let power = last_power + params.raise_sign * sign(diff) as f64 * step;

    (clamp_power(power), false)
}

/// Step size of the incremental strategy for an error magnitude.
///
/// The first tier whose bound is strictly above `abs_diff` is used, `max_step` if there is none.
pub fn step_size(abs_diff: i32, tiers: &[StepTier], max_step: f64) -> f64 {
    tiers
        .iter()
        .find(|t| abs_diff < t.below)
        .map(|t| t.step)
        .unwrap_or(max_step)
}

/// Convert a calculated power into the integer demand sent to the motors.
///
/// Fractional power is truncated towards zero.
pub fn to_demand(power: f64) -> i32 {
    clamp(power.trunc() as i32, MIN_POWER, MAX_POWER)
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn clamp_power(power: f64) -> f64 {
    clamp(power, MIN_POWER as f64, MAX_POWER as f64)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn incremental_params() -> Params {
        Params {
            strategy: super::super::PowerStrategy::Incremental,
            ..Params::default()
        }
    }

    #[test]
    fn test_adjust_target_bounds() {
        let p = Params::default();

        assert_eq!(adjust_target(0, true, false, p.increment, p.lower_bound, p.upper_bound), 30);
        assert_eq!(adjust_target(30, false, true, p.increment, p.lower_bound, p.upper_bound), 0);
        assert_eq!(adjust_target(10, false, true, p.increment, p.lower_bound, p.upper_bound), 0);
        assert_eq!(
            adjust_target(3990, true, false, p.increment, p.lower_bound, p.upper_bound),
            4000
        );
        assert_eq!(
            adjust_target(1200, false, false, p.increment, p.lower_bound, p.upper_bound),
            1200
        );

        // Raise wins the tie
        assert_eq!(adjust_target(600, true, true, p.increment, p.lower_bound, p.upper_bound), 630);
    }

    #[test]
    fn test_raise_held_for_n_cycles() {
        let p = Params::default();

        for n in [0, 1, 10, 133, 134, 200].iter() {
            let mut target = p.lower_bound;
            for _ in 0..*n {
                target = adjust_target(target, true, false, 30, p.lower_bound, p.upper_bound);
                assert!(target >= p.lower_bound && target <= p.upper_bound);
            }
            assert_eq!(target, std::cmp::min(30 * n, 4000));
        }
    }

    #[test]
    fn test_reset_target() {
        assert_eq!(reset_target(2400, true, 0), 0);
        assert_eq!(reset_target(2400, false, 0), 2400);
    }

    #[test]
    fn test_proportional_power() {
        let p = Params::default();

        assert_eq!(to_demand(proportional_power(1000, 1000, &p)), 0);
        assert_eq!(to_demand(proportional_power(1000, 0, &p)), -100);
        assert_eq!(to_demand(proportional_power(0, 1000, &p)), 100);

        // Saturation
        assert_eq!(to_demand(proportional_power(4000, 0, &p)), -127);
        assert_eq!(to_demand(proportional_power(0, 4000, &p)), 127);

        // Truncation towards zero
        assert_eq!(to_demand(proportional_power(1005, 1000, &p)), 0);
        assert_eq!(to_demand(proportional_power(1019, 1000, &p)), -1);
    }

    #[test]
    fn test_step_size_boundaries() {
        let p = Params::default();
        let step = |d| step_size(d, &p.step_tiers, p.max_step);

        assert_eq!(step(0), 0.1);
        assert_eq!(step(499), 0.1);
        assert_eq!(step(500), 1.0);
        assert_eq!(step(501), 1.0);
        assert_eq!(step(1499), 1.0);
        assert_eq!(step(1500), 3.0);
        assert_eq!(step(1501), 3.0);
        assert_eq!(step(2499), 3.0);
        assert_eq!(step(2500), 5.0);
        assert_eq!(step(4000), 5.0);
    }

    #[test]
    fn test_incremental_steps_by_tier() {
        let p = incremental_params();

        // Target above the arm, a negative power raises it
        let (power, zone) = incremental_power(0.0, 2000, 100, &p);
        assert!(!zone);
        assert_eq!(power, -3.0);

        let (power, _) = incremental_power(power, 2000, 1000, &p);
        assert_eq!(power, -4.0);

        let (power, _) = incremental_power(power, 2000, 1600, &p);
        assert!((power - -4.1).abs() < 1e-9);

        // Overshoot steps back the other way
        let (power, _) = incremental_power(power, 2000, 2100, &p);
        assert!((power - -4.0).abs() < 1e-9);
    }

    #[test]
    fn test_incremental_safety_zone() {
        let p = incremental_params();

        // Regardless of target and previous power the arm is not driven in the zone
        for target in [0, 500, 4000].iter() {
            for last in [-127.0, -20.0, 0.0, 60.0].iter() {
                let (power, zone) = incremental_power(*last, *target, 89, &p);
                assert!(zone);
                assert_eq!(power, 0.0);
            }
        }

        // The top of the zone is outside it
        let (_, zone) = incremental_power(0.0, 4000, 90, &p);
        assert!(!zone);
    }

    #[test]
    fn test_incremental_holds_at_target() {
        let p = incremental_params();

        let (power, zone) = incremental_power(-23.5, 1500, 1500, &p);
        assert!(!zone);
        assert_eq!(power, -23.5);

        let p = Params {
            dead_band: 10,
            ..incremental_params()
        };
        let (power, _) = incremental_power(-23.5, 1500, 1510, &p);
        assert_eq!(power, -23.5);
        let (power, _) = incremental_power(-23.5, 1500, 1511, &p);
        assert!((power - -23.4).abs() < 1e-9);
    }

    #[test]
    fn test_incremental_always_clamped() {
        let p = incremental_params();
        let mut power = 0.0;

        // Far away target for many cycles saturates rather than winding up
        for _ in 0..100 {
            power = incremental_power(power, 4000, 100, &p).0;
            assert!(power >= -127.0 && power <= 127.0);
        }
        assert_eq!(power, -127.0);
        assert_eq!(to_demand(power), -127);

        for _ in 0..100 {
            power = incremental_power(power, 100, 4000, &p).0;
            assert!(power >= -127.0 && power <= 127.0);
        }
        assert_eq!(power, 127.0);
    }

    #[test]
    fn test_extreme_measurements_saturate() {
        let p = Params::default();

        assert_eq!(to_demand(proportional_power(4000, i32::MIN, &p)), -127);
        assert_eq!(to_demand(proportional_power(0, i32::MAX, &p)), 127);
        assert_eq!(to_demand(proportional_power(i32::MAX, i32::MIN, &p)), -127);

        let p = incremental_params();

        let (power, zone) = incremental_power(120.0, 0, i32::MAX, &p);
        assert!(!zone);
        assert_eq!(power, 125.0);

        let (power, _) = incremental_power(127.0, i32::MIN, i32::MAX, &p);
        assert_eq!(power, 127.0);

        // Readings far below the stop are in the safety zone
        let (power, zone) = incremental_power(-60.0, 4000, i32::MIN, &p);
        assert!(zone);
        assert_eq!(power, 0.0);
    }
}
