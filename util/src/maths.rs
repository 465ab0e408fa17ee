//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::{PrimInt, Signed};

/// Saturate a value into `[min, max]`.
///
/// Unlike `f64::clamp` this does not panic when `min > max`, `max` wins.
pub fn clamp<T>(value: T, min: T, max: T) -> T 
where
    T: PartialOrd
{
    let mut ret = value;

    if ret < min {
        ret = min
    }
    if ret > max {
        ret = max
    }

    ret
}

/// Sign of an integer as -1, 0 or 1.
pub fn sign<T>(value: T) -> T
where
    T: PrimInt + Signed
{
    value.signum()
}

/// Force values strictly inside `(-threshold, threshold)` to zero.
pub fn deadband<T>(value: T, threshold: T) -> T
where
    T: PrimInt + Signed
{
    if value < threshold && value > -threshold {
        T::zero()
    }
    else {
        value
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deadband() {
        assert_eq!(deadband(14, 15), 0);
        assert_eq!(deadband(-14, 15), 0);
        assert_eq!(deadband(15, 15), 15);
        assert_eq!(deadband(-15, 15), -15);
        assert_eq!(deadband(0, 15), 0);
        assert_eq!(deadband(100, 15), 100);
    }

    #[test]
    fn test_clamp_and_sign() {
        assert_eq!(clamp(-300.0, -127.0, 127.0), -127.0);
        assert_eq!(clamp(12.5, -127.0, 127.0), 12.5);
        assert_eq!(clamp(4030, 0, 4000), 4000);

        assert_eq!(sign(-20), -1);
        assert_eq!(sign(0), 0);
        assert_eq!(sign(7), 1);
    }
}
