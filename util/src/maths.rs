//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()` if `lhs` is much smaller than `rhs.abs()` in
/// magnitude and `lhs < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}

/// Map any angle in radians into the range [0, 2pi).
pub fn wrap_2pi<T>(value: T) -> T
where
    T: Float
{
    let tau_t: T = T::from(std::f64::consts::TAU).unwrap();

    let r = rem_euclid(value, tau_t);

    // Catch the round-off case described in `rem_euclid`
    if r >= tau_t { T::zero() } else { r }
}

/// Map any angle in degrees into the range [-180, 180].
pub fn wrap_180<T>(value_deg: T) -> T
where
    T: Float
{
    let full_t: T = T::from(360.0).unwrap();
    let half_t: T = T::from(180.0).unwrap();

    let r = rem_euclid(value_deg + half_t, full_t) - half_t;

    // Keep +180 rather than -180 for exact half turns in the positive direction
    if r == -half_t && value_deg > T::zero() { half_t } else { r }
}

#[cfg(test)]
mod test {
    use super::*;

    const TAU: f64 = std::f64::consts::TAU;
    const PI: f64 = std::f64::consts::PI;

    #[test]
    fn test_wrap_2pi() {
        assert_eq!(wrap_2pi(0f64), 0f64);
        assert_eq!(wrap_2pi(TAU), 0f64);
        assert!((wrap_2pi(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-12);
        assert!((wrap_2pi(5.0 * PI) - PI).abs() < 1e-12);
        assert!(wrap_2pi(-1e-20f64) < TAU);
    }

    #[test]
    fn test_wrap_180() {
        assert_eq!(wrap_180(0f64), 0f64);
        assert_eq!(wrap_180(190f64), -170f64);
        assert_eq!(wrap_180(-190f64), 170f64);
        assert_eq!(wrap_180(180f64), 180f64);
        assert_eq!(wrap_180(-180f64), -180f64);
        assert_eq!(wrap_180(720f64), 0f64);
    }
}
