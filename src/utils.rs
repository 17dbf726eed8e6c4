//! Utility functions used accross the library
use crate::Scalar;

/// Restrict value to a certain interval
#[inline]
pub fn clamp<T>(val: T, min: T, max: T) -> T
where
    T: PartialOrd,
{
    if val < min {
        min
    } else if val > max {
        max
    } else {
        val
    }
}

/// Sign of the direction from `from` to `to`, zero delta steps forward
#[inline]
pub(crate) fn step_sign(from: i32, to: i32) -> i32 {
    if to >= from { 1 } else { -1 }
}

/// Integer part (floor) of the value
#[inline]
pub(crate) fn ipart(value: Scalar) -> Scalar {
    value.floor()
}

/// Fractional part of the value, always in `[0, 1)`
#[inline]
pub(crate) fn fpart(value: Scalar) -> Scalar {
    value - value.floor()
}

/// Complement of the fractional part
#[inline]
pub(crate) fn rfpart(value: Scalar) -> Scalar {
    1.0 - fpart(value)
}
