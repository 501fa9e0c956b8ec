//! Tolerant float comparisons
//!
//! Equality uses an absolute epsilon (slopes near zero must still compare
//! equal), while ordering scales the epsilon with the larger operand so that
//! bound checks behave for large screen coordinates.

use crate::consts::TOLERANCE;

/// `|a - b| < TOLERANCE`
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < TOLERANCE
}

/// `a >= b`, allowing `a` to undershoot by a fraction of the larger magnitude.
///
/// The slack collapses to zero when both operands are zero, so
/// `approx_ge(0.0, 0.0)` is false.
#[inline]
pub fn approx_ge(a: f32, b: f32) -> bool {
    a - b > -TOLERANCE * a.abs().max(b.abs())
}

/// `a <= b`, allowing `a` to overshoot by a fraction of the larger magnitude.
#[inline]
pub fn approx_le(a: f32, b: f32) -> bool {
    a - b < TOLERANCE * a.abs().max(b.abs())
}

/// Inclusive range check that doesn't care which bound is lower.
pub fn in_range_inclusive(value: f32, bound1: f32, bound2: f32) -> bool {
    let (lower, upper) = if bound1 < bound2 {
        (bound1, bound2)
    } else {
        (bound2, bound1)
    };
    approx_ge(value, lower) && approx_le(value, upper)
}
