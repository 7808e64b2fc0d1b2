#![forbid(unsafe_code)]

//! Easing curves over `t ∈ [0, 1]`.
//!
//! Every curve maps 0 to 0 and 1 to 1 exactly and is non-decreasing, so a
//! ramp built on top of one keeps its endpoint values and monotonicity.

/// An easing curve.
pub type EasingFn = fn(f64) -> f64;

#[must_use]
pub fn linear(t: f64) -> f64 {
    t
}

#[must_use]
pub fn ease_out(t: f64) -> f64 {
    t * (2.0 - t)
}

#[must_use]
pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}
