#![forbid(unsafe_code)]

//! Motion primitives: easing curves, the damped spring, and the driver that
//! runs a spring toward a snap target.

pub mod driver;
pub mod easing;
pub mod spring;

pub use driver::{AnimationDriver, Settle};
pub use easing::{EasingFn, ease_in_out, ease_out, linear};
pub use spring::{Spring, SpringConfig, presets};
