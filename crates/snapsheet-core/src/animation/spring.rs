#![forbid(unsafe_code)]

//! Damped spring driving a sheet offset toward a snap target.
//!
//! Classical damped harmonic oscillator:
//!
//!   a = -stiffness × (position - target) - damping × velocity
//!
//! Positions are pixels and velocities pixels per second. Gesture velocities
//! arrive in pixels per millisecond; [`Spring::with_velocity_px_per_ms`]
//! converts at the seam.
//!
//! # Invariants
//!
//! 1. Stiffness is at least [`MIN_STIFFNESS`]; damping is non-negative.
//! 2. A spring at rest sits exactly on its target with zero velocity and
//!    does not move again.
//! 3. Large `dt` is subdivided into steps of at most 4ms.
//!
//! # Failure Modes
//!
//! - Zero damping never comes to rest. The animation driver bounds every run
//!   with a maximum duration, so such a spring ends in a forced settle.

use std::time::Duration;

/// Maximum dt per integration step (4ms).
const MAX_STEP_SECS: f64 = 0.004;

/// Minimum stiffness to prevent degenerate springs.
pub const MIN_STIFFNESS: f64 = 0.1;

/// Spring tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpringConfig {
    /// Restoring force strength (k).
    pub stiffness: f64,
    /// Velocity drag (c). Critical damping is `2√k`.
    pub damping: f64,
    /// Pixel distance from target below which the spring may rest.
    pub rest_threshold: f64,
    /// Speed (px/s) below which the spring may rest.
    pub velocity_threshold: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        presets::sheet()
    }
}

impl SpringConfig {
    pub(crate) fn validate(&self) -> crate::error::Result<()> {
        use crate::error::SheetError;
        if !self.stiffness.is_finite() || self.stiffness < MIN_STIFFNESS {
            return Err(SheetError::invalid("spring.stiffness", "must be finite and >= 0.1"));
        }
        if !self.damping.is_finite() || self.damping <= 0.0 {
            return Err(SheetError::invalid("spring.damping", "must be finite and positive"));
        }
        if !(self.rest_threshold.is_finite() && self.rest_threshold > 0.0) {
            return Err(SheetError::invalid("spring.rest_threshold", "must be positive"));
        }
        if !(self.velocity_threshold.is_finite() && self.velocity_threshold > 0.0) {
            return Err(SheetError::invalid("spring.velocity_threshold", "must be positive"));
        }
        Ok(())
    }
}

/// A damped harmonic oscillator over one axis.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Spring at `position` heading for `target`, at zero velocity.
    #[must_use]
    pub fn new(position: f64, target: f64, config: &SpringConfig) -> Self {
        Self {
            position,
            velocity: 0.0,
            target,
            stiffness: config.stiffness.max(MIN_STIFFNESS),
            damping: config.damping.max(0.0),
            rest_threshold: config.rest_threshold.abs(),
            velocity_threshold: config.velocity_threshold.abs(),
            at_rest: false,
        }
    }

    /// Seed the initial velocity in px/s.
    #[must_use]
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = if velocity.is_finite() { velocity } else { 0.0 };
        self
    }

    /// Seed the initial velocity from a gesture release (px/ms).
    #[must_use]
    pub fn with_velocity_px_per_ms(self, velocity: f64) -> Self {
        self.with_velocity(velocity * 1000.0)
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Jump onto the target and stop.
    pub fn snap_to_target(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Semi-implicit Euler step of `dt` seconds.
    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        if (self.position - self.target).abs() < self.rest_threshold
            && self.velocity.abs() < self.velocity_threshold
        {
            self.snap_to_target();
        }
    }
}

/// Spring tunings for sheet motion.
pub mod presets {
    use super::SpringConfig;

    /// Default sheet motion: near-critical, settles in well under a second
    /// across a full-screen travel.
    #[must_use]
    pub const fn sheet() -> SpringConfig {
        SpringConfig {
            stiffness: 170.0,
            damping: 26.0,
            rest_threshold: 0.5,
            velocity_threshold: 5.0,
        }
    }
}
