#![forbid(unsafe_code)]

//! Drag sampling: turns a touch drag into a live sheet offset.
//!
//! A [`GestureSample`] is created when a drag starts and consumed when it is
//! released, so drag bookkeeping cannot outlive its gesture. Move events
//! carry the *cumulative* translation since the drag began, as touch
//! recognizers report it; the sample keeps the previous value to derive the
//! per-frame delta.
//!
//! # Invariants
//!
//! 1. The drag starts exactly at the displayed offset, which may be
//!    mid-animation and inside the rubber-band zone. A zero translation
//!    never moves the sheet.
//! 2. Inside the target range the live offset follows the finger one to
//!    one. Beyond an outer target only `damping_factor` of the overshoot is
//!    applied, capped at `max_overshoot`.
//! 3. Release does not clamp. The resolver receives the resisted offset.
//! 4. Non-finite translations are ignored.

use crate::error::{Result, SheetError};
use crate::geometry::SnapTargets;

/// Drag tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Fraction of overshoot applied beyond an outer target (default: 0.3).
    pub damping_factor: f64,
    /// Hard cap on resisted overshoot in pixels (default: 120).
    pub max_overshoot: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.3,
            max_overshoot: 120.0,
        }
    }
}

impl GestureConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return Err(SheetError::invalid("gesture.damping_factor", "must be in (0, 1]"));
        }
        if !(self.max_overshoot.is_finite() && self.max_overshoot >= 0.0) {
            return Err(SheetError::invalid(
                "gesture.max_overshoot",
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Rubber-band a candidate offset against the outer targets.
///
/// Within `[min, max]` the candidate is returned unchanged. Beyond it the
/// overshoot `o` becomes `min(o * damping, max_overshoot)`.
#[must_use]
pub fn rubber_band(candidate: f64, min: f64, max: f64, config: &GestureConfig) -> f64 {
    let resist = |overshoot: f64| (overshoot * config.damping_factor).min(config.max_overshoot);
    if candidate > max {
        max + resist(candidate - max)
    } else if candidate < min {
        min - resist(min - candidate)
    } else {
        candidate
    }
}

/// Inverse of [`rubber_band`]: the unresisted candidate displayed at
/// `displayed`.
///
/// Overshoot at or past the cap maps to the candidate that reaches the cap.
#[must_use]
pub fn unband(displayed: f64, min: f64, max: f64, config: &GestureConfig) -> f64 {
    let free = |overshoot: f64| overshoot.min(config.max_overshoot) / config.damping_factor;
    if displayed > max {
        max + free(displayed - max)
    } else if displayed < min {
        min - free(min - displayed)
    } else {
        displayed
    }
}

/// Final state of a released drag, handed to the snap resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    /// Live offset at release, resistance applied, not clamped.
    pub position: f64,
    /// Release velocity in px/ms, positive downward (toward collapsed).
    pub velocity: f64,
}

/// Bookkeeping for one active drag.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSample {
    origin: f64,
    /// Unresisted offset that displays at `origin`.
    base: f64,
    /// Displayed excess past the cap at drag start, carried unchanged.
    excess: f64,
    cumulative: f64,
    last_delta: f64,
    live: f64,
}

impl GestureSample {
    /// Begin a drag at the displayed offset.
    #[must_use]
    pub fn begin(origin: f64, targets: &SnapTargets, config: &GestureConfig) -> Self {
        let (min, max) = (targets.expanded(), targets.collapsed());
        let base = unband(origin, min, max, config);
        Self {
            origin,
            base,
            excess: origin - rubber_band(base, min, max, config),
            cumulative: 0.0,
            last_delta: 0.0,
            live: origin,
        }
    }

    /// Displayed offset when the drag began.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> f64 {
        self.origin
    }

    /// Translation since the drag began.
    #[inline]
    #[must_use]
    pub fn cumulative_delta(&self) -> f64 {
        self.cumulative
    }

    /// Movement contributed by the most recent sample.
    #[inline]
    #[must_use]
    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }

    /// Current live offset.
    #[inline]
    #[must_use]
    pub fn live(&self) -> f64 {
        self.live
    }

    /// Unresisted offset under the finger.
    #[inline]
    #[must_use]
    pub fn candidate(&self) -> f64 {
        self.base + self.cumulative
    }

    /// Apply a move sample and return the new live offset.
    pub fn advance(
        &mut self,
        translation: f64,
        targets: &SnapTargets,
        config: &GestureConfig,
    ) -> f64 {
        if !translation.is_finite() {
            return self.live;
        }
        self.last_delta = translation - self.cumulative;
        self.cumulative = translation;
        self.live = rubber_band(
            self.candidate(),
            targets.expanded(),
            targets.collapsed(),
            config,
        ) + self.excess;
        self.live
    }

    /// Apply the terminal sample and end the drag.
    #[must_use]
    pub fn release(
        mut self,
        translation: f64,
        velocity: f64,
        targets: &SnapTargets,
        config: &GestureConfig,
    ) -> Release {
        self.advance(translation, targets, config);
        Release {
            position: self.live,
            velocity: if velocity.is_finite() { velocity } else { 0.0 },
        }
    }

    /// End the drag without a terminal sample (system cancellation).
    #[must_use]
    pub fn cancel(self) -> Release {
        Release {
            position: self.live,
            velocity: 0.0,
        }
    }
}
