#![forbid(unsafe_code)]

//! Animation driver: one spring run toward a resolved snap target.
//!
//! An [`AnimationDriver`] exists only while the sheet is animating. It is
//! created with the target index it is heading for, ticked once per frame,
//! and reports a [`Settle`] exactly once. Interrupting it (a new drag)
//! consumes the driver and hands back the position it had reached.
//!
//! # Failure Modes
//!
//! - A spring that never comes to rest (zero damping, extreme thresholds)
//!   is cut off after `max_duration`: the driver jumps to the target and
//!   reports a forced settle.

use std::time::Duration;

use super::spring::{Spring, SpringConfig};

/// Settle notification for a finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settle {
    /// Snap index the run was heading for.
    pub index: usize,
    /// Final offset (the target offset).
    pub position: f64,
    /// True when the max-duration guard ended the run.
    pub forced: bool,
}

/// Drives the live position between drags.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    spring: Spring,
    target_index: usize,
    elapsed: Duration,
    max_duration: Duration,
}

impl AnimationDriver {
    /// Start a run from `from` toward `target`, seeded with the gesture's
    /// release velocity in px/ms.
    #[must_use]
    pub fn animate_to(
        from: f64,
        target: f64,
        target_index: usize,
        release_velocity: f64,
        config: &SpringConfig,
        max_duration: Duration,
    ) -> Self {
        Self {
            spring: Spring::new(from, target, config).with_velocity_px_per_ms(release_velocity),
            target_index,
            elapsed: Duration::ZERO,
            max_duration,
        }
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.spring.position()
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.spring.velocity()
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.spring.target()
    }

    #[inline]
    #[must_use]
    pub fn target_index(&self) -> usize {
        self.target_index
    }

    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Advance one frame. Returns the settle once the run is over.
    pub fn tick(&mut self, dt: Duration) -> Option<Settle> {
        self.spring.advance(dt);
        self.elapsed = self.elapsed.saturating_add(dt);

        let forced = if self.spring.is_at_rest() {
            false
        } else if self.elapsed >= self.max_duration {
            self.spring.snap_to_target();
            true
        } else {
            return None;
        };

        Some(Settle {
            index: self.target_index,
            position: self.spring.position(),
            forced,
        })
    }

    /// Stop the run where it is and return the displayed position.
    #[must_use]
    pub fn interrupt(self) -> f64 {
        self.spring.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::spring::presets;

    const MS_16: Duration = Duration::from_millis(16);
    const LONG: Duration = Duration::from_secs(3);

    fn run(driver: &mut AnimationDriver, max_frames: usize) -> Option<(usize, Settle)> {
        (1..=max_frames).find_map(|frame| driver.tick(MS_16).map(|settle| (frame, settle)))
    }

    #[test]
    fn settles_on_target_index() {
        let mut driver = AnimationDriver::animate_to(650.0, 100.0, 0, 0.0, &presets::sheet(), LONG);
        let (_, settle) = run(&mut driver, 200).expect("driver never settled");
        assert_eq!(settle.index, 0);
        assert_eq!(settle.position, 100.0);
        assert!(!settle.forced);
    }

    #[test]
    fn position_moves_toward_target() {
        let mut driver = AnimationDriver::animate_to(700.0, 100.0, 0, 0.0, &presets::sheet(), LONG);
        driver.tick(MS_16);
        let first = driver.position();
        driver.tick(MS_16);
        assert!(first < 700.0);
        assert!(driver.position() < first);
    }

    #[test]
    fn interrupt_returns_displayed_position() {
        let mut driver = AnimationDriver::animate_to(700.0, 100.0, 0, 0.0, &presets::sheet(), LONG);
        for _ in 0..5 {
            driver.tick(MS_16);
        }
        let displayed = driver.position();
        let origin = driver.interrupt();
        assert_eq!(origin, displayed);
        assert!(origin > 100.0 && origin < 700.0);
    }

    #[test]
    fn stuck_spring_is_force_settled() {
        let undamped = crate::animation::spring::SpringConfig {
            damping: 0.0,
            ..presets::sheet()
        };
        let max = Duration::from_millis(500);
        let mut driver = AnimationDriver::animate_to(700.0, 100.0, 0, 0.0, &undamped, max);
        let (frame, settle) = run(&mut driver, 100).expect("guard never fired");
        assert!(settle.forced);
        assert_eq!(settle.position, 100.0);
        assert_eq!(frame, 32, "500ms at 16ms frames ends on frame 32");
    }

    #[test]
    fn release_velocity_seeds_spring() {
        let driver = AnimationDriver::animate_to(400.0, 700.0, 1, 0.3, &presets::sheet(), LONG);
        assert_eq!(driver.velocity(), 300.0);
        assert_eq!(driver.target_index(), 1);
        assert_eq!(driver.target(), 700.0);
    }
}
