#![forbid(unsafe_code)]

//! Frame delta pacing.
//!
//! The host clock can stall (backgrounded app, debugger, GC pause in the
//! embedding). Feeding a multi-second delta to the spring would teleport the
//! sheet, so every delta is capped before it reaches the controller.

use std::time::Duration;

use web_time::Instant;

/// Two frames at 60 Hz.
pub const DEFAULT_MAX_FRAME: Duration = Duration::from_millis(33);

/// Turns frame timestamps into capped deltas.
#[derive(Debug, Clone)]
pub struct FramePacer {
    last: Option<Instant>,
    max_dt: Duration,
    clamped: u64,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME)
    }
}

impl FramePacer {
    #[must_use]
    pub fn new(max_dt: Duration) -> Self {
        Self {
            last: None,
            max_dt,
            clamped: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn max_dt(&self) -> Duration {
        self.max_dt
    }

    /// Frames whose delta hit the cap.
    #[inline]
    #[must_use]
    pub fn clamped_frames(&self) -> u64 {
        self.clamped
    }

    /// Forget the previous timestamp; the next frame reports zero.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Delta since the previous frame, capped. The first frame is zero.
    pub fn advance(&mut self, now: Instant) -> Duration {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        self.clamp(dt)
    }

    /// Cap an externally measured delta.
    pub fn clamp(&mut self, dt: Duration) -> Duration {
        if dt <= self.max_dt {
            return dt;
        }
        self.clamped = self.clamped.saturating_add(1);
        tracing::trace!(
            dt_ms = dt.as_secs_f64() * 1000.0,
            cap_ms = self.max_dt.as_secs_f64() * 1000.0,
            "frame delta capped"
        );
        self.max_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_zero() {
        let mut pacer = FramePacer::default();
        assert_eq!(pacer.advance(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn deltas_follow_timestamps() {
        let mut pacer = FramePacer::default();
        let t0 = Instant::now();
        pacer.advance(t0);
        assert_eq!(
            pacer.advance(t0 + Duration::from_millis(16)),
            Duration::from_millis(16)
        );
    }

    #[test]
    fn stalls_are_capped() {
        let mut pacer = FramePacer::default();
        let t0 = Instant::now();
        pacer.advance(t0);
        assert_eq!(pacer.advance(t0 + Duration::from_secs(2)), DEFAULT_MAX_FRAME);
        assert_eq!(pacer.clamped_frames(), 1);
    }

    #[test]
    fn reset_restarts_from_zero() {
        let mut pacer = FramePacer::default();
        let t0 = Instant::now();
        pacer.advance(t0);
        pacer.reset();
        assert_eq!(pacer.advance(t0 + Duration::from_millis(20)), Duration::ZERO);
    }

    #[test]
    fn clock_going_backwards_is_zero() {
        let mut pacer = FramePacer::default();
        let t0 = Instant::now() + Duration::from_millis(50);
        pacer.advance(t0);
        assert_eq!(pacer.advance(t0 - Duration::from_millis(10)), Duration::ZERO);
    }
}
