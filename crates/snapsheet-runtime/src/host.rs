#![forbid(unsafe_code)]

//! Sheet host: owns a controller and fans its events out to collaborators.
//!
//! The host is the only place side effects happen. The controller returns
//! [`SheetEvent`]s; the host turns them into haptic pulses and listener
//! callbacks, and hands the renderer one [`FrameOutput`] per frame.
//!
//! # Frame Loop
//!
//! ```text
//! display link ──► frame(now) ──► pacer ──► controller.tick(dt)
//!                                              │
//!                                              ├─► events ──► haptics / listener
//!                                              └─► FrameOutput ──► renderer
//! touch input  ──► dispatch(event) ──► controller.handle(event) ──► events
//! ```
//!
//! Everything runs on the UI thread; the host is `!Sync` by use, not by type.

use std::time::Duration;

use snapsheet_core::{
    ExpansionState, GestureEvent, SheetController, SheetEvent, SnapDirection, SnapTargets,
    Viewport,
};
use tracing::{debug, info_span};
use web_time::Instant;

use crate::frame::FrameOutput;
use crate::pacer::FramePacer;

/// Fires a discrete haptic pulse.
pub trait HapticFeedback {
    fn pulse(&mut self, target: ExpansionState, direction: SnapDirection);
}

/// Observes state-level changes. Every method defaults to a no-op.
pub trait SheetListener {
    fn on_settled(&mut self, _state: ExpansionState, _forced: bool) {}

    fn on_state_changed(&mut self, _from: ExpansionState, _to: ExpansionState) {}

    /// The sheet entered `Collapsed` from another state.
    fn on_dismissed(&mut self) {}

    /// Inner scrolling became allowed or disallowed.
    fn on_content_scroll_changed(&mut self, _enabled: bool) {}

    fn on_targets_changed(&mut self, _targets: &SnapTargets) {}
}

/// Draws one frame from interpolated values.
pub trait SheetRenderer {
    fn render(&mut self, frame: &FrameOutput);
}

impl HapticFeedback for () {
    fn pulse(&mut self, _target: ExpansionState, _direction: SnapDirection) {}
}

impl SheetListener for () {}

impl SheetRenderer for () {
    fn render(&mut self, _frame: &FrameOutput) {}
}

/// Drives a [`SheetController`] and its collaborators.
#[derive(Debug)]
pub struct SheetHost<H, L, R> {
    controller: SheetController,
    pacer: FramePacer,
    haptics: H,
    listener: L,
    renderer: R,
    frames: u64,
}

impl<H, L, R> SheetHost<H, L, R>
where
    H: HapticFeedback,
    L: SheetListener,
    R: SheetRenderer,
{
    pub fn new(controller: SheetController, haptics: H, listener: L, renderer: R) -> Self {
        Self {
            controller,
            pacer: FramePacer::default(),
            haptics,
            listener,
            renderer,
            frames: 0,
        }
    }

    #[must_use]
    pub fn with_pacer(mut self, pacer: FramePacer) -> Self {
        self.pacer = pacer;
        self
    }

    #[inline]
    pub fn controller(&self) -> &SheetController {
        &self.controller
    }

    #[inline]
    pub fn haptics(&self) -> &H {
        &self.haptics
    }

    #[inline]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Frames rendered so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn into_parts(self) -> (SheetController, H, L, R) {
        (self.controller, self.haptics, self.listener, self.renderer)
    }

    /// Feed one gesture event.
    pub fn dispatch(&mut self, event: GestureEvent) {
        let span = info_span!("sheet.gesture", kind = gesture_kind(&event));
        let _guard = span.enter();
        let events = self.controller.handle(event);
        self.route(events);
    }

    /// Run one frame at wall-clock `now`.
    pub fn frame(&mut self, now: Instant) -> FrameOutput {
        let dt = self.pacer.advance(now);
        self.step(dt)
    }

    /// Run one frame with an explicit delta (capped like a measured one).
    pub fn frame_with_dt(&mut self, dt: Duration) -> FrameOutput {
        let dt = self.pacer.clamp(dt);
        self.step(dt)
    }

    /// Programmatic snap (tab tap, close button).
    pub fn snap_to(&mut self, state: ExpansionState) -> bool {
        self.controller.snap_to(state)
    }

    /// Viewport changed (rotation, keyboard, split view).
    pub fn resize(&mut self, viewport: &Viewport) {
        let events = self.controller.set_viewport(viewport);
        self.route(events);
    }

    fn step(&mut self, dt: Duration) -> FrameOutput {
        self.frames = self.frames.saturating_add(1);
        let span = info_span!(
            "sheet.frame",
            frame = self.frames,
            dt_us = u64::try_from(dt.as_micros()).unwrap_or(u64::MAX),
            animating = self.controller.is_animating(),
        );
        let _guard = span.enter();

        let events = self.controller.tick(dt);
        self.route(events);
        let output = FrameOutput::from_controller(&self.controller);
        self.renderer.render(&output);
        output
    }

    fn route(&mut self, events: Vec<SheetEvent>) {
        for event in events {
            debug!(kind = event.kind(), "sheet event");
            match event {
                SheetEvent::Haptic { target, direction } => self.haptics.pulse(target, direction),
                SheetEvent::Settled { state, forced } => self.listener.on_settled(state, forced),
                SheetEvent::StateChanged { from, to } => {
                    self.listener.on_state_changed(from, to);
                    let enabled = to.allows_content_scroll();
                    if from.allows_content_scroll() != enabled {
                        self.listener.on_content_scroll_changed(enabled);
                    }
                }
                SheetEvent::Dismissed => self.listener.on_dismissed(),
                SheetEvent::TargetsChanged { targets } => {
                    self.listener.on_targets_changed(&targets);
                }
            }
        }
    }
}

fn gesture_kind(event: &GestureEvent) -> &'static str {
    match event {
        GestureEvent::Start => "start",
        GestureEvent::Move { .. } => "move",
        GestureEvent::End { .. } => "end",
        GestureEvent::Cancel => "cancel",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapsheet_core::SheetConfig;

    #[derive(Default)]
    struct Pulses(Vec<(ExpansionState, SnapDirection)>);

    impl HapticFeedback for Pulses {
        fn pulse(&mut self, target: ExpansionState, direction: SnapDirection) {
            self.0.push((target, direction));
        }
    }

    fn host() -> SheetHost<Pulses, (), ()> {
        let controller = SheetController::with_targets(
            SheetConfig::two_point(),
            SnapTargets::from_offsets(&[100.0, 700.0]),
        )
        .unwrap();
        SheetHost::new(controller, Pulses::default(), (), ())
    }

    #[test]
    fn one_pulse_per_release() {
        let mut host = host();
        host.dispatch(GestureEvent::Start);
        for step in 1..=10 {
            host.dispatch(GestureEvent::Move {
                translation: f64::from(step) * -40.0,
            });
            host.frame_with_dt(Duration::from_millis(16));
        }
        host.dispatch(GestureEvent::End {
            translation: -400.0,
            velocity: -0.6,
        });
        for _ in 0..120 {
            host.frame_with_dt(Duration::from_millis(16));
        }
        assert_eq!(
            host.haptics().0,
            vec![(ExpansionState::Expanded, SnapDirection::Expand)]
        );
        assert_eq!(host.controller().state(), ExpansionState::Expanded);
    }

    #[test]
    fn frames_are_counted() {
        let mut host = host();
        host.frame_with_dt(Duration::ZERO);
        host.frame_with_dt(Duration::from_millis(16));
        assert_eq!(host.frame_count(), 2);
    }
}
