#![forbid(unsafe_code)]

//! The snapping sheet controller.
//!
//! [`SheetController`] ties the pieces together: it feeds drag samples
//! through a [`GestureSample`], resolves releases with the [`SnapPolicy`],
//! runs an [`AnimationDriver`] toward the chosen target, and commits the
//! [`ExpansionState`] when the run settles.
//!
//! # State Machine
//!
//! The controller is always in exactly one phase:
//!
//! - **Resting**: the live position is pinned to a target.
//! - **Dragging**: the gesture sample owns the live position.
//! - **Animating**: the driver owns the live position.
//!
//! Each phase carries its own live position, so there is one writer at a
//! time by construction.
//!
//! # Invariants
//!
//! 1. The expansion state changes only on a settle, never mid-drag or
//!    mid-animation.
//! 2. A drag start interrupts any animation and begins from the displayed
//!    position.
//! 3. Target recomputation is applied immediately at rest and otherwise
//!    deferred to the next settle (latest wins).
//! 4. `Dismissed` fires once per entry into `Collapsed`.
//!
//! # Failure Modes
//!
//! - Move/end/cancel without a start are ignored.
//! - An animation that never settles is forced after `max_settle_ms`.
//!
//! [`SnapPolicy`]: crate::snap::SnapPolicy

use std::time::Duration;

use crate::animation::driver::{AnimationDriver, Settle};
use crate::config::SheetConfig;
use crate::error::Result;
use crate::event::{GestureEvent, SheetEvent};
use crate::geometry::{SnapTargets, Viewport, compute_targets};
use crate::gesture::{GestureSample, Release};
use crate::interpolate::SheetVisuals;
use crate::snap::{SnapDirection, nearest_index};
use crate::state::{ExpansionMachine, ExpansionState, Transition};

#[derive(Debug, Clone)]
enum Phase {
    Resting { position: f64 },
    Dragging(GestureSample),
    Animating(AnimationDriver),
}

impl Phase {
    fn live_position(&self) -> f64 {
        match self {
            Self::Resting { position } => *position,
            Self::Dragging(sample) => sample.live(),
            Self::Animating(driver) => driver.position(),
        }
    }
}

/// Gesture-to-position state machine for a 2- or 3-point sheet.
#[derive(Debug, Clone)]
pub struct SheetController {
    config: SheetConfig,
    targets: SnapTargets,
    pending: Option<SnapTargets>,
    machine: ExpansionMachine,
    phase: Phase,
}

impl SheetController {
    /// Build a controller for a viewport. Starts collapsed and at rest.
    pub fn new(config: SheetConfig, viewport: &Viewport) -> Result<Self> {
        let targets = compute_targets(viewport, &config.layout);
        Self::with_targets(config, targets)
    }

    /// Build a controller over explicit targets.
    pub fn with_targets(config: SheetConfig, targets: SnapTargets) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            phase: Phase::Resting {
                position: targets.collapsed(),
            },
            targets,
            pending: None,
            machine: ExpansionMachine::new(),
        })
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn state(&self) -> ExpansionState {
        self.machine.state()
    }

    /// Currently rendered offset.
    #[inline]
    #[must_use]
    pub fn live_position(&self) -> f64 {
        self.phase.live_position()
    }

    /// Expansion progress in `[0, 1]` at the live position.
    #[inline]
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.targets.progress_at(self.live_position())
    }

    /// All visual channels at the current progress.
    #[must_use]
    pub fn visuals(&self) -> SheetVisuals {
        SheetVisuals::at(self.progress())
    }

    #[inline]
    #[must_use]
    pub fn targets(&self) -> &SnapTargets {
        &self.targets
    }

    /// Targets waiting for the sheet to come to rest.
    #[inline]
    #[must_use]
    pub fn pending_targets(&self) -> Option<&SnapTargets> {
        self.pending.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Whether inner content may scroll (never while collapsed).
    #[inline]
    #[must_use]
    pub fn content_scroll_enabled(&self) -> bool {
        self.state().allows_content_scroll()
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating(_))
    }

    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        matches!(self.phase, Phase::Resting { .. })
    }

    /// The active drag, if any.
    #[must_use]
    pub fn gesture(&self) -> Option<&GestureSample> {
        match &self.phase {
            Phase::Dragging(sample) => Some(sample),
            _ => None,
        }
    }

    /// The running animation, if any.
    #[must_use]
    pub fn animation(&self) -> Option<&AnimationDriver> {
        match &self.phase {
            Phase::Animating(driver) => Some(driver),
            _ => None,
        }
    }

    // -----------------------------------------------------------------
    // Gesture input
    // -----------------------------------------------------------------

    /// Process one gesture event.
    pub fn handle(&mut self, event: GestureEvent) -> Vec<SheetEvent> {
        match event {
            GestureEvent::Start => {
                self.on_drag_start();
                Vec::new()
            }
            GestureEvent::Move { translation } => {
                self.on_drag_move(translation);
                Vec::new()
            }
            GestureEvent::End {
                translation,
                velocity,
            } => self.on_drag_end(translation, velocity),
            GestureEvent::Cancel => self.on_drag_cancel(),
        }
    }

    /// Begin a drag from the displayed position, interrupting any animation.
    pub fn on_drag_start(&mut self) {
        let origin = match self.take_phase() {
            Phase::Resting { position } => position,
            Phase::Dragging(sample) => sample.live(),
            Phase::Animating(driver) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    target_index = driver.target_index(),
                    position = driver.position(),
                    "drag interrupted animation"
                );
                driver.interrupt()
            }
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(origin, "drag start");
        self.phase = Phase::Dragging(GestureSample::begin(
            origin,
            &self.targets,
            &self.config.gesture,
        ));
    }

    /// Apply a move sample; returns the live position.
    pub fn on_drag_move(&mut self, translation: f64) -> f64 {
        match &mut self.phase {
            Phase::Dragging(sample) => {
                sample.advance(translation, &self.targets, &self.config.gesture)
            }
            phase => {
                #[cfg(feature = "tracing")]
                tracing::trace!(translation, "move without active drag ignored");
                phase.live_position()
            }
        }
    }

    /// Release the drag and start animating to the resolved target.
    pub fn on_drag_end(&mut self, translation: f64, velocity: f64) -> Vec<SheetEvent> {
        match self.take_phase() {
            Phase::Dragging(sample) => {
                let release =
                    sample.release(translation, velocity, &self.targets, &self.config.gesture);
                self.resolve_release(release)
            }
            other => {
                self.phase = other;
                #[cfg(feature = "tracing")]
                tracing::trace!("release without active drag ignored");
                Vec::new()
            }
        }
    }

    /// Cancel the drag; resolves as a still release at the live position.
    pub fn on_drag_cancel(&mut self) -> Vec<SheetEvent> {
        match self.take_phase() {
            Phase::Dragging(sample) => self.resolve_release(sample.cancel()),
            other => {
                self.phase = other;
                Vec::new()
            }
        }
    }

    // -----------------------------------------------------------------
    // Frames, programmatic moves, geometry
    // -----------------------------------------------------------------

    /// Advance the running animation by one frame.
    pub fn tick(&mut self, dt: Duration) -> Vec<SheetEvent> {
        let Phase::Animating(driver) = &mut self.phase else {
            return Vec::new();
        };
        let Some(settle) = driver.tick(dt) else {
            return Vec::new();
        };
        self.phase = Phase::Resting {
            position: settle.position,
        };
        self.apply_settle(settle)
    }

    /// Animate to a named state without a gesture.
    ///
    /// Returns `false` when the state does not exist for this sheet or a
    /// drag is in progress.
    pub fn snap_to(&mut self, state: ExpansionState) -> bool {
        let Some(index) = state.index_in(self.targets.len()) else {
            return false;
        };
        let offset = self.target_offset(index);
        let (from, velocity) = match &self.phase {
            Phase::Dragging(_) => return false,
            Phase::Resting { position } => {
                if state == self.state() && *position == offset {
                    return true;
                }
                (*position, 0.0)
            }
            Phase::Animating(driver) => (driver.position(), driver.velocity() / 1000.0),
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(%state, from, to = offset, "programmatic snap");
        self.phase = Phase::Animating(self.driver(from, offset, index, velocity));
        true
    }

    /// Recompute targets for a new viewport.
    pub fn set_viewport(&mut self, viewport: &Viewport) -> Vec<SheetEvent> {
        let targets = compute_targets(viewport, &self.config.layout);
        self.set_targets(targets)
    }

    /// Replace the targets, now if at rest, otherwise at the next settle.
    pub fn set_targets(&mut self, targets: SnapTargets) -> Vec<SheetEvent> {
        if !self.is_at_rest() {
            #[cfg(feature = "tracing")]
            tracing::debug!(targets = ?targets.as_slice(), "geometry change deferred");
            self.pending = (targets != self.targets).then_some(targets);
            return Vec::new();
        }
        self.pending = None;
        if targets == self.targets {
            return Vec::new();
        }
        let mut events = Vec::with_capacity(3);
        self.apply_targets(targets, &mut events);
        events
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    fn take_phase(&mut self) -> Phase {
        let position = self.phase.live_position();
        std::mem::replace(&mut self.phase, Phase::Resting { position })
    }

    fn current_index(&self) -> usize {
        self.state()
            .index_in(self.targets.len())
            .unwrap_or_else(|| self.targets.collapsed_index())
    }

    fn target_offset(&self, index: usize) -> f64 {
        self.targets
            .get(index)
            .unwrap_or_else(|| self.targets.collapsed())
    }

    fn driver(&self, from: f64, to: f64, index: usize, velocity: f64) -> AnimationDriver {
        AnimationDriver::animate_to(
            from,
            to,
            index,
            velocity,
            &self.config.spring,
            self.config.max_settle_duration(),
        )
    }

    fn resolve_release(&mut self, release: Release) -> Vec<SheetEvent> {
        let decision = self.config.snap.resolve(
            release.position,
            release.velocity,
            self.current_index(),
            &self.targets,
        );
        #[cfg(feature = "tracing")]
        tracing::debug!(
            position = release.position,
            velocity = release.velocity,
            index = decision.index,
            rule = ?decision.rule,
            "drag released"
        );

        let mut events = Vec::with_capacity(1);
        if decision.direction != SnapDirection::Stay {
            events.push(SheetEvent::Haptic {
                target: ExpansionState::for_index(decision.index, self.targets.len()),
                direction: decision.direction,
            });
        }
        self.phase = Phase::Animating(self.driver(
            release.position,
            decision.offset,
            decision.index,
            release.velocity,
        ));
        events
    }

    fn apply_settle(&mut self, settle: Settle) -> Vec<SheetEvent> {
        let count = self.targets.len();
        let state = ExpansionState::for_index(settle.index, count);
        if settle.forced {
            #[cfg(feature = "tracing")]
            tracing::warn!(%state, "animation exceeded max duration, forcing settle");
        }

        let mut events = Vec::with_capacity(4);
        events.push(SheetEvent::Settled {
            state,
            forced: settle.forced,
        });
        if let Some(transition) = self.machine.settle(settle.index, count) {
            push_transition(&mut events, transition);
        }
        if let Some(targets) = self.pending.take() {
            self.apply_targets(targets, &mut events);
        }
        events
    }

    fn apply_targets(&mut self, targets: SnapTargets, events: &mut Vec<SheetEvent>) {
        #[cfg(feature = "tracing")]
        tracing::debug!(targets = ?targets.as_slice(), "geometry applied");
        let live = self.live_position();
        self.targets = targets;
        events.push(SheetEvent::TargetsChanged { targets });

        let index = match self.state().index_in(targets.len()) {
            Some(index) => index,
            None => {
                let index = nearest_index(live, &targets);
                if let Some(transition) = self.machine.settle(index, targets.len()) {
                    push_transition(events, transition);
                }
                index
            }
        };
        self.phase = Phase::Resting {
            position: self.target_offset(index),
        };
    }
}

fn push_transition(events: &mut Vec<SheetEvent>, transition: Transition) {
    #[cfg(feature = "tracing")]
    tracing::info!(from = %transition.from, to = %transition.to, "sheet state changed");
    events.push(SheetEvent::StateChanged {
        from: transition.from,
        to: transition.to,
    });
    if transition.dismisses() {
        events.push(SheetEvent::Dismissed);
    }
}
