#![forbid(unsafe_code)]

//! Controller input and output events.
//!
//! # Design Notes
//!
//! - Translations are cumulative since the drag began, in pixels, positive
//!   downward.
//! - Velocities are px/ms from the terminal release event only.
//! - Output events are returned in the order they happened; a settle that
//!   changes state yields `Settled`, then `StateChanged`, then `Dismissed`
//!   when the sheet collapsed.

use crate::geometry::SnapTargets;
use crate::snap::SnapDirection;
use crate::state::ExpansionState;

/// Touch-drag input from the gesture recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Finger went down on the sheet's drag region.
    Start,
    /// Finger moved; `translation` is cumulative since `Start`.
    Move { translation: f64 },
    /// Finger lifted.
    End { translation: f64, velocity: f64 },
    /// The system took the gesture away (incoming call, edge swipe).
    Cancel,
}

/// Output of the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetEvent {
    /// A release resolved to a different target; fire one haptic pulse.
    Haptic {
        target: ExpansionState,
        direction: SnapDirection,
    },
    /// An animation finished (or was forced to finish) on `state`.
    Settled { state: ExpansionState, forced: bool },
    /// The authoritative state changed.
    StateChanged {
        from: ExpansionState,
        to: ExpansionState,
    },
    /// The sheet entered `Collapsed` from another state.
    Dismissed,
    /// New snap targets were applied.
    TargetsChanged { targets: SnapTargets },
}

impl SheetEvent {
    /// Short label for logs and traces.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Haptic { .. } => "haptic",
            Self::Settled { .. } => "settled",
            Self::StateChanged { .. } => "state_changed",
            Self::Dismissed => "dismissed",
            Self::TargetsChanged { .. } => "targets_changed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels() {
        assert_eq!(SheetEvent::Dismissed.kind(), "dismissed");
        assert_eq!(
            SheetEvent::Settled {
                state: ExpansionState::Half,
                forced: false
            }
            .kind(),
            "settled"
        );
    }
}
