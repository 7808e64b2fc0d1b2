#![forbid(unsafe_code)]

//! Snap resolution: picks the resting target for a released drag.
//!
//! # Decision order
//!
//! The first matching rule wins, and the order matters:
//!
//! 1. Downward flick (`velocity > flick_velocity`), or any downward motion
//!    within `collapse_proximity` of the collapsed target: collapse.
//! 2. Upward flick (`velocity < -flick_velocity`): expand fully.
//! 3. Nearest target by absolute distance; ties go to the lower index (the
//!    more expanded target).
//!
//! [`SnapPolicy::resolve_index`] is a pure function of position, velocity,
//! and targets.

use crate::error::{Result, SheetError};
use crate::geometry::SnapTargets;

/// Resolver thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SnapPolicy {
    /// Speed in px/ms above which a release counts as a flick (default: 0.15).
    pub flick_velocity: f64,
    /// Distance from the collapsed target within which any downward release
    /// collapses (default: 100px).
    pub collapse_proximity: f64,
}

impl Default for SnapPolicy {
    fn default() -> Self {
        Self {
            flick_velocity: 0.15,
            collapse_proximity: 100.0,
        }
    }
}

/// Which rule produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapRule {
    FlickDown,
    DriftNearCollapsed,
    FlickUp,
    Nearest,
}

/// Direction of a resolved transition relative to the settled state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapDirection {
    /// Toward index 0.
    Expand,
    /// Toward the last index.
    Collapse,
    /// Back to the target the sheet was already settled on.
    Stay,
}

impl SnapDirection {
    #[must_use]
    pub fn between(from_index: usize, to_index: usize) -> Self {
        match to_index.cmp(&from_index) {
            std::cmp::Ordering::Less => Self::Expand,
            std::cmp::Ordering::Greater => Self::Collapse,
            std::cmp::Ordering::Equal => Self::Stay,
        }
    }
}

/// A resolved release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapDecision {
    pub index: usize,
    /// Target offset, clamped into the target range.
    pub offset: f64,
    pub rule: SnapRule,
    pub direction: SnapDirection,
}

impl SnapPolicy {
    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.flick_velocity.is_finite() && self.flick_velocity >= 0.0) {
            return Err(SheetError::invalid(
                "snap.flick_velocity",
                "must be finite and non-negative",
            ));
        }
        if !(self.collapse_proximity.is_finite() && self.collapse_proximity >= 0.0) {
            return Err(SheetError::invalid(
                "snap.collapse_proximity",
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }

    /// Pick the target index for a release.
    #[must_use]
    pub fn resolve_index(
        &self,
        position: f64,
        velocity: f64,
        targets: &SnapTargets,
    ) -> (usize, SnapRule) {
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        let collapsed = targets.collapsed_index();

        if velocity > self.flick_velocity {
            return (collapsed, SnapRule::FlickDown);
        }
        if velocity > 0.0 && (targets.collapsed() - position).abs() <= self.collapse_proximity {
            return (collapsed, SnapRule::DriftNearCollapsed);
        }
        if velocity < -self.flick_velocity {
            return (0, SnapRule::FlickUp);
        }
        (nearest_index(position, targets), SnapRule::Nearest)
    }

    /// Resolve a release against the currently settled index.
    #[must_use]
    pub fn resolve(
        &self,
        position: f64,
        velocity: f64,
        current_index: usize,
        targets: &SnapTargets,
    ) -> SnapDecision {
        let (index, rule) = self.resolve_index(position, velocity, targets);
        let offset = targets
            .get(index)
            .map_or_else(|| targets.collapsed(), |offset| targets.clamp(offset));
        SnapDecision {
            index,
            offset,
            rule,
            direction: SnapDirection::between(current_index, index),
        }
    }
}

/// Index of the target closest to `position`; ties go to the lower index.
#[must_use]
pub fn nearest_index(position: f64, targets: &SnapTargets) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, &offset) in targets.as_slice().iter().enumerate() {
        let distance = (offset - position).abs();
        // Strict comparison keeps the earlier index on ties.
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two() -> SnapTargets {
        SnapTargets::from_offsets(&[100.0, 700.0])
    }

    fn three() -> SnapTargets {
        SnapTargets::from_offsets(&[100.0, 400.0, 700.0])
    }

    #[test]
    fn slow_release_near_collapsed_stays_collapsed() {
        let (index, rule) = SnapPolicy::default().resolve_index(650.0, 0.0, &two());
        assert_eq!(index, 1);
        assert_eq!(rule, SnapRule::Nearest);
    }

    #[test]
    fn fast_downward_flick_wins_over_position() {
        let policy = SnapPolicy::default();
        assert_eq!(policy.resolve_index(680.0, 0.2, &two()), (1, SnapRule::FlickDown));
        assert_eq!(policy.resolve_index(120.0, 0.2, &two()), (1, SnapRule::FlickDown));
    }

    #[test]
    fn slow_downward_drift_near_collapsed_collapses() {
        let policy = SnapPolicy::default();
        assert_eq!(
            policy.resolve_index(610.0, 0.01, &three()),
            (2, SnapRule::DriftNearCollapsed)
        );
        // 101px away: falls through to nearest.
        assert_eq!(policy.resolve_index(599.0, 0.01, &three()), (2, SnapRule::Nearest));
        assert_eq!(policy.resolve_index(500.0, 0.01, &three()), (1, SnapRule::Nearest));
    }

    #[test]
    fn upward_flick_expands_fully() {
        let policy = SnapPolicy::default();
        assert_eq!(policy.resolve_index(690.0, -0.2, &three()), (0, SnapRule::FlickUp));
    }

    #[test]
    fn downward_rule_checked_before_upward_rule() {
        // Zero threshold: both flick rules could match a tiny velocity, the
        // downward rule runs first.
        let policy = SnapPolicy {
            flick_velocity: 0.0,
            ..SnapPolicy::default()
        };
        assert_eq!(policy.resolve_index(300.0, 0.001, &three()).0, 2);
        assert_eq!(policy.resolve_index(300.0, -0.001, &three()).0, 0);
    }

    #[test]
    fn nearest_prefers_more_expanded_on_tie() {
        assert_eq!(nearest_index(400.0, &two()), 0);
        assert_eq!(nearest_index(250.0, &three()), 0);
        assert_eq!(nearest_index(550.0, &three()), 1);
    }

    #[test]
    fn three_point_half_is_reachable() {
        let (index, _) = SnapPolicy::default().resolve_index(410.0, 0.0, &three());
        assert_eq!(index, 1);
    }

    #[test]
    fn nan_velocity_treated_as_still() {
        let (index, rule) = SnapPolicy::default().resolve_index(150.0, f64::NAN, &two());
        assert_eq!((index, rule), (0, SnapRule::Nearest));
    }

    #[test]
    fn decision_direction_and_offset() {
        let policy = SnapPolicy::default();
        let decision = policy.resolve(130.0, 0.0, 2, &three());
        assert_eq!(decision.index, 0);
        assert_eq!(decision.offset, 100.0);
        assert_eq!(decision.direction, SnapDirection::Expand);

        let decision = policy.resolve(720.0, 0.0, 2, &three());
        assert_eq!(decision.offset, 700.0);
        assert_eq!(decision.direction, SnapDirection::Stay);

        let decision = policy.resolve(420.0, 0.5, 1, &three());
        assert_eq!(decision.direction, SnapDirection::Collapse);
    }

    #[test]
    fn zero_travel_targets_resolve_without_panic() {
        let flat = SnapTargets::from_offsets(&[4.0, 4.0, 4.0]);
        let decision = SnapPolicy::default().resolve(4.0, 0.0, 2, &flat);
        assert_eq!(decision.index, 0);
        assert_eq!(decision.offset, 4.0);
    }
}
