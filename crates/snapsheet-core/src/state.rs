#![forbid(unsafe_code)]

//! Discrete expansion state.
//!
//! [`ExpansionMachine`] is the only place the public state changes, and it
//! only changes on a settle. Settling twice on the same index is a no-op, so
//! consumers never see a repeated transition or a second dismissal.

/// Named resting positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExpansionState {
    #[default]
    Collapsed,
    /// Three-point sheets only.
    Half,
    Expanded,
}

impl ExpansionState {
    /// State for a snap index in a list of `count` targets.
    ///
    /// Index 0 is expanded and the last index collapsed; a middle index
    /// exists only for three targets.
    #[must_use]
    pub fn for_index(index: usize, count: usize) -> Self {
        if index == 0 && count > 1 {
            Self::Expanded
        } else if index + 1 >= count {
            Self::Collapsed
        } else {
            Self::Half
        }
    }

    /// Snap index of this state in a list of `count` targets, if present.
    #[must_use]
    pub fn index_in(self, count: usize) -> Option<usize> {
        match (self, count) {
            (Self::Expanded, 2 | 3) => Some(0),
            (Self::Half, 3) => Some(1),
            (Self::Collapsed, 2 | 3) => Some(count - 1),
            _ => None,
        }
    }

    /// Inner content may scroll only once the sheet is out of its peek state.
    #[inline]
    #[must_use]
    pub fn allows_content_scroll(self) -> bool {
        self != Self::Collapsed
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Collapsed => "collapsed",
            Self::Half => "half",
            Self::Expanded => "expanded",
        }
    }
}

impl std::fmt::Display for ExpansionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An observable state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: ExpansionState,
    pub to: ExpansionState,
}

impl Transition {
    /// Entering `Collapsed` from elsewhere dismisses the sheet's content.
    #[inline]
    #[must_use]
    pub fn dismisses(&self) -> bool {
        self.to == ExpansionState::Collapsed && self.from != ExpansionState::Collapsed
    }
}

/// Holds the authoritative expansion state.
#[derive(Debug, Clone, Default)]
pub struct ExpansionMachine {
    state: ExpansionState,
    settles: u64,
}

impl ExpansionMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> ExpansionState {
        self.state
    }

    /// Number of settles seen, including no-op ones.
    #[inline]
    #[must_use]
    pub fn settle_count(&self) -> u64 {
        self.settles
    }

    /// Record a settle on `index` of `count` targets.
    ///
    /// Returns the transition if the state changed.
    pub fn settle(&mut self, index: usize, count: usize) -> Option<Transition> {
        self.settles = self.settles.saturating_add(1);
        let next = ExpansionState::for_index(index, count);
        if next == self.state {
            return None;
        }
        let transition = Transition {
            from: self.state,
            to: next,
        };
        self.state = next;
        Some(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_collapsed() {
        assert_eq!(ExpansionMachine::new().state(), ExpansionState::Collapsed);
    }

    #[test]
    fn index_mapping_two_point() {
        assert_eq!(ExpansionState::for_index(0, 2), ExpansionState::Expanded);
        assert_eq!(ExpansionState::for_index(1, 2), ExpansionState::Collapsed);
        assert_eq!(ExpansionState::Half.index_in(2), None);
        assert_eq!(ExpansionState::Collapsed.index_in(2), Some(1));
    }

    #[test]
    fn index_mapping_three_point() {
        assert_eq!(ExpansionState::for_index(0, 3), ExpansionState::Expanded);
        assert_eq!(ExpansionState::for_index(1, 3), ExpansionState::Half);
        assert_eq!(ExpansionState::for_index(2, 3), ExpansionState::Collapsed);
        for state in [
            ExpansionState::Expanded,
            ExpansionState::Half,
            ExpansionState::Collapsed,
        ] {
            let index = state.index_in(3).unwrap();
            assert_eq!(ExpansionState::for_index(index, 3), state);
        }
    }

    #[test]
    fn settle_is_idempotent() {
        let mut machine = ExpansionMachine::new();
        let first = machine.settle(0, 3);
        assert_eq!(
            first,
            Some(Transition {
                from: ExpansionState::Collapsed,
                to: ExpansionState::Expanded
            })
        );
        assert_eq!(machine.settle(0, 3), None);
        assert_eq!(machine.settle_count(), 2);
    }

    #[test]
    fn dismissal_only_on_entering_collapsed() {
        let mut machine = ExpansionMachine::new();
        assert_eq!(machine.settle(2, 3), None);
        let up = machine.settle(1, 3).unwrap();
        assert!(!up.dismisses());
        let down = machine.settle(2, 3).unwrap();
        assert!(down.dismisses());
        assert_eq!(machine.settle(2, 3), None);
    }

    #[test]
    fn scroll_locked_while_collapsed() {
        assert!(!ExpansionState::Collapsed.allows_content_scroll());
        assert!(ExpansionState::Half.allows_content_scroll());
        assert!(ExpansionState::Expanded.allows_content_scroll());
    }

    #[test]
    fn display_uses_snake_names() {
        assert_eq!(ExpansionState::Half.to_string(), "half");
    }
}
