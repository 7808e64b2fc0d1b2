#![forbid(unsafe_code)]

//! Controller configuration.
//!
//! Every tunable of the sheet lives in [`SheetConfig`]. Defaults reproduce
//! the shipped tuning; the two presets differ only in layout.

use std::time::Duration;

use crate::animation::spring::{SpringConfig, presets};
use crate::error::{Result, SheetError};
use crate::geometry::SheetLayout;
use crate::gesture::GestureConfig;
use crate::snap::SnapPolicy;

/// Default cap on a single settle animation.
pub const DEFAULT_MAX_SETTLE_MS: u64 = 1_500;

/// Full controller configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SheetConfig {
    pub layout: SheetLayout,
    pub gesture: GestureConfig,
    pub snap: SnapPolicy,
    pub spring: SpringConfig,
    /// Longest a settle animation may run before it is forced (ms).
    pub max_settle_ms: u64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self::two_point()
    }
}

impl SheetConfig {
    /// Floating title/tab sheet.
    #[must_use]
    pub fn two_point() -> Self {
        Self {
            layout: SheetLayout::two_point(),
            gesture: GestureConfig::default(),
            snap: SnapPolicy::default(),
            spring: presets::sheet(),
            max_settle_ms: DEFAULT_MAX_SETTLE_MS,
        }
    }

    /// Detail-page sheet with a half target.
    #[must_use]
    pub fn three_point() -> Self {
        Self {
            layout: SheetLayout::three_point(),
            ..Self::two_point()
        }
    }

    #[must_use]
    pub fn with_spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    #[must_use]
    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    #[must_use]
    pub fn with_snap(mut self, snap: SnapPolicy) -> Self {
        self.snap = snap;
        self
    }

    #[must_use]
    pub fn with_max_settle(mut self, max: Duration) -> Self {
        self.max_settle_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[inline]
    #[must_use]
    pub fn max_settle_duration(&self) -> Duration {
        Duration::from_millis(self.max_settle_ms)
    }

    /// Check every tunable. Returns the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        self.gesture.validate()?;
        self.snap.validate()?;
        self.spring.validate()?;
        if self.max_settle_ms == 0 {
            return Err(SheetError::invalid("max_settle_ms", "must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        assert!(SheetConfig::two_point().validate().is_ok());
        assert!(SheetConfig::three_point().validate().is_ok());
    }

    #[test]
    fn presets_differ_only_in_layout() {
        let two = SheetConfig::two_point();
        let three = SheetConfig::three_point();
        assert_eq!(two.layout.target_count(), 2);
        assert_eq!(three.layout.target_count(), 3);
        assert_eq!(two.snap, three.snap);
        assert_eq!(two.spring, three.spring);
    }

    #[test]
    fn zero_max_settle_rejected() {
        let config = SheetConfig::two_point().with_max_settle(Duration::ZERO);
        assert_eq!(
            config.validate(),
            Err(SheetError::invalid("max_settle_ms", "must be positive"))
        );
    }

    #[test]
    fn nested_errors_surface_field_name() {
        let config = SheetConfig::two_point().with_gesture(GestureConfig {
            damping_factor: 2.0,
            ..GestureConfig::default()
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("gesture.damping_factor"));
    }
}
