#![forbid(unsafe_code)]

//! Policy-as-data configuration for sheet hosts.
//!
//! Captures every tunable of both sheet variants as a single [`SheetPolicy`]
//! that can be loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # snapsheet.toml
//! [gesture]
//! damping_factor = 0.25
//!
//! [spring]
//! stiffness = 220.0
//!
//! [detail]
//! half_fraction = 0.5
//! ```
//!
//! ```rust,ignore
//! let policy = SheetPolicy::from_toml_file("snapsheet.toml")?;
//! let controller = SheetController::new(policy.to_detail_config(), &viewport)?;
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the built-in tuning, so partial files are
//! accepted and `SheetPolicy::default()` reproduces
//! [`SheetConfig::two_point`] and [`SheetConfig::three_point`].

#[cfg(feature = "policy-config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "policy-config")]
use serde::{Deserialize, Serialize};
use snapsheet_core::{
    GestureConfig, SheetConfig, SheetError, SheetLayout, SnapPolicy, SpringConfig,
    config::DEFAULT_MAX_SETTLE_MS,
};

use crate::error::ConfigError;
use crate::pacer::DEFAULT_MAX_FRAME;

/// All host-side tunables.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct SheetPolicy {
    /// Longest a settle animation may run before it is forced (ms).
    pub max_settle_ms: u64,
    /// Layout shared by both variants.
    pub layout: LayoutPolicy,
    /// Extra geometry of the three-point sheet.
    pub detail: DetailPolicy,
    pub gesture: GestureConfig,
    pub snap: SnapPolicy,
    pub spring: SpringConfig,
    pub frame: FramePolicy,
}

impl Default for SheetPolicy {
    fn default() -> Self {
        let base = SheetConfig::two_point();
        Self {
            max_settle_ms: DEFAULT_MAX_SETTLE_MS,
            layout: LayoutPolicy::default(),
            detail: DetailPolicy::default(),
            gesture: base.gesture,
            snap: base.snap,
            spring: base.spring,
            frame: FramePolicy::default(),
        }
    }
}

impl SheetPolicy {
    /// Parse from a TOML string.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let policy: Self = toml::from_str(s)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load from a TOML file.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse from a JSON string.
    #[cfg(feature = "policy-config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let policy: Self = serde_json::from_str(s)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load from a JSON file.
    #[cfg(feature = "policy-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Serialize to pretty TOML.
    #[cfg(feature = "policy-config")]
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check both derived controller configs and the frame policy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_floating_config().validate()?;
        self.to_detail_config().validate()?;
        if self.frame.max_frame_ms == 0 {
            return Err(SheetError::invalid("frame.max_frame_ms", "must be positive").into());
        }
        Ok(())
    }

    /// Config for the two-point floating sheet.
    #[must_use]
    pub fn to_floating_config(&self) -> SheetConfig {
        self.to_config(None)
    }

    /// Config for the three-point detail sheet.
    #[must_use]
    pub fn to_detail_config(&self) -> SheetConfig {
        self.to_config(Some(self.detail.half_fraction))
    }

    /// Frame delta cap for [`FramePacer`](crate::pacer::FramePacer).
    #[must_use]
    pub fn max_frame(&self) -> Duration {
        Duration::from_millis(self.frame.max_frame_ms)
    }

    fn to_config(&self, half_fraction: Option<f64>) -> SheetConfig {
        SheetConfig {
            layout: SheetLayout {
                collapsed_height_portrait: self.layout.collapsed_height_portrait,
                collapsed_height_landscape: self.layout.collapsed_height_landscape,
                header_bottom: self.layout.header_bottom,
                margin: self.layout.margin,
                half_fraction,
            },
            gesture: self.gesture,
            snap: self.snap,
            spring: self.spring,
            max_settle_ms: self.max_settle_ms,
        }
    }
}

/// Layout values shared by both sheet variants.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct LayoutPolicy {
    pub collapsed_height_portrait: f64,
    pub collapsed_height_landscape: f64,
    pub header_bottom: f64,
    pub margin: f64,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        let layout = SheetLayout::two_point();
        Self {
            collapsed_height_portrait: layout.collapsed_height_portrait,
            collapsed_height_landscape: layout.collapsed_height_landscape,
            header_bottom: layout.header_bottom,
            margin: layout.margin,
        }
    }
}

/// Three-point sheet geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct DetailPolicy {
    /// Half target as a fraction of viewport height.
    pub half_fraction: f64,
}

impl Default for DetailPolicy {
    fn default() -> Self {
        Self {
            half_fraction: SheetLayout::three_point().half_fraction.unwrap_or(0.45),
        }
    }
}

/// Frame pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct FramePolicy {
    /// Largest delta fed to the spring per frame (ms).
    pub max_frame_ms: u64,
}

impl Default for FramePolicy {
    fn default() -> Self {
        Self {
            max_frame_ms: u64::try_from(DEFAULT_MAX_FRAME.as_millis()).unwrap_or(33),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_presets() {
        let policy = SheetPolicy::default();
        assert_eq!(policy.to_floating_config(), SheetConfig::two_point());
        assert_eq!(policy.to_detail_config(), SheetConfig::three_point());
        assert_eq!(policy.max_frame(), DEFAULT_MAX_FRAME);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn zero_frame_cap_rejected() {
        let policy = SheetPolicy {
            frame: FramePolicy { max_frame_ms: 0 },
            ..SheetPolicy::default()
        };
        let err = policy.validate().unwrap_err();
        assert!(err.to_string().contains("frame.max_frame_ms"));
    }

    #[test]
    fn bad_half_fraction_only_breaks_detail() {
        let policy = SheetPolicy {
            detail: DetailPolicy { half_fraction: 1.5 },
            ..SheetPolicy::default()
        };
        assert!(policy.to_floating_config().validate().is_ok());
        assert!(matches!(
            policy.validate(),
            Err(ConfigError::Invalid(SheetError::InvalidConfig {
                field: "layout.half_fraction",
                ..
            }))
        ));
    }
}
