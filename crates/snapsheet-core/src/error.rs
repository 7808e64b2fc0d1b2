#![forbid(unsafe_code)]

//! Error types for snap-target and configuration validation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SheetError>;

/// Errors raised while building snap targets or validating configuration.
///
/// Degenerate geometry is never reported here: the geometry resolver clamps
/// it locally. These variants describe programming errors that must fail at
/// construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SheetError {
    #[error("expected 2 or 3 snap targets, got {count}")]
    TargetCount { count: usize },

    #[error("snap target {index} is not a finite offset")]
    NonFiniteTarget { index: usize },

    #[error("snap target {index} lies above the target before it")]
    Unordered { index: usize },

    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
}

impl SheetError {
    #[must_use]
    pub const fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidConfig { field, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::SheetError;

    #[test]
    fn target_count_message_includes_count() {
        let err = SheetError::TargetCount { count: 1 };
        assert_eq!(err.to_string(), "expected 2 or 3 snap targets, got 1");
    }

    #[test]
    fn invalid_constructor_names_field() {
        let err = SheetError::invalid("gesture.damping_factor", "must be in (0, 1]");
        assert_eq!(
            err.to_string(),
            "invalid config `gesture.damping_factor`: must be in (0, 1]"
        );
    }
}
