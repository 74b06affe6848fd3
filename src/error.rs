//! Error types for session start and tick faults

use thiserror::Error;

/// Why a session could not be started.
///
/// Every variant leaves the controller untouched: no state is mutated when a
/// start is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f32 },
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },
    #[error("{field} must be between {min} and {max} (got {value})")]
    CountOutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },
    #[error("unknown pattern name {0:?}")]
    UnknownPattern(String),
    #[error("a session is already active")]
    SessionActive,
    #[error("malformed config json: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Check a float is finite and inside [min, max]
    pub(crate) fn check_range(
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    ) -> Result<(), Self> {
        if !value.is_finite() {
            return Err(Self::NonFinite { field, value });
        }
        if value < min || value > max {
            return Err(Self::OutOfRange {
                field,
                min,
                max,
                value,
            });
        }
        Ok(())
    }

    /// Like `check_range` but with an open lower bound (value must exceed `min`)
    pub(crate) fn check_positive(
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    ) -> Result<(), Self> {
        Self::check_range(field, value, min, max)?;
        if value <= min {
            return Err(Self::OutOfRange {
                field,
                min,
                max,
                value,
            });
        }
        Ok(())
    }
}

/// A tick produced a value that cannot be published.
///
/// Faults end the session as a failure; they are reported through the
/// session outcome, never returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SimulationFault {
    #[error("fish position became non-finite ({0})")]
    TargetPosition(f32),
    #[error("fish velocity became non-finite ({0})")]
    TargetVelocity(f32),
    #[error("bar position became non-finite ({0})")]
    ZonePosition(f32),
    #[error("progress became non-finite ({0})")]
    Progress(f32),
}
