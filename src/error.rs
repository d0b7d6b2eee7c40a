//! Error taxonomy for the reasoning core.
//!
//! Three kinds, matching the boundary contract:
//! - `Validation` - malformed event data, raised before any stage runs
//! - `Configuration` - malformed brand profile, raised at construction
//! - `Stage` - internal pipeline inconsistency, fatal for that event

use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    /// Malformed `EventData`. For batches this isolates the offending
    /// event only; sibling events still process.
    #[error("validation failed for `{field}`: {reason}")]
    Validation { field: String, reason: String },

    /// Malformed `BrandProfile`. Raised before any event is processed
    /// with that profile.
    #[error("invalid brand profile: {0}")]
    Configuration(String),

    /// Internal inconsistency inside a pipeline stage. No partial
    /// result is returned for the affected event.
    #[error("stage `{stage}` failed: {reason}")]
    Stage {
        stage: &'static str,
        reason: String,
    },
}

impl EngineError {
    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation { .. })
    }
}
