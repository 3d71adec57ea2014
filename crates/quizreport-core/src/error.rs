//! Report engine error types.
//!
//! Input problems are detected before any layout happens, so a caller either
//! gets a complete document or one of these errors, never a partial result.

use thiserror::Error;

/// Errors that can occur while building a report.
#[derive(Debug, Error, PartialEq)]
pub enum ReportError {
    /// Caller-supplied quiz data breaks the engine's input contract.
    #[error("invalid input in `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },

    /// Layout configuration cannot produce a usable page.
    #[error("invalid configuration `{field}`: {reason}")]
    InvalidConfig { field: String, reason: String },
}

impl ReportError {
    pub(crate) fn input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ReportError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ReportError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ReportError::InvalidInput { field, .. } | ReportError::InvalidConfig { field, .. } => {
                field
            }
        }
    }
}
