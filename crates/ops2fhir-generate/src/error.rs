//! Error types for resource generation.

use thiserror::Error;

/// Errors raised while building resources from rows.
///
/// `Config` means the generator itself was set up wrong and the whole run
/// should abort; every other variant describes one bad row and is handled
/// by skipping that row.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Invalid generator configuration (detected at construction).
    #[error("invalid generator configuration: {reason}")]
    Config { reason: String },

    /// A required cell is missing from the row.
    #[error("required cell '{column}' is missing")]
    MissingCell { column: String },

    /// A cell that must be text holds something else.
    #[error("cell '{column}' must be text")]
    NotText { column: String },

    /// A cell that must be numeric holds something else.
    #[error("cell '{column}' must be numeric (was comma_to_dot applied?)")]
    NotNumeric { column: String },

    /// None of the configured coding columns yielded a usable code.
    #[error("no ingredient coding could be built from the configured columns")]
    NoIngredientCodings,
}

impl GenerateError {
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Whether this error must abort the run instead of skipping the row.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, GenerateError>;
