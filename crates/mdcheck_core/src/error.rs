//! Engine error types.

use thiserror::Error;

use crate::editor::ConflictReport;

/// Errors that can occur while registering checks or running the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Two checks claimed the same rule id. Registration-time error; the
    /// registry refuses the second registration.
    #[error("rule id `{alias}` is already registered by `{existing}`")]
    DuplicateRuleId {
        /// The contested alias.
        alias: String,
        /// Primary id of the check that already owns the alias.
        existing: String,
    },

    /// A check declaration was malformed (e.g., an empty alias list).
    #[error("registration error: {0}")]
    Registration(String),

    /// Two or more proposed edits overlap. No edits were applied.
    #[error("{0}")]
    ConflictingEdits(ConflictReport),

    /// Settings error.
    #[error("settings error: {0}")]
    Settings(String),

    /// Parse error from the token-tree parser.
    #[error("parse error: {0}")]
    Parse(#[from] mdcheck_parser::ParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Creates a settings error.
    pub fn settings(message: impl Into<String>) -> Self {
        Self::Settings(message.into())
    }

    /// Creates a registration error.
    pub fn registration(message: impl Into<String>) -> Self {
        Self::Registration(message.into())
    }
}
