//! Core error types for diagram processing
//!
//! Configuration errors (dangling references, empty actor lists, duplicate
//! ids, bad spacing) are raised while a diagram is being constructed so that
//! a broken description never turns into a silently wrong picture.

use thiserror::Error;

/// Core error types for diagram processing
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Unknown actor '{actor}' referenced by message '{message}'")]
    UnknownActor { message: String, actor: String },

    #[error("Sequence diagram has no actors")]
    EmptyActors,

    #[error("Duplicate actor id '{id}'")]
    DuplicateActor { id: String },

    #[error("Duplicate message id '{id}'")]
    DuplicateMessage { id: String },

    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("Parse error: {message} at line {line}, column {column}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Render error: {message}")]
    RenderError { message: String },
}

impl DiagramError {
    /// Create an unknown-actor error for a message reference
    pub fn unknown_actor(message: impl Into<String>, actor: impl Into<String>) -> Self {
        Self::UnknownActor {
            message: message.into(),
            actor: actor.into(),
        }
    }

    /// Create a new invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse_error(message: String, line: usize, column: usize) -> Self {
        Self::ParseError {
            message,
            line,
            column,
        }
    }

    /// Create a new render error
    pub fn render_error(message: String) -> Self {
        Self::RenderError { message }
    }

    /// Returns true for errors caused by the diagram description itself
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DiagramError::UnknownActor { .. }
                | DiagramError::EmptyActors
                | DiagramError::DuplicateActor { .. }
                | DiagramError::DuplicateMessage { .. }
                | DiagramError::InvalidConfig { .. }
        )
    }
}

impl From<serde_json::Error> for DiagramError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse_error(err.to_string(), err.line(), err.column())
    }
}
