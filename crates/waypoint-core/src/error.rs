//! Error types for the planner library.

use std::path::PathBuf;

use thiserror::Error;

use crate::parser::model::LlmError;

/// Comprehensive error type for all planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: String },
    /// Task not found for the given ID
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: String },
    /// Comment not found for the given ID
    #[error("Comment with ID {id} not found")]
    CommentNotFound { id: String },
    /// An operation defaulted to the current plan but none is set
    #[error("No current plan is set; pass a plan ID or select a plan first")]
    NoCurrentPlan,
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps an I/O failure with the path it happened at.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Converts a failed `spawn_blocking` join into a planner error.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }
}

/// Failure taxonomy of the plan parsing engine.
///
/// None of these ever reach callers of
/// [`PlanParser::parse_text_to_plan`](crate::parser::PlanParser::parse_text_to_plan);
/// they drive the fallback chain and end up in log lines or in the
/// description of a degraded plan.
#[derive(Error, Debug)]
pub enum ParseError {
    /// No model endpoint or credential is configured.
    #[error("language model is not configured")]
    Unavailable,
    /// The provider kept failing after every transport attempt.
    #[error("language model request failed: {0}")]
    TransientProvider(#[from] LlmError),
    /// The model answered but the reply never decoded as a JSON object.
    #[error("language model reply could not be decoded as JSON after {attempts} attempts")]
    UnparsableResponse { attempts: u32, content: String },
    /// Unexpected internal fault while extracting a plan from text.
    #[error("plan text could not be processed: {message}")]
    MalformedInput { message: String },
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;
