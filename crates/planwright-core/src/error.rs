//! Error types for the workflow library.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::{DesignModule, Requirement, StepId};

/// Comprehensive error type for all workflow operations.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// Requested step number is outside the fixed step table
    #[error("Invalid step {id}: steps are numbered 1 to 4")]
    InvalidStep { id: u8 },
    /// Strict advance attempted while the acceptance gate is unsatisfied
    #[error("Cannot leave step '{step}': missing {}", join_missing(.missing))]
    GateViolation {
        step: StepId,
        missing: BTreeSet<Requirement>,
    },
    /// Action submitted for a step other than the open one
    #[error("Action '{action}' belongs to step '{attempted}', but the open step is '{current}'")]
    StepOrderViolation {
        action: &'static str,
        attempted: StepId,
        current: StepId,
    },
    /// Section proposed for a module other than the next one in canonical order
    #[error("Section for '{proposed}' is out of order; the next module is '{expected}'")]
    SectionOutOfOrder {
        expected: DesignModule,
        proposed: DesignModule,
    },
    /// All mandatory sections are already confirmed
    #[error("All design sections are already confirmed; nothing to propose for '{proposed}'")]
    DocumentComplete { proposed: DesignModule },
    /// A section is already waiting for confirmation
    #[error("Section '{module}' is awaiting confirmation; confirm or reject it first")]
    SectionPending { module: DesignModule },
    /// Confirmation or rejection without a matching pending section
    #[error("No pending section for '{module}'")]
    NoPendingSection { module: DesignModule },
    /// Artifact write failed; drafted content is kept for retry
    #[error("Failed to persist design document at '{path}': {reason}")]
    PersistenceFailure { path: PathBuf, reason: String },
    /// Text generation failed or produced nothing
    #[error("Collaborator failed: {message}")]
    CollaboratorFailure { message: String },
    /// Session not found for the given ID
    #[error("Session with ID {id} not found")]
    SessionNotFound { id: u64 },
    /// Session already completed or aborted
    #[error("Session {id} is {status} and accepts no further actions")]
    SessionClosed { id: u64, status: &'static str },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
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

fn join_missing(missing: &BTreeSet<Requirement>) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> WorkflowError {
        WorkflowError::Database {
            message: self.message,
            source,
        }
    }
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
    pub fn with_reason(self, reason: impl Into<String>) -> WorkflowError {
        WorkflowError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl WorkflowError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a collaborator failure from any displayable cause.
    pub fn collaborator(message: impl fmt::Display) -> Self {
        Self::CollaboratorFailure {
            message: message.to_string(),
        }
    }
}

/// Extension trait for Result to provide concise error mapping with
/// anyhow-style context.
pub trait ResultExt<T, E> {
    /// Add context to any error type, converting to WorkflowError.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| WorkflowError::Configuration {
            message: format!("{}: {}", context, e),
        })
    }
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| WorkflowError::database(message).with_source(e))
    }
}

/// Result type alias for workflow operations
pub type Result<T> = std::result::Result<T, WorkflowError>;
