//! Error types for the workout library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all workout operations.
#[derive(Error, Debug)]
pub enum WorkoutError {
    /// Malformed or missing input, qualified by the offending field path
    #[error("Invalid input at '{path}': {reason}")]
    Validation { path: String, reason: String },
    /// A remote call failed; carries the remote's message verbatim
    #[error("Remote operation '{operation}' failed: {message}")]
    Remote { operation: String, message: String },
    /// Update/delete/get against an id the remote or index does not know
    #[error("Workout with ID {workout_id} not found")]
    NotFound { workout_id: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
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

impl WorkoutError {
    /// Creates a path-qualified validation error.
    pub fn validation(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a remote operation error.
    pub fn remote(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Remote {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates a not-found error for a workout id.
    pub fn not_found(workout_id: impl Into<String>) -> Self {
        Self::NotFound {
            workout_id: workout_id.into(),
        }
    }

    /// Creates a file system error for a path.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for workout operations
pub type Result<T> = std::result::Result<T, WorkoutError>;
