//! Error types for the replog_core library.

use std::io;
use uuid::Uuid;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for replog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// No exercise with the given id in the session (caller bug)
    #[error("No exercise with id {0} in session")]
    NotFound(Uuid),

    /// Set index out of range for the exercise (caller bug)
    #[error("Set index {index} out of range for exercise {exercise_id}")]
    IndexOutOfRange { exercise_id: Uuid, index: usize },

    /// Finishing a session with no exercises
    #[error("Add at least one exercise before finishing your workout")]
    EmptyWorkout,

    /// Operation on a session already finished or discarded
    #[error("Session is already {0}")]
    SessionClosed(&'static str),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
