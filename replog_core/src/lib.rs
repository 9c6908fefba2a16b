#![forbid(unsafe_code)]

//! Core domain model and business logic for the replog workout logger.
//!
//! This crate provides:
//! - Domain types (workout types, exercises, sets, workouts)
//! - Workout-type catalog
//! - Exercise form validation
//! - Rest-timer state machine
//! - In-session workout state
//! - History store and persistence (JSON, CSV export)

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod validation;
pub mod timer;
pub mod session;
pub mod history;
pub mod storage;
pub mod export;
pub mod format;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{built_in_catalog, workout_type_info};
pub use config::Config;
pub use validation::{validate_exercise_form, ExerciseForm, ValidationErrors};
pub use timer::{RestTimer, RestTimerState, REST_PRESETS};
pub use session::{SessionPhase, WorkoutSession};
pub use history::{HistoryStats, HistoryStore};
pub use storage::{HistorySink, JsonHistoryFile};
pub use export::history_to_csv;
