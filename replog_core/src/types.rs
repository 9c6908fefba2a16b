//! Core domain types for the workout logger.
//!
//! This module defines the fundamental types used throughout the system:
//! - Workout types and their catalog metadata
//! - Exercises and their sets
//! - Finalized workout records
//! - Signals emitted by the in-session state machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Workout Type Catalog
// ============================================================================

/// Category of workout the user can log
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Cardio,
    Strength,
    Yoga,
    Hiit,
    Mobility,
}

impl WorkoutType {
    /// All workout types in catalog order
    pub const ALL: [WorkoutType; 5] = [
        WorkoutType::Cardio,
        WorkoutType::Strength,
        WorkoutType::Yoga,
        WorkoutType::Hiit,
        WorkoutType::Mobility,
    ];
}

impl std::str::FromStr for WorkoutType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "cardio" => Ok(WorkoutType::Cardio),
            "strength" => Ok(WorkoutType::Strength),
            "yoga" => Ok(WorkoutType::Yoga),
            "hiit" => Ok(WorkoutType::Hiit),
            "mobility" => Ok(WorkoutType::Mobility),
            other => Err(crate::Error::Other(format!(
                "Unknown workout type: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WorkoutType::Cardio => "cardio",
            WorkoutType::Strength => "strength",
            WorkoutType::Yoga => "yoga",
            WorkoutType::Hiit => "hiit",
            WorkoutType::Mobility => "mobility",
        };
        f.write_str(s)
    }
}

/// Static metadata for one workout type (label, icon, suggested exercises)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutTypeInfo {
    pub id: WorkoutType,
    pub label: String,
    pub icon: String,
    pub description: String,
    pub color: String,
    pub suggested_exercises: Vec<String>,
}

// ============================================================================
// Exercise and Set Types
// ============================================================================

/// A single set within an exercise (set-granular model)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseSet {
    pub weight: f64,
    pub reps: u32,
    pub completed: bool,
}

impl Default for ExerciseSet {
    fn default() -> Self {
        Self {
            weight: 0.0,
            reps: 0,
            completed: false,
        }
    }
}

/// An exercise within a workout, owning its ordered sets
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub sets: Vec<ExerciseSet>,
}

impl Exercise {
    /// Create a new exercise with a fresh id and one default set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sets: vec![ExerciseSet::default()],
        }
    }

    /// Number of sets marked complete
    pub fn completed_sets(&self) -> usize {
        self.sets.iter().filter(|s| s.completed).count()
    }
}

/// The well-typed result of validating the exercise form (see `validation`)
#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseFields {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: Option<f64>,
    pub duration: Option<f64>,
}

// ============================================================================
// Finalized Workout
// ============================================================================

/// A finished workout, frozen at session finalization and immutable thereafter
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: Uuid,
    pub workout_type: WorkoutType,
    pub exercises: Vec<Exercise>,
    pub completed_at: DateTime<Utc>,
    pub duration_seconds: u64,
}

impl Workout {
    /// Total number of sets across all exercises
    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    /// Number of sets marked complete across all exercises
    pub fn completed_sets(&self) -> usize {
        self.exercises.iter().map(Exercise::completed_sets).sum()
    }

    /// Total volume lifted: sum of weight x reps over every set
    pub fn total_volume(&self) -> f64 {
        self.exercises
            .iter()
            .flat_map(|e| &e.sets)
            .map(|s| s.weight * f64::from(s.reps))
            .sum()
    }
}

// ============================================================================
// Session Signals
// ============================================================================

/// Emitted when a set transitions incomplete -> complete.
///
/// The presentation layer uses this to launch the rest timer with the
/// session's current default rest duration. Unchecking a set emits nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetCompleted {
    pub rest_seconds: u32,
}

/// Scalar update applied to one set via `WorkoutSession::update_set`
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SetUpdate {
    Weight(f64),
    Reps(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout_with_sets(sets: Vec<ExerciseSet>) -> Workout {
        let mut exercise = Exercise::new("Squat");
        exercise.sets = sets;
        Workout {
            id: Uuid::new_v4(),
            workout_type: WorkoutType::Strength,
            exercises: vec![exercise],
            completed_at: Utc::now(),
            duration_seconds: 600,
        }
    }

    #[test]
    fn test_total_volume_sums_weight_times_reps() {
        let workout = workout_with_sets(vec![
            ExerciseSet {
                weight: 80.0,
                reps: 10,
                completed: true,
            },
            ExerciseSet {
                weight: 60.0,
                reps: 5,
                completed: false,
            },
        ]);

        // Volume counts every set, completed or not
        assert_eq!(workout.total_volume(), 1100.0);
        assert_eq!(workout.completed_sets(), 1);
        assert_eq!(workout.total_sets(), 2);
    }

    #[test]
    fn test_total_volume_empty_sets() {
        let workout = workout_with_sets(Vec::new());
        assert_eq!(workout.total_volume(), 0.0);
        assert_eq!(workout.completed_sets(), 0);
    }
}
