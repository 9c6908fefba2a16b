//! In-session workout state.
//!
//! A [`WorkoutSession`] is the mutable model of a single in-progress workout:
//! exercises and sets are added, edited and completed while logging, then the
//! whole session is frozen into an immutable [`Workout`] on finish or thrown
//! away on discard. Both outcomes are terminal - every mutating operation
//! afterwards fails with [`Error::SessionClosed`].
//!
//! Elapsed time comes from a monotonic clock captured at session creation,
//! independent of the rest timer.

use crate::types::{
    Exercise, ExerciseFields, ExerciseSet, SetCompleted, SetUpdate, Workout, WorkoutType,
};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::time::Instant;
use uuid::Uuid;

/// Lifecycle phase of a session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Accepting exercise and set mutations
    Logging,
    /// Frozen into a `Workout`; terminal
    Finished,
    /// Abandoned without persisting; terminal
    Discarded,
}

/// The mutable state of one in-progress workout
#[derive(Debug)]
pub struct WorkoutSession {
    workout_type: WorkoutType,
    exercises: Vec<Exercise>,
    started_at: DateTime<Utc>,
    clock: Instant,
    default_rest_seconds: u32,
    phase: SessionPhase,
}

impl WorkoutSession {
    /// Start a new logging session for the given workout type
    pub fn new(workout_type: WorkoutType, default_rest_seconds: u32) -> Self {
        tracing::info!("Starting {} session", workout_type);
        Self {
            workout_type,
            exercises: Vec::new(),
            started_at: Utc::now(),
            clock: Instant::now(),
            default_rest_seconds,
            phase: SessionPhase::Logging,
        }
    }

    pub fn workout_type(&self) -> WorkoutType {
        self.workout_type
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Read-only view of the current exercise list
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Default rest duration offered when a set completes
    pub fn default_rest_seconds(&self) -> u32 {
        self.default_rest_seconds
    }

    /// Update the default rest duration for subsequent rests in this session
    pub fn set_default_rest(&mut self, seconds: u32) {
        self.default_rest_seconds = seconds;
    }

    /// Seconds since session creation, from the monotonic clock
    pub fn elapsed_seconds(&self) -> u64 {
        self.clock.elapsed().as_secs()
    }

    /// Total number of sets across all exercises
    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    /// Number of sets marked complete
    pub fn completed_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.completed_sets()).sum()
    }

    fn ensure_logging(&self) -> Result<()> {
        match self.phase {
            SessionPhase::Logging => Ok(()),
            SessionPhase::Finished => Err(Error::SessionClosed("finished")),
            SessionPhase::Discarded => Err(Error::SessionClosed("discarded")),
        }
    }

    fn exercise_mut(&mut self, id: Uuid) -> Result<&mut Exercise> {
        self.exercises
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(Error::NotFound(id))
    }

    /// Append a new exercise with a fresh id and one default set.
    ///
    /// A blank name is silently ignored (returns `None`); callers validate
    /// input via the form validator before reaching this point.
    pub fn add_exercise(&mut self, name: &str) -> Result<Option<Uuid>> {
        self.ensure_logging()?;

        let name = name.trim();
        if name.is_empty() {
            tracing::warn!("Ignoring add_exercise with blank name");
            return Ok(None);
        }

        let exercise = Exercise::new(name);
        let id = exercise.id;
        self.exercises.push(exercise);
        tracing::debug!("Added exercise {} ({})", name, id);
        Ok(Some(id))
    }

    /// Append a new exercise built from a validated form.
    ///
    /// The set list is pre-sized from the form's `sets` count, each set
    /// starting incomplete at the form's reps and weight.
    pub fn add_exercise_from_form(&mut self, fields: &ExerciseFields) -> Result<Uuid> {
        self.ensure_logging()?;

        let exercise = Exercise {
            id: Uuid::new_v4(),
            name: fields.name.clone(),
            sets: build_sets(fields),
        };
        let id = exercise.id;
        tracing::debug!("Added exercise {} ({})", exercise.name, id);
        self.exercises.push(exercise);
        Ok(id)
    }

    /// Replace an exercise's fields, preserving its id and position.
    ///
    /// The set list is rebuilt from the form, so prior per-set progress is
    /// dropped - editing is a full-form replace.
    pub fn edit_exercise(&mut self, id: Uuid, fields: &ExerciseFields) -> Result<()> {
        self.ensure_logging()?;

        let sets = build_sets(fields);
        let exercise = self.exercise_mut(id)?;
        exercise.name = fields.name.clone();
        exercise.sets = sets;
        tracing::debug!("Edited exercise {}", id);
        Ok(())
    }

    /// Remove an exercise. Confirmation is the caller's concern.
    pub fn delete_exercise(&mut self, id: Uuid) -> Result<()> {
        self.ensure_logging()?;

        let before = self.exercises.len();
        self.exercises.retain(|e| e.id != id);
        if self.exercises.len() == before {
            return Err(Error::NotFound(id));
        }
        tracing::debug!("Deleted exercise {}", id);
        Ok(())
    }

    /// Append a default (0 kg x 0, incomplete) set to an exercise
    pub fn add_set(&mut self, exercise_id: Uuid) -> Result<()> {
        self.ensure_logging()?;
        self.exercise_mut(exercise_id)?
            .sets
            .push(ExerciseSet::default());
        Ok(())
    }

    /// Mutate one scalar field of one set
    pub fn update_set(
        &mut self,
        exercise_id: Uuid,
        set_index: usize,
        update: SetUpdate,
    ) -> Result<()> {
        self.ensure_logging()?;

        let exercise = self.exercise_mut(exercise_id)?;
        let set = exercise
            .sets
            .get_mut(set_index)
            .ok_or(Error::IndexOutOfRange {
                exercise_id,
                index: set_index,
            })?;

        match update {
            SetUpdate::Weight(weight) => set.weight = weight,
            SetUpdate::Reps(reps) => set.reps = reps,
        }
        Ok(())
    }

    /// Flip a set's completed flag.
    ///
    /// Emits a [`SetCompleted`] signal carrying the session's current default
    /// rest duration only on the incomplete -> complete edge; unchecking a
    /// set emits nothing.
    pub fn toggle_set_complete(
        &mut self,
        exercise_id: Uuid,
        set_index: usize,
    ) -> Result<Option<SetCompleted>> {
        self.ensure_logging()?;

        let rest_seconds = self.default_rest_seconds;
        let exercise = self.exercise_mut(exercise_id)?;
        let set = exercise
            .sets
            .get_mut(set_index)
            .ok_or(Error::IndexOutOfRange {
                exercise_id,
                index: set_index,
            })?;

        set.completed = !set.completed;
        if set.completed {
            Ok(Some(SetCompleted { rest_seconds }))
        } else {
            Ok(None)
        }
    }

    /// Freeze the session into an immutable [`Workout`].
    ///
    /// Fails with [`Error::EmptyWorkout`] when no exercises were logged.
    /// Does not persist - handing the workout to the history store is the
    /// caller's responsibility.
    pub fn finish(&mut self) -> Result<Workout> {
        self.ensure_logging()?;

        if self.exercises.is_empty() {
            return Err(Error::EmptyWorkout);
        }

        self.phase = SessionPhase::Finished;
        let workout = Workout {
            id: Uuid::new_v4(),
            workout_type: self.workout_type,
            exercises: self.exercises.clone(),
            completed_at: Utc::now(),
            duration_seconds: self.elapsed_seconds(),
        };
        tracing::info!(
            "Finished {} session: {} exercises, {}s",
            self.workout_type,
            workout.exercises.len(),
            workout.duration_seconds
        );
        Ok(workout)
    }

    /// Abandon the session without persisting anything. Terminal.
    pub fn discard(&mut self) {
        tracing::info!("Discarded {} session", self.workout_type);
        self.phase = SessionPhase::Discarded;
    }

    /// Timestamp captured at session creation
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

/// Build the initial set list from a validated form
fn build_sets(fields: &ExerciseFields) -> Vec<ExerciseSet> {
    (0..fields.sets)
        .map(|_| ExerciseSet {
            weight: fields.weight.unwrap_or(0.0),
            reps: fields.reps,
            completed: false,
        })
        .collect()
}
