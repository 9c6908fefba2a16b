//! Workout history store.
//!
//! An append-only, most-recent-first list of finalized workouts. Aggregates
//! are derived on read, never cached. Persistence is delegated to an optional
//! [`HistorySink`] and is strictly best-effort: the in-memory list is always
//! authoritative for the current process, and a failed write is logged and
//! dropped rather than rolled back.

use crate::storage::HistorySink;
use crate::types::Workout;
use std::collections::VecDeque;

/// Rough calorie estimate per minute of exercise. An approximation for the
/// stats display, not a physiological model.
pub const DEFAULT_CALORIES_PER_MINUTE: f64 = 5.0;

/// Aggregates derived from the full history
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistoryStats {
    pub total_workouts: usize,
    pub total_duration_seconds: u64,
    pub total_exercises: usize,
    pub total_sets: usize,
    pub estimated_calories: u64,
}

/// Append-only store of finalized workouts, most recent first.
///
/// Backed by a deque so head insertion stays constant-time regardless of
/// history length.
pub struct HistoryStore {
    workouts: VecDeque<Workout>,
    sink: Option<Box<dyn HistorySink>>,
    calories_per_minute: f64,
}

impl HistoryStore {
    /// Create an empty store with no persistence
    pub fn in_memory() -> Self {
        Self {
            workouts: VecDeque::new(),
            sink: None,
            calories_per_minute: DEFAULT_CALORIES_PER_MINUTE,
        }
    }

    /// Create a store backed by a sink, seeding from whatever the sink can
    /// load. A missing or corrupt durable copy yields an empty history.
    pub fn open(sink: Box<dyn HistorySink>) -> Self {
        let workouts: VecDeque<Workout> = sink.load().into();
        tracing::info!("Loaded {} workouts from history", workouts.len());
        Self {
            workouts,
            sink: Some(sink),
            calories_per_minute: DEFAULT_CALORIES_PER_MINUTE,
        }
    }

    /// Override the calorie constant (from `[stats]` config)
    pub fn with_calories_per_minute(mut self, calories_per_minute: f64) -> Self {
        self.calories_per_minute = calories_per_minute;
        self
    }

    /// Insert a finalized workout at the head of the history.
    ///
    /// The durable copy is rewritten wholesale; a write failure is logged
    /// and the in-memory append stands.
    pub fn append(&mut self, workout: Workout) {
        tracing::debug!("Appending workout {} to history", workout.id);
        self.workouts.push_front(workout);

        if let Some(sink) = self.sink.as_mut() {
            if let Err(e) = sink.write_all(self.workouts.make_contiguous()) {
                tracing::warn!("Failed to persist history: {}. Keeping in-memory copy.", e);
            }
        }
    }

    /// Full history, most recent first
    pub fn list(&self) -> &VecDeque<Workout> {
        &self.workouts
    }

    /// Most recently appended workout
    pub fn last_workout(&self) -> Option<&Workout> {
        self.workouts.front()
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Compute aggregates over the full history
    pub fn stats(&self) -> HistoryStats {
        let total_duration_seconds: u64 =
            self.workouts.iter().map(|w| w.duration_seconds).sum();
        let estimated_calories =
            (total_duration_seconds as f64 / 60.0 * self.calories_per_minute).round() as u64;

        HistoryStats {
            total_workouts: self.workouts.len(),
            total_duration_seconds,
            total_exercises: self.workouts.iter().map(|w| w.exercises.len()).sum(),
            total_sets: self.workouts.iter().map(Workout::total_sets).sum(),
            estimated_calories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Exercise, WorkoutType};
    use chrono::Utc;
    use std::cell::RefCell;
    use std::rc::Rc;
    use uuid::Uuid;

    fn workout(duration_seconds: u64, exercise_names: &[&str]) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            workout_type: WorkoutType::Strength,
            exercises: exercise_names.iter().map(|n| Exercise::new(*n)).collect(),
            completed_at: Utc::now(),
            duration_seconds,
        }
    }

    #[test]
    fn test_append_is_most_recent_first() {
        let mut store = HistoryStore::in_memory();
        let first = workout(300, &["Squat"]);
        let second = workout(600, &["Bench Press"]);
        let second_id = second.id;

        store.append(first);
        store.append(second);

        assert_eq!(store.list()[0].id, second_id);
        assert_eq!(store.last_workout().unwrap().id, second_id);
    }

    #[test]
    fn test_append_is_monotonic() {
        let mut store = HistoryStore::in_memory();
        for i in 0..5 {
            let before = store.len();
            store.append(workout(60, &["Running"]));
            assert_eq!(store.len(), before + 1);
            assert_eq!(store.len(), i + 1);
        }
    }

    #[test]
    fn test_stats_consistent_after_each_append() {
        let mut store = HistoryStore::in_memory();

        store.append(workout(300, &["Squat", "Bench Press"]));
        let stats = store.stats();
        assert_eq!(stats.total_workouts, 1);
        assert_eq!(stats.total_exercises, 2);
        assert_eq!(stats.total_duration_seconds, 300);

        store.append(workout(600, &["Running"]));
        let stats = store.stats();
        assert_eq!(stats.total_workouts, 2);
        assert_eq!(stats.total_exercises, 3);
        assert_eq!(stats.total_duration_seconds, 900);

        let expected: usize = store.list().iter().map(|w| w.exercises.len()).sum();
        assert_eq!(stats.total_exercises, expected);
    }

    #[test]
    fn test_estimated_calories() {
        let mut store = HistoryStore::in_memory();
        // 30 minutes at 5 cal/min
        store.append(workout(1800, &["Running"]));
        assert_eq!(store.stats().estimated_calories, 150);

        // Rounds to nearest: 90s -> 1.5 min -> 7.5 -> 8
        let mut store = HistoryStore::in_memory();
        store.append(workout(90, &["Running"]));
        assert_eq!(store.stats().estimated_calories, 8);
    }

    #[test]
    fn test_custom_calorie_constant() {
        let mut store = HistoryStore::in_memory().with_calories_per_minute(10.0);
        store.append(workout(600, &["Rowing"]));
        assert_eq!(store.stats().estimated_calories, 100);
    }

    #[test]
    fn test_empty_store_stats() {
        let store = HistoryStore::in_memory();
        let stats = store.stats();
        assert_eq!(stats.total_workouts, 0);
        assert_eq!(stats.estimated_calories, 0);
        assert!(store.is_empty());
    }

    struct CaptureSink {
        writes: Rc<RefCell<Vec<Workout>>>,
    }

    impl HistorySink for CaptureSink {
        fn write_all(&mut self, workouts: &[Workout]) -> crate::Result<()> {
            *self.writes.borrow_mut() = workouts.to_vec();
            Ok(())
        }

        fn load(&self) -> Vec<Workout> {
            Vec::new()
        }
    }

    #[test]
    fn test_sink_sees_most_recent_first_after_many_appends() {
        let writes = Rc::new(RefCell::new(Vec::new()));
        let mut store = HistoryStore::open(Box::new(CaptureSink {
            writes: Rc::clone(&writes),
        }));

        let mut ids = Vec::new();
        for _ in 0..8 {
            let w = workout(60, &["Running"]);
            ids.push(w.id);
            store.append(w);
        }

        // The durable copy and the in-memory view agree on ordering
        let written = writes.borrow();
        assert_eq!(written.len(), 8);
        for (i, w) in written.iter().enumerate() {
            assert_eq!(w.id, ids[7 - i]);
        }
        assert_eq!(store.list()[0].id, ids[7]);
        assert_eq!(store.last_workout().unwrap().id, ids[7]);
    }

    #[test]
    fn test_total_sets() {
        let mut store = HistoryStore::in_memory();
        let mut w = workout(300, &["Squat"]);
        w.exercises[0].sets.push(Default::default());
        store.append(w);

        assert_eq!(store.stats().total_sets, 2);
    }
}
