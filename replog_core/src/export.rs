//! CSV export of workout history.
//!
//! One row per workout with per-workout counts. Intended for taking the log
//! into spreadsheets; the JSON history file stays the durable copy.

use crate::types::Workout;
use crate::Result;
use std::fs::OpenOptions;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: String,
    workout_type: String,
    completed_at: String,
    duration_seconds: u64,
    exercises: usize,
    sets: usize,
    completed_sets: usize,
}

impl From<&Workout> for CsvRow {
    fn from(workout: &Workout) -> Self {
        CsvRow {
            id: workout.id.to_string(),
            workout_type: workout.workout_type.to_string(),
            completed_at: workout.completed_at.to_rfc3339(),
            duration_seconds: workout.duration_seconds,
            exercises: workout.exercises.len(),
            sets: workout.total_sets(),
            completed_sets: workout
                .exercises
                .iter()
                .map(|e| e.completed_sets())
                .sum(),
        }
    }
}

/// Write the full history to a CSV file, replacing any previous export
///
/// Returns the number of workouts written. The file is flushed and fsynced
/// before returning.
pub fn history_to_csv(path: &Path, workouts: &[Workout]) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    let mut writer = csv::Writer::from_writer(file);
    for workout in workouts {
        writer.serialize(CsvRow::from(workout))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Exported {} workouts to {:?}", workouts.len(), path);
    Ok(workouts.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Exercise, WorkoutType};
    use chrono::Utc;
    use uuid::Uuid;

    fn workout() -> Workout {
        let mut exercise = Exercise::new("Squat");
        exercise.sets[0].completed = true;
        exercise.sets.push(Default::default());

        Workout {
            id: Uuid::new_v4(),
            workout_type: WorkoutType::Strength,
            exercises: vec![exercise],
            completed_at: Utc::now(),
            duration_seconds: 1200,
        }
    }

    #[test]
    fn test_export_writes_headers_and_rows() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("history.csv");

        let count = history_to_csv(&csv_path, &[workout(), workout()]).unwrap();
        assert_eq!(count, 2);

        let contents = std::fs::read_to_string(&csv_path).unwrap();
        assert!(contents.starts_with("id,workout_type,completed_at"));
        assert_eq!(contents.lines().count(), 3);
        assert!(contents.contains("strength"));
    }

    #[test]
    fn test_export_counts_sets() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("history.csv");

        history_to_csv(&csv_path, &[workout()]).unwrap();

        let mut reader = csv::Reader::from_path(&csv_path).unwrap();
        let record = reader.records().next().unwrap().unwrap();
        // exercises, sets, completed_sets columns
        assert_eq!(&record[4], "1");
        assert_eq!(&record[5], "2");
        assert_eq!(&record[6], "1");
    }

    #[test]
    fn test_export_empty_history() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("history.csv");

        let count = history_to_csv(&csv_path, &[]).unwrap();
        assert_eq!(count, 0);
        assert!(csv_path.exists());
    }

    #[test]
    fn test_reexport_replaces_previous() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("history.csv");

        history_to_csv(&csv_path, &[workout(), workout()]).unwrap();
        history_to_csv(&csv_path, &[workout()]).unwrap();

        let reader = csv::Reader::from_path(&csv_path).unwrap();
        assert_eq!(reader.into_records().count(), 1);
    }
}
