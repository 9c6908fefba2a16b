//! Built-in catalog of workout types.
//!
//! The catalog is static data: loaded once at process start, never mutated.
//! Each entry carries display metadata and the suggested exercise names shown
//! in the add-exercise flow.

use crate::types::{WorkoutType, WorkoutTypeInfo};
use once_cell::sync::Lazy;

/// Cached built-in catalog - built once and reused across all operations
static BUILT_IN_CATALOG: Lazy<Vec<WorkoutTypeInfo>> = Lazy::new(build_catalog);

/// Get a reference to the cached built-in catalog, in display order
pub fn built_in_catalog() -> &'static [WorkoutTypeInfo] {
    &BUILT_IN_CATALOG
}

/// Look up catalog metadata for a workout type.
///
/// Every `WorkoutType` variant has exactly one catalog entry, enforced by
/// `validate()` and the catalog tests.
pub fn workout_type_info(workout_type: WorkoutType) -> &'static WorkoutTypeInfo {
    BUILT_IN_CATALOG
        .iter()
        .find(|info| info.id == workout_type)
        .unwrap_or_else(|| panic!("catalog entry missing for {:?}", workout_type))
}

fn entry(
    id: WorkoutType,
    label: &str,
    icon: &str,
    description: &str,
    color: &str,
    suggested: &[&str],
) -> WorkoutTypeInfo {
    WorkoutTypeInfo {
        id,
        label: label.into(),
        icon: icon.into(),
        description: description.into(),
        color: color.into(),
        suggested_exercises: suggested.iter().map(|s| (*s).into()).collect(),
    }
}

fn build_catalog() -> Vec<WorkoutTypeInfo> {
    vec![
        entry(
            WorkoutType::Cardio,
            "Cardio",
            "\u{1F3C3}",
            "Running, cycling, swimming",
            "#EF4444",
            &[
                "Running",
                "Cycling",
                "Rowing",
                "Jump Rope",
                "Swimming",
                "Stair Climber",
            ],
        ),
        entry(
            WorkoutType::Strength,
            "Strength",
            "\u{1F3CB}\u{FE0F}",
            "Weight training & resistance",
            "#3B82F6",
            &[
                "Squat",
                "Bench Press",
                "Deadlift",
                "Overhead Press",
                "Barbell Row",
                "Pull-up",
            ],
        ),
        entry(
            WorkoutType::Yoga,
            "Yoga",
            "\u{1F9D8}",
            "Flexibility & mindfulness",
            "#8B5CF6",
            &[
                "Sun Salutation",
                "Downward Dog",
                "Warrior II",
                "Tree Pose",
                "Pigeon Pose",
            ],
        ),
        entry(
            WorkoutType::Hiit,
            "HIIT",
            "\u{26A1}",
            "High intensity intervals",
            "#F59E0B",
            &[
                "Burpees",
                "Mountain Climbers",
                "Box Jumps",
                "Kettlebell Swings",
                "Battle Ropes",
            ],
        ),
        entry(
            WorkoutType::Mobility,
            "Mobility",
            "\u{1F938}",
            "Stretching & recovery",
            "#10B981",
            &[
                "Hip Circles",
                "Shoulder Rolls",
                "Hamstring Stretch",
                "Cat-Cow",
                "Foam Rolling",
            ],
        ),
    ]
}

/// Validate a catalog for consistency and completeness
///
/// Returns a list of validation errors, or empty Vec if valid.
pub fn validate(catalog: &[WorkoutTypeInfo]) -> Vec<String> {
    let mut errors = Vec::new();

    for info in catalog {
        if info.label.is_empty() {
            errors.push(format!("Workout type {:?} has empty label", info.id));
        }
        if info.icon.is_empty() {
            errors.push(format!("Workout type {:?} has empty icon", info.id));
        }
        if !info.color.starts_with('#') {
            errors.push(format!(
                "Workout type {:?} has non-hex color '{}'",
                info.id, info.color
            ));
        }
        if info.suggested_exercises.is_empty() {
            errors.push(format!(
                "Workout type {:?} has no suggested exercises",
                info.id
            ));
        }
        if info.suggested_exercises.iter().any(|name| name.is_empty()) {
            errors.push(format!(
                "Workout type {:?} has an empty suggested exercise name",
                info.id
            ));
        }
    }

    // Every enum variant must appear exactly once
    for workout_type in WorkoutType::ALL {
        let count = catalog.iter().filter(|i| i.id == workout_type).count();
        if count != 1 {
            errors.push(format!(
                "Workout type {:?} appears {} times in catalog (expected 1)",
                workout_type, count
            ));
        }
    }

    errors
}
