//! Exercise form validation.
//!
//! The presentation layer collects free-text field values; this module turns
//! them into a well-typed [`ExerciseFields`] record or a per-field error map.
//! Validation is pure and deterministic: no side effects, same input always
//! produces the same errors.

use crate::types::ExerciseFields;

/// Raw form values as entered by the user (all free text)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExerciseForm {
    pub name: String,
    pub sets: String,
    pub reps: String,
    /// Optional - empty string means the field was left blank
    pub weight: String,
    /// Optional - empty string means the field was left blank
    pub duration: String,
}

/// Per-field validation errors. Empty map means the form is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub name: Option<String>,
    pub sets: Option<String>,
    pub reps: Option<String>,
    pub weight: Option<String>,
    pub duration: Option<String>,
}

impl ValidationErrors {
    /// True if no field has an error
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sets.is_none()
            && self.reps.is_none()
            && self.weight.is_none()
            && self.duration.is_none()
    }

    /// Iterate (field name, message) pairs for display
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("name", &self.name),
            ("sets", &self.sets),
            ("reps", &self.reps),
            ("weight", &self.weight),
            ("duration", &self.duration),
        ]
        .into_iter()
        .filter_map(|(field, err)| err.as_deref().map(|msg| (field, msg)))
    }
}

/// Parse a required positive whole number (>= 1)
fn parse_positive_int(raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}

/// Parse an optional non-negative number; `None` input error, `Some` value
fn parse_non_negative(raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(n) if n >= 0.0 && n.is_finite() => Some(n),
        _ => None,
    }
}

/// Validate an exercise form, returning the error map
///
/// An empty [`ValidationErrors`] means the form is valid.
pub fn validate_exercise_form(form: &ExerciseForm) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if form.name.trim().is_empty() {
        errors.name = Some("Exercise name is required".into());
    }

    if parse_positive_int(&form.sets).is_none() {
        errors.sets = Some("Enter a positive whole number".into());
    }

    if parse_positive_int(&form.reps).is_none() {
        errors.reps = Some("Enter a positive whole number".into());
    }

    if !form.weight.trim().is_empty() && parse_non_negative(&form.weight).is_none() {
        errors.weight = Some("Enter a valid weight".into());
    }

    if !form.duration.trim().is_empty() && parse_non_negative(&form.duration).is_none() {
        errors.duration = Some("Enter a valid duration".into());
    }

    errors
}

impl ExerciseForm {
    /// Validate and convert into the typed record
    ///
    /// Returns the error map if any field fails validation.
    pub fn parse(&self) -> std::result::Result<ExerciseFields, ValidationErrors> {
        let errors = validate_exercise_form(self);
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ExerciseFields {
            name: self.name.trim().to_string(),
            // Parses cannot fail past validation
            sets: parse_positive_int(&self.sets).unwrap_or(1),
            reps: parse_positive_int(&self.reps).unwrap_or(1),
            weight: if self.weight.trim().is_empty() {
                None
            } else {
                parse_non_negative(&self.weight)
            },
            duration: if self.duration.trim().is_empty() {
                None
            } else {
                parse_non_negative(&self.duration)
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ExerciseForm {
        ExerciseForm {
            name: "Squat".into(),
            sets: "3".into(),
            reps: "10".into(),
            weight: "".into(),
            duration: "".into(),
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        let errors = validate_exercise_form(&valid_form());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_empty_name_always_errors() {
        for name in ["", "   ", "\t"] {
            let mut form = valid_form();
            form.name = name.into();
            let errors = validate_exercise_form(&form);
            assert!(errors.name.is_some(), "name {:?} should error", name);
        }
    }

    #[test]
    fn test_sets_must_be_positive_integer() {
        for bad in ["", "0", "-1", "2.5", "abc", "1e3"] {
            let mut form = valid_form();
            form.sets = bad.into();
            let errors = validate_exercise_form(&form);
            assert!(errors.sets.is_some(), "sets {:?} should error", bad);
        }

        let mut form = valid_form();
        form.sets = "1".into();
        assert!(validate_exercise_form(&form).is_empty());
    }

    #[test]
    fn test_reps_must_be_positive_integer() {
        let mut form = valid_form();
        form.reps = "0".into();
        assert!(validate_exercise_form(&form).reps.is_some());
    }

    #[test]
    fn test_optional_fields_empty_is_valid() {
        let form = valid_form();
        let errors = validate_exercise_form(&form);
        assert!(errors.weight.is_none());
        assert!(errors.duration.is_none());
    }

    #[test]
    fn test_optional_fields_reject_negative() {
        let mut form = valid_form();
        form.weight = "-5".into();
        form.duration = "nope".into();
        let errors = validate_exercise_form(&form);
        assert!(errors.weight.is_some());
        assert!(errors.duration.is_some());
    }

    #[test]
    fn test_optional_weight_accepts_zero_and_decimals() {
        let mut form = valid_form();
        form.weight = "0".into();
        assert!(validate_exercise_form(&form).is_empty());

        form.weight = "62.5".into();
        assert!(validate_exercise_form(&form).is_empty());
    }

    #[test]
    fn test_parse_produces_typed_record() {
        let mut form = valid_form();
        form.name = "  Bench Press  ".into();
        form.weight = "80".into();

        let fields = form.parse().unwrap();
        assert_eq!(fields.name, "Bench Press");
        assert_eq!(fields.sets, 3);
        assert_eq!(fields.reps, 10);
        assert_eq!(fields.weight, Some(80.0));
        assert_eq!(fields.duration, None);
    }

    #[test]
    fn test_parse_returns_error_map() {
        let mut form = valid_form();
        form.name.clear();
        form.sets = "zero".into();

        let errors = form.parse().unwrap_err();
        assert!(errors.name.is_some());
        assert!(errors.sets.is_some());
        assert_eq!(errors.iter().count(), 2);
    }

    #[test]
    fn test_validation_is_deterministic() {
        let mut form = valid_form();
        form.reps = "x".into();
        assert_eq!(
            validate_exercise_form(&form),
            validate_exercise_form(&form)
        );
    }
}
