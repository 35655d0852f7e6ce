use serde::{Deserialize, Serialize};

use crate::{
    api::error::ValidationError,
    model::{
        char_len,
        constants::{DESCRIPTION_MAX_LENGTH, EXERCISE_NAME_MAX_LENGTH, WORKOUT_NAME_MAX_LENGTH},
        ExerciseDraft, ValidateModel,
    },
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseInput {
    pub name: String,
    pub sets: i64,
    pub reps: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl ExerciseInput {
    fn check(&self, index: usize, errors: &mut ValidationError) {
        let len = char_len(self.name.trim());
        errors.check((1..=EXERCISE_NAME_MAX_LENGTH).contains(&len), || {
            format!("exercises[{index}]: name must be between 1 and {EXERCISE_NAME_MAX_LENGTH} characters")
        });
        errors.check(self.sets >= 1 && self.sets <= u32::MAX as i64, || {
            format!("exercises[{index}]: sets must be at least 1")
        });
        errors.check(self.reps >= 1 && self.reps <= u32::MAX as i64, || {
            format!("exercises[{index}]: reps must be at least 1")
        });
        if let Some(weight) = self.weight {
            errors.check(weight >= 0.0, || {
                format!("exercises[{index}]: weight must not be negative")
            });
        }
        if let Some(order) = self.order {
            errors.check(order >= 0 && order <= u32::MAX as i64, || {
                format!("exercises[{index}]: order must not be negative")
            });
        }
    }

    /// Converts a validated input. The order falls back to the position in
    /// the submitted list
    fn into_draft(self, index: usize) -> ExerciseDraft {
        ExerciseDraft {
            name: self.name.trim().to_string(),
            sets: self.sets as u32,
            reps: self.reps as u32,
            weight: self.weight,
            sort_order: self.order.map(|o| o as u32).unwrap_or(index as u32),
        }
    }
}

fn check_exercises(exercises: &[ExerciseInput], errors: &mut ValidationError) {
    for (index, exercise) in exercises.iter().enumerate() {
        exercise.check(index, errors);
    }
}

fn into_drafts(exercises: Vec<ExerciseInput>) -> Vec<ExerciseDraft> {
    exercises
        .into_iter()
        .enumerate()
        .map(|(index, e)| e.into_draft(index))
        .collect()
}

fn check_name(name: &str, errors: &mut ValidationError) {
    let len = char_len(name.trim());
    errors.check((1..=WORKOUT_NAME_MAX_LENGTH).contains(&len), || {
        format!("Name must be between 1 and {WORKOUT_NAME_MAX_LENGTH} characters")
    });
}

fn check_description(description: Option<&String>, errors: &mut ValidationError) {
    if let Some(description) = description {
        errors.check(char_len(description) <= DESCRIPTION_MAX_LENGTH, || {
            format!("Description must be at most {DESCRIPTION_MAX_LENGTH} characters")
        });
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkout {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ai_generated: bool,
    #[serde(default)]
    pub exercises: Vec<ExerciseInput>,
}

impl CreateWorkout {
    pub fn into_parts(self) -> (String, Option<String>, bool, Vec<ExerciseDraft>) {
        (
            self.name.trim().to_string(),
            self.description,
            self.ai_generated,
            into_drafts(self.exercises),
        )
    }
}

impl ValidateModel for CreateWorkout {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        check_name(&self.name, &mut errors);
        check_description(self.description.as_ref(), &mut errors);
        check_exercises(&self.exercises, &mut errors);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `Some(None)` clears the description, `None` leaves it untouched
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub description: Option<Option<String>>,
    /// Replaces every exercise of the workout when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<ExerciseInput>>,
}

impl UpdateWorkout {
    pub fn exercise_drafts(&mut self) -> Option<Vec<ExerciseDraft>> {
        self.exercises.take().map(into_drafts)
    }
}

impl ValidateModel for UpdateWorkout {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        if let Some(name) = &self.name {
            check_name(name, &mut errors);
        }
        check_description(self.description.as_ref().and_then(Option::as_ref), &mut errors);
        if let Some(exercises) = &self.exercises {
            check_exercises(exercises, &mut errors);
        }
        errors.into_result()
    }
}

/// `?active=` filter of the workout list. Anything but `true` or `false`
/// lists every workout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutListQuery {
    pub active: Option<String>,
}

impl WorkoutListQuery {
    pub fn active_filter(&self) -> Option<bool> {
        match self.active.as_deref() {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        }
    }
}
