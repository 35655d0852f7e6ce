use serde::{Deserialize, Serialize};

use crate::{
    api::error::ValidationError,
    model::{
        char_len,
        constants::{PROMPT_MAX_LENGTH, PROMPT_MIN_LENGTH},
        ValidateModel,
    },
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateWorkout {
    pub prompt: String,
}

impl ValidateModel for GenerateWorkout {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        let len = char_len(self.prompt.trim());
        errors.check((PROMPT_MIN_LENGTH..=PROMPT_MAX_LENGTH).contains(&len), || {
            format!("Prompt must be between {PROMPT_MIN_LENGTH} and {PROMPT_MAX_LENGTH} characters")
        });
        errors.into_result()
    }
}

/// Workout plan proposed by the language model. Not persisted until the
/// client creates it as a regular workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedWorkout {
    pub name: String,
    pub description: String,
    pub exercises: Vec<GeneratedExercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedExercise {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(default)]
    pub weight: Option<f64>,
    pub order: u32,
}
