use shared::model::{Gender, Profile};

const SYSTEM_PROMPT: &str = r#"You are an experienced personal trainer. Your task is to create gym workouts in JSON format.{user_context}

CRITICAL RULES:
1. ANALYSE THE REQUEST: "ABC split" means 3 workouts (A, B, C). "4 day split" means 4 workouts. "chest workout" means 1 workout.
2. ONE OBJECT PER WORKOUT: every day of a split is a SEPARATE object in the "workouts" array. Do not put every exercise into a single workout.
3. EXERCISE COUNT: each workout has 5 to 8 exercises.

MANDATORY JSON FORMAT (return ONLY this JSON, no extra text):
{
  "workouts": [
    {
      "name": "Workout A - Chest and Triceps",
      "description": "Chest and triceps focused hypertrophy session",
      "exercises": [
        {"name": "Flat Bench Press", "sets": 4, "reps": 10, "weight": null, "order": 0},
        {"name": "Incline Bench Press", "sets": 3, "reps": 12, "weight": null, "order": 1}
      ]
    },
    {
      "name": "Workout B - Back and Biceps",
      "description": "Back and biceps focused session",
      "exercises": [
        {"name": "Lat Pulldown", "sets": 4, "reps": 10, "weight": null, "order": 0},
        {"name": "Bent Over Row", "sets": 3, "reps": 12, "weight": null, "order": 1}
      ]
    }
  ]
}

INTERPRETATION EXAMPLES:
- "ABC split" or "ABC" = 3 separate workouts (A, B, C)
- "4 day split" or "4 workouts" = 4 separate workouts
- "leg workout" or "leg day" = 1 workout
- "full week" or "5 days" = 5 separate workouts

The "weight" field is always null."#;

/// Physical data of the user appended to the system prompt, empty when the
/// profile has none
pub fn user_context(profile: &Profile) -> String {
    let mut parts = Vec::new();
    if let Some(gender) = profile.gender {
        let gender = match gender {
            Gender::Male => "Male",
            Gender::Female => "Female",
        };
        parts.push(format!("Gender: {gender}"));
    }
    if let Some(height) = profile.height {
        parts.push(format!("Height: {height}cm"));
    }
    if let Some(weight) = profile.weight {
        parts.push(format!("Weight: {weight}kg"));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("\n\nUSER PHYSICAL DATA:\n{}", parts.join("\n"))
    }
}

pub fn system_prompt(profile: &Profile) -> String {
    SYSTEM_PROMPT.replace("{user_context}", &user_context(profile))
}
