use serde_json::Value;
use shared::api::{
    payloads::{GeneratedExercise, GeneratedWorkout},
    response_errors::AiError,
};

const DEFAULT_WORKOUT_NAME: &str = "Generated Workout";
const DEFAULT_SETS: u32 = 3;
const DEFAULT_REPS: u32 = 12;

/// Text between the first `{` and the last `}` of the model output
pub fn extract_json_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

/// Parses and sanitizes the model output into workout plans
pub fn parse_workouts(content: &str) -> Result<Vec<GeneratedWorkout>, AiError> {
    if content.trim().is_empty() {
        return Err(AiError::EmptyResponse);
    }

    let json = extract_json_object(content).ok_or(AiError::InvalidResponse)?;
    let parsed: Value = serde_json::from_str(json).map_err(|_| AiError::InvalidResponse)?;

    let workouts = parsed
        .get("workouts")
        .and_then(Value::as_array)
        .ok_or(AiError::InvalidFormat)?;

    Ok(workouts.iter().map(sanitize_workout).collect())
}

fn sanitize_workout(workout: &Value) -> GeneratedWorkout {
    let exercises = workout
        .get("exercises")
        .and_then(Value::as_array)
        .map(|exercises| {
            exercises
                .iter()
                .enumerate()
                .map(|(index, e)| sanitize_exercise(index, e))
                .collect()
        })
        .unwrap_or_default();

    GeneratedWorkout {
        name: text(workout.get("name")).unwrap_or_else(|| DEFAULT_WORKOUT_NAME.to_string()),
        description: text(workout.get("description")).unwrap_or_default(),
        exercises,
    }
}

fn sanitize_exercise(index: usize, exercise: &Value) -> GeneratedExercise {
    GeneratedExercise {
        name: text(exercise.get("name")).unwrap_or_else(|| format!("Exercise {}", index + 1)),
        sets: count(exercise.get("sets")).unwrap_or(DEFAULT_SETS),
        reps: count(exercise.get("reps")).unwrap_or(DEFAULT_REPS),
        weight: number(exercise.get("weight")).filter(|w| *w > 0.0),
        order: index as u32,
    }
}

/// Non empty strings, and non zero numbers rendered as text
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Finite numbers, accepting numeric strings
fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Whole positive count. Fractions are truncated
fn count(value: Option<&Value>) -> Option<u32> {
    let n = number(value)?.trunc();
    (n >= 1.0).then(|| n.min(u32::MAX as f64) as u32)
}
