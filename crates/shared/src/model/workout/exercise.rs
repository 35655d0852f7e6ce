use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Uuid;

#[cfg(feature = "backend")]
use {
    exemplar::Model,
    rusqlite::Connection,
    sea_query::{enum_def, Expr, Order, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
    std::collections::HashMap,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct Exercise {
    pub id: Uuid,
    pub workout_id: Uuid,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: Option<f64>,
    #[serde(rename = "order")]
    pub sort_order: u32,
    pub created_at: DateTime<Utc>,
}

/// Exercise before it is attached to a stored workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDraft {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: Option<f64>,
    pub sort_order: u32,
}

impl ExerciseDraft {
    pub fn into_exercise(self, workout_id: Uuid, created_at: DateTime<Utc>) -> Exercise {
        Exercise {
            id: Uuid::new_v4(),
            workout_id,
            name: self.name,
            sets: self.sets,
            reps: self.reps,
            weight: self.weight,
            sort_order: self.sort_order,
            created_at,
        }
    }
}

#[cfg(feature = "backend")]
const EXERCISE_COLUMNS: [ExerciseIden; 8] = [
    ExerciseIden::Id,
    ExerciseIden::WorkoutId,
    ExerciseIden::Name,
    ExerciseIden::Sets,
    ExerciseIden::Reps,
    ExerciseIden::Weight,
    ExerciseIden::SortOrder,
    ExerciseIden::CreatedAt,
];

#[cfg(feature = "backend")]
impl Exercise {
    pub fn fetch_for_workout(
        conn: &Connection,
        workout_id: &Uuid,
    ) -> Result<Vec<Exercise>, rusqlite::Error> {
        let (sql, values) = Query::select()
            .columns(EXERCISE_COLUMNS)
            .from(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::WorkoutId).eq(workout_id))
            .order_by(ExerciseIden::SortOrder, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercises = stmt
            .query_map(&*values.as_params(), Exercise::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(exercises)
    }

    /// Exercises of several workouts in one query, grouped by workout id and
    /// ordered by `sort_order`
    pub fn fetch_for_workouts(
        conn: &Connection,
        workout_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Exercise>>, rusqlite::Error> {
        let mut grouped: HashMap<Uuid, Vec<Exercise>> = HashMap::new();
        if workout_ids.is_empty() {
            return Ok(grouped);
        }

        let (sql, values) = Query::select()
            .columns(EXERCISE_COLUMNS)
            .from(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::WorkoutId).is_in(workout_ids.iter()))
            .order_by(ExerciseIden::SortOrder, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let rows = stmt.query_map(&*values.as_params(), Exercise::from_row)?;
        for exercise in rows {
            let exercise = exercise?;
            grouped.entry(exercise.workout_id).or_default().push(exercise);
        }

        Ok(grouped)
    }

    /// Inserts `drafts` for the workout. Run inside the caller's transaction
    pub fn insert_drafts(
        conn: &Connection,
        workout_id: Uuid,
        drafts: Vec<ExerciseDraft>,
        created_at: DateTime<Utc>,
    ) -> Result<Vec<Exercise>, rusqlite::Error> {
        let mut exercises = drafts
            .into_iter()
            .map(|d| d.into_exercise(workout_id, created_at))
            .collect::<Vec<_>>();
        for exercise in &exercises {
            exercise.insert(conn)?;
        }
        exercises.sort_by_key(|e| e.sort_order);

        Ok(exercises)
    }

    pub fn delete_for_workout(conn: &Connection, workout_id: &Uuid) -> Result<usize, rusqlite::Error> {
        let (sql, values) = Query::delete()
            .from_table(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::WorkoutId).eq(workout_id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())
    }
}
