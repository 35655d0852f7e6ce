use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    api::response_errors::WorkoutError,
    model::Exercise,
    types::Uuid,
};

#[cfg(feature = "backend")]
use {
    crate::model::ExerciseDraft,
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Order, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("workout"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub is_deleted: bool,
    pub ai_generated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A workout together with its exercises ordered by `order`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutWithExercises {
    #[serde(flatten)]
    pub workout: Workout,
    pub exercises: Vec<Exercise>,
}

/// Workout fields embedded in calendar entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub ai_generated: bool,
}

impl From<&Workout> for WorkoutSummary {
    fn from(workout: &Workout) -> Self {
        Self {
            id: workout.id,
            name: workout.name.clone(),
            description: workout.description.clone(),
            is_active: workout.is_active,
            ai_generated: workout.ai_generated,
        }
    }
}

impl Workout {
    pub fn new<T: Into<String>>(
        user_id: Uuid,
        name: T,
        description: Option<String>,
        ai_generated: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            description,
            is_active: true,
            is_deleted: false,
            ai_generated,
            created_at: now,
            updated_at: now,
        }
    }

    /// Soft deleted workouts are reported as missing, other users' workouts
    /// as forbidden
    pub fn check_access(&self, user_id: &Uuid) -> Result<(), WorkoutError> {
        if self.is_deleted {
            Err(WorkoutError::NotFound)
        } else if self.user_id != *user_id {
            Err(WorkoutError::Forbidden)
        } else {
            Ok(())
        }
    }
}

#[cfg(feature = "backend")]
const WORKOUT_COLUMNS: [WorkoutIden; 9] = [
    WorkoutIden::Id,
    WorkoutIden::UserId,
    WorkoutIden::Name,
    WorkoutIden::Description,
    WorkoutIden::IsActive,
    WorkoutIden::IsDeleted,
    WorkoutIden::AiGenerated,
    WorkoutIden::CreatedAt,
    WorkoutIden::UpdatedAt,
];

#[cfg(feature = "backend")]
impl Workout {
    /// Inserts the workout and its exercises in one transaction
    pub fn create(
        self,
        conn: &mut Connection,
        drafts: Vec<ExerciseDraft>,
    ) -> Result<WorkoutWithExercises, rusqlite::Error> {
        let tx = conn.transaction()?;
        self.insert(&tx)?;
        let exercises = Exercise::insert_drafts(&tx, self.id, drafts, self.created_at)?;
        tx.commit()?;

        Ok(WorkoutWithExercises {
            workout: self,
            exercises,
        })
    }

    /// Includes soft deleted workouts, callers decide visibility
    pub fn fetch_by_id(conn: &Connection, id: &Uuid) -> Result<Option<Workout>, rusqlite::Error> {
        let (sql, values) = Query::select()
            .columns(WORKOUT_COLUMNS)
            .from(WorkoutIden::Table)
            .and_where(Expr::col(WorkoutIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let workout = stmt
            .query_row(&*values.as_params(), Workout::from_row)
            .optional()?;
        Ok(workout)
    }

    pub fn fetch_by_ids(conn: &Connection, ids: &[Uuid]) -> Result<Vec<Workout>, rusqlite::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let (sql, values) = Query::select()
            .columns(WORKOUT_COLUMNS)
            .from(WorkoutIden::Table)
            .and_where(Expr::col(WorkoutIden::Id).is_in(ids.iter()))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let workouts = stmt
            .query_map(&*values.as_params(), Workout::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(workouts)
    }

    /// The user's workouts that are not soft deleted, newest first
    pub fn fetch_for_user(
        conn: &Connection,
        user_id: &Uuid,
        active: Option<bool>,
    ) -> Result<Vec<WorkoutWithExercises>, rusqlite::Error> {
        let mut query = Query::select();
        query
            .columns(WORKOUT_COLUMNS)
            .from(WorkoutIden::Table)
            .and_where(Expr::col(WorkoutIden::UserId).eq(user_id))
            .and_where(Expr::col(WorkoutIden::IsDeleted).eq(false));
        if let Some(active) = active {
            query.and_where(Expr::col(WorkoutIden::IsActive).eq(active));
        }
        let (sql, values) = query
            .order_by(WorkoutIden::CreatedAt, Order::Desc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let workouts = stmt
            .query_map(&*values.as_params(), Workout::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let ids = workouts.iter().map(|w| w.id).collect::<Vec<_>>();
        let mut exercises = Exercise::fetch_for_workouts(conn, &ids)?;

        Ok(workouts
            .into_iter()
            .map(|workout| WorkoutWithExercises {
                exercises: exercises.remove(&workout.id).unwrap_or_default(),
                workout,
            })
            .collect())
    }

    pub fn with_exercises(self, conn: &Connection) -> Result<WorkoutWithExercises, rusqlite::Error> {
        let exercises = Exercise::fetch_for_workout(conn, &self.id)?;
        Ok(WorkoutWithExercises {
            workout: self,
            exercises,
        })
    }

    /// Persists name, description and flags. When `drafts` is given the
    /// exercise list is replaced wholesale
    pub fn update(
        &mut self,
        conn: &mut Connection,
        drafts: Option<Vec<ExerciseDraft>>,
    ) -> Result<(), rusqlite::Error> {
        self.updated_at = Utc::now();

        let tx = conn.transaction()?;
        {
            let (sql, values) = Query::update()
                .table(WorkoutIden::Table)
                .values([
                    (WorkoutIden::Name, self.name.clone().into()),
                    (WorkoutIden::Description, self.description.clone().into()),
                    (WorkoutIden::IsActive, self.is_active.into()),
                    (WorkoutIden::IsDeleted, self.is_deleted.into()),
                    (WorkoutIden::UpdatedAt, self.updated_at.into()),
                ])
                .and_where(Expr::col(WorkoutIden::Id).eq(&self.id))
                .build_rusqlite(SqliteQueryBuilder);

            let mut stmt = tx.prepare_cached(&sql)?;
            stmt.execute(&*values.as_params())?;
        }

        if let Some(drafts) = drafts {
            Exercise::delete_for_workout(&tx, &self.id)?;
            Exercise::insert_drafts(&tx, self.id, drafts, self.updated_at)?;
        }
        tx.commit()?;

        Ok(())
    }

    pub fn toggle_active(&mut self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        self.is_active = !self.is_active;
        self.update(conn, None)
    }

    pub fn soft_delete(&mut self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        self.is_deleted = true;
        self.is_active = false;
        self.update(conn, None)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new_workout_is_active() {
        let workout = Workout::new(Uuid::new_v4(), "Push day", None, false);
        assert!(workout.is_active);
        assert!(!workout.is_deleted);
        assert_eq!(workout.created_at, workout.updated_at);
    }

    #[test]
    fn test_check_access() {
        let owner = Uuid::new_v4();
        let mut workout = Workout::new(owner, "Legs", None, false);

        assert_eq!(workout.check_access(&owner), Ok(()));
        assert_eq!(
            workout.check_access(&Uuid::new_v4()),
            Err(WorkoutError::Forbidden)
        );

        workout.is_deleted = true;
        assert_eq!(workout.check_access(&owner), Err(WorkoutError::NotFound));
        assert_eq!(
            workout.check_access(&Uuid::new_v4()),
            Err(WorkoutError::NotFound)
        );
    }

    #[test]
    fn test_workout_with_exercises_is_flat_json() {
        let workout = Workout::new(Uuid::new_v4(), "Pull", Some("Back".to_string()), true);
        let json = serde_json::to_value(WorkoutWithExercises {
            workout,
            exercises: Vec::new(),
        })
        .unwrap();

        assert_eq!(json["name"], "Pull");
        assert_eq!(json["aiGenerated"], true);
        assert_eq!(json["isActive"], true);
        assert!(json["exercises"].as_array().unwrap().is_empty());
    }
}
