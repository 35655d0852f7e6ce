use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{model::WorkoutSummary, types::Uuid};

#[cfg(feature = "backend")]
use {
    crate::model::Workout,
    exemplar::Model,
    rusqlite::Connection,
    sea_query::{enum_def, Expr, Order, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
    std::collections::HashMap,
};

/// A completed workout session on a calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("workout_log"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct WorkoutLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub workout_id: Uuid,
    pub logged_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Calendar entry: the log plus the workout it refers to, when it still exists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarLog {
    #[serde(flatten)]
    pub log: WorkoutLog,
    pub workout: Option<WorkoutSummary>,
}

impl WorkoutLog {
    pub fn new(
        user_id: Uuid,
        workout_id: Uuid,
        logged_date: NaiveDate,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            workout_id,
            logged_date,
            notes,
            created_at: Utc::now(),
        }
    }
}

/// First and last day of a calendar month, `None` for an invalid month
pub fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    debug_assert_eq!(last.month(), month);
    Some((first, last))
}

#[cfg(feature = "backend")]
const WORKOUT_LOG_COLUMNS: [WorkoutLogIden; 6] = [
    WorkoutLogIden::Id,
    WorkoutLogIden::UserId,
    WorkoutLogIden::WorkoutId,
    WorkoutLogIden::LoggedDate,
    WorkoutLogIden::Notes,
    WorkoutLogIden::CreatedAt,
];

#[cfg(feature = "backend")]
impl WorkoutLog {
    pub fn create(self, conn: &Connection) -> Result<WorkoutLog, rusqlite::Error> {
        self.insert(conn)?;
        Ok(self)
    }

    /// Logs with `from <= logged_date <= to`, by date then creation time
    pub fn fetch_in_range(
        conn: &Connection,
        user_id: &Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<WorkoutLog>, rusqlite::Error> {
        let (sql, values) = Query::select()
            .columns(WORKOUT_LOG_COLUMNS)
            .from(WorkoutLogIden::Table)
            .and_where(Expr::col(WorkoutLogIden::UserId).eq(user_id))
            .and_where(Expr::col(WorkoutLogIden::LoggedDate).between(from, to))
            .order_by(WorkoutLogIden::LoggedDate, Order::Asc)
            .order_by(WorkoutLogIden::CreatedAt, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let logs = stmt
            .query_map(&*values.as_params(), WorkoutLog::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(logs)
    }

    pub fn fetch_all_for_user(
        conn: &Connection,
        user_id: &Uuid,
    ) -> Result<Vec<WorkoutLog>, rusqlite::Error> {
        let (sql, values) = Query::select()
            .columns(WORKOUT_LOG_COLUMNS)
            .from(WorkoutLogIden::Table)
            .and_where(Expr::col(WorkoutLogIden::UserId).eq(user_id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let logs = stmt
            .query_map(&*values.as_params(), WorkoutLog::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(logs)
    }

    /// Month view with the referenced workouts attached
    pub fn fetch_calendar(
        conn: &Connection,
        user_id: &Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CalendarLog>, rusqlite::Error> {
        let logs = Self::fetch_in_range(conn, user_id, from, to)?;

        let mut workout_ids = logs.iter().map(|l| l.workout_id).collect::<Vec<_>>();
        workout_ids.sort();
        workout_ids.dedup();
        let workouts = Workout::fetch_by_ids(conn, &workout_ids)?
            .iter()
            .map(|w| (w.id, WorkoutSummary::from(w)))
            .collect::<HashMap<_, _>>();

        Ok(logs
            .into_iter()
            .map(|log| CalendarLog {
                workout: workouts.get(&log.workout_id).cloned(),
                log,
            })
            .collect())
    }

    /// Deletes the log only when it belongs to `user_id`. Returns whether a
    /// row was removed
    pub fn delete_for_user(
        conn: &Connection,
        id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, rusqlite::Error> {
        let (sql, values) = Query::delete()
            .from_table(WorkoutLogIden::Table)
            .and_where(Expr::col(WorkoutLogIden::Id).eq(id))
            .and_where(Expr::col(WorkoutLogIden::UserId).eq(user_id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let deleted = stmt.execute(&*values.as_params())?;
        Ok(deleted > 0)
    }
}
