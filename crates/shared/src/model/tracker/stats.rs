use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{constants::WEEKLY_FREQUENCY_WINDOW_DAYS, WorkoutLog};

/// Streak statistics over a user's workout history
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_this_month: u32,
    pub weekly_frequency: f64,
    pub total_workouts: u32,
}

impl Stats {
    pub fn compute(logs: &[WorkoutLog], today: NaiveDate) -> Self {
        Self::from_dates(logs.iter().map(|l| l.logged_date), today)
    }

    /// Counts treat every log as a unit, streaks only look at distinct days
    pub fn from_dates<I: IntoIterator<Item = NaiveDate>>(dates: I, today: NaiveDate) -> Self {
        let dates = dates.into_iter().collect::<Vec<_>>();

        let mut days = dates.clone();
        days.sort_unstable_by(|a, b| b.cmp(a));
        days.dedup();

        let current_streak = current_streak(&days, today);
        let longest_streak = longest_streak(&days, current_streak);

        let total_this_month = dates
            .iter()
            .filter(|d| d.year() == today.year() && d.month() == today.month())
            .count() as u32;

        let window_start = today - Duration::days(WEEKLY_FREQUENCY_WINDOW_DAYS);
        let recent = dates.iter().filter(|d| **d >= window_start).count();

        Self {
            current_streak,
            longest_streak,
            total_this_month,
            weekly_frequency: round_one_decimal(recent as f64 / 4.0),
            total_workouts: dates.len() as u32,
        }
    }
}

/// `days` is distinct and sorted newest first
fn current_streak(days: &[NaiveDate], today: NaiveDate) -> u32 {
    let Some(most_recent) = days.first() else {
        return 0;
    };
    if (today - *most_recent).num_days() > 1 {
        return 0;
    }

    let mut streak = 1;
    for pair in days.windows(2) {
        if (pair[0] - pair[1]).num_days() == 1 {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// `days` is distinct and sorted newest first
fn longest_streak(days: &[NaiveDate], current_streak: u32) -> u32 {
    if days.is_empty() {
        return 0;
    }

    let mut longest = 0;
    let mut run = 1;
    for pair in days.windows(2) {
        if (pair[0] - pair[1]).num_days() == 1 {
            run += 1;
        } else {
            longest = longest.max(run);
            run = 1;
        }
    }

    longest.max(run).max(current_streak)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
