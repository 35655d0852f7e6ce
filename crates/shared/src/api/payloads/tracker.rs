use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    api::error::ValidationError,
    model::{char_len, constants::NOTES_MAX_LENGTH, ValidateModel},
    types::Uuid,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutLog {
    pub workout_id: Uuid,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp of which only the date is kept
    #[serde(deserialize_with = "deserialize_logged_date")]
    pub logged_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ValidateModel for CreateWorkoutLog {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        if let Some(notes) = &self.notes {
            errors.check(char_len(notes) <= NOTES_MAX_LENGTH, || {
                format!("Notes must be at most {NOTES_MAX_LENGTH} characters")
            });
        }
        errors.into_result()
    }
}

pub fn parse_logged_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.date_naive()))
}

fn deserialize_logged_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let value = String::deserialize(deserializer)?;
    parse_logged_date(&value).ok_or_else(|| {
        serde::de::Error::custom(format!("loggedDate `{value}` is not a valid date"))
    })
}
