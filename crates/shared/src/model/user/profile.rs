use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    api::error::ValidationError,
    model::{
        char_len,
        constants::{
            HEIGHT_MAX_CM, HEIGHT_MIN_CM, USER_NAME_MAX_LENGTH, USER_NAME_MIN_LENGTH,
            WEIGHT_MAX_KG, WEIGHT_MIN_KG,
        },
        Gender, User, ValidateModel,
    },
    types::Uuid,
};

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub gender: Option<Gender>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for Profile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            gender: user.gender,
            height: user.height,
            weight: user.weight,
            created_at: user.created_at,
        }
    }
}

/// Partial profile update. Absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl ProfileUpdate {
    pub fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name.trim().to_string();
        }
        if let Some(gender) = self.gender {
            user.gender = Some(gender);
        }
        if let Some(height) = self.height {
            user.height = Some(height);
        }
        if let Some(weight) = self.weight {
            user.weight = Some(weight);
        }
    }
}

impl ValidateModel for ProfileUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();

        if let Some(name) = &self.name {
            let len = char_len(name.trim());
            errors.check(
                (USER_NAME_MIN_LENGTH..=USER_NAME_MAX_LENGTH).contains(&len),
                || {
                    format!(
                        "Name must be between {USER_NAME_MIN_LENGTH} and {USER_NAME_MAX_LENGTH} characters"
                    )
                },
            );
        }
        if let Some(height) = self.height {
            errors.check((HEIGHT_MIN_CM..=HEIGHT_MAX_CM).contains(&height), || {
                format!("Height must be between {HEIGHT_MIN_CM} and {HEIGHT_MAX_CM} cm")
            });
        }
        if let Some(weight) = self.weight {
            errors.check((WEIGHT_MIN_KG..=WEIGHT_MAX_KG).contains(&weight), || {
                format!("Weight must be between {WEIGHT_MIN_KG} and {WEIGHT_MAX_KG} kg")
            });
        }

        errors.into_result()
    }
}
