use serde::{Deserialize, Serialize};

use crate::{
    api::error::ValidationError,
    model::{
        char_len,
        constants::{
            EMAIL_MAX_LENGTH, PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, USER_NAME_MAX_LENGTH,
            USER_NAME_MIN_LENGTH,
        },
        ValidateModel,
    },
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl RegisterUser {
    pub fn new<E: Into<String>, P: Into<String>, N: Into<String>>(
        email: E,
        password: P,
        name: N,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
        }
    }
}

impl ValidateModel for RegisterUser {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();

        check_email(&mut errors, &self.email);

        let len = char_len(&self.password);
        errors.check(
            (PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&len),
            || {
                format!(
                    "Password must be between {PASSWORD_MIN_LENGTH} and {PASSWORD_MAX_LENGTH} characters"
                )
            },
        );

        let len = char_len(self.name.trim());
        errors.check(
            (USER_NAME_MIN_LENGTH..=USER_NAME_MAX_LENGTH).contains(&len),
            || {
                format!(
                    "Name must be between {USER_NAME_MIN_LENGTH} and {USER_NAME_MAX_LENGTH} characters"
                )
            },
        );

        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

impl LoginUser {
    pub fn new<E: Into<String>, P: Into<String>>(email: E, password: P) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl ValidateModel for LoginUser {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        check_email(&mut errors, &self.email);
        errors.check(!self.password.is_empty(), || {
            "Password is required".to_string()
        });
        errors.into_result()
    }
}

/// Emails are stored and compared lowercase
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn check_email(errors: &mut ValidationError, email: &str) {
    let email = email.trim();
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    errors.check(well_formed, || "Email must be a valid email address".to_string());
    errors.check(char_len(email) <= EMAIL_MAX_LENGTH, || {
        format!("Email must be at most {EMAIL_MAX_LENGTH} characters")
    });
}
