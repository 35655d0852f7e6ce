use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{model::Gender, types::Uuid};

#[cfg(feature = "backend")]
use {
    crate::model::{NewUser, ProfileUpdate},
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("user"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub name: String,
    pub gender: Option<Gender>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "backend")]
const USER_COLUMNS: [UserIden; 9] = [
    UserIden::Id,
    UserIden::Email,
    UserIden::PasswordHash,
    UserIden::Name,
    UserIden::Gender,
    UserIden::Height,
    UserIden::Weight,
    UserIden::CreatedAt,
    UserIden::UpdatedAt,
];

#[cfg(feature = "backend")]
impl User {
    pub fn fetch_by_id(conn: &Connection, id: &Uuid) -> Result<User, rusqlite::Error> {
        let (sql, values) = Query::select()
            .columns(USER_COLUMNS)
            .from(UserIden::Table)
            .and_where(Expr::col(UserIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let user = stmt.query_row(&*values.as_params(), User::from_row)?;
        Ok(user)
    }

    /// `email` is expected to be normalized already
    pub fn fetch_by_email<T: AsRef<str>>(
        conn: &Connection,
        email: T,
    ) -> Result<Option<User>, rusqlite::Error> {
        let (sql, values) = Query::select()
            .columns(USER_COLUMNS)
            .from(UserIden::Table)
            .and_where(Expr::col(UserIden::Email).eq(email.as_ref()))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let user = stmt
            .query_row(&*values.as_params(), User::from_row)
            .optional()?;
        Ok(user)
    }

    pub fn create(conn: &mut Connection, new_user: NewUser) -> Result<User, rusqlite::Error> {
        let tx = conn.transaction()?;
        let user = {
            new_user.insert(&tx)?;
            User::fetch_by_id(&tx, &new_user.id)?
        };
        tx.commit()?;

        Ok(user)
    }

    /// Applies the provided fields and bumps `updated_at`
    pub fn update_profile(
        &mut self,
        conn: &Connection,
        update: ProfileUpdate,
    ) -> Result<(), rusqlite::Error> {
        update.apply_to(self);
        self.updated_at = Utc::now();

        let (sql, values) = Query::update()
            .table(UserIden::Table)
            .values([
                (UserIden::Name, self.name.clone().into()),
                (UserIden::Gender, self.gender.into()),
                (UserIden::Height, self.height.into()),
                (UserIden::Weight, self.weight.into()),
                (UserIden::UpdatedAt, self.updated_at.into()),
            ])
            .and_where(Expr::col(UserIden::Id).eq(&self.id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use chrono::Utc;

    use super::User;
    use crate::types::Uuid;

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@b.io".to_string(),
            password_hash: "$2b$04$secret".to_string(),
            name: "Ana".to_string(),
            gender: None,
            height: Some(170.0),
            weight: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("secret"));
        assert_eq!(json["height"], 170.0);
        assert!(json.get("createdAt").is_some());
    }
}
