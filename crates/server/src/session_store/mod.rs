//! SQLite backed session storage for tower-sessions, sharing the request pool

use axum::async_trait;
use deadpool_sqlite::Pool;
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;
use tower_sessions::{
    cookie::time::OffsetDateTime,
    session::{Id, Record},
    session_store, ExpiredDeletion, SessionStore,
};
use tracing::{debug, instrument};

const DEFAULT_TABLE_NAME: &str = "session";

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Invalid session table name `{0}`. Can only contain ascii alphanumeric, - and _")]
    InvalidTableName(String),
    #[error("Deadpool interact error: {0}")]
    DeadpoolInteract(#[from] deadpool_sqlite::InteractError),
    #[error("Deadpool pool error: {0}")]
    DeadpoolPool(#[from] deadpool_sqlite::PoolError),
    #[error("Rusqlite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
    #[error("Serde json decode error: {0}")]
    JsonDecode(serde_json::Error),
    #[error("Serde json encode error: {0}")]
    JsonEncode(serde_json::Error),
}

impl From<SessionStoreError> for session_store::Error {
    fn from(err: SessionStoreError) -> Self {
        use session_store::Error;
        use SessionStoreError::*;

        match err {
            JsonEncode(inner) => Error::Encode(inner.to_string()),
            JsonDecode(inner) => Error::Decode(inner.to_string()),
            other => Error::Backend(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SqliteSessionStore {
    pool: Pool,
    table_name: String,
}

impl SqliteSessionStore {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool,
            table_name: DEFAULT_TABLE_NAME.to_string(),
        }
    }

    pub fn with_table_name<T: Into<String>>(
        pool: Pool,
        table_name: T,
    ) -> Result<Self, SessionStoreError> {
        let table_name = table_name.into();
        let valid = !table_name.is_empty()
            && table_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SessionStoreError::InvalidTableName(table_name));
        }

        Ok(Self { pool, table_name })
    }

    /// Runs `f` on a pooled connection
    async fn interact<F, R>(&self, f: F) -> Result<R, SessionStoreError>
    where
        F: FnOnce(&mut Connection) -> Result<R, rusqlite::Error> + Send + 'static,
        R: Send + 'static,
    {
        let conn = self.pool.get().await?;
        Ok(conn.interact(f).await??)
    }

    #[instrument(skip(self))]
    pub async fn migrate(&self) -> Result<(), SessionStoreError> {
        let sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS "{}" (
                id TEXT PRIMARY KEY NOT NULL,
                data BLOB NOT NULL,
                expiry_date INTEGER NOT NULL
            );"#,
            self.table_name
        );

        self.interact(move |conn| conn.execute(&sql, ())).await?;
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for SqliteSessionStore {
    async fn delete_expired(&self) -> Result<(), session_store::Error> {
        let sql = format!(r#"DELETE FROM "{}" WHERE expiry_date < ?1"#, self.table_name);
        let now = OffsetDateTime::now_utc().unix_timestamp();

        let deleted = self
            .interact(move |conn| conn.execute(&sql, params![now]))
            .await?;
        debug!("Deleted {deleted} expired sessions");

        Ok(())
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn create(&self, record: &mut Record) -> Result<(), session_store::Error> {
        let exists_sql = format!(r#"SELECT 1 FROM "{}" WHERE id = ?1"#, self.table_name);
        let insert_sql = format!(
            r#"INSERT INTO "{}" (id, data, expiry_date) VALUES (?1, ?2, ?3)"#,
            self.table_name
        );

        let mut id = record.id.clone();
        let payload = serde_json::to_vec(&record).map_err(SessionStoreError::JsonEncode)?;
        let expiry = record.expiry_date.unix_timestamp();

        let id = self
            .interact(move |conn| {
                let tx = conn.transaction()?;
                {
                    // Re-key the record until the id is unique
                    let mut exists_stmt = tx.prepare_cached(&exists_sql)?;
                    while exists_stmt.exists(params![id.to_string()])? {
                        id = Id::default();
                    }

                    let mut insert_stmt = tx.prepare_cached(&insert_sql)?;
                    insert_stmt.execute(params![id.to_string(), payload, expiry])?;
                }
                tx.commit()?;

                Ok(id)
            })
            .await?;

        record.id = id;

        Ok(())
    }

    async fn save(&self, record: &Record) -> Result<(), session_store::Error> {
        // Upsert so records removed by delete_expired can still be written back
        let upsert_sql = format!(
            r#"
            INSERT INTO "{}" (id, data, expiry_date) VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                data = excluded.data,
                expiry_date = excluded.expiry_date"#,
            self.table_name
        );

        let id = record.id.to_string();
        let payload = serde_json::to_vec(&record).map_err(SessionStoreError::JsonEncode)?;
        let expiry = record.expiry_date.unix_timestamp();

        self.interact(move |conn| {
            let mut stmt = conn.prepare_cached(&upsert_sql)?;
            stmt.execute(params![id, payload, expiry])
        })
        .await?;

        Ok(())
    }

    async fn load(&self, id: &Id) -> Result<Option<Record>, session_store::Error> {
        let select_sql = format!(
            r#"SELECT data FROM "{}" WHERE id = ?1 AND expiry_date > ?2"#,
            self.table_name
        );

        let id_string = id.to_string();
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let payload = self
            .interact(move |conn| {
                let mut stmt = conn.prepare_cached(&select_sql)?;
                stmt.query_row(params![id_string, now], |row| row.get::<_, Vec<u8>>(0))
                    .optional()
            })
            .await?;

        let record = payload
            .map(|data| serde_json::from_slice::<Record>(&data))
            .transpose()
            .map_err(SessionStoreError::JsonDecode)?
            .map(|mut record| {
                // The stored payload may predate a re-key in create
                record.id = id.to_owned();
                record
            });

        Ok(record)
    }

    async fn delete(&self, id: &Id) -> Result<(), session_store::Error> {
        let delete_sql = format!(r#"DELETE FROM "{}" WHERE id = ?1"#, self.table_name);

        let id_string = id.to_string();
        self.interact(move |conn| {
            let mut stmt = conn.prepare_cached(&delete_sql)?;
            stmt.execute(params![id_string])
        })
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use tower_sessions::cookie::time::Duration;

    use super::*;
    use crate::db;

    async fn store() -> (tempfile::TempDir, SqliteSessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.sqlite");
        let pool = db::create_pool(path.to_str().unwrap()).unwrap();
        let store = SqliteSessionStore::new(pool);
        store.migrate().await.unwrap();
        (dir, store)
    }

    fn record(expires_in: Duration) -> Record {
        Record {
            id: Id::default(),
            data: HashMap::from([("user".to_string(), serde_json::json!("someone"))]),
            expiry_date: OffsetDateTime::now_utc() + expires_in,
        }
    }

    #[test]
    fn test_table_name_is_checked() {
        let pool = db::create_pool(":memory:").unwrap();
        assert!(SqliteSessionStore::with_table_name(pool.clone(), "sessions_v2").is_ok());
        assert!(matches!(
            SqliteSessionStore::with_table_name(pool, "bad name; --"),
            Err(SessionStoreError::InvalidTableName(_))
        ));
    }

    #[tokio::test]
    async fn test_create_load_delete() {
        let (_dir, store) = store().await;

        let mut record = record(Duration::hours(1));
        store.create(&mut record).await.unwrap();

        let loaded = store.load(&record.id).await.unwrap().unwrap();
        assert_eq!(loaded.data, record.data);

        store.delete(&record.id).await.unwrap();
        assert!(store.load(&record.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let (_dir, store) = store().await;

        let mut record = record(Duration::hours(1));
        store.create(&mut record).await.unwrap();
        record
            .data
            .insert("user".to_string(), serde_json::json!("someone else"));
        store.save(&record).await.unwrap();

        let loaded = store.load(&record.id).await.unwrap().unwrap();
        assert_eq!(loaded.data["user"], "someone else");
    }

    #[tokio::test]
    async fn test_expired_sessions_are_not_loaded_and_get_deleted() {
        let (_dir, store) = store().await;

        let mut expired = record(Duration::seconds(-5));
        store.create(&mut expired).await.unwrap();
        let mut live = record(Duration::hours(1));
        store.create(&mut live).await.unwrap();

        assert!(store.load(&expired.id).await.unwrap().is_none());

        store.delete_expired().await.unwrap();
        let remaining: i64 = store
            .interact(|conn| conn.query_row(r#"SELECT COUNT(*) FROM "session""#, (), |r| r.get(0)))
            .await
            .unwrap();
        assert_eq!(remaining, 1);
    }
}
