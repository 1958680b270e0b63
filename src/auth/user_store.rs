//! Credential Store
//! Mission: Persist usernames and password digests in SQLite

use anyhow::Result;
use rusqlite::{params, Connection};

/// Row of the `user` table. `password` holds the bcrypt digest, never the
/// plain secret.
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub id: i64,
    pub username: String,
    pub password: String,
}

/// Capability interface over credential persistence so the SQLite store and
/// test doubles are interchangeable.
pub trait UserRepository: Send + Sync {
    fn save(&self, username: &str, password_digest: &str) -> Result<()>;
    fn username_taken(&self, username: &str) -> Result<bool>;
    fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>>;
}

/// Credential store with SQLite backend. Opens a connection per operation;
/// the database file is the only shared resource.
pub struct SqliteUserRepository {
    db_path: String,
}

impl SqliteUserRepository {
    /// Create the store and initialize the `user` table.
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }
}

impl UserRepository for SqliteUserRepository {
    fn save(&self, username: &str, password_digest: &str) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "INSERT INTO user (username, password) VALUES (?1, ?2)",
            params![username, password_digest],
        )?;

        Ok(())
    }

    fn username_taken(&self, username: &str) -> Result<bool> {
        Ok(self.find_by_username(username)?.is_some())
    }

    fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt =
            conn.prepare("SELECT id, username, password FROM user WHERE username = ?1")?;

        let user = stmt.query_row(params![username], |row| {
            Ok(StoredUser {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
            })
        });

        match user {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (SqliteUserRepository, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let store = SqliteUserRepository::new(db_path).unwrap();
        (store, temp_file)
    }

    #[test]
    fn test_save_and_find_user() {
        let (store, _temp) = create_test_store();

        store.save("ilhamm.ms", "digest123").unwrap();

        let user = store.find_by_username("ilhamm.ms").unwrap().unwrap();
        assert_eq!(user.username, "ilhamm.ms");
        assert_eq!(user.password, "digest123");
        assert!(user.id > 0);
    }

    #[test]
    fn test_unknown_username_is_none() {
        let (store, _temp) = create_test_store();

        assert!(store.find_by_username("nonexistent").unwrap().is_none());
    }

    #[test]
    fn test_username_taken() {
        let (store, _temp) = create_test_store();

        assert!(!store.username_taken("ilhamm.ms").unwrap());
        store.save("ilhamm.ms", "digest123").unwrap();
        assert!(store.username_taken("ilhamm.ms").unwrap());
    }

    #[test]
    fn test_duplicate_username_rejected_by_schema() {
        let (store, _temp) = create_test_store();

        store.save("ilhamm.ms", "digest123").unwrap();
        assert!(store.save("ilhamm.ms", "digest456").is_err());
    }
}
