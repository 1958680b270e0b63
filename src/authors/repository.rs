//! Author Storage
//! Mission: Persist author rows in SQLite

use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

use crate::authors::models::Author;

/// Capability interface over author persistence. Lookup misses surface as
/// the storage layer's own no-rows error; the service owns the user-facing
/// wording.
pub trait AuthorRepository: Send + Sync {
    fn save(&self, name: &str, birth_date: NaiveDate) -> Result<()>;
    fn find_all(&self) -> Result<Vec<Author>>;
    fn find_by_id(&self, id: i64) -> Result<Author>;
    fn delete_by_id(&self, id: i64) -> Result<Author>;
    fn update_by_id(
        &self,
        id: i64,
        name: Option<&str>,
        birth_date: Option<NaiveDate>,
    ) -> Result<Author>;
}

/// Author store with SQLite backend, one connection per operation.
pub struct SqliteAuthorRepository {
    db_path: String,
}

impl SqliteAuthorRepository {
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
            "CREATE TABLE IF NOT EXISTS author (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                birth_date TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }
}

fn row_to_author(row: &Row) -> rusqlite::Result<Author> {
    Ok(Author {
        id: row.get(0)?,
        name: row.get(1)?,
        birth_date: row.get(2)?,
    })
}

impl AuthorRepository for SqliteAuthorRepository {
    fn save(&self, name: &str, birth_date: NaiveDate) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "INSERT INTO author (name, birth_date) VALUES (?1, ?2)",
            params![name, birth_date],
        )?;

        Ok(())
    }

    fn find_all(&self) -> Result<Vec<Author>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare("SELECT id, name, birth_date FROM author ORDER BY id")?;

        let authors = stmt
            .query_map([], row_to_author)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(authors)
    }

    fn find_by_id(&self, id: i64) -> Result<Author> {
        let conn = Connection::open(&self.db_path)?;

        let author = conn.query_row(
            "SELECT id, name, birth_date FROM author WHERE id = ?1",
            params![id],
            row_to_author,
        )?;

        Ok(author)
    }

    /// Fetch the row first so the deleted entity can be returned.
    fn delete_by_id(&self, id: i64) -> Result<Author> {
        let author = self.find_by_id(id)?;

        let conn = Connection::open(&self.db_path)?;
        conn.execute("DELETE FROM author WHERE id = ?1", params![id])?;

        Ok(author)
    }

    fn update_by_id(
        &self,
        id: i64,
        name: Option<&str>,
        birth_date: Option<NaiveDate>,
    ) -> Result<Author> {
        let conn = Connection::open(&self.db_path)?;

        match (name, birth_date) {
            (Some(name), Some(birth_date)) => {
                conn.execute(
                    "UPDATE author SET name = ?1, birth_date = ?2 WHERE id = ?3",
                    params![name, birth_date, id],
                )?;
            }
            (Some(name), None) => {
                conn.execute(
                    "UPDATE author SET name = ?1 WHERE id = ?2",
                    params![name, id],
                )?;
            }
            (None, Some(birth_date)) => {
                conn.execute(
                    "UPDATE author SET birth_date = ?1 WHERE id = ?2",
                    params![birth_date, id],
                )?;
            }
            (None, None) => {}
        }

        self.find_by_id(id)
    }
}
