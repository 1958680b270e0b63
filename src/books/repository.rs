//! Book Storage
//! Mission: Persist book rows and serve the author-joined read paths

use anyhow::Result;
use rusqlite::{params, Connection, Row};

use crate::books::models::{BookAuthor, BookDetail};

/// Flat `book` row, used only for the isbn-uniqueness lookup.
#[derive(Debug, Clone)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub isbn: String,
    pub author_id: i64,
}

/// Capability interface over book persistence. Read paths INNER JOIN the
/// author table, so a book whose author is gone is invisible to them.
pub trait BookRepository: Send + Sync {
    fn save(&self, title: &str, isbn: &str, author_id: i64) -> Result<()>;
    fn find_by_isbn(&self, isbn: &str) -> Result<Option<BookRow>>;
    fn find_all(&self) -> Result<Vec<BookDetail>>;
    fn find_by_id(&self, id: i64) -> Result<BookDetail>;
    fn delete_by_id(&self, id: i64) -> Result<BookDetail>;
    fn update_by_id(&self, id: i64, title: &str, isbn: &str, author_id: i64)
        -> Result<BookDetail>;
}

const JOINED_SELECT: &str = "SELECT b.id, b.title, b.isbn, a.id, a.name, a.birth_date
     FROM book AS b
     INNER JOIN author AS a ON b.author_id = a.id";

/// Book store with SQLite backend, one connection per operation.
pub struct SqliteBookRepository {
    db_path: String,
}

impl SqliteBookRepository {
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    /// Open a connection with foreign-key enforcement disabled. The read
    /// paths tolerate orphaned books via the INNER JOIN, so the `REFERENCES`
    /// clause is declarative only; the bundled SQLite defaults FK enforcement
    /// on, which this overrides to match that design.
    fn open_conn(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.pragma_update(None, "foreign_keys", false)?;
        Ok(conn)
    }

    fn init_db(&self) -> Result<()> {
        let conn = self.open_conn()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS book (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                isbn TEXT UNIQUE NOT NULL,
                author_id INTEGER NOT NULL REFERENCES author(id)
            )",
            [],
        )?;

        Ok(())
    }
}

fn row_to_detail(row: &Row) -> rusqlite::Result<BookDetail> {
    Ok(BookDetail {
        id: row.get(0)?,
        title: row.get(1)?,
        isbn: row.get(2)?,
        author: BookAuthor {
            id: row.get(3)?,
            name: row.get(4)?,
            birth_date: row.get(5)?,
        },
    })
}

impl BookRepository for SqliteBookRepository {
    fn save(&self, title: &str, isbn: &str, author_id: i64) -> Result<()> {
        let conn = self.open_conn()?;

        conn.execute(
            "INSERT INTO book (title, isbn, author_id) VALUES (?1, ?2, ?3)",
            params![title, isbn, author_id],
        )?;

        Ok(())
    }

    fn find_by_isbn(&self, isbn: &str) -> Result<Option<BookRow>> {
        let conn = self.open_conn()?;

        let mut stmt =
            conn.prepare("SELECT id, title, isbn, author_id FROM book WHERE isbn = ?1")?;

        let book = stmt.query_row(params![isbn], |row| {
            Ok(BookRow {
                id: row.get(0)?,
                title: row.get(1)?,
                isbn: row.get(2)?,
                author_id: row.get(3)?,
            })
        });

        match book {
            Ok(book) => Ok(Some(book)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn find_all(&self) -> Result<Vec<BookDetail>> {
        let conn = self.open_conn()?;

        let mut stmt = conn.prepare(&format!("{} ORDER BY b.id", JOINED_SELECT))?;

        let books = stmt
            .query_map([], row_to_detail)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(books)
    }

    fn find_by_id(&self, id: i64) -> Result<BookDetail> {
        let conn = self.open_conn()?;

        let book = conn.query_row(
            &format!("{} WHERE b.id = ?1", JOINED_SELECT),
            params![id],
            row_to_detail,
        )?;

        Ok(book)
    }

    /// Fetch the joined row first so the deleted entity can be returned.
    fn delete_by_id(&self, id: i64) -> Result<BookDetail> {
        let book = self.find_by_id(id)?;

        let conn = self.open_conn()?;
        conn.execute("DELETE FROM book WHERE id = ?1", params![id])?;

        Ok(book)
    }

    fn update_by_id(
        &self,
        id: i64,
        title: &str,
        isbn: &str,
        author_id: i64,
    ) -> Result<BookDetail> {
        let conn = self.open_conn()?;

        conn.execute(
            "UPDATE book SET title = ?1, isbn = ?2, author_id = ?3 WHERE id = ?4",
            params![title, isbn, author_id, id],
        )?;

        self.find_by_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authors::repository::{AuthorRepository, SqliteAuthorRepository};
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (SqliteBookRepository, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();

        // Books join against authors, so both tables live in the same file.
        let authors = SqliteAuthorRepository::new(db_path).unwrap();
        authors
            .save("andrea", NaiveDate::from_ymd_opt(1976, 10, 24).unwrap())
            .unwrap();

        let store = SqliteBookRepository::new(db_path).unwrap();
        (store, temp_file)
    }

    #[test]
    fn test_save_and_read_joined_author() {
        let (store, _temp) = create_test_store();

        store.save("Laskar Pelangi", "1234567890", 1).unwrap();

        let books = store.find_all().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Laskar Pelangi");
        assert_eq!(books[0].author.name, "andrea");

        let book = store.find_by_id(books[0].id).unwrap();
        assert_eq!(book.isbn, "1234567890");
    }

    #[test]
    fn test_find_by_isbn() {
        let (store, _temp) = create_test_store();

        assert!(store.find_by_isbn("1234567890").unwrap().is_none());

        store.save("Laskar Pelangi", "1234567890", 1).unwrap();

        let row = store.find_by_isbn("1234567890").unwrap().unwrap();
        assert_eq!(row.title, "Laskar Pelangi");
        assert_eq!(row.author_id, 1);
    }

    #[test]
    fn test_dangling_author_hides_book_from_reads() {
        let (store, _temp) = create_test_store();

        store.save("Laskar Pelangi", "1234567890", 99).unwrap();

        assert!(store.find_all().unwrap().is_empty());
        assert!(store.find_by_id(1).is_err());
    }

    #[test]
    fn test_delete_returns_deleted_row() {
        let (store, _temp) = create_test_store();

        store.save("Laskar Pelangi", "1234567890", 1).unwrap();

        let deleted = store.delete_by_id(1).unwrap();
        assert_eq!(deleted.title, "Laskar Pelangi");
        assert!(store.find_all().unwrap().is_empty());
    }

    #[test]
    fn test_update_replaces_all_fields() {
        let (store, _temp) = create_test_store();

        store.save("Laskar Pelangi", "1234567890", 1).unwrap();

        let updated = store
            .update_by_id(1, "Sang Pemimpi", "0987654321", 1)
            .unwrap();
        assert_eq!(updated.title, "Sang Pemimpi");
        assert_eq!(updated.isbn, "0987654321");
    }
}
