//! Book Service
//! Mission: Book validation rules, isbn uniqueness, pagination

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::books::models::{BookDetail, BookPayload};
use crate::books::repository::BookRepository;
use crate::pagination::paginate;

#[derive(Debug)]
pub enum BookError {
    EmptyFields,
    TitleTooShort,
    IsbnTooShort,
    IsbnTooLong,
    NegativeAuthorId,
    DuplicateIsbn,
    InvalidId,
    NotFound,
    EmptyCollection,
    PageOutOfRange,
    Save(String),
    Fetch(String),
    Delete,
    Update,
}

impl fmt::Display for BookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookError::EmptyFields => {
                write!(f, "judul, isbn, dan author_id tidak boleh kosong")
            }
            BookError::TitleTooShort => write!(f, "judul minimal 3 karakter"),
            BookError::IsbnTooShort => write!(f, "isbn minimal 10 karakter"),
            BookError::IsbnTooLong => write!(f, "isbn maksimal 13 karakter"),
            BookError::NegativeAuthorId => write!(f, "author_id tidak boleh negatif"),
            BookError::DuplicateIsbn => write!(f, "isbn sudah digunakan oleh buku lain"),
            BookError::InvalidId => write!(f, "id tidak boleh negatif atau 0"),
            BookError::NotFound => write!(f, "book tidak ditemukan"),
            BookError::EmptyCollection => write!(f, "data book kosong"),
            BookError::PageOutOfRange => write!(f, "page sudah melebihi total page"),
            BookError::Save(e) => write!(f, "{}", e),
            BookError::Fetch(e) => write!(f, "gagal mengambil data book : {}", e),
            BookError::Delete => {
                write!(f, "gagal menghapus data book, book tidak ditemukan")
            }
            BookError::Update => {
                write!(f, "gagal mengupdate data book, book tidak ditemukan")
            }
        }
    }
}

impl std::error::Error for BookError {}

pub struct BookService {
    repo: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(repo: Arc<dyn BookRepository>) -> Self {
        Self { repo }
    }

    /// Field checks in fixed order, first violation wins. Shared by create
    /// and update; both also run the isbn-uniqueness lookup afterwards.
    fn validate(&self, book: &BookPayload) -> Result<(), BookError> {
        if book.title.is_empty() || book.isbn.is_empty() || book.author_id == 0 {
            return Err(BookError::EmptyFields);
        }

        if book.title.len() < 3 {
            return Err(BookError::TitleTooShort);
        }

        if book.isbn.len() < 10 {
            return Err(BookError::IsbnTooShort);
        }

        if book.isbn.len() > 13 {
            return Err(BookError::IsbnTooLong);
        }

        if book.author_id < 0 {
            return Err(BookError::NegativeAuthorId);
        }

        Ok(())
    }

    /// Any stored book with this isbn blocks the write. The record under
    /// update is deliberately not exempted.
    fn check_isbn_free(&self, isbn: &str) -> Result<(), BookError> {
        let existing = self
            .repo
            .find_by_isbn(isbn)
            .map_err(|e| BookError::Fetch(e.to_string()))?;

        if existing.is_some() {
            return Err(BookError::DuplicateIsbn);
        }

        Ok(())
    }

    pub fn create(&self, book: &BookPayload) -> Result<(), BookError> {
        self.validate(book)?;
        self.check_isbn_free(&book.isbn)?;

        self.repo
            .save(&book.title, &book.isbn, book.author_id)
            .map_err(|e| BookError::Save(e.to_string()))?;

        info!("✅ Created book: {} ({})", book.title, book.isbn);

        Ok(())
    }

    pub fn find_all(&self, page: usize, limit: usize) -> Result<(Vec<BookDetail>, usize), BookError> {
        let books = self
            .repo
            .find_all()
            .map_err(|e| BookError::Fetch(e.to_string()))?;

        if books.is_empty() {
            return Err(BookError::EmptyCollection);
        }

        let (page_items, total_pages) =
            paginate(books, page, limit).map_err(|_| BookError::PageOutOfRange)?;

        Ok((page_items, total_pages))
    }

    pub fn find_by_id(&self, id: i64) -> Result<BookDetail, BookError> {
        if id <= 0 {
            return Err(BookError::InvalidId);
        }

        self.repo.find_by_id(id).map_err(|_| BookError::NotFound)
    }

    pub fn delete_by_id(&self, id: i64) -> Result<BookDetail, BookError> {
        if id <= 0 {
            return Err(BookError::InvalidId);
        }

        let book = self.repo.delete_by_id(id).map_err(|_| BookError::Delete)?;

        info!("🗑️  Deleted book: {}", book.title);

        Ok(book)
    }

    pub fn update_by_id(&self, id: i64, book: &BookPayload) -> Result<BookDetail, BookError> {
        if id <= 0 {
            return Err(BookError::InvalidId);
        }

        self.validate(book)?;
        self.check_isbn_free(&book.isbn)?;

        self.repo
            .update_by_id(id, &book.title, &book.isbn, book.author_id)
            .map_err(|_| BookError::Update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::books::models::BookAuthor;
    use crate::books::repository::BookRow;
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    struct MockBookRepository {
        books: Mutex<Vec<BookRow>>,
    }

    impl MockBookRepository {
        fn new() -> Self {
            Self {
                books: Mutex::new(Vec::new()),
            }
        }

        fn detail(row: &BookRow) -> BookDetail {
            BookDetail {
                id: row.id,
                title: row.title.clone(),
                isbn: row.isbn.clone(),
                author: BookAuthor {
                    id: row.author_id,
                    name: "andrea".to_string(),
                    birth_date: NaiveDate::from_ymd_opt(1976, 10, 24).unwrap(),
                },
            }
        }
    }

    impl BookRepository for MockBookRepository {
        fn save(&self, title: &str, isbn: &str, author_id: i64) -> Result<()> {
            let mut books = self.books.lock().unwrap();
            let id = books.len() as i64 + 1;
            books.push(BookRow {
                id,
                title: title.to_string(),
                isbn: isbn.to_string(),
                author_id,
            });
            Ok(())
        }

        fn find_by_isbn(&self, isbn: &str) -> Result<Option<BookRow>> {
            let books = self.books.lock().unwrap();
            Ok(books.iter().find(|b| b.isbn == isbn).cloned())
        }

        fn find_all(&self) -> Result<Vec<BookDetail>> {
            let books = self.books.lock().unwrap();
            Ok(books.iter().map(Self::detail).collect())
        }

        fn find_by_id(&self, id: i64) -> Result<BookDetail> {
            let books = self.books.lock().unwrap();
            books
                .iter()
                .find(|b| b.id == id)
                .map(Self::detail)
                .ok_or_else(|| anyhow::anyhow!("Query returned no rows"))
        }

        fn delete_by_id(&self, id: i64) -> Result<BookDetail> {
            let book = self.find_by_id(id)?;
            self.books.lock().unwrap().retain(|b| b.id != id);
            Ok(book)
        }

        fn update_by_id(
            &self,
            id: i64,
            title: &str,
            isbn: &str,
            author_id: i64,
        ) -> Result<BookDetail> {
            let mut books = self.books.lock().unwrap();
            let book = books
                .iter_mut()
                .find(|b| b.id == id)
                .ok_or_else(|| anyhow::anyhow!("Query returned no rows"))?;

            book.title = title.to_string();
            book.isbn = isbn.to_string();
            book.author_id = author_id;

            Ok(Self::detail(book))
        }
    }

    fn service() -> BookService {
        BookService::new(Arc::new(MockBookRepository::new()))
    }

    fn payload(title: &str, isbn: &str, author_id: i64) -> BookPayload {
        BookPayload {
            title: title.to_string(),
            isbn: isbn.to_string(),
            author_id,
        }
    }

    #[test]
    fn test_create_valid_book() {
        let svc = service();

        assert!(svc.create(&payload("Laskar Pelangi", "1234567890", 1)).is_ok());

        let (books, total) = svc.find_all(1, 10).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(total, 1);
    }

    #[test]
    fn test_create_validation_order() {
        let svc = service();

        assert!(matches!(
            svc.create(&payload("", "", 0)),
            Err(BookError::EmptyFields)
        ));
        assert!(matches!(
            svc.create(&payload("ab", "1234567890", 1)),
            Err(BookError::TitleTooShort)
        ));
        assert!(matches!(
            svc.create(&payload("Laskar Pelangi", "123456789", 1)),
            Err(BookError::IsbnTooShort)
        ));
        assert!(matches!(
            svc.create(&payload("Laskar Pelangi", "12345678901234", 1)),
            Err(BookError::IsbnTooLong)
        ));
        assert!(matches!(
            svc.create(&payload("Laskar Pelangi", "1234567890", -1)),
            Err(BookError::NegativeAuthorId)
        ));
    }

    #[test]
    fn test_isbn_bounds_inclusive() {
        let svc = service();

        assert!(svc.create(&payload("sepuluh", "1234567890", 1)).is_ok());
        assert!(svc.create(&payload("tiga belas", "1234567890123", 1)).is_ok());
    }

    #[test]
    fn test_duplicate_isbn_rejected() {
        let svc = service();

        svc.create(&payload("Laskar Pelangi", "1234567890", 1)).unwrap();

        assert!(matches!(
            svc.create(&payload("Sang Pemimpi", "1234567890", 1)),
            Err(BookError::DuplicateIsbn)
        ));
    }

    #[test]
    fn test_update_does_not_exempt_own_isbn() {
        // The duplicate lookup does not skip the record under update, so
        // re-submitting a book's own isbn is refused.
        let svc = service();
        svc.create(&payload("Laskar Pelangi", "1234567890", 1)).unwrap();

        assert!(matches!(
            svc.update_by_id(1, &payload("Laskar Pelangi 2", "1234567890", 1)),
            Err(BookError::DuplicateIsbn)
        ));

        // A fresh isbn goes through.
        let updated = svc
            .update_by_id(1, &payload("Laskar Pelangi 2", "0987654321", 1))
            .unwrap();
        assert_eq!(updated.title, "Laskar Pelangi 2");
    }

    #[test]
    fn test_list_empty_and_page_out_of_range() {
        let svc = service();

        assert!(matches!(
            svc.find_all(1, 10),
            Err(BookError::EmptyCollection)
        ));

        for i in 0..3 {
            svc.create(&payload(
                &format!("buku nomor {}", i),
                &format!("123456789{}", i),
                1,
            ))
            .unwrap();
        }

        let (_, total) = svc.find_all(1, 2).unwrap();
        assert_eq!(total, 2);

        assert!(matches!(svc.find_all(3, 2), Err(BookError::PageOutOfRange)));
    }

    #[test]
    fn test_invalid_id_rejected() {
        let svc = service();

        assert!(matches!(svc.find_by_id(0), Err(BookError::InvalidId)));
        assert!(matches!(svc.delete_by_id(-2), Err(BookError::InvalidId)));
        assert!(matches!(
            svc.update_by_id(0, &payload("Laskar Pelangi", "1234567890", 1)),
            Err(BookError::InvalidId)
        ));
    }
}
