//! Author Service
//! Mission: Author validation rules, pagination, and response shaping

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::authors::models::{Author, CreateAuthor, UpdateAuthor, UpdatedAuthor};
use crate::authors::repository::AuthorRepository;
use crate::pagination::paginate;

const BIRTHDATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug)]
pub enum AuthorError {
    EmptyFields,
    NameTooShort,
    BadBirthdate,
    UpdateFieldsEmpty,
    UpdateNameTooShort,
    InvalidId,
    NotFound,
    EmptyCollection,
    PageOutOfRange,
    Save(String),
    Fetch(String),
    Delete,
    Update(String),
}

impl fmt::Display for AuthorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorError::EmptyFields => write!(f, "nama dan tanggal lahir tidak boleh kosong"),
            AuthorError::NameTooShort => write!(f, "nama minimal 3 karakter"),
            AuthorError::BadBirthdate => write!(
                f,
                "format bithdate salah, format harus YYYY-MM-DD atau tanggal, bulan anda tidak valid"
            ),
            AuthorError::UpdateFieldsEmpty => {
                write!(f, "field name dan birthdate tidak boleh kosong")
            }
            AuthorError::UpdateNameTooShort => {
                write!(f, "harap masukan nama minimal 3 karakter")
            }
            AuthorError::InvalidId => write!(f, "id tidak valid"),
            AuthorError::NotFound => write!(f, "author tidak ditemukan"),
            AuthorError::EmptyCollection => write!(f, "data author kosong"),
            AuthorError::PageOutOfRange => write!(f, "page sudah melebihi total page"),
            AuthorError::Save(e) => write!(f, "gagal menyimpan data author : {}", e),
            AuthorError::Fetch(e) => write!(f, "gagal mengambil data author : {}", e),
            AuthorError::Delete => {
                write!(f, "gagal menghapus data author, author tidak ditemukan")
            }
            AuthorError::Update(e) => write!(f, "gagal mengupdate data author : {}", e),
        }
    }
}

impl std::error::Error for AuthorError {}

pub struct AuthorService {
    repo: Arc<dyn AuthorRepository>,
}

impl AuthorService {
    pub fn new(repo: Arc<dyn AuthorRepository>) -> Self {
        Self { repo }
    }

    /// Validate and persist a new author. Checks run in fixed order, first
    /// violation wins.
    pub fn create(&self, author: &CreateAuthor) -> Result<(), AuthorError> {
        if author.name.is_empty() || author.birth_date.is_empty() {
            return Err(AuthorError::EmptyFields);
        }

        if author.name.len() < 3 {
            return Err(AuthorError::NameTooShort);
        }

        let birth_date = NaiveDate::parse_from_str(&author.birth_date, BIRTHDATE_FORMAT)
            .map_err(|_| AuthorError::BadBirthdate)?;

        self.repo
            .save(&author.name, birth_date)
            .map_err(|e| AuthorError::Save(e.to_string()))?;

        info!("✅ Created author: {}", author.name);

        Ok(())
    }

    /// Full set, then pagination. The empty collection is a distinct
    /// condition so list endpoints can answer 200 instead of failing.
    pub fn find_all(&self, page: usize, limit: usize) -> Result<(Vec<Author>, usize), AuthorError> {
        let authors = self
            .repo
            .find_all()
            .map_err(|e| AuthorError::Fetch(e.to_string()))?;

        if authors.is_empty() {
            return Err(AuthorError::EmptyCollection);
        }

        let (page_items, total_pages) =
            paginate(authors, page, limit).map_err(|_| AuthorError::PageOutOfRange)?;

        Ok((page_items, total_pages))
    }

    pub fn find_by_id(&self, id: i64) -> Result<Author, AuthorError> {
        if id <= 0 {
            return Err(AuthorError::InvalidId);
        }

        self.repo.find_by_id(id).map_err(|_| AuthorError::NotFound)
    }

    pub fn delete_by_id(&self, id: i64) -> Result<Author, AuthorError> {
        if id <= 0 {
            return Err(AuthorError::InvalidId);
        }

        let author = self
            .repo
            .delete_by_id(id)
            .map_err(|_| AuthorError::Delete)?;

        info!("🗑️  Deleted author: {}", author.name);

        Ok(author)
    }

    /// Partial update: at least one field must be present; a provided
    /// birthdate is reparsed and re-serialized to canonical form before it
    /// reaches persistence.
    pub fn update_by_id(
        &self,
        id: i64,
        update: &UpdateAuthor,
    ) -> Result<UpdatedAuthor, AuthorError> {
        if id <= 0 {
            return Err(AuthorError::InvalidId);
        }

        if update.name.is_empty() && update.birth_date.is_empty() {
            return Err(AuthorError::UpdateFieldsEmpty);
        }

        if !update.name.is_empty() && update.name.len() < 3 {
            return Err(AuthorError::UpdateNameTooShort);
        }

        let birth_date = if update.birth_date.is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(&update.birth_date, BIRTHDATE_FORMAT)
                    .map_err(|_| AuthorError::BadBirthdate)?,
            )
        };

        let name = if update.name.is_empty() {
            None
        } else {
            Some(update.name.as_str())
        };

        let author = self
            .repo
            .update_by_id(id, name, birth_date)
            .map_err(|e| AuthorError::Update(e.to_string()))?;

        Ok(UpdatedAuthor {
            name: author.name,
            birth_date: author.birth_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::sync::Mutex;

    struct MockAuthorRepository {
        authors: Mutex<Vec<Author>>,
    }

    impl MockAuthorRepository {
        fn new() -> Self {
            Self {
                authors: Mutex::new(Vec::new()),
            }
        }
    }

    impl AuthorRepository for MockAuthorRepository {
        fn save(&self, name: &str, birth_date: NaiveDate) -> Result<()> {
            let mut authors = self.authors.lock().unwrap();
            let id = authors.len() as i64 + 1;
            authors.push(Author {
                id,
                name: name.to_string(),
                birth_date,
            });
            Ok(())
        }

        fn find_all(&self) -> Result<Vec<Author>> {
            Ok(self.authors.lock().unwrap().clone())
        }

        fn find_by_id(&self, id: i64) -> Result<Author> {
            self.authors
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Query returned no rows"))
        }

        fn delete_by_id(&self, id: i64) -> Result<Author> {
            let author = self.find_by_id(id)?;
            self.authors.lock().unwrap().retain(|a| a.id != id);
            Ok(author)
        }

        fn update_by_id(
            &self,
            id: i64,
            name: Option<&str>,
            birth_date: Option<NaiveDate>,
        ) -> Result<Author> {
            let mut authors = self.authors.lock().unwrap();
            let author = authors
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or_else(|| anyhow::anyhow!("Query returned no rows"))?;

            if let Some(name) = name {
                author.name = name.to_string();
            }
            if let Some(birth_date) = birth_date {
                author.birth_date = birth_date;
            }

            Ok(author.clone())
        }
    }

    fn service() -> AuthorService {
        AuthorService::new(Arc::new(MockAuthorRepository::new()))
    }

    fn create_req(name: &str, birth_date: &str) -> CreateAuthor {
        CreateAuthor {
            name: name.to_string(),
            birth_date: birth_date.to_string(),
        }
    }

    #[test]
    fn test_create_valid_author() {
        let svc = service();

        assert!(svc.create(&create_req("ilham", "2000-06-11")).is_ok());
        let (authors, total) = svc.find_all(1, 10).unwrap();
        assert_eq!(authors.len(), 1);
        assert_eq!(total, 1);
    }

    #[test]
    fn test_create_validation_order() {
        let svc = service();

        assert!(matches!(
            svc.create(&create_req("", "")),
            Err(AuthorError::EmptyFields)
        ));
        assert!(matches!(
            svc.create(&create_req("il", "2000-06-11")),
            Err(AuthorError::NameTooShort)
        ));
        assert!(matches!(
            svc.create(&create_req("ilham", "11-06-2000")),
            Err(AuthorError::BadBirthdate)
        ));
        assert!(matches!(
            svc.create(&create_req("ilham", "2000-13-40")),
            Err(AuthorError::BadBirthdate)
        ));
    }

    #[test]
    fn test_list_empty_is_distinct_condition() {
        let svc = service();

        assert!(matches!(
            svc.find_all(1, 10),
            Err(AuthorError::EmptyCollection)
        ));
    }

    #[test]
    fn test_list_page_out_of_range() {
        let svc = service();
        for i in 0..3 {
            svc.create(&create_req(&format!("author-{}", i), "2000-06-11"))
                .unwrap();
        }

        let (page, total) = svc.find_all(2, 2).unwrap();
        assert_eq!(total, 2);
        assert_eq!(page.len(), 1);

        assert!(matches!(
            svc.find_all(3, 2),
            Err(AuthorError::PageOutOfRange)
        ));
    }

    #[test]
    fn test_update_requires_some_field() {
        let svc = service();
        svc.create(&create_req("ilham", "2000-06-11")).unwrap();

        assert!(matches!(
            svc.update_by_id(1, &UpdateAuthor {
                name: String::new(),
                birth_date: String::new(),
            }),
            Err(AuthorError::UpdateFieldsEmpty)
        ));
    }

    #[test]
    fn test_update_canonicalizes_birthdate() {
        let svc = service();
        svc.create(&create_req("ilham", "2000-06-11")).unwrap();

        let updated = svc
            .update_by_id(1, &UpdateAuthor {
                name: String::new(),
                birth_date: "1976-10-24".to_string(),
            })
            .unwrap();

        assert_eq!(updated.name, "ilham");
        assert_eq!(updated.birth_date.format("%Y-%m-%d").to_string(), "1976-10-24");
    }

    #[test]
    fn test_update_short_name_rejected() {
        let svc = service();
        svc.create(&create_req("ilham", "2000-06-11")).unwrap();

        assert!(matches!(
            svc.update_by_id(1, &UpdateAuthor {
                name: "il".to_string(),
                birth_date: String::new(),
            }),
            Err(AuthorError::UpdateNameTooShort)
        ));
    }

    #[test]
    fn test_invalid_id_rejected() {
        let svc = service();

        assert!(matches!(svc.find_by_id(0), Err(AuthorError::InvalidId)));
        assert!(matches!(svc.delete_by_id(-1), Err(AuthorError::InvalidId)));
    }

    #[test]
    fn test_delete_returns_deleted_author() {
        let svc = service();
        svc.create(&create_req("ilham", "2000-06-11")).unwrap();

        let deleted = svc.delete_by_id(1).unwrap();
        assert_eq!(deleted.name, "ilham");

        assert!(matches!(svc.find_by_id(1), Err(AuthorError::NotFound)));
    }
}
