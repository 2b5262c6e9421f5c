pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod list_books;
pub mod update_book;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
pub use create_book::create_book;
pub use delete_book::delete_book;
pub use get_book::get_book;
pub use list_books::list_books;
use serde::Deserialize;
use serde::Serialize;
pub use update_book::update_book;

use crate::book::errors::BookError;
use crate::book::errors::BookFieldError;
use crate::book::models::parse_read_date;
use crate::book::models::AuthorName;
use crate::book::models::Book;
use crate::book::models::BookContent;
use crate::book::models::BookDetails;
use crate::book::models::BookTitle;
use crate::book::models::Rating;
use crate::book::models::Summary;
use crate::user::models::User;

/// Request body for create and full update (raw JSON).
///
/// Absent fields deserialize as empty and are reported by validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookRequestBody {
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    read_date: String,
    #[serde(default)]
    rating: Option<i64>,
    #[serde(default)]
    notes: Option<String>,
}

impl BookRequestBody {
    fn try_into_content(self) -> Result<BookContent, BookError> {
        let title = BookTitle::new(self.title)?;
        let author = AuthorName::new(self.author)?;
        let summary = Summary::new(self.summary)?;
        let read_date = parse_read_date(&self.read_date)?;
        let rating = self
            .rating
            .ok_or(BookFieldError::Empty { field: "rating" })?;
        let rating = Rating::new(rating)?;

        Ok(BookContent::new(
            title,
            author,
            summary,
            read_date,
            rating,
            self.notes,
        ))
    }
}

/// Owner fields embedded in a book detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerData {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

impl From<&User> for OwnerData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name.as_str().to_string(),
            last_name: user.last_name.as_str().to_string(),
            username: user.username.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookDetailData {
    pub id: String,
    pub title: String,
    pub author: String,
    pub summary: String,
    pub read_date: NaiveDate,
    pub rating: u8,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: OwnerData,
}

impl From<&BookDetails> for BookDetailData {
    fn from(details: &BookDetails) -> Self {
        let book = &details.book;
        Self {
            id: book.id.to_string(),
            title: book.title.as_str().to_string(),
            author: book.author.as_str().to_string(),
            summary: book.summary.as_str().to_string(),
            read_date: book.read_date,
            rating: book.rating.value(),
            notes: book.notes.clone(),
            created_at: book.created_at,
            updated_at: book.updated_at,
            user: (&details.owner).into(),
        }
    }
}

/// List entry: just enough to pick a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSummaryData {
    pub id: String,
    pub title: String,
    pub author: String,
    pub rating: u8,
}

impl From<&Book> for BookSummaryData {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title.as_str().to_string(),
            author: book.author.as_str().to_string(),
            rating: book.rating.value(),
        }
    }
}
