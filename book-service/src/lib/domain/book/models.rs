use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use uuid::Uuid;

use crate::book::errors::BookError;
use crate::book::errors::BookFieldError;
use crate::book::errors::BookIdError;
use crate::book::errors::RatingError;
use crate::user::models::User;
use crate::user::models::UserId;

/// A book in one user's reading log.
#[derive(Debug, Clone)]
pub struct Book {
    pub id: BookId,
    pub owner_id: UserId,
    pub title: BookTitle,
    pub author: AuthorName,
    pub summary: Summary,
    pub read_date: NaiveDate,
    pub rating: Rating,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Overwrite every mutable field from `content`.
    pub fn replace_content(&mut self, content: BookContent, at: DateTime<Utc>) {
        self.title = content.title;
        self.author = content.author;
        self.summary = content.summary;
        self.read_date = content.read_date;
        self.rating = content.rating;
        self.notes = content.notes;
        self.updated_at = at;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(pub Uuid);

impl BookId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, BookIdError> {
        Uuid::parse_str(s)
            .map(BookId)
            .map_err(|e| BookIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn bounded_text(
    value: String,
    field: &'static str,
    max: Option<usize>,
) -> Result<String, BookFieldError> {
    let trimmed = value.trim();
    let length = trimmed.chars().count();

    if length == 0 {
        return Err(BookFieldError::Empty { field });
    }
    if let Some(max) = max {
        if length > max {
            return Err(BookFieldError::TooLong {
                field,
                max,
                actual: length,
            });
        }
    }

    Ok(trimmed.to_string())
}

/// Book title, 1-255 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookTitle(String);

impl BookTitle {
    const MAX_LENGTH: usize = 255;

    pub fn new(title: String) -> Result<Self, BookFieldError> {
        bounded_text(title, "title", Some(Self::MAX_LENGTH)).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Author name, 1-255 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorName(String);

impl AuthorName {
    const MAX_LENGTH: usize = 255;

    pub fn new(author: String) -> Result<Self, BookFieldError> {
        bounded_text(author, "author", Some(Self::MAX_LENGTH)).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary(String);

impl Summary {
    pub fn new(summary: String) -> Result<Self, BookFieldError> {
        bounded_text(summary, "summary", None).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rating from 1 to 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, RatingError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(RatingError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            })
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Parse a read date given as `YYYY-MM-DD` or as an RFC 3339 timestamp
/// (only the calendar date is kept).
pub fn parse_read_date(raw: &str) -> Result<NaiveDate, BookError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(BookError::InvalidReadDate("read_date is required".to_string()));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|ts| ts.date_naive()))
        .map_err(|_| {
            BookError::InvalidReadDate(format!(
                "expected YYYY-MM-DD or an RFC 3339 timestamp, got {:?}",
                raw
            ))
        })
}

/// Validated user-editable book fields, shared by create and full update.
#[derive(Debug, Clone)]
pub struct BookContent {
    pub title: BookTitle,
    pub author: AuthorName,
    pub summary: Summary,
    pub read_date: NaiveDate,
    pub rating: Rating,
    pub notes: Option<String>,
}

impl BookContent {
    /// Blank notes are stored as absent.
    pub fn new(
        title: BookTitle,
        author: AuthorName,
        summary: Summary,
        read_date: NaiveDate,
        rating: Rating,
        notes: Option<String>,
    ) -> Self {
        let notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Self {
            title,
            author,
            summary,
            read_date,
            rating,
            notes,
        }
    }
}

/// A book together with its owner's identity, for detail views.
#[derive(Debug, Clone)]
pub struct BookDetails {
    pub book: Book,
    pub owner: User,
}
