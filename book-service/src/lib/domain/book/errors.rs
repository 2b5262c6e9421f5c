use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for bounded text fields (title, author, summary)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookFieldError {
    #[error("{field} is required")]
    Empty { field: &'static str },

    #[error("{field} too long: maximum {max} characters, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("rating must be between {min} and {max}, got {actual}")]
    OutOfRange { min: u8, max: u8, actual: i64 },
}

/// Top-level error for all book-related operations
#[derive(Debug, Clone, Error)]
pub enum BookError {
    #[error("Invalid book ID: {0}")]
    InvalidBookId(#[from] BookIdError),

    #[error("Invalid book: {0}")]
    InvalidField(#[from] BookFieldError),

    #[error("Invalid rating: {0}")]
    InvalidRating(#[from] RatingError),

    #[error("Invalid read date: {0}")]
    InvalidReadDate(String),

    /// Absent, or owned by someone else. The two are never distinguished.
    #[error("Book not found: {0}")]
    NotFound(String),

    /// The authenticated identity no longer exists.
    #[error("Owner not found: {0}")]
    OwnerNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for BookError {
    fn from(err: anyhow::Error) -> Self {
        BookError::Unknown(err.to_string())
    }
}
