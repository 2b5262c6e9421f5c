use async_trait::async_trait;

use crate::book::errors::BookError;
use crate::book::models::Book;
use crate::book::models::BookContent;
use crate::book::models::BookDetails;
use crate::book::models::BookId;
use crate::user::models::UserId;

/// Port for a user's reading log. Every operation is scoped to `owner`.
#[async_trait]
pub trait BookServicePort: Send + Sync + 'static {
    /// Add a book to the owner's log.
    ///
    /// # Errors
    /// * `OwnerNotFound` - Authenticated identity no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn create_book(
        &self,
        owner: &UserId,
        content: BookContent,
    ) -> Result<BookDetails, BookError>;

    /// All of the owner's books, oldest first.
    async fn list_books(&self, owner: &UserId) -> Result<Vec<Book>, BookError>;

    /// # Errors
    /// * `NotFound` - Book does not exist or belongs to another user
    async fn get_book(&self, owner: &UserId, id: &BookId) -> Result<BookDetails, BookError>;

    /// Replace every mutable field of an owned book.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist or belongs to another user
    async fn update_book(
        &self,
        owner: &UserId,
        id: &BookId,
        content: BookContent,
    ) -> Result<BookDetails, BookError>;

    /// # Errors
    /// * `NotFound` - Book does not exist or belongs to another user
    async fn delete_book(&self, owner: &UserId, id: &BookId) -> Result<(), BookError>;
}

/// Persistence operations for books. Lookups take the owner so that a
/// foreign book is simply not found.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    async fn create(&self, book: Book) -> Result<Book, BookError>;

    async fn find_for_owner(&self, owner: &UserId, id: &BookId)
        -> Result<Option<Book>, BookError>;

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Book>, BookError>;

    /// Persist the mutable fields of `book`, matching on id and owner.
    ///
    /// # Errors
    /// * `NotFound` - No book with this id for this owner
    async fn update(&self, book: Book) -> Result<Book, BookError>;

    /// # Errors
    /// * `NotFound` - No book with this id for this owner
    async fn delete_for_owner(&self, owner: &UserId, id: &BookId) -> Result<(), BookError>;
}
