use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::book::errors::BookError;
use crate::book::models::Book;
use crate::book::models::BookContent;
use crate::book::models::BookDetails;
use crate::book::models::BookId;
use crate::book::ports::BookRepository;
use crate::book::ports::BookServicePort;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::ports::UserRepository;

/// Domain service implementation for book operations.
pub struct BookService<BR, UR>
where
    BR: BookRepository,
    UR: UserRepository,
{
    books: Arc<BR>,
    users: Arc<UR>,
}

impl<BR, UR> BookService<BR, UR>
where
    BR: BookRepository,
    UR: UserRepository,
{
    /// # Arguments
    /// * `books` - Book persistence implementation
    /// * `users` - Identity lookup for owner profiles in detail views
    pub fn new(books: Arc<BR>, users: Arc<UR>) -> Self {
        Self { books, users }
    }

    async fn owner(&self, owner: &UserId) -> Result<User, BookError> {
        self.users
            .find_by_id(owner)
            .await
            .map_err(|e| BookError::DatabaseError(e.to_string()))?
            .ok_or_else(|| BookError::OwnerNotFound(owner.to_string()))
    }
}

#[async_trait]
impl<BR, UR> BookServicePort for BookService<BR, UR>
where
    BR: BookRepository,
    UR: UserRepository,
{
    async fn create_book(
        &self,
        owner: &UserId,
        content: BookContent,
    ) -> Result<BookDetails, BookError> {
        let owner = self.owner(owner).await?;

        let now = Utc::now();
        let book = Book {
            id: BookId::new(),
            owner_id: owner.id,
            title: content.title,
            author: content.author,
            summary: content.summary,
            read_date: content.read_date,
            rating: content.rating,
            notes: content.notes,
            created_at: now,
            updated_at: now,
        };

        let book = self.books.create(book).await?;
        tracing::info!(book_id = %book.id, owner_id = %owner.id, "Book created");

        Ok(BookDetails { book, owner })
    }

    async fn list_books(&self, owner: &UserId) -> Result<Vec<Book>, BookError> {
        self.books.list_for_owner(owner).await
    }

    async fn get_book(&self, owner: &UserId, id: &BookId) -> Result<BookDetails, BookError> {
        let book = self
            .books
            .find_for_owner(owner, id)
            .await?
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;
        let owner = self.owner(owner).await?;

        Ok(BookDetails { book, owner })
    }

    async fn update_book(
        &self,
        owner: &UserId,
        id: &BookId,
        content: BookContent,
    ) -> Result<BookDetails, BookError> {
        let mut book = self
            .books
            .find_for_owner(owner, id)
            .await?
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;

        book.replace_content(content, Utc::now());
        let book = self.books.update(book).await?;
        tracing::info!(book_id = %book.id, owner_id = %owner, "Book updated");

        let owner = self.owner(owner).await?;
        Ok(BookDetails { book, owner })
    }

    async fn delete_book(&self, owner: &UserId, id: &BookId) -> Result<(), BookError> {
        self.books.delete_for_owner(owner, id).await?;
        tracing::info!(book_id = %id, owner_id = %owner, "Book deleted");
        Ok(())
    }
}
