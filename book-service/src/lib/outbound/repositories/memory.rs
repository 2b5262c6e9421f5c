use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::book::errors::BookError;
use crate::book::models::Book;
use crate::book::models::BookId;
use crate::book::ports::BookRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store with the same uniqueness rules as the
/// `users` table.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        // Check and insert under one write lock.
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }
}

/// Process-local book store. Books are only ever visible to their owner.
#[derive(Clone, Default)]
pub struct InMemoryBookRepository {
    books: Arc<RwLock<HashMap<BookId, Book>>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn create(&self, book: Book) -> Result<Book, BookError> {
        self.books.write().await.insert(book.id, book.clone());
        Ok(book)
    }

    async fn find_for_owner(
        &self,
        owner: &UserId,
        id: &BookId,
    ) -> Result<Option<Book>, BookError> {
        Ok(self
            .books
            .read()
            .await
            .get(id)
            .filter(|book| &book.owner_id == owner)
            .cloned())
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Book>, BookError> {
        let mut books: Vec<Book> = self
            .books
            .read()
            .await
            .values()
            .filter(|book| &book.owner_id == owner)
            .cloned()
            .collect();
        books.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.0.cmp(&b.id.0))
        });
        Ok(books)
    }

    async fn update(&self, book: Book) -> Result<Book, BookError> {
        let mut books = self.books.write().await;

        match books.get_mut(&book.id) {
            Some(existing) if existing.owner_id == book.owner_id => {
                *existing = book.clone();
                Ok(book)
            }
            _ => Err(BookError::NotFound(book.id.to_string())),
        }
    }

    async fn delete_for_owner(&self, owner: &UserId, id: &BookId) -> Result<(), BookError> {
        let mut books = self.books.write().await;

        let owned = books.get(id).is_some_and(|book| &book.owner_id == owner);
        if !owned {
            return Err(BookError::NotFound(id.to_string()));
        }

        books.remove(id);
        Ok(())
    }
}
