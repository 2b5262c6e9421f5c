use async_trait::async_trait;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::book::errors::BookError;
use crate::book::models::AuthorName;
use crate::book::models::Book;
use crate::book::models::BookId;
use crate::book::models::BookTitle;
use crate::book::models::Rating;
use crate::book::models::Summary;
use crate::book::ports::BookRepository;
use crate::user::models::UserId;

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    author: String,
    summary: String,
    read_date: NaiveDate,
    rating: i16,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BookRow> for Book {
    type Error = BookError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(Book {
            id: BookId(row.id),
            owner_id: UserId(row.user_id),
            title: BookTitle::new(row.title)?,
            author: AuthorName::new(row.author)?,
            summary: Summary::new(row.summary)?,
            read_date: row.read_date,
            rating: Rating::new(i64::from(row.rating))?,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn create(&self, book: Book) -> Result<Book, BookError> {
        sqlx::query(
            r#"
            INSERT INTO books (id, user_id, title, author, summary, read_date, rating, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(book.id.0)
        .bind(book.owner_id.0)
        .bind(book.title.as_str())
        .bind(book.author.as_str())
        .bind(book.summary.as_str())
        .bind(book.read_date)
        .bind(i16::from(book.rating.value()))
        .bind(book.notes.as_deref())
        .bind(book.created_at)
        .bind(book.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return BookError::OwnerNotFound(book.owner_id.to_string());
                }
            }
            BookError::DatabaseError(e.to_string())
        })?;

        Ok(book)
    }

    async fn find_for_owner(
        &self,
        owner: &UserId,
        id: &BookId,
    ) -> Result<Option<Book>, BookError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, user_id, title, author, summary, read_date, rating, notes, created_at, updated_at
            FROM books
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        row.map(Book::try_from).transpose()
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Book>, BookError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, user_id, title, author, summary, read_date, rating, notes, created_at, updated_at
            FROM books
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Book::try_from).collect()
    }

    async fn update(&self, book: Book) -> Result<Book, BookError> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $3, author = $4, summary = $5, read_date = $6, rating = $7, notes = $8, updated_at = $9
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(book.id.0)
        .bind(book.owner_id.0)
        .bind(book.title.as_str())
        .bind(book.author.as_str())
        .bind(book.summary.as_str())
        .bind(book.read_date)
        .bind(i16::from(book.rating.value()))
        .bind(book.notes.as_deref())
        .bind(book.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound(book.id.to_string()));
        }

        Ok(book)
    }

    async fn delete_for_owner(&self, owner: &UserId, id: &BookId) -> Result<(), BookError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1 AND user_id = $2")
            .bind(id.0)
            .bind(owner.0)
            .execute(&self.pool)
            .await
            .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
