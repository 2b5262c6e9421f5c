use async_trait::async_trait;
use auth::CredentialHash;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const SELECT_USER: &str = r#"
    SELECT id, first_name, last_name, username, email, password_hash, created_at, updated_at
    FROM users
"#;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            first_name: PersonName::new(row.first_name, "first_name")?,
            last_name: PersonName::new(row.last_name, "last_name")?,
            username: Username::new(row.username)?,
            email: EmailAddress::new(row.email)?,
            password_hash: CredentialHash::from_stored(row.password_hash),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        condition: &str,
        value: impl ToString,
    ) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE {}", SELECT_USER, condition))
            .bind(value.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, first_name, last_name, username, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.0)
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("users_username_key") {
                        return UserError::UsernameAlreadyExists(
                            user.username.as_str().to_string(),
                        );
                    }
                    if db_err.constraint() == Some("users_email_key") {
                        return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                    }
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        self.fetch_one_where("username = $1", username).await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        self.fetch_one_where("email = $1", email).await
    }
}
