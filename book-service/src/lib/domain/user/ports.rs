use async_trait::async_trait;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

/// Port for identity operations: registration, login and token refresh.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new identity and issue its first token pair.
    ///
    /// # Arguments
    /// * `command` - Validated names, username, email and plaintext password
    ///
    /// # Returns
    /// The created identity and a fresh access/refresh pair
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` / `Token` / `DatabaseError` - Dependency failure
    async fn register(&self, command: RegisterUserCommand) -> Result<AuthSession, UserError>;

    /// Verify credentials and issue a token pair.
    ///
    /// # Errors
    /// * `AuthenticationFailed` - Unknown identifier or wrong password (indistinguishable)
    /// * `Password` / `Token` / `DatabaseError` - Dependency failure
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError>;

    /// Exchange a valid refresh token for a new access/refresh pair.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is invalid, expired, of the wrong kind, or its subject is gone
    /// * `Token` / `DatabaseError` - Dependency failure
    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
}
