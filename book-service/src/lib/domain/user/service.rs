use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::TokenKind;
use chrono::Utc;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginIdentifier;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for identity operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn find_by_identifier(&self, raw: &str) -> Result<Option<User>, UserError> {
        match LoginIdentifier::parse(raw) {
            Some(LoginIdentifier::Username(username)) => {
                self.repository.find_by_username(&username).await
            }
            Some(LoginIdentifier::Email(email)) => self.repository.find_by_email(&email).await,
            None => Ok(None),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<AuthSession, UserError> {
        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            first_name: command.first_name,
            last_name: command.last_name,
            username: command.username,
            email: command.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        let tokens = self.authenticator.issue_tokens(created_user.id)?;

        Ok(AuthSession {
            user: created_user,
            tokens,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError> {
        let Some(user) = self.find_by_identifier(&command.identifier).await? else {
            self.authenticator.reject_unknown_account(&command.password);
            tracing::debug!("Login rejected: no matching account");
            return Err(UserError::AuthenticationFailed);
        };

        match self
            .authenticator
            .authenticate(&command.password, &user.password_hash, user.id)
        {
            Ok(tokens) => {
                tracing::info!(user_id = %user.id, "User logged in");
                Ok(AuthSession { user, tokens })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::debug!(user_id = %user.id, "Login rejected: password mismatch");
                Err(UserError::AuthenticationFailed)
            }
            Err(AuthenticationError::PasswordError(e)) => Err(UserError::Password(e)),
            Err(AuthenticationError::JwtError(e)) => Err(UserError::Token(e)),
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, UserError> {
        let claims = self
            .authenticator
            .verify_token(refresh_token, TokenKind::Refresh)
            .map_err(|e| {
                tracing::warn!(reason = %e, "Refresh token rejected");
                UserError::InvalidToken
            })?;

        let user_id = UserId::from_string(&claims.sub).map_err(|_| {
            tracing::warn!("Refresh token subject is not a user id");
            UserError::InvalidToken
        })?;

        let Some(user) = self.repository.find_by_id(&user_id).await? else {
            tracing::warn!(user_id = %user_id, "Refresh token subject no longer exists");
            return Err(UserError::InvalidToken);
        };

        let tokens = self.authenticator.issue_tokens(user.id)?;
        tracing::debug!(user_id = %user.id, "Tokens rotated");

        Ok(AuthSession { user, tokens })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
