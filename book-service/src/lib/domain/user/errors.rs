use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for first/last name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersonNameError {
    #[error("{field} is required")]
    Empty { field: &'static str },

    #[error("{field} too long: maximum {max} characters, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Error for plaintext password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("password is required")]
    Empty,

    #[error("password too long: maximum {max} characters")]
    TooLong { max: usize },
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] PersonNameError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    /// Unknown identity or wrong password. Deliberately carries no detail.
    #[error("Invalid credentials")]
    AuthenticationFailed,

    /// Refresh token rejected, or its subject no longer exists.
    #[error("Invalid or expired token")]
    InvalidToken,

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::JwtError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}
