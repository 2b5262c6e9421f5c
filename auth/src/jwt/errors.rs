use thiserror::Error;

use super::kind::TokenKind;

/// Error type for JWT operations.
///
/// Verification failures (`InvalidSignature`, `Expired`, `Malformed`,
/// `KindMismatch`) are terminal for the request that presented the token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("No signing secret configured for {0} tokens")]
    MissingSecret(TokenKind),

    #[error("Signing secret for {kind} tokens is too short: minimum {min} bytes, got {actual}")]
    WeakSecret {
        kind: TokenKind,
        min: usize,
        actual: usize,
    },

    #[error("Access and refresh tokens must use distinct signing secrets")]
    SecretsNotDistinct,

    #[error("Lifetime of {kind} tokens must be between 1 and {max} seconds, got {seconds}")]
    InvalidLifetime {
        kind: TokenKind,
        seconds: i64,
        max: i64,
    },

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Expected a {expected} token, got a {actual} token")]
    KindMismatch {
        expected: TokenKind,
        actual: TokenKind,
    },
}

impl JwtError {
    /// Whether this error came from checking a presented token, as opposed to
    /// configuration or signing.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            JwtError::InvalidSignature
                | JwtError::Expired
                | JwtError::Malformed(_)
                | JwtError::KindMismatch { .. }
        )
    }
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => JwtError::InvalidSignature,
            ErrorKind::ExpiredSignature => JwtError::Expired,
            _ => JwtError::Malformed(err.to_string()),
        }
    }
}
