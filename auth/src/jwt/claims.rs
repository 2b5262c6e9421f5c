use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::JwtError;
use super::kind::TokenKind;

/// Claim set carried by every issued token.
///
/// All fields are required; a token whose payload lacks any of them is
/// rejected as malformed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique token identifier)
    pub jti: String,

    /// Token class the claims were issued for
    pub kind: TokenKind,
}

impl Claims {
    /// Create claims for `subject`, valid from `issued_at` for `lifetime`.
    ///
    /// # Errors
    /// * `SigningFailed` - `issued_at + lifetime` is not a representable time
    pub fn new(
        subject: impl ToString,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        let expiration = issued_at.checked_add_signed(lifetime).ok_or_else(|| {
            JwtError::SigningFailed(format!("expiry of {} token is out of range", kind))
        })?;

        Ok(Self {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
            kind,
        })
    }

    /// Check if the token is expired.
    ///
    /// A token is expired from the instant of `exp` onward.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Expiration as a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
