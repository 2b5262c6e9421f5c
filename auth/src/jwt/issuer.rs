use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Header;
use serde::Deserialize;
use serde::Serialize;

use super::claims::Claims;
use super::errors::JwtError;
use super::keys::TokenKeys;
use super::kind::TokenKind;

/// Fixed lifetimes per token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl TokenLifetimes {
    /// Longest accepted lifetime: ten years.
    pub const MAX_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

    pub fn new(access: Duration, refresh: Duration) -> Self {
        Self { access, refresh }
    }

    /// Build lifetimes from configured seconds.
    ///
    /// # Errors
    /// * `InvalidLifetime` - A lifetime is not positive or exceeds [`Self::MAX_SECONDS`]
    pub fn from_seconds(access: i64, refresh: i64) -> Result<Self, JwtError> {
        Ok(Self {
            access: bounded_lifetime(TokenKind::Access, access)?,
            refresh: bounded_lifetime(TokenKind::Refresh, refresh)?,
        })
    }

    pub fn for_kind(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access,
            TokenKind::Refresh => self.refresh,
        }
    }
}

fn bounded_lifetime(kind: TokenKind, seconds: i64) -> Result<Duration, JwtError> {
    let invalid = || JwtError::InvalidLifetime {
        kind,
        seconds,
        max: TokenLifetimes::MAX_SECONDS,
    };

    if !(1..=TokenLifetimes::MAX_SECONDS).contains(&seconds) {
        return Err(invalid());
    }
    Duration::try_seconds(seconds).ok_or_else(invalid)
}

impl Default for TokenLifetimes {
    /// One hour for access tokens, seven days for refresh tokens.
    fn default() -> Self {
        Self {
            access: Duration::hours(1),
            refresh: Duration::days(7),
        }
    }
}

/// Access and refresh token handed to a client after authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Always `"Bearer"`
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Creates signed, time-bounded tokens.
///
/// Stateless: nothing is persisted, a token's validity is proven later by its
/// signature and timestamps alone.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    keys: Arc<TokenKeys>,
    lifetimes: TokenLifetimes,
}

impl TokenIssuer {
    pub fn new(keys: Arc<TokenKeys>, lifetimes: TokenLifetimes) -> Self {
        Self { keys, lifetimes }
    }

    pub fn lifetimes(&self) -> TokenLifetimes {
        self.lifetimes
    }

    /// Issue a token of `kind` for `subject`, starting now.
    ///
    /// # Errors
    /// * `SigningFailed` - HMAC signing failed or the expiry is out of range
    pub fn issue(&self, subject: impl ToString, kind: TokenKind) -> Result<String, JwtError> {
        self.issue_at(subject, kind, Utc::now())
    }

    /// Issue a token of `kind` for `subject` as if the current time were
    /// `issued_at`.
    pub fn issue_at(
        &self,
        subject: impl ToString,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(subject, kind, issued_at, self.lifetimes.for_kind(kind))?;
        let header = Header::new(Algorithm::HS256);

        encode(&header, &claims, self.keys.encoding_key(kind))
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Issue a fresh access + refresh pair for `subject`.
    pub fn issue_pair(&self, subject: impl ToString) -> Result<TokenPair, JwtError> {
        let subject = subject.to_string();
        let now = Utc::now();

        Ok(TokenPair {
            access_token: self.issue_at(&subject, TokenKind::Access, now)?,
            refresh_token: self.issue_at(&subject, TokenKind::Refresh, now)?,
            token_type: "Bearer".to_string(),
            expires_in: self.lifetimes.access.num_seconds(),
        })
    }
}
