use std::sync::Arc;
use std::sync::OnceLock;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenKeys;
use crate::jwt::TokenKind;
use crate::jwt::TokenLifetimes;
use crate::jwt::TokenPair;
use crate::jwt::TokenVerifier;
use crate::password::CredentialHash;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT
/// issuance/verification.
///
/// Holds no per-request state; it is shared across requests behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    /// Hash checked when no account matches; built with `password_hasher`.
    decoy_hash: OnceLock<Option<CredentialHash>>,
}

const DECOY_PASSWORD: &str = "decoy password for unknown accounts";

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator from already validated keys.
    pub fn new(
        keys: TokenKeys,
        lifetimes: TokenLifetimes,
        password_hasher: PasswordHasher,
    ) -> Self {
        let keys = Arc::new(keys);

        Self {
            password_hasher,
            issuer: TokenIssuer::new(Arc::clone(&keys), lifetimes),
            verifier: TokenVerifier::new(keys),
            decoy_hash: OnceLock::new(),
        }
    }

    /// Create an authenticator from the two signing secrets, with the default
    /// password hasher.
    ///
    /// # Errors
    /// * `JwtError` - A secret is missing, too short, or shared between kinds
    pub fn from_secrets(
        access_secret: &[u8],
        refresh_secret: &[u8],
        lifetimes: TokenLifetimes,
    ) -> Result<Self, JwtError> {
        let keys = TokenKeys::new(access_secret, refresh_secret)?;
        Ok(Self::new(keys, lifetimes, PasswordHasher::new()))
    }

    /// Replace the password hasher (e.g. to apply configured cost).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self.decoy_hash = OnceLock::new();
        self
    }

    pub fn lifetimes(&self) -> TokenLifetimes {
        self.issuer.lifetimes()
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<CredentialHash, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &CredentialHash,
    ) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token pair for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unreadable
    /// * `JwtError` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &CredentialHash,
        subject: impl ToString,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.verify_password(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_tokens(subject)?)
    }

    /// Run a full password verification against a decoy hash.
    ///
    /// Call when a login names no known account, so that the response takes
    /// as long as a wrong password for an existing one. Always a rejection.
    pub fn reject_unknown_account(&self, password: &str) {
        let decoy = self
            .decoy_hash
            .get_or_init(|| self.password_hasher.hash(DECOY_PASSWORD).ok());

        if let Some(decoy) = decoy {
            let _ = self.password_hasher.verify(password, decoy);
        }
    }

    /// Issue an access + refresh pair without password verification.
    ///
    /// For flows where the caller is already authenticated: registration and
    /// refresh.
    pub fn issue_tokens(&self, subject: impl ToString) -> Result<TokenPair, JwtError> {
        self.issuer.issue_pair(subject)
    }

    /// Verify `token` as a `kind` token.
    pub fn verify_token(&self, token: &str, kind: TokenKind) -> Result<Claims, JwtError> {
        self.verifier.verify(token, kind)
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }
}
