//! Authentication utilities library
//!
//! Provides the stateless authentication core used by the book service:
//! - Password hashing (Argon2id)
//! - Access/refresh JWT issuance and verification with independent secrets
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use std::sync::Arc;
//!
//! use auth::{TokenIssuer, TokenKeys, TokenKind, TokenLifetimes, TokenVerifier};
//!
//! let keys = Arc::new(
//!     TokenKeys::new(
//!         b"access_secret_key_at_least_32_bytes!",
//!         b"refresh_secret_key_at_least_32_bytes",
//!     )
//!     .unwrap(),
//! );
//! let issuer = TokenIssuer::new(keys.clone(), TokenLifetimes::default());
//! let verifier = TokenVerifier::new(keys);
//!
//! let token = issuer.issue("user123", TokenKind::Access).unwrap();
//! let claims = verifier.verify(&token, TokenKind::Access).unwrap();
//! assert_eq!(claims.sub, "user123");
//!
//! // The same token is never accepted as the other kind.
//! assert!(verifier.verify(&token, TokenKind::Refresh).is_err());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, TokenKind, TokenLifetimes};
//!
//! let auth = Authenticator::from_secrets(
//!     b"access_secret_key_at_least_32_bytes!",
//!     b"refresh_secret_key_at_least_32_bytes",
//!     TokenLifetimes::default(),
//! )
//! .unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue tokens
//! let tokens = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! // Refresh: verify the refresh token, then rotate
//! let claims = auth.verify_token(&tokens.refresh_token, TokenKind::Refresh).unwrap();
//! let rotated = auth.issue_tokens(&claims.sub).unwrap();
//! assert_ne!(rotated.refresh_token, tokens.refresh_token);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenIssuer;
pub use jwt::TokenKeys;
pub use jwt::TokenKind;
pub use jwt::TokenLifetimes;
pub use jwt::TokenPair;
pub use jwt::TokenVerifier;
pub use password::CredentialHash;
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
