use std::fmt;

use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;

use super::errors::JwtError;
use super::kind::TokenKind;

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    fn from_secret(kind: TokenKind, secret: &[u8]) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSecret(kind));
        }
        if secret.len() < TokenKeys::MIN_SECRET_LENGTH {
            return Err(JwtError::WeakSecret {
                kind,
                min: TokenKeys::MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        })
    }
}

/// HMAC keys for both token kinds.
///
/// Access and refresh tokens are signed with independent secrets, so a leaked
/// refresh secret cannot forge access tokens and vice versa. Secrets are
/// validated here, once, at construction: build this at start-up so a
/// misconfigured deployment refuses to boot.
pub struct TokenKeys {
    access: KeyPair,
    refresh: KeyPair,
}

impl TokenKeys {
    /// 256 bits, matching the HS256 output size.
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Build the key set from the two signing secrets.
    ///
    /// # Errors
    /// * `MissingSecret` - A secret is empty
    /// * `WeakSecret` - A secret is shorter than [`Self::MIN_SECRET_LENGTH`]
    /// * `SecretsNotDistinct` - Both kinds would share one secret
    pub fn new(access_secret: &[u8], refresh_secret: &[u8]) -> Result<Self, JwtError> {
        let access = KeyPair::from_secret(TokenKind::Access, access_secret)?;
        let refresh = KeyPair::from_secret(TokenKind::Refresh, refresh_secret)?;

        if access_secret == refresh_secret {
            return Err(JwtError::SecretsNotDistinct);
        }

        Ok(Self { access, refresh })
    }

    fn pair(&self, kind: TokenKind) -> &KeyPair {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    pub(crate) fn encoding_key(&self, kind: TokenKind) -> &EncodingKey {
        &self.pair(kind).encoding
    }

    pub(crate) fn decoding_key(&self, kind: TokenKind) -> &DecodingKey {
        &self.pair(kind).decoding
    }
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCESS: &[u8] = b"access_secret_key_at_least_32_bytes!";
    const REFRESH: &[u8] = b"refresh_secret_key_at_least_32_bytes";

    #[test]
    fn test_distinct_secrets_accepted() {
        assert!(TokenKeys::new(ACCESS, REFRESH).is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert_eq!(
            TokenKeys::new(b"", REFRESH).unwrap_err(),
            JwtError::MissingSecret(TokenKind::Access)
        );
        assert_eq!(
            TokenKeys::new(ACCESS, b"").unwrap_err(),
            JwtError::MissingSecret(TokenKind::Refresh)
        );
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = TokenKeys::new(b"short", REFRESH);
        assert!(matches!(
            result,
            Err(JwtError::WeakSecret {
                kind: TokenKind::Access,
                min: 32,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_shared_secret_rejected() {
        assert_eq!(
            TokenKeys::new(ACCESS, ACCESS).unwrap_err(),
            JwtError::SecretsNotDistinct
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let keys = TokenKeys::new(ACCESS, REFRESH).unwrap();
        let printed = format!("{:?}", keys);
        assert!(!printed.contains("access_secret"));
        assert!(printed.contains("<redacted>"));
    }
}
