use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;
use super::keys::TokenKeys;
use super::kind::TokenKind;

/// Validates presented tokens.
///
/// The expected kind is always supplied by the caller and selects the
/// verification key; it is never inferred from the token.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    keys: Arc<TokenKeys>,
}

impl TokenVerifier {
    pub fn new(keys: Arc<TokenKeys>) -> Self {
        Self { keys }
    }

    /// Verify `token` as a `kind` token and return its claims.
    ///
    /// # Errors
    /// * `InvalidSignature` - MAC mismatch (tampering, or a token of the other kind)
    /// * `Malformed` - Not a JWT, unexpected algorithm, or missing/mistyped claims
    /// * `Expired` - Current time is at or past `exp`
    /// * `KindMismatch` - Signature is valid but the embedded kind differs
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<Claims, JwtError> {
        self.verify_at(token, kind, Utc::now())
    }

    /// Verify `token` as if the current time were `now`.
    pub fn verify_at(
        &self,
        token: &str,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against the supplied clock, with no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, self.keys.decoding_key(kind), &validation)?.claims;

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::Expired);
        }

        if claims.kind != kind {
            return Err(JwtError::KindMismatch {
                expected: kind,
                actual: claims.kind,
            });
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use jsonwebtoken::encode;
    use jsonwebtoken::EncodingKey;
    use jsonwebtoken::Header;

    use super::*;
    use crate::jwt::issuer::TokenIssuer;
    use crate::jwt::issuer::TokenLifetimes;

    const ACCESS_SECRET: &[u8] = b"access_secret_key_at_least_32_bytes!";
    const REFRESH_SECRET: &[u8] = b"refresh_secret_key_at_least_32_bytes";

    fn setup() -> (TokenIssuer, TokenVerifier) {
        let keys = Arc::new(TokenKeys::new(ACCESS_SECRET, REFRESH_SECRET).unwrap());
        (
            TokenIssuer::new(keys.clone(), TokenLifetimes::default()),
            TokenVerifier::new(keys),
        )
    }

    fn flip_signature_char(token: &str) -> String {
        let signature_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.as_bytes().to_vec();
        let index = signature_start + 10;
        bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_issue_and_verify_access() {
        let (issuer, verifier) = setup();
        let token = issuer.issue("user123", TokenKind::Access).unwrap();

        let claims = verifier.verify(&token, TokenKind::Access).unwrap();
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[test]
    fn test_issue_and_verify_refresh() {
        let (issuer, verifier) = setup();
        let token = issuer.issue("user123", TokenKind::Refresh).unwrap();

        let claims = verifier.verify(&token, TokenKind::Refresh).unwrap();
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        let (issuer, verifier) = setup();
        let token = issuer.issue("user123", TokenKind::Access).unwrap();

        assert_eq!(
            verifier.verify(&token, TokenKind::Refresh),
            Err(JwtError::InvalidSignature)
        );
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let (issuer, verifier) = setup();
        let token = issuer.issue("user123", TokenKind::Refresh).unwrap();

        assert_eq!(
            verifier.verify(&token, TokenKind::Access),
            Err(JwtError::InvalidSignature)
        );
    }

    #[test]
    fn test_expired_token() {
        let (issuer, verifier) = setup();
        let issued_at = Utc::now() - Duration::hours(2);
        let token = issuer
            .issue_at("user123", TokenKind::Access, issued_at)
            .unwrap();

        assert_eq!(
            verifier.verify(&token, TokenKind::Access),
            Err(JwtError::Expired)
        );
    }

    #[test]
    fn test_token_expires_exactly_at_exp() {
        let (issuer, verifier) = setup();
        let issued_at = Utc::now();
        let token = issuer
            .issue_at("user123", TokenKind::Access, issued_at)
            .unwrap();

        let just_before = issued_at + Duration::hours(1) - Duration::seconds(1);
        assert!(verifier
            .verify_at(&token, TokenKind::Access, just_before)
            .is_ok());

        let at_expiry = issued_at + Duration::hours(1);
        assert_eq!(
            verifier.verify_at(&token, TokenKind::Access, at_expiry),
            Err(JwtError::Expired)
        );
    }

    #[test]
    fn test_flipped_signature() {
        let (issuer, verifier) = setup();
        let token = issuer.issue("user123", TokenKind::Access).unwrap();
        let tampered = flip_signature_char(&token);

        assert_ne!(token, tampered);
        assert_eq!(
            verifier.verify(&tampered, TokenKind::Access),
            Err(JwtError::InvalidSignature)
        );
    }

    #[test]
    fn test_token_signed_with_foreign_secret() {
        let (_, verifier) = setup();
        let claims =
            Claims::new("user123", TokenKind::Access, Utc::now(), Duration::hours(1)).unwrap();
        let forged = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"attacker_secret_key_at_least_32_b"),
        )
        .unwrap();

        assert_eq!(
            verifier.verify(&forged, TokenKind::Access),
            Err(JwtError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let (_, verifier) = setup();

        for token in ["", "not-a-jwt", "a.b.c", "invalid.token.here"] {
            assert!(
                matches!(
                    verifier.verify(token, TokenKind::Access),
                    Err(JwtError::Malformed(_))
                ),
                "expected malformed for {:?}",
                token
            );
        }
    }

    #[test]
    fn test_validly_signed_payload_without_required_claims_is_malformed() {
        let (_, verifier) = setup();
        let payload = serde_json::json!({
            "sub": "user123",
            "exp": (Utc::now() + Duration::hours(1)).timestamp(),
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(ACCESS_SECRET),
        )
        .unwrap();

        assert!(matches!(
            verifier.verify(&token, TokenKind::Access),
            Err(JwtError::Malformed(_))
        ));
    }

    #[test]
    fn test_other_algorithm_is_malformed() {
        let (_, verifier) = setup();
        let claims =
            Claims::new("user123", TokenKind::Access, Utc::now(), Duration::hours(1)).unwrap();
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(ACCESS_SECRET),
        )
        .unwrap();

        assert!(matches!(
            verifier.verify(&token, TokenKind::Access),
            Err(JwtError::Malformed(_))
        ));
    }

    #[test]
    fn test_embedded_kind_must_match() {
        let (_, verifier) = setup();
        // Correctly signed with the access secret but claiming to be a refresh token.
        let claims =
            Claims::new("user123", TokenKind::Refresh, Utc::now(), Duration::hours(1)).unwrap();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(ACCESS_SECRET),
        )
        .unwrap();

        assert_eq!(
            verifier.verify(&token, TokenKind::Access),
            Err(JwtError::KindMismatch {
                expected: TokenKind::Access,
                actual: TokenKind::Refresh,
            })
        );
    }
}
