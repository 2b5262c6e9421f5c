pub mod claims;
pub mod errors;
pub mod issuer;
pub mod keys;
pub mod kind;
pub mod verifier;

pub use claims::Claims;
pub use errors::JwtError;
pub use issuer::TokenIssuer;
pub use issuer::TokenLifetimes;
pub use issuer::TokenPair;
pub use keys::TokenKeys;
pub use kind::TokenKind;
pub use verifier::TokenVerifier;
