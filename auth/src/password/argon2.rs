use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Salted one-way digest of a password, stored in PHC string format.
///
/// The PHC string embeds algorithm, cost parameters and salt, so a hash stays
/// verifiable after the hasher's parameters change. There is no way back to
/// the plaintext; [`PasswordHasher::verify`] is the only comparison.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialHash(String);

impl CredentialHash {
    /// Wrap a hash previously produced by [`PasswordHasher::hash`] and read
    /// back from storage.
    pub fn from_stored(hash: String) -> Self {
        Self(hash)
    }

    /// PHC string, for persistence only.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keeps hashes out of logs even when an entity holding one is debug-printed.
impl fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialHash(<redacted>)")
    }
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashingParams {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a new password hasher with Argon2's default cost.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Create a password hasher with explicit cost parameters.
    ///
    /// # Errors
    /// * `InvalidParams` - Parameters are outside Argon2's accepted ranges
    pub fn with_params(params: HashingParams) -> Result<Self, PasswordError> {
        let params = Params::new(
            params.memory_kib,
            params.iterations,
            params.parallelism,
            None,
        )
        .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password securely.
    ///
    /// Every call draws a fresh random salt, so hashing the same plaintext
    /// twice yields two different hashes that both verify.
    ///
    /// # Errors
    /// * `HashingFailed` - Salt generation or the Argon2 computation failed
    pub fn hash(&self, password: &str) -> Result<CredentialHash, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| CredentialHash(hash.to_string()))
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Salt and cost are taken from the stored hash. The final comparison is
    /// constant time. A mismatch is `Ok(false)`, not an error.
    ///
    /// # Errors
    /// * `MalformedHash` - The stored hash is not a valid PHC string
    pub fn verify(&self, password: &str, hash: &CredentialHash) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash.as_str())
            .map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
