use std::fmt;
use std::str::FromStr;

use auth::CredentialHash;
use auth::TokenPair;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::PersonNameError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Represents a registered identity. `password_hash` is never serialized
/// into any response.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: CredentialHash,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// First or last name of a person.
///
/// Surrounding whitespace is trimmed; the remainder must be 1-100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 100;

    /// Validate a name. `field` names the input in error messages.
    pub fn new(value: String, field: &'static str) -> Result<Self, PersonNameError> {
        let trimmed = value.trim();
        let length = trimmed.chars().count();

        if length == 0 {
            return Err(PersonNameError::Empty { field });
        }
        if length > Self::MAX_LENGTH {
            return Err(PersonNameError::TooLong {
                field,
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext password as submitted at registration.
///
/// Lives only long enough to be hashed. `Debug` never prints the value.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    const MAX_LENGTH: usize = 128;

    /// # Errors
    /// * `Empty` - Password is the empty string
    /// * `TooLong` - Password longer than 128 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }
        if password.chars().count() > Self::MAX_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterUserCommand {
    /// Construct a new register command.
    ///
    /// The password is hashed by the service, never stored as given.
    pub fn new(
        first_name: PersonName,
        last_name: PersonName,
        username: Username,
        email: EmailAddress,
        password: Password,
    ) -> Self {
        Self {
            first_name,
            last_name,
            username,
            email,
            password,
        }
    }
}

/// How a login attempt names the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentifier {
    Username(Username),
    Email(EmailAddress),
}

impl LoginIdentifier {
    /// Interpret a raw identifier: anything containing `@` is an email.
    ///
    /// Returns `None` when the input is not a syntactically valid username
    /// or email; callers treat that exactly like an unknown account.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.contains('@') {
            EmailAddress::new(raw.to_string()).ok().map(Self::Email)
        } else {
            Username::new(raw.to_string()).ok().map(Self::Username)
        }
    }
}

/// Command to log in with an identifier and a plaintext password.
///
/// Deliberately unvalidated: validation failures must be indistinguishable
/// from wrong credentials.
pub struct LoginCommand {
    pub identifier: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(identifier: String, password: String) -> Self {
        Self {
            identifier,
            password,
        }
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("identifier", &self.identifier)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Outcome of register, login and refresh: the identity plus a fresh
/// token pair.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}
