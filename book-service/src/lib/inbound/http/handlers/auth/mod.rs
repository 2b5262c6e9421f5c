pub mod login;
pub mod refresh;
pub mod register;

use ::auth::TokenPair;
pub use login::login;
pub use refresh::refresh;
pub use register::register;
use serde::Serialize;

use super::UserData;
use crate::user::models::AuthSession;

/// Body returned by register, login and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponseData {
    pub user: UserData,
    pub tokens: TokenPair,
}

impl From<&AuthSession> for AuthResponseData {
    fn from(session: &AuthSession) -> Self {
        Self {
            user: (&session.user).into(),
            tokens: session.tokens.clone(),
        }
    }
}
