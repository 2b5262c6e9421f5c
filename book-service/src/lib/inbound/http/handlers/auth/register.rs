use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::AuthResponseData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::PersonNameError;
use crate::user::errors::UsernameError;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::CREATED, session.into()))
}

/// HTTP request body for registration (raw JSON).
///
/// Absent fields deserialize as empty and fail validation, so a missing
/// field is a 400 like any other invalid input.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid name: {0}")]
    Name(#[from] PersonNameError),

    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseRegisterRequestError> {
        let first_name = PersonName::new(self.first_name, "first_name")?;
        let last_name = PersonName::new(self.last_name, "last_name")?;
        let username = Username::new(self.username.trim().to_string())?;
        let email = EmailAddress::new(self.email.trim().to_string())?;
        let password = Password::new(self.password)?;
        Ok(RegisterUserCommand::new(
            first_name, last_name, username, email, password,
        ))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
