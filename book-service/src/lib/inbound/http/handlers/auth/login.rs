use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::AuthResponseData;
use crate::domain::user::models::LoginCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let Json(body) = body?;

    if body.username.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::BadRequest(
            "username and password are required".to_string(),
        ));
    }

    state
        .user_service
        .login(LoginCommand::new(body.username, body.password))
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// `username` may also carry an email address.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    #[serde(default, alias = "email")]
    username: String,
    #[serde(default)]
    password: String,
}
