use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::AuthResponseData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    body: Result<Json<RefreshRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let Json(body) = body?;

    if body.refresh_token.is_empty() {
        return Err(ApiError::BadRequest("refresh_token is required".to_string()));
    }

    state
        .user_service
        .refresh(&body.refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequestBody {
    #[serde(default)]
    refresh_token: String,
}
