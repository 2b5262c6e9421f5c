use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::BookDetailData;
use super::BookRequestBody;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_book(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    body: Result<Json<BookRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<BookDetailData>, ApiError> {
    let Json(body) = body?;

    state
        .book_service
        .create_book(&caller.user_id, body.try_into_content()?)
        .await
        .map_err(ApiError::from)
        .map(|ref details| ApiSuccess::new(StatusCode::CREATED, details.into()))
}
