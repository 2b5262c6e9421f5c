use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::BookDetailData;
use super::BookRequestBody;
use crate::book::errors::BookError;
use crate::book::models::BookId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Full replacement: every field is required, as on create.
pub async fn update_book(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
    body: Result<Json<BookRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<BookDetailData>, ApiError> {
    let book_id = BookId::from_string(&id).map_err(BookError::from)?;
    let Json(body) = body?;

    state
        .book_service
        .update_book(&caller.user_id, &book_id, body.try_into_content()?)
        .await
        .map_err(ApiError::from)
        .map(|ref details| ApiSuccess::new(StatusCode::OK, details.into()))
}
