use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::book::errors::BookError;
use crate::book::models::BookId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_book(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let book_id = BookId::from_string(&id).map_err(BookError::from)?;

    state
        .book_service
        .delete_book(&caller.user_id, &book_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
