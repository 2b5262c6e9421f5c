use axum::extract::State;
use axum::http::StatusCode;

use super::BookSummaryData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_books(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
) -> Result<ApiSuccess<Vec<BookSummaryData>>, ApiError> {
    let books = state.book_service.list_books(&caller.user_id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        books.iter().map(BookSummaryData::from).collect(),
    ))
}
