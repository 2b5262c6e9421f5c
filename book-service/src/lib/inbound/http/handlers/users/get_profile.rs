use axum::extract::State;
use axum::http::StatusCode;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Profile of the caller identified by the access token.
pub async fn get_profile(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .get_user(&caller.user_id)
        .await
        .map_err(|e| match e {
            // A valid token for a deleted identity.
            UserError::NotFound(_) => ApiError::invalid_token(),
            other => ApiError::from(other),
        })
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
