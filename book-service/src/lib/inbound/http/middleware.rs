use auth::TokenKind;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Identity bound to a request by [`authenticate`].
///
/// Also usable as an extractor; outside the gate it rejects with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| {
                tracing::error!("AuthenticatedUser requested on a route without the auth gate");
                ApiError::invalid_token()
            })
    }
}

/// Middleware that validates access tokens and adds the caller's identity to
/// request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers()).ok_or_else(|| {
        tracing::warn!(reason = "missing_or_malformed_header", "Request rejected");
        ApiError::Unauthorized("Missing or malformed Authorization header".to_string())
    })?;

    let claims = state
        .authenticator
        .verify_token(token, TokenKind::Access)
        .map_err(|e| {
            tracing::warn!(reason = %e, "Access token rejected");
            ApiError::invalid_token()
        })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|_| {
        tracing::warn!(reason = "subject_not_a_user_id", "Access token rejected");
        ApiError::invalid_token()
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

/// Token from `Authorization: Bearer <token>`. The scheme is matched
/// case-insensitively; an empty token counts as absent.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
