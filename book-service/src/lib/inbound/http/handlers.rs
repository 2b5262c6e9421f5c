pub mod auth;
pub mod books;
pub mod users;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::book::errors::BookError;
use crate::user::errors::UserError;
use crate::user::models::User;

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const INVALID_TOKEN: &str = "Invalid or expired token";
const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    /// 401 for any unusable bearer or refresh token.
    pub fn invalid_token() -> Self {
        ApiError::Unauthorized(INVALID_TOKEN.to_string())
    }

    /// 500 with a generic message; `detail` goes to the log only.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Request failed on a dependency");
        ApiError::InternalServerError(INTERNAL_ERROR.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::internal(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUserId(_)
            | UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidName(_)
            | UserError::InvalidPassword(_) => ApiError::BadRequest(err.to_string()),
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::AuthenticationFailed => {
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            }
            UserError::InvalidToken => ApiError::invalid_token(),
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::internal(err),
        }
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::InvalidBookId(_)
            | BookError::InvalidField(_)
            | BookError::InvalidRating(_)
            | BookError::InvalidReadDate(_) => ApiError::BadRequest(err.to_string()),
            BookError::NotFound(_) => ApiError::NotFound("Book not found".to_string()),
            BookError::OwnerNotFound(_) => ApiError::invalid_token(),
            BookError::DatabaseError(_) | BookError::Unknown(_) => ApiError::internal(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public profile of an identity. Never includes the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name.as_str().to_string(),
            last_name: user.last_name.as_str().to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_failure_message_is_generic() {
        assert_eq!(
            ApiError::from(UserError::AuthenticationFailed),
            ApiError::Unauthorized("Invalid credentials".to_string())
        );
    }

    #[test]
    fn test_dependency_failure_hides_detail() {
        let err = ApiError::from(UserError::DatabaseError(
            "connection refused to 10.0.0.7".to_string(),
        ));
        assert_eq!(
            err,
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }

    #[test]
    fn test_book_errors_map_to_status() {
        assert!(matches!(
            ApiError::from(BookError::NotFound("x".to_string())),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(BookError::InvalidReadDate("x".to_string())),
            ApiError::BadRequest(_)
        ));
        assert_eq!(
            ApiError::from(BookError::OwnerNotFound("x".to_string())),
            ApiError::invalid_token()
        );
    }
}
