use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth::login;
use super::handlers::auth::refresh;
use super::handlers::auth::register;
use super::handlers::books::create_book;
use super::handlers::books::delete_book;
use super::handlers::books::get_book;
use super::handlers::books::list_books;
use super::handlers::books::update_book;
use super::handlers::users::get_profile;
use super::middleware::authenticate as auth_middleware;
use crate::book::ports::BookServicePort;
use crate::user::ports::UserServicePort;

/// Shared handler state. Services are trait objects so any repository
/// implementation can sit behind them.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub book_service: Arc<dyn BookServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    book_service: Arc<dyn BookServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        user_service,
        book_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh));

    let protected_routes = Router::new()
        .route("/api/users/me", get(get_profile))
        .route("/api/books", post(create_book).get(list_books))
        .route(
            "/api/books/:book_id",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Never record request headers here; they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
