use std::sync::Arc;

use book_service::config::Config;
use book_service::domain::book::service::BookService;
use book_service::domain::user::service::UserService;
use book_service::inbound::http::router::create_router;
use book_service::outbound::repositories::PostgresBookRepository;
use book_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // A missing .env is not an error.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "book-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    tracing::info!(
        database = ?config.database,
        http_port = config.server.http_port,
        jwt = ?config.jwt,
        "Configuration loaded"
    );

    // Refuse to start with missing, weak or shared signing secrets.
    let authenticator = Arc::new(config.authenticator().map_err(|e| {
        tracing::error!(error = %e, "Invalid authentication configuration");
        e
    })?);

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let book_repository = Arc::new(PostgresBookRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repository),
        Arc::clone(&authenticator),
    ));
    let book_service = Arc::new(BookService::new(book_repository, user_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, book_service, authenticator);
    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
