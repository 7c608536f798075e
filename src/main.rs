//! MentorHub server - application entry point.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mentorhub::adapters::auth::JwtSessionValidator;
use mentorhub::adapters::http::{api_router, ApiSettings, Repositories};
use mentorhub::adapters::memory::InMemoryStore;
use mentorhub::adapters::postgres::{
    run_migrations, PostgresAttendanceRepository, PostgresGroupRepository,
    PostgresSessionRepository, PostgresUserRepository,
};
use mentorhub::application::handlers::FeedSettings;
use mentorhub::config::{AppConfig, CalendarConfig, DatabaseConfig, ServerConfig};
use mentorhub::ports::SessionValidator;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        memory_store = config.database.is_memory(),
        "Starting MentorHub server"
    );

    let repos = connect_repositories(&config.database).await?;
    let validator: Arc<dyn SessionValidator> = Arc::new(JwtSessionValidator::new(
        &config.auth.jwt_secret,
        &config.auth.jwt_issuer,
        config.auth.jwt_audience.as_deref(),
    ));
    let settings = ApiSettings {
        session_cookie: config.auth.session_cookie.clone(),
        feed: feed_settings(&config.calendar),
    };

    let app = with_http_layers(api_router(repos, validator, settings), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("MentorHub server stopped");
    Ok(())
}

/// JSON lines in production, human-readable output elsewhere. `RUST_LOG`
/// overrides the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(server.log_level.as_str()));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn connect_repositories(database: &DatabaseConfig) -> Result<Repositories, BoxError> {
    if database.is_memory() {
        tracing::warn!("Using in-memory store; data is lost on restart");
        return Ok(Repositories::from_store(Arc::new(InMemoryStore::new())));
    }

    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .idle_timeout(database.idle_timeout())
        .connect(&database.url)
        .await?;

    if database.run_migrations {
        run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(Repositories {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        groups: Arc::new(PostgresGroupRepository::new(pool.clone())),
        sessions: Arc::new(PostgresSessionRepository::new(pool.clone())),
        attendances: Arc::new(PostgresAttendanceRepository::new(pool)),
    })
}

fn feed_settings(calendar: &CalendarConfig) -> FeedSettings {
    FeedSettings {
        product_id: calendar.product_id.clone(),
        calendar_name: calendar.calendar_name.clone(),
        dashboard_url: calendar.dashboard_url.clone(),
        default_event_minutes: calendar.default_event_minutes,
    }
}

fn with_http_layers(router: Router, server: &ServerConfig) -> Router {
    router
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_secs,
        )))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Configured origins when given; permissive in development; closed otherwise.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    if !origins.is_empty() {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    } else if server.is_production() {
        CorsLayer::new()
    } else {
        CorsLayer::permissive()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
