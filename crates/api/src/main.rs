use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use agenda_core::rate_limit::RateLimits;
use agenda_voice::{RetellClient, RetellConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agenda_api::config::ServerConfig;
use agenda_api::router::build_app_router;
use agenda_api::state::AppState;

/// How often idle rate limit buckets are dropped.
const RATE_LIMIT_SWEEP_SECS: u64 = 300;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agenda_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = agenda_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    agenda_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    agenda_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Voice provider ---
    let retell_config = RetellConfig::from_env();
    tracing::info!(base_url = %retell_config.base_url, "Voice provider configured");
    let voice = Arc::new(RetellClient::new(retell_config));

    // --- Rate limits ---
    let rate_limits = Arc::new(RateLimits::new(&config.rate_limit));
    tracing::info!(
        enabled = config.rate_limit.enabled,
        core_per_min = config.rate_limit.core_per_min,
        "Rate limits configured",
    );

    let sweep_limits = Arc::clone(&rate_limits);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(RATE_LIMIT_SWEEP_SECS));
        loop {
            interval.tick().await;
            sweep_limits.retain_recent();
            tracing::trace!(
                tracked = sweep_limits.tracked_identifiers(),
                "Swept idle rate limit buckets"
            );
        }
    });

    // --- App state ---
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        rate_limits,
        voice,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(shutdown_timeout, pool.close()).await.is_err() {
        tracing::warn!("Timed out closing database connections");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
