use std::net::SocketAddr;
use std::sync::Arc;

use prmon_core::demo::DemoProvider;
use prmon_core::store::{
    BuildConfigStore, MemoryBuildConfigStore, MemoryUserConfigStore, UserConfigStore,
};
use prmon_core::{MonitorDashboard, ProviderRegistry};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prmon_api::config::ServerConfig;
use prmon_api::router::build_app_router;
use prmon_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prmon_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Providers ---
    let mut registry = ProviderRegistry::new();
    if config.demo_portlets {
        registry
            .register(Arc::new(DemoProvider))
            .expect("Failed to register demo portlets");
    }
    tracing::info!(providers = ?registry.provider_ids(), "Portlet providers registered");

    // --- Stores ---
    let (users, builds): (Arc<dyn UserConfigStore>, Arc<dyn BuildConfigStore>) =
        match std::env::var("DATABASE_URL") {
            Ok(database_url) => {
                let pool = prmon_db::create_pool(&database_url)
                    .await
                    .expect("Failed to connect to database");
                prmon_db::health_check(&pool)
                    .await
                    .expect("Database health check failed");
                prmon_db::run_migrations(&pool)
                    .await
                    .expect("Failed to run database migrations");
                tracing::info!("Database ready");
                (
                    Arc::new(prmon_db::PgUserConfigStore::new(pool.clone())),
                    Arc::new(prmon_db::PgBuildConfigStore::new(pool)),
                )
            }
            Err(_) => {
                tracing::warn!("DATABASE_URL not set, configurations are kept in memory only");
                (
                    Arc::new(MemoryUserConfigStore::new()),
                    Arc::new(MemoryBuildConfigStore::new()),
                )
            }
        };

    // --- App state ---
    let state = AppState {
        dashboard: Arc::new(MonitorDashboard::new(Arc::new(registry), users, builds)),
        config: Arc::new(config.clone()),
    };

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

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM.
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
