//! API server entry point.

use api::Config;
use axum::Router;
use sheet_store::PostgresSheetSource;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

async fn serve(app: Router, addr: String) {
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}

#[tokio::main]
async fn main() {
    // 1. Initialize tracing, then load configuration so bad settings get logged
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(log_level = %config.log_level, sheet = %config.sheet_name, "configuration loaded");

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Pick the backing table source and build the application
    let app = match config.database_url.as_deref() {
        Some(url) => {
            let source = PostgresSheetSource::connect(url)
                .await
                .expect("failed to connect to database");
            source
                .run_migrations()
                .await
                .expect("failed to run migrations");
            tracing::info!(sheet = %config.sheet_name, "serving PostgreSQL sheet");
            api::create_app(api::create_state(source, &config), metrics_handle)
        }
        None => {
            let source = api::demo::demo_source(&config.sheet_name).await;
            tracing::warn!(sheet = %config.sheet_name, "DATABASE_URL not set, serving demo sheet");
            api::create_app(api::create_state(source, &config), metrics_handle)
        }
    };

    // 4. Start server
    serve(app, config.addr()).await;
}
