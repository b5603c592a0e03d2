use std::sync::Arc;

use anyhow::Context;
use workshop_api::{app, telemetry, AppState};
use workshop_core::{emit, Severity};
use workshop_store::app_config::{Config, LoggingConfig};
use workshop_store::StubProductRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            // Nothing configured yet, so report through the default stderr sinks.
            if let Err(init_err) = telemetry::init(&LoggingConfig::default()) {
                eprintln!("{}; configuration error: {}", init_err, err);
            }
            emit!(Severity::Fatal, error = %err, "Failed to initialize log configuration");
            return Err(err.into());
        }
    };

    telemetry::init(&config.logging)?;
    tracing::info!(
        app = %config.logging.app_name,
        level = %config.logging.level,
        "Starting product service on port {}",
        config.server.port
    );

    let products = StubProductRepository::from_config(&config.catalog);
    let state = AppState::new(Arc::new(products), &config.logging.app_name);
    let app = app(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
