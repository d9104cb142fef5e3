//! Subscription API entrypoint: load config and artifacts, then serve until Ctrl+C / SIGTERM.
//! Artifact problems stop the process before the listener is bound.

use subscription_api::{
    api::{build_router, AppState},
    artifacts::ServingContext,
    config::ServiceConfig,
    logging::StructuredLogger,
};
use tracing::info;

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = ServiceConfig::from_env()?;

    StructuredLogger::init(config.log.json, &config.log.level);

    info!(version = env!("CARGO_PKG_VERSION"), "subscription API starting");

    let context = match ServingContext::load(&config.artifacts, &config.encoding) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!(error = %e, "failed to load artifacts; refusing to start");
            return Err(e.into());
        }
    };

    let app = build_router(AppState::new(context));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "HTTP API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("subscription API stopped");
    Ok(())
}
