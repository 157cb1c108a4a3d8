use anyhow::Context;
use db::DBService;
use server::{AppState, config::Config, routes, templates::TemplateRegistry};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    utils::logging::init();

    let config = Config::from_env().context("reading configuration")?;
    info!(
        database_url = %config.redacted_database_url(),
        max_connections = config.max_connections,
        "Connecting to database"
    );
    let db = DBService::connect(&config.database_url, config.max_connections)
        .await
        .context("opening database")?;

    let templates = TemplateRegistry::standard().context("building templates")?;
    let shutdown = CancellationToken::new();
    let state = AppState::new(db, templates, shutdown.clone());
    let app = routes::router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Server running on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("serving http")?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM and cancels in-flight queries.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    info!("Shutdown signal received");
    shutdown.cancel();
}
