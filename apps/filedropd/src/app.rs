//! Application orchestrator — wires storage, the upload core, the
//! subscriber fan-out, and the HTTP server together.

use std::sync::Arc;

use filedrop_server::{AppServer, AppState, ServerConfig};
use filedrop_store::LocalStorage;

use crate::config::Config;

/// Runs the daemon until shutdown is requested.
pub async fn run(config: Config) -> anyhow::Result<()> {
    // -- Storage --
    let storage = Arc::new(LocalStorage::new(&config.storage_dir).await?);

    // -- State + server --
    let state = AppState::new(storage, config.limits());
    let server = AppServer::new(ServerConfig { port: config.port }, state);

    let server_run = Arc::clone(&server);
    tokio::spawn(async move {
        if let Err(e) = server_run.run().await {
            tracing::error!("server error: {e}");
        }
    });

    // Wait for the server to bind.
    let port = loop {
        let p = server.port().await;
        if p > 0 {
            break p;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    };

    tracing::info!(port, "filedrop ready");

    // -- Main loop: wait for shutdown --
    tokio::signal::ctrl_c().await?;
    tracing::info!("SIGINT received, shutting down");

    server.shutdown();
    Ok(())
}
