//! HTTP server lifecycle: bind, serve, shut down on Ctrl+C

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Bind `host:port`. `host` may be an IP literal or a resolvable name.
pub async fn bind(host: &str, port: u16) -> Result<TcpListener, ServerError> {
    TcpListener::bind((host, port))
        .await
        .map_err(|source| ServerError::Bind {
            addr: format!("{}:{}", host, port),
            source,
        })
}

/// Serve `app` on `host:port` until Ctrl+C
pub async fn start_server(host: &str, port: u16, app: Router) -> Result<(), ServerError> {
    let listener = bind(host, port).await?;
    tracing::info!("bagsdex API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutdown signal received");
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
