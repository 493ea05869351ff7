//! HTTP server with graceful shutdown.

use super::{router, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Web server wrapping the shared application state.
#[derive(Debug)]
pub struct WebServer {
    state: Arc<AppState>,
    addr: SocketAddr,
    cancel: CancellationToken,
}

impl WebServer {
    pub fn new(state: Arc<AppState>, addr: SocketAddr) -> Self {
        Self {
            state,
            addr,
            cancel: CancellationToken::new(),
        }
    }

    /// Run the server until cancelled or a fatal error occurs.
    pub async fn serve(&self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        tracing::info!(
            "Catalog server listening on http://{} (remote source: {})",
            listener.local_addr()?,
            self.state.catalog.is_remote(),
        );

        let cancel = self.cancel.clone();
        axum::serve(listener, router(self.state.clone()))
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
                tracing::info!("Catalog server shutting down");
            })
            .await
    }

    /// Request graceful shutdown.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}
