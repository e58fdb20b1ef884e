//! Local HTTP server exposing an initialized map for preview.

mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use geotree_core::MarkerCollection;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;

use crate::error::MapError;
use crate::snapshot::MapSnapshot;

/// What the preview server hands out.
#[derive(Debug, Clone)]
pub struct PreviewContent {
    pub snapshot: MapSnapshot,
    pub markers: Option<MarkerCollection>,
}

pub struct PreviewServer {
    runtime: Runtime,
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl PreviewServer {
    /// Bind `addr` and start serving on a runtime owned by the server.
    /// Port 0 picks a free port; see [`PreviewServer::local_addr`].
    pub fn start(addr: SocketAddr, content: PreviewContent) -> Result<Self, MapError> {
        let runtime = Runtime::new()?;
        let listener = runtime.block_on(tokio::net::TcpListener::bind(addr))?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let app = routes::create_router(Arc::new(content));

        runtime.spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;

            if let Err(err) = served {
                tracing::error!(%err, "Preview server stopped");
            }
        });

        tracing::info!(%addr, "Preview server listening");

        Ok(Self {
            runtime,
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Block the calling thread until Ctrl-C.
    pub fn wait_for_ctrl_c(&self) -> Result<(), MapError> {
        self.runtime.block_on(tokio::signal::ctrl_c())?;
        Ok(())
    }
}

impl Drop for PreviewServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
