//! Exposition server lifecycle: bind, serve, drain.
//!
//! Binding is split from serving so startup can fail fast (and report the
//! real port when bound to `:0`) before any background work starts.

use std::net::SocketAddr;

use nodegauge_core::error::{NodeGaugeError, Result};
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::{app_state::AppState, router};

pub struct ExpositionServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    state: AppState,
}

impl ExpositionServer {
    /// Bind the listening socket on `host:port`; hostnames are resolved
    /// here. Fails with `Bind` if the name does not resolve or the address is
    /// taken or not available on this host.
    pub async fn bind(addr: &str, state: AppState) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| NodeGaugeError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| NodeGaugeError::Internal(format!("local_addr failed: {e}")))?;

        Ok(Self {
            listener,
            local_addr,
            state,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve scrapes until `shutdown` turns true (or its sender is dropped),
    /// then finish in-flight requests and return.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let app = router::build_router(self.state.clone());
        let state = self.state;

        tracing::info!(
            address = %self.local_addr,
            path = %state.cfg().exporter.metrics_path,
            "exposition server listening"
        );

        axum::serve(self.listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.wait_for(|stop| *stop).await;
                state.set_draining();
                tracing::info!("exposition server draining");
            })
            .await
            .map_err(|e| NodeGaugeError::Internal(format!("server failed: {e}")))
    }
}
