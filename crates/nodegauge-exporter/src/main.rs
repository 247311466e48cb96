//! nodegauge-exporter
//!
//! Serves synthetic node CPU/RAM/disk gauges on `/metrics` and refreshes them
//! from a background sampler until SIGINT/SIGTERM.

use std::process::ExitCode;

use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::{fmt, EnvFilter};

use nodegauge_core::error::Result;
use nodegauge_exporter::{app_state::AppState, cli::Cli, config, sampler, server::ExpositionServer};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => {
            tracing::info!("nodegauge-exporter stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(kind = e.kind().as_str(), error = %e, "nodegauge-exporter failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = config::load(&cli)?;
    let listen = cfg.exporter.listen_addr()?;

    let state = AppState::new(cfg)?;
    let server = ExpositionServer::bind(&listen, state.clone()).await?;
    let sampler = sampler::spawn(&state);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        wait_for_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let served = server.run(shutdown_rx).await;

    if let Some(task) = sampler {
        task.stop().await;
    }
    served
}

async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => tracing::info!("received SIGINT, shutting down"),
                    _ = sigterm.recv() => tracing::info!("received SIGTERM, shutting down"),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable; waiting for Ctrl-C only");
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("received SIGINT, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler failed");
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl-C, shutting down");
    }
}
