//! Command-line flags.
//!
//! Every flag is optional; when present it overrides the matching value from
//! the config file (or the built-in default when no file is given).

use std::path::PathBuf;

use clap::Parser;

use crate::config::ExporterConfig;

/// Serves synthetic node CPU/RAM/disk gauges for Prometheus scraping.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "nodegauge-exporter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// YAML config file
    #[arg(short, long, env = "NODEGAUGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// The address to listen on for HTTP requests (`host:port` or `:port`)
    #[arg(long, env = "NODEGAUGE_LISTEN")]
    pub listen_address: Option<String>,

    /// Path serving the metrics exposition
    #[arg(long)]
    pub metrics_path: Option<String>,

    /// The domain for the uniform distribution
    #[arg(long, alias = "uniform.domain")]
    pub uniform_domain: Option<f64>,

    /// Milliseconds between sampler updates
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Serve the gauges without updating them
    #[arg(long)]
    pub no_sampler: bool,
}

impl Cli {
    pub fn apply(&self, cfg: &mut ExporterConfig) {
        if let Some(listen) = &self.listen_address {
            cfg.exporter.listen = listen.clone();
        }
        if let Some(path) = &self.metrics_path {
            cfg.exporter.metrics_path = path.clone();
        }
        if let Some(domain) = self.uniform_domain {
            cfg.sampler.uniform_domain = domain;
        }
        if let Some(ms) = self.interval_ms {
            cfg.sampler.interval_ms = ms;
        }
        if self.no_sampler {
            cfg.sampler.enabled = false;
        }
    }
}
