//! Exporter config loader (strict parsing, CLI overrides applied last).

pub mod schema;

use std::fs;
use std::path::Path;

use nodegauge_core::error::{NodeGaugeError, Result};

use crate::cli::Cli;

pub use schema::{parse_listen, ExporterConfig, ExporterSection, GaugeSpec, SamplerSection};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<ExporterConfig> {
    let cfg = parse_file(path)?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    let cfg = parse_from_str(s)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Strict deserialization only; values are not validated.
pub fn parse_from_str(s: &str) -> Result<ExporterConfig> {
    serde_yaml::from_str(s).map_err(|e| NodeGaugeError::InvalidConfig(format!("invalid yaml: {e}")))
}

fn parse_file(path: impl AsRef<Path>) -> Result<ExporterConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        NodeGaugeError::Internal(format!("read config {} failed: {e}", path.display()))
    })?;
    parse_from_str(&s)
}

/// Resolve the effective config: file (or defaults), then CLI flags, then a
/// single validation of the merged result.
pub fn load(cli: &Cli) -> Result<ExporterConfig> {
    let mut cfg = match &cli.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config file");
            parse_file(path)?
        }
        None => ExporterConfig::default(),
    };
    cli.apply(&mut cfg);
    cfg.validate()?;
    Ok(cfg)
}
