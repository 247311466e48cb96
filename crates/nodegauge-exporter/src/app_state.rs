//! Shared application state for the exporter.
//!
//! Built once at startup: the registry is constructed here, the configured
//! gauges are registered, and the resulting handles are kept for the
//! sampler. Cloning is cheap (one `Arc`).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use nodegauge_core::error::Result;
use nodegauge_core::MetricRegistry;

use crate::config::ExporterConfig;
use crate::sampler::LoadTarget;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    registry: Arc<MetricRegistry>,
    load_targets: Vec<LoadTarget>,
    draining: AtomicBool,
}

impl AppState {
    /// Build state and register the configured gauges.
    /// A duplicate or invalid gauge name fails startup.
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        let registry = Arc::new(MetricRegistry::new());

        let mut load_targets = Vec::new();
        for spec in cfg.gauge_specs() {
            let gauge = registry.register(&spec.name, &spec.help)?;
            load_targets.push(LoadTarget {
                gauge,
                offset: spec.offset,
            });
        }
        tracing::info!(gauges = registry.len(), "metric registry ready");

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                load_targets,
                draining: AtomicBool::new(false),
            }),
        })
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<MetricRegistry> {
        Arc::clone(&self.inner.registry)
    }

    pub fn load_targets(&self) -> &[LoadTarget] {
        &self.inner.load_targets
    }

    /// Mark draining state (readiness turns 503).
    pub fn set_draining(&self) {
        self.inner.draining.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.inner.draining.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_from_str, GaugeSpec};

    #[test]
    fn default_config_registers_node_gauges() {
        let state = AppState::new(ExporterConfig::default()).unwrap();
        let names: Vec<_> = state
            .registry()
            .snapshot()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["cpu_total", "ram_total", "disk_total"]);
        let offsets: Vec<_> = state.load_targets().iter().map(|t| t.offset).collect();
        assert_eq!(offsets, [0.0, 5.0, 10.0]);
    }

    #[test]
    fn duplicate_gauge_fails_startup() {
        let mut cfg = ExporterConfig::default();
        cfg.gauges = vec![
            GaugeSpec { name: "temp".into(), help: String::new(), offset: 0.0 },
            GaugeSpec { name: "temp".into(), help: String::new(), offset: 1.0 },
        ];
        let err = AppState::new(cfg).err().unwrap();
        assert_eq!(err.kind().as_str(), "DUPLICATE_NAME");
    }

    #[test]
    fn custom_gauges_from_yaml() {
        let cfg = load_from_str(
            r#"
version: 1
gauges:
  - name: gpu_total
    help: "Current gpu used capacity of node."
    offset: 2.5
"#,
        )
        .unwrap();
        let state = AppState::new(cfg).unwrap();
        assert_eq!(state.registry().len(), 1);
        assert_eq!(state.load_targets()[0].gauge.name(), "gpu_total");
        assert!(!state.is_draining());
        state.set_draining();
        assert!(state.is_draining());
    }
}
