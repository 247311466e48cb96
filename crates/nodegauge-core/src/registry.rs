//! Gauge registry.
//!
//! The registry owns every gauge cell. Callers get a [`GaugeHandle`] at
//! registration time and update values through it; they never see the
//! registry's internal storage.
//!
//! Values are stored as the IEEE-754 bits of an `f64` inside an `AtomicU64`,
//! so a read always observes one complete write. The registration list sits
//! behind a `RwLock` that is only taken to register, look up or snapshot; a
//! value update never touches it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use dashmap::DashMap;

use crate::error::{NodeGaugeError, Result};
use crate::exposition;

struct GaugeCell {
    name: String,
    help: String,
    bits: AtomicU64,
}

impl GaugeCell {
    fn load(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }
}

/// Shared reference to one registered gauge.
#[derive(Clone)]
pub struct GaugeHandle {
    cell: Arc<GaugeCell>,
}

impl GaugeHandle {
    pub fn name(&self) -> &str {
        &self.cell.name
    }

    pub fn help(&self) -> &str {
        &self.cell.help
    }

    /// Overwrite the current value (last write wins).
    pub fn set(&self, value: f64) {
        self.cell.bits.store(value.to_bits(), Ordering::Release);
    }

    pub fn get(&self) -> f64 {
        self.cell.load()
    }

    /// Atomically add `delta` to the current value.
    pub fn add(&self, delta: f64) {
        // The closure always returns Some, so fetch_update cannot fail.
        let _ = self
            .cell
            .bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                Some((f64::from_bits(bits) + delta).to_bits())
            });
    }

    pub fn sub(&self, delta: f64) {
        self.add(-delta);
    }

    pub fn inc(&self) {
        self.add(1.0);
    }

    pub fn dec(&self) {
        self.add(-1.0);
    }
}

impl std::fmt::Debug for GaugeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GaugeHandle")
            .field("name", &self.cell.name)
            .field("value", &self.get())
            .finish()
    }
}

/// Owned point-in-time reading of one gauge.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeSample {
    pub name: String,
    pub help: String,
    pub value: f64,
}

/// Name -> gauge mapping, rendered in registration order.
#[derive(Default)]
pub struct MetricRegistry {
    gauges: RwLock<Vec<Arc<GaugeCell>>>,
    index: DashMap<String, usize>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new gauge with initial value 0.
    ///
    /// Fails with `DuplicateName` if the name is taken and with `InvalidName`
    /// if it is not a valid metric name. The registry is unchanged on error.
    pub fn register(&self, name: &str, help: &str) -> Result<GaugeHandle> {
        if !is_valid_metric_name(name) {
            return Err(NodeGaugeError::InvalidName(name.to_string()));
        }

        let mut gauges = self.gauges.write().unwrap_or_else(PoisonError::into_inner);
        if self.index.contains_key(name) {
            return Err(NodeGaugeError::DuplicateName(name.to_string()));
        }

        let cell = Arc::new(GaugeCell {
            name: name.to_string(),
            help: help.to_string(),
            bits: AtomicU64::new(0f64.to_bits()),
        });
        self.index.insert(name.to_string(), gauges.len());
        gauges.push(Arc::clone(&cell));

        tracing::debug!(metric = %name, "gauge registered");
        Ok(GaugeHandle { cell })
    }

    /// Look up a previously registered gauge.
    pub fn get(&self, name: &str) -> Option<GaugeHandle> {
        let idx = *self.index.get(name)?;
        let gauges = self.gauges.read().unwrap_or_else(PoisonError::into_inner);
        gauges.get(idx).map(|cell| GaugeHandle {
            cell: Arc::clone(cell),
        })
    }

    pub fn len(&self) -> usize {
        self.gauges.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read every gauge once, in registration order.
    ///
    /// Each value is read independently; there is no cross-gauge snapshot.
    pub fn snapshot(&self) -> Vec<GaugeSample> {
        let gauges = self.gauges.read().unwrap_or_else(PoisonError::into_inner);
        gauges
            .iter()
            .map(|c| GaugeSample {
                name: c.name.clone(),
                help: c.help.clone(),
                value: c.load(),
            })
            .collect()
    }

    /// Render all gauges in the text exposition format.
    pub fn render(&self) -> String {
        let gauges = self.gauges.read().unwrap_or_else(PoisonError::into_inner);
        let mut out = String::with_capacity(gauges.len() * 96);
        for c in gauges.iter() {
            exposition::write_gauge(&mut out, &c.name, &c.help, c.load());
        }
        out
    }
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
pub fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_gauge_starts_at_zero() {
        let reg = MetricRegistry::new();
        let g = reg.register("cpu_total", "cpu").unwrap();
        assert_eq!(g.get(), 0.0);
        assert!(reg.render().contains("\ncpu_total 0\n"));
    }

    #[test]
    fn duplicate_leaves_registry_unchanged() {
        let reg = MetricRegistry::new();
        let first = reg.register("ram_total", "first").unwrap();
        first.set(7.0);
        let before = reg.render();

        let err = reg.register("ram_total", "second").unwrap_err();
        assert_eq!(err.kind().as_str(), "DUPLICATE_NAME");
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.render(), before);
        assert_eq!(reg.get("ram_total").unwrap().help(), "first");
    }

    #[test]
    fn invalid_names_rejected() {
        let reg = MetricRegistry::new();
        for bad in ["", "1cpu", "cpu-total", "cpu total", "cpü"] {
            let err = reg.register(bad, "").unwrap_err();
            assert_eq!(err.kind().as_str(), "INVALID_NAME", "name {bad:?}");
        }
        assert!(reg.is_empty());
        assert!(is_valid_metric_name("node:cpu_total"));
        assert!(is_valid_metric_name("_x9"));
    }

    #[test]
    fn lookup_returns_same_cell() {
        let reg = MetricRegistry::new();
        let g = reg.register("disk_total", "disk").unwrap();
        reg.get("disk_total").unwrap().set(20.0);
        assert_eq!(g.get(), 20.0);
        assert!(reg.get("missing").is_none());
    }

    #[test]
    fn add_sub_inc_dec() {
        let reg = MetricRegistry::new();
        let g = reg.register("load", "").unwrap();
        g.set(1.5);
        g.add(2.0);
        g.inc();
        g.sub(0.5);
        g.dec();
        assert_eq!(g.get(), 3.0);
    }

    #[test]
    fn snapshot_follows_registration_order() {
        let reg = MetricRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            reg.register(name, "").unwrap();
        }
        let names: Vec<_> = reg.snapshot().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn render_matches_render_samples() {
        let reg = MetricRegistry::new();
        reg.register("a", "help a").unwrap().set(1.25);
        reg.register("b", "help\nb").unwrap().set(-2.0);
        assert_eq!(reg.render(), exposition::render_samples(&reg.snapshot()));
    }
}
