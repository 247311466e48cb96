use nodegauge_core::GaugeHandle;

/// A gauge driven by the synthetic load, shifted by a fixed offset.
#[derive(Debug, Clone)]
pub struct LoadTarget {
    pub gauge: GaugeHandle,
    pub offset: f64,
}

/// Fake node load: one uniform draw per cycle, fanned out to every target
/// as `base + offset`.
pub struct SyntheticLoad {
    uniform_domain: f64,
    targets: Vec<LoadTarget>,
}

impl SyntheticLoad {
    pub fn new(uniform_domain: f64, targets: Vec<LoadTarget>) -> Self {
        Self {
            uniform_domain,
            targets,
        }
    }

    /// `uniform[0,1) * domain * 100`, i.e. a percentage in `[0, domain*100)`.
    pub fn draw(&self) -> f64 {
        rand::random::<f64>() * self.uniform_domain * 100.0
    }

    pub fn apply(&self, base: f64) {
        for t in &self.targets {
            let value = base + t.offset;
            t.gauge.set(value);
            tracing::debug!(metric = t.gauge.name(), value, "synthetic sample");
        }
    }

    pub fn tick(&self) {
        self.apply(self.draw());
    }
}
