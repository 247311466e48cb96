//! Background updater for the registered gauges.
//!
//! The updater is an ordinary client of the registry: it only holds
//! `GaugeHandle`s and runs inside a cancellable `PeriodicTask`.

pub mod periodic;
pub mod synthetic;

use std::time::Duration;

pub use periodic::PeriodicTask;
pub use synthetic::{LoadTarget, SyntheticLoad};

use crate::app_state::AppState;

/// Start the synthetic sampler, or return `None` when it is disabled.
pub fn spawn(state: &AppState) -> Option<PeriodicTask> {
    let cfg = &state.cfg().sampler;
    if !cfg.enabled {
        tracing::info!("sampler disabled; gauges stay at their last value");
        return None;
    }

    let load = SyntheticLoad::new(cfg.uniform_domain, state.load_targets().to_vec());
    Some(PeriodicTask::spawn(
        "synthetic-sampler",
        Duration::from_millis(cfg.interval_ms),
        move || load.tick(),
    ))
}
