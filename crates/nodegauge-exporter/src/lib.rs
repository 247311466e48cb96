//! nodegauge exporter library entry.
//!
//! Wires configuration, the shared metric registry, the scrape endpoint, and
//! the synthetic load sampler into one process. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod cli;
pub mod config;
pub mod ops;
pub mod router;
pub mod sampler;
pub mod server;
