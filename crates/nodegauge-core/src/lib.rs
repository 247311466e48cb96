//! nodegauge core: gauge registry, text exposition, and error types.
//!
//! This crate holds the pull-based metrics model shared by the exporter and
//! its tests. It carries no transport or runtime dependencies; rendering is a
//! pure function over in-memory state.
//!
//! Panics, `unwrap`, and `expect` are compile-denied here. Fallible paths
//! surface as `NodeGaugeError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod exposition;
pub mod registry;

pub use error::{ErrorKind, NodeGaugeError, Result};
pub use registry::{GaugeHandle, GaugeSample, MetricRegistry};
