//! Top-level facade crate for nodegauge.
//!
//! Re-exports the registry core and the exporter library so users can depend on a single crate.

pub mod core {
    pub use nodegauge_core::*;
}

pub mod exporter {
    pub use nodegauge_exporter::*;
}
