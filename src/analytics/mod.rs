//! Metric derivation.

mod deriver;

pub use deriver::derive_metrics;
