pub mod database;
pub mod metrics_store;

pub use database::{Database, PoolConfig, ScopedConnection, SharedDatabase};
pub use metrics_store::{MetricsStore, SharedMetricsStore};
