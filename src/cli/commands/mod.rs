pub mod ask;
pub mod config;
pub mod db;
pub mod metrics;
