//! ChurnGuard - Telecom Churn KPIs and Retention Analyst
//!
//! Surfaces customer-churn KPIs from an analytics mart and answers free-text
//! questions about them. Every call produces a result: storage failures fall
//! back to fixed dashboard figures and completion failures fall back to a
//! keyword-routed local analyst.
//!
//! ## Quick Start
//!
//! ```ignore
//! use churnguard::{ConfigLoader, RetentionAssistant};
//!
//! let config = ConfigLoader::load()?;
//! let assistant = RetentionAssistant::from_config(&config)?;
//! let kpis = assistant.get_kpis();
//! let text = assistant.answer("Why is churn happening?").await;
//! ```
//!
//! ## Modules
//!
//! - [`storage`]: SQLite pool, schema and the cached metrics store
//! - [`analytics`]: KPI derivation
//! - [`ai`]: prompt builder, completion providers, answer engine
//! - [`config`]: layered configuration
//! - [`service`]: the `RetentionAssistant` facade

pub mod ai;
pub mod analytics;
pub mod cli;
pub mod config;
pub mod constants;
pub mod service;
pub mod storage;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{ChurnError, ErrorCategory, Result, ResultExt};

// Data Types
pub use types::{
    ChannelRevenue, ChurnReason, DerivedMetrics, KpiSnapshot, RegionRecord, SegmentRecord,
};

// Storage
pub use storage::{Database, MetricsStore, PoolConfig, SharedDatabase};

// Pipeline
pub use analytics::derive_metrics;
pub use service::RetentionAssistant;

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{
    Answer, AnswerSource, LlmProvider, LlmResponse, ResponseEngine, SharedProvider, Topic,
    build_prompt, suggested_questions, with_timeout,
};
