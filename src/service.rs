//! Retention Assistant
//!
//! Wires the metrics store, deriver, prompt builder and response engine
//! behind the three calls the presentation layer needs.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::ai::{Answer, ResponseEngine, build_prompt, suggested_questions};
use crate::analytics::derive_metrics;
use crate::config::Config;
use crate::storage::{Database, MetricsStore, PoolConfig, SharedMetricsStore};
use crate::types::{
    ChannelRevenue, ChurnReason, DerivedMetrics, KpiSnapshot, RegionRecord, Result, SegmentRecord,
};

/// Question-answering facade over live KPIs
pub struct RetentionAssistant {
    store: SharedMetricsStore,
    engine: ResponseEngine,
}

impl RetentionAssistant {
    pub fn new(store: SharedMetricsStore, engine: ResponseEngine) -> Self {
        Self { store, engine }
    }

    /// Build every component from configuration.
    ///
    /// Fails only on invalid configuration; an unreachable database or a
    /// missing API key degrade to fallbacks at query time.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let db = Database::open_with_config(
            &config.database.path,
            PoolConfig::from(&config.database),
        )?;
        let store = Arc::new(MetricsStore::new(Arc::new(db), config.cache.ttl()));
        let engine = ResponseEngine::from_config(&config.llm)?;

        info!(
            database = %config.database.path.display(),
            delegating = engine.is_delegating(),
            "Retention assistant ready"
        );
        Ok(Self::new(store, engine))
    }

    /// Display-ready KPIs
    pub fn get_kpis(&self) -> DerivedMetrics {
        derive_metrics(&self.store.fetch_kpis())
    }

    /// Answer text only
    pub async fn answer(&self, question: &str) -> String {
        self.answer_with_source(question).await.text
    }

    /// Answer with the path that produced it
    ///
    /// The KPI query runs on the blocking pool so a slow connection checkout
    /// never stalls a runtime worker.
    pub async fn answer_with_source(&self, question: &str) -> Answer {
        let store = Arc::clone(&self.store);
        let metrics = tokio::task::spawn_blocking(move || derive_metrics(&store.fetch_kpis()))
            .await
            .unwrap_or_else(|e| {
                warn!("KPI lookup task failed: {}. Using fallback data", e);
                derive_metrics(&KpiSnapshot::FALLBACK)
            });
        let prompt = build_prompt(question, &metrics);
        debug!(prompt_len = prompt.len(), "Prompt built");
        self.engine.answer(question, &prompt).await
    }

    pub fn suggested_questions(&self) -> [&'static str; 4] {
        suggested_questions()
    }

    pub fn segments(&self) -> Vec<SegmentRecord> {
        self.store.fetch_segments()
    }

    pub fn regions(&self) -> Vec<RegionRecord> {
        self.store.fetch_regions()
    }

    pub fn churn_reasons(&self) -> Vec<ChurnReason> {
        self.store.fetch_churn_reasons()
    }

    pub fn revenue_breakdown(&self) -> Vec<ChannelRevenue> {
        self.store.fetch_revenue_breakdown()
    }

    pub fn is_delegating(&self) -> bool {
        self.engine.is_delegating()
    }
}
