//! Metrics Store
//!
//! Read-only aggregate queries over the retention mart.
//!
//! Every public `fetch_*` method is total: a connection failure, a query
//! error or an empty result is logged and replaced with the operation's
//! static fallback. Successful results are memoized for the configured TTL;
//! fallback values are never cached, so a recovered database is picked up on
//! the next call.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use rusqlite::params;
use tracing::{debug, info, warn};

use super::database::Database;
use crate::constants::database::TOP_CHURN_REASONS;
use crate::types::{
    ChannelRevenue, ChurnError, ChurnReason, KpiSnapshot, RegionRecord, Result, ResultExt,
    SegmentRecord, fallback_churn_reasons, fallback_regions, fallback_revenue_breakdown,
    fallback_segments, log_filter_warn,
};

const KPI_QUERY: &str = r#"
    SELECT
        SUM(total_customers)   AS total_customers,
        SUM(churned_customers) AS churned_customers,
        ROUND(AVG(churn_rate), 2)     AS churn_rate,
        ROUND(AVG(retention_rate), 2) AS retention_rate,
        ROUND(SUM(total_revenue), 2)   AS total_revenue,
        ROUND(SUM(revenue_at_risk), 2) AS revenue_at_risk
    FROM mart_retention_kpis
"#;

const SEGMENT_QUERY: &str = r#"
    SELECT
        customer_segment,
        SUM(total_customers) AS customer_count,
        ROUND(AVG(churn_rate), 2) AS churn_rate,
        ROUND(AVG(total_revenue * 1.0 / NULLIF(total_customers, 0)), 2) AS avg_revenue,
        ROUND(SUM(revenue_at_risk), 2) AS revenue_at_risk
    FROM mart_retention_kpis
    GROUP BY customer_segment
    ORDER BY churn_rate DESC, customer_segment
"#;

const REGION_QUERY: &str = r#"
    SELECT
        region,
        SUM(total_customers) AS customer_count,
        ROUND(AVG(churn_rate), 2) AS churn_rate,
        ROUND(SUM(total_revenue), 2) AS total_revenue,
        ROUND(SUM(revenue_at_risk), 2) AS revenue_at_risk
    FROM mart_retention_kpis
    GROUP BY region
    ORDER BY revenue_at_risk DESC, region
"#;

const CHURN_REASON_QUERY: &str = r#"
    SELECT
        churn_reason,
        COUNT(*) AS affected_customers,
        ROUND(100.0 * COUNT(*) / (SELECT COUNT(*) FROM stg_churn WHERE churn_flag = '1'), 2)
            AS percentage
    FROM stg_churn
    WHERE churn_flag = '1' AND churn_reason IS NOT NULL
    GROUP BY churn_reason
    ORDER BY percentage DESC, churn_reason
    LIMIT ?1
"#;

const REVENUE_BREAKDOWN_QUERY: &str = r#"
    SELECT
        dc.acquisition_channel,
        ROUND(SUM(fb.monthly_charges), 2) AS channel_revenue
    FROM stg_billing fb
    JOIN stg_customers dc ON fb.customer_id = dc.customer_id
    GROUP BY dc.acquisition_channel
    ORDER BY channel_revenue DESC, dc.acquisition_channel
"#;

/// Shared store handle.
pub type SharedMetricsStore = Arc<MetricsStore>;

/// TTL-bounded memo for one query result
fn ttl_cache<V: Clone + Send + Sync + 'static>(ttl: Duration) -> Cache<(), V> {
    Cache::builder().max_capacity(1).time_to_live(ttl).build()
}

/// Aggregate KPI queries with fallback and caching.
pub struct MetricsStore {
    db: Arc<Database>,
    caching: bool,
    kpis: Cache<(), KpiSnapshot>,
    segments: Cache<(), Vec<SegmentRecord>>,
    regions: Cache<(), Vec<RegionRecord>>,
    churn_reasons: Cache<(), Vec<ChurnReason>>,
    revenue: Cache<(), Vec<ChannelRevenue>>,
}

impl MetricsStore {
    pub fn new(db: Arc<Database>, ttl: Duration) -> Self {
        Self {
            db,
            caching: !ttl.is_zero(),
            kpis: ttl_cache(ttl),
            segments: ttl_cache(ttl),
            regions: ttl_cache(ttl),
            churn_reasons: ttl_cache(ttl),
            revenue: ttl_cache(ttl),
        }
    }

    // =========================================================================
    // Public contract
    // =========================================================================

    /// Headline KPI snapshot, or [`KpiSnapshot::FALLBACK`].
    pub fn fetch_kpis(&self) -> KpiSnapshot {
        self.cached_or_fallback(&self.kpis, "KPIs", || self.query_kpis(), || {
            KpiSnapshot::FALLBACK
        })
    }

    /// Per-segment breakdown ordered by churn rate, or the two-segment fallback.
    pub fn fetch_segments(&self) -> Vec<SegmentRecord> {
        self.cached_or_fallback(
            &self.segments,
            "segments",
            || non_empty(self.query_segments()?, "segments"),
            fallback_segments,
        )
    }

    /// Per-region breakdown ordered by revenue at risk, or the four-region fallback.
    pub fn fetch_regions(&self) -> Vec<RegionRecord> {
        self.cached_or_fallback(
            &self.regions,
            "regions",
            || non_empty(self.query_regions()?, "regions"),
            fallback_regions,
        )
    }

    /// Top churn reasons by share of churned customers.
    pub fn fetch_churn_reasons(&self) -> Vec<ChurnReason> {
        self.cached_or_fallback(
            &self.churn_reasons,
            "churn reasons",
            || non_empty(self.query_churn_reasons()?, "churn reasons"),
            fallback_churn_reasons,
        )
    }

    /// Billed revenue per acquisition channel.
    pub fn fetch_revenue_breakdown(&self) -> Vec<ChannelRevenue> {
        self.cached_or_fallback(
            &self.revenue,
            "revenue breakdown",
            || non_empty(self.query_revenue_breakdown()?, "revenue breakdown"),
            fallback_revenue_breakdown,
        )
    }

    /// Drop every cached result.
    pub fn invalidate(&self) {
        self.kpis.invalidate_all();
        self.segments.invalidate_all();
        self.regions.invalidate_all();
        self.churn_reasons.invalidate_all();
        self.revenue.invalidate_all();
        debug!("Metrics cache invalidated");
    }

    /// Serve from cache, else query; on error log and return the fallback uncached.
    fn cached_or_fallback<V, Q, F>(
        &self,
        cache: &Cache<(), V>,
        what: &str,
        query: Q,
        fallback: F,
    ) -> V
    where
        V: Clone + Send + Sync + 'static,
        Q: FnOnce() -> Result<V>,
        F: FnOnce() -> V,
    {
        if let Some(hit) = cache.get(&()) {
            debug!("Cache hit for {}", what);
            return hit;
        }

        debug!("Cache miss for {}, querying", what);
        match query() {
            Ok(value) => {
                if self.caching {
                    cache.insert((), value.clone());
                }
                value
            }
            Err(e) => {
                warn!("Error fetching {}: {}. Using fallback data", what, e);
                fallback()
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    fn query_kpis(&self) -> Result<KpiSnapshot> {
        let conn = self.db.connection()?;
        let snapshot = conn
            .query_row(KPI_QUERY, [], |row| {
                Ok(KpiSnapshot {
                    total_customers: row.get(0)?,
                    churned_customers: row.get(1)?,
                    churn_rate: row.get(2)?,
                    retention_rate: row.get(3)?,
                    total_revenue: row.get(4)?,
                    revenue_at_risk: row.get(5)?,
                    arpu: None,
                })
            })
            .with_context("Failed to query KPI snapshot")?;

        if snapshot.is_empty() {
            return Err(ChurnError::NoData("KPIs"));
        }

        let snapshot = snapshot.with_computed_arpu();
        info!(
            total_customers = snapshot.total_customers,
            churn_rate = snapshot.churn_rate,
            "KPIs loaded"
        );
        Ok(snapshot)
    }

    fn query_segments(&self) -> Result<Vec<SegmentRecord>> {
        let conn = self.db.connection()?;
        let mut stmt = conn
            .prepare(SEGMENT_QUERY)
            .with_context("Failed to prepare segment query")?;

        let rows = stmt
            .query_map([], |row| {
                Ok(SegmentRecord {
                    segment: row.get(0)?,
                    count: row.get::<_, Option<i64>>(1)?.unwrap_or(0),
                    churn_rate: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
                    avg_revenue: row.get::<_, Option<f64>>(3)?.unwrap_or(0.0),
                    revenue_at_risk: row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
                })
            })
            .with_context("Failed to query segments")?
            .filter_map(|r| log_filter_warn(r, "Skipping malformed segment row"))
            .collect();

        Ok(rows)
    }

    fn query_regions(&self) -> Result<Vec<RegionRecord>> {
        let conn = self.db.connection()?;
        let mut stmt = conn
            .prepare(REGION_QUERY)
            .with_context("Failed to prepare region query")?;

        let rows = stmt
            .query_map([], |row| {
                Ok(RegionRecord {
                    region: row.get(0)?,
                    customer_count: row.get::<_, Option<i64>>(1)?.unwrap_or(0),
                    churn_rate: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
                    total_revenue: row.get::<_, Option<f64>>(3)?.unwrap_or(0.0),
                    revenue_at_risk: row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
                })
            })
            .with_context("Failed to query regions")?
            .filter_map(|r| log_filter_warn(r, "Skipping malformed region row"))
            .collect();

        Ok(rows)
    }

    fn query_churn_reasons(&self) -> Result<Vec<ChurnReason>> {
        let conn = self.db.connection()?;
        let mut stmt = conn
            .prepare(CHURN_REASON_QUERY)
            .with_context("Failed to prepare churn reason query")?;

        let rows = stmt
            .query_map(params![TOP_CHURN_REASONS as i64], |row| {
                Ok(ChurnReason {
                    reason: row.get(0)?,
                    affected_count: row.get(1)?,
                    percentage: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
                })
            })
            .with_context("Failed to query churn reasons")?
            .filter_map(|r| log_filter_warn(r, "Skipping malformed churn reason row"))
            .collect();

        Ok(rows)
    }

    fn query_revenue_breakdown(&self) -> Result<Vec<ChannelRevenue>> {
        let conn = self.db.connection()?;
        let mut stmt = conn
            .prepare(REVENUE_BREAKDOWN_QUERY)
            .with_context("Failed to prepare revenue breakdown query")?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ChannelRevenue {
                    channel: row.get(0)?,
                    revenue: row.get::<_, Option<f64>>(1)?.unwrap_or(0.0),
                })
            })
            .with_context("Failed to query revenue breakdown")?
            .filter_map(|r| log_filter_warn(r, "Skipping malformed revenue row"))
            .collect();

        Ok(rows)
    }
}

/// Zero rows means the mart is not populated; treat it like a failure.
fn non_empty<T>(rows: Vec<T>, what: &'static str) -> Result<Vec<T>> {
    if rows.is_empty() {
        Err(ChurnError::NoData(what))
    } else {
        Ok(rows)
    }
}
