//! KPI Record Types
//!
//! Typed rows produced by the metrics store, plus the static fallback values
//! substituted whenever live data cannot be read.

use serde::{Deserialize, Serialize};

// =============================================================================
// KPI Snapshot
// =============================================================================

/// Raw aggregate KPI record as read from the retention mart.
///
/// Every field is optional because SQL aggregates over an empty or partially
/// populated table yield `NULL`. Coercion to concrete values happens in
/// [`crate::analytics::derive_metrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub total_customers: Option<i64>,
    pub churned_customers: Option<i64>,
    pub churn_rate: Option<f64>,
    pub retention_rate: Option<f64>,
    pub total_revenue: Option<f64>,
    pub revenue_at_risk: Option<f64>,
    pub arpu: Option<f64>,
}

impl KpiSnapshot {
    /// Dashboard figures used when the mart cannot be read
    pub const FALLBACK: Self = Self {
        total_customers: Some(1_200_000),
        churned_customers: Some(222_000),
        churn_rate: Some(18.5),
        retention_rate: Some(81.5),
        total_revenue: Some(1_490_000_000.0),
        revenue_at_risk: Some(289_310_000.0),
        arpu: Some(1241.70),
    };

    /// True when the aggregate carried no values at all (empty mart)
    pub fn is_empty(&self) -> bool {
        self.total_customers.is_none()
            && self.churned_customers.is_none()
            && self.churn_rate.is_none()
            && self.retention_rate.is_none()
            && self.total_revenue.is_none()
            && self.revenue_at_risk.is_none()
    }

    /// Fill in `arpu` from revenue and customer count
    pub fn with_computed_arpu(mut self) -> Self {
        self.arpu = match (self.total_revenue, self.total_customers) {
            (Some(revenue), Some(customers)) if customers > 0 => {
                Some(crate::types::round2(revenue / customers as f64))
            }
            _ => Some(0.0),
        };
        self
    }
}

// =============================================================================
// Derived Metrics
// =============================================================================

/// Display-ready metric set. All fields are non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub total_customers: u64,
    pub churned_customers: u64,
    pub churn_rate: f64,
    pub retention_rate: f64,
    pub total_revenue: u64,
    pub revenue_at_risk: u64,
    pub revenue_protected: u64,
    pub arpu: f64,
}

// =============================================================================
// Breakdown Records
// =============================================================================

/// Churn and revenue figures for one customer segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub segment: String,
    pub count: i64,
    pub churn_rate: f64,
    pub avg_revenue: f64,
    pub revenue_at_risk: f64,
}

/// Churn and revenue figures for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub region: String,
    pub customer_count: i64,
    pub churn_rate: f64,
    pub total_revenue: f64,
    pub revenue_at_risk: f64,
}

/// One stated churn reason with its share of churned customers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChurnReason {
    pub reason: String,
    pub affected_count: i64,
    pub percentage: f64,
}

/// Billed revenue attributed to an acquisition channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRevenue {
    pub channel: String,
    pub revenue: f64,
}

/// Records keyed by a display name, kept in query order
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for SegmentRecord {
    fn key(&self) -> &str {
        &self.segment
    }
}

impl Keyed for RegionRecord {
    fn key(&self) -> &str {
        &self.region
    }
}

impl Keyed for ChannelRevenue {
    fn key(&self) -> &str {
        &self.channel
    }
}

/// Look up a keyed record by name (case-sensitive)
pub fn find_by_key<'a, T: Keyed>(records: &'a [T], key: &str) -> Option<&'a T> {
    records.iter().find(|r| r.key() == key)
}

// =============================================================================
// Fallback Values
// =============================================================================

pub fn fallback_segments() -> Vec<SegmentRecord> {
    vec![
        SegmentRecord {
            segment: "Retail".to_string(),
            count: 1_052_448,
            churn_rate: 19.0,
            avg_revenue: 1241.86,
            revenue_at_risk: 254_300_000.0,
        },
        SegmentRecord {
            segment: "SME".to_string(),
            count: 147_552,
            churn_rate: 18.0,
            avg_revenue: 1240.51,
            revenue_at_risk: 34_900_000.0,
        },
    ]
}

pub fn fallback_regions() -> Vec<RegionRecord> {
    [
        ("South", 24.63, 516_220_000.0, 102_000_000.0),
        ("West", 25.18, 375_030_000.0, 73_000_000.0),
        ("North", 24.78, 372_160_000.0, 72_000_000.0),
        ("East", 25.40, 226_630_000.0, 43_000_000.0),
    ]
    .into_iter()
    .map(|(region, churn_rate, total_revenue, revenue_at_risk)| RegionRecord {
        region: region.to_string(),
        customer_count: 300_000,
        churn_rate,
        total_revenue,
        revenue_at_risk,
    })
    .collect()
}

pub fn fallback_churn_reasons() -> Vec<ChurnReason> {
    [
        ("Service Quality Issues", 71_040, 32.0),
        ("Competitive Pricing", 62_160, 28.0),
        ("Poor Customer Service", 53_280, 24.0),
        ("Lack of Engagement", 35_520, 16.0),
    ]
    .into_iter()
    .map(|(reason, affected_count, percentage)| ChurnReason {
        reason: reason.to_string(),
        affected_count,
        percentage,
    })
    .collect()
}

pub fn fallback_revenue_breakdown() -> Vec<ChannelRevenue> {
    [
        ("Online", 4_225_770_000.0),
        ("Store", 3_297_930_000.0),
        ("Agent", 1_881_880_000.0),
    ]
    .into_iter()
    .map(|(channel, revenue)| ChannelRevenue {
        channel: channel.to_string(),
        revenue,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_detection() {
        assert!(KpiSnapshot::default().is_empty());
        assert!(!KpiSnapshot::FALLBACK.is_empty());

        let partial = KpiSnapshot {
            churn_rate: Some(12.0),
            ..Default::default()
        };
        assert!(!partial.is_empty());
    }

    #[test]
    fn test_computed_arpu() {
        let snapshot = KpiSnapshot {
            total_customers: Some(1_200_000),
            total_revenue: Some(1_490_000_000.0),
            ..Default::default()
        }
        .with_computed_arpu();
        assert_eq!(snapshot.arpu, Some(1241.67));

        let no_customers = KpiSnapshot {
            total_customers: Some(0),
            total_revenue: Some(500.0),
            ..Default::default()
        }
        .with_computed_arpu();
        assert_eq!(no_customers.arpu, Some(0.0));
    }

    #[test]
    fn test_fallback_shapes() {
        let segments = fallback_segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(find_by_key(&segments, "SME").map(|s| s.count), Some(147_552));

        let regions = fallback_regions();
        assert_eq!(regions.len(), 4);
        assert_eq!(regions[0].region, "South");

        let reasons = fallback_churn_reasons();
        assert!(reasons.windows(2).all(|w| w[0].percentage >= w[1].percentage));
    }
}
