use crate::types::{DerivedMetrics, KpiSnapshot, non_negative, round2};

/// Turn a raw snapshot into display-ready metrics.
///
/// Total for every input: absent, NaN and negative values become zero, and
/// revenue protected never goes below zero even when the recorded risk exceeds
/// total revenue. Currency fields are truncated to whole dollars; `arpu` is
/// recomputed from revenue and customer count and kept to two decimals.
pub fn derive_metrics(snapshot: &KpiSnapshot) -> DerivedMetrics {
    let total_customers = count(snapshot.total_customers);
    let total_revenue = amount(snapshot.total_revenue);
    let revenue_at_risk = amount(snapshot.revenue_at_risk);

    let arpu = if total_customers > 0 {
        non_negative(round2(total_revenue / total_customers as f64))
    } else {
        0.0
    };

    DerivedMetrics {
        total_customers,
        churned_customers: count(snapshot.churned_customers),
        churn_rate: amount(snapshot.churn_rate),
        retention_rate: amount(snapshot.retention_rate),
        total_revenue: total_revenue as u64,
        revenue_at_risk: revenue_at_risk as u64,
        revenue_protected: (total_revenue - revenue_at_risk).max(0.0) as u64,
        arpu,
    }
}

fn count(value: Option<i64>) -> u64 {
    value.map_or(0, |v| v.max(0) as u64)
}

fn amount(value: Option<f64>) -> f64 {
    value.map_or(0.0, non_negative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_dashboard_snapshot() {
        let derived = derive_metrics(&KpiSnapshot::FALLBACK);

        assert_eq!(derived.total_customers, 1_200_000);
        assert_eq!(derived.churned_customers, 222_000);
        assert_eq!(derived.churn_rate, 18.5);
        assert_eq!(derived.retention_rate, 81.5);
        assert_eq!(derived.total_revenue, 1_490_000_000);
        assert_eq!(derived.revenue_at_risk, 289_310_000);
        assert_eq!(derived.revenue_protected, 1_200_690_000);
        assert_eq!(derived.arpu, 1241.67);
    }

    #[test]
    fn test_zero_customers_gives_zero_arpu() {
        let snapshot = KpiSnapshot {
            total_customers: Some(0),
            total_revenue: Some(10_000.0),
            ..Default::default()
        };
        let derived = derive_metrics(&snapshot);

        assert_eq!(derived.arpu, 0.0);
        assert_eq!(derived.total_revenue, 10_000);
    }

    #[test]
    fn test_risk_above_revenue_clamps_protected() {
        let snapshot = KpiSnapshot {
            total_customers: Some(10),
            total_revenue: Some(1_000.0),
            revenue_at_risk: Some(5_000.0),
            ..Default::default()
        };
        let derived = derive_metrics(&snapshot);

        assert_eq!(derived.revenue_protected, 0);
        assert_eq!(derived.revenue_at_risk, 5_000);
    }

    #[test]
    fn test_nulls_and_garbage_become_zero() {
        let snapshot = KpiSnapshot {
            total_customers: Some(-5),
            churned_customers: None,
            churn_rate: Some(f64::NAN),
            retention_rate: Some(-1.0),
            total_revenue: Some(f64::INFINITY),
            revenue_at_risk: None,
            arpu: Some(99.0),
        };

        assert_eq!(derive_metrics(&snapshot), DerivedMetrics::default());
    }

    #[test]
    fn test_currency_truncates() {
        let snapshot = KpiSnapshot {
            total_customers: Some(3),
            total_revenue: Some(1_000.99),
            revenue_at_risk: Some(200.5),
            ..Default::default()
        };
        let derived = derive_metrics(&snapshot);

        assert_eq!(derived.total_revenue, 1_000);
        assert_eq!(derived.revenue_at_risk, 200);
        assert_eq!(derived.revenue_protected, 800);
        assert_eq!(derived.arpu, 333.66);
    }

    fn arb_amount() -> impl Strategy<Value = Option<f64>> {
        prop_oneof![
            Just(None),
            Just(Some(f64::NAN)),
            (-1e12f64..1e12).prop_map(Some),
        ]
    }

    fn arb_snapshot() -> impl Strategy<Value = KpiSnapshot> {
        (
            proptest::option::of(-1_000_000i64..10_000_000),
            proptest::option::of(-1_000_000i64..10_000_000),
            arb_amount(),
            arb_amount(),
            arb_amount(),
            arb_amount(),
        )
            .prop_map(
                |(customers, churned, churn, retention, revenue, risk)| KpiSnapshot {
                    total_customers: customers,
                    churned_customers: churned,
                    churn_rate: churn,
                    retention_rate: retention,
                    total_revenue: revenue,
                    revenue_at_risk: risk,
                    arpu: None,
                },
            )
    }

    proptest! {
        #[test]
        fn derived_fields_never_negative(snapshot in arb_snapshot()) {
            let derived = derive_metrics(&snapshot);

            prop_assert!(derived.churn_rate >= 0.0);
            prop_assert!(derived.retention_rate >= 0.0);
            prop_assert!(derived.arpu >= 0.0 && derived.arpu.is_finite());
            prop_assert!(derived.revenue_protected <= derived.total_revenue);
        }

        #[test]
        fn arpu_zero_without_customers(
            customers in -1_000_000i64..=0,
            revenue in 0f64..1e12,
        ) {
            let snapshot = KpiSnapshot {
                total_customers: Some(customers),
                total_revenue: Some(revenue),
                ..Default::default()
            };
            prop_assert_eq!(derive_metrics(&snapshot).arpu, 0.0);
        }

        #[test]
        fn derivation_is_deterministic(snapshot in arb_snapshot()) {
            prop_assert_eq!(derive_metrics(&snapshot), derive_metrics(&snapshot));
        }
    }
}
