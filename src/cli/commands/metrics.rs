//! Metrics Commands
//!
//! Read-only KPI views.
//!
//! Usage:
//!   churnguard kpis [-f json]
//!   churnguard segments [-f json]
//!   churnguard regions [-f json]
//!   churnguard reasons [-f json]
//!   churnguard revenue [-f json]

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, OutputFormat, print_json};
use crate::types::{
    Result, format_compact_currency, format_currency, format_decimal, format_percent,
    format_thousands,
};

pub fn kpis(format: OutputFormat) -> Result<()> {
    let ctx = CommandContext::load()?;
    let kpis = ctx.assistant.get_kpis();

    if format == OutputFormat::Json {
        return print_json(&kpis);
    }

    let out = Output::new();
    out.header("Retention KPIs");

    out.section("Customer Base");
    out.metric("Total Customers", &format_thousands(kpis.total_customers));
    out.metric("Churned Customers", &format_thousands(kpis.churned_customers));
    out.metric("Churn Rate", &format_percent(kpis.churn_rate));
    out.metric("Retention Rate", &format_percent(kpis.retention_rate));

    out.section("Revenue Impact");
    out.metric("Total Revenue", &format_currency(kpis.total_revenue));
    out.metric("Revenue at Risk", &format_currency(kpis.revenue_at_risk));
    out.metric("Revenue Protected", &format_currency(kpis.revenue_protected));
    out.metric("ARPU", &format!("${}", format_decimal(kpis.arpu)));
    Ok(())
}

pub fn segments(format: OutputFormat) -> Result<()> {
    let ctx = CommandContext::load()?;
    let segments = ctx.assistant.segments();

    if format == OutputFormat::Json {
        return print_json(&segments);
    }

    let out = Output::new();
    out.section("Customer Segments (by churn rate)");
    out.table_header(&[
        ("Segment", 12),
        ("Customers", 12),
        ("Churn", 8),
        ("Avg Revenue", 12),
        ("At Risk", 10),
    ]);
    for s in &segments {
        out.table_row(&[
            (&s.segment, 12),
            (&format_thousands(s.count.max(0) as u64), 12),
            (&format!("{:.2}%", s.churn_rate), 8),
            (&format_compact_currency(s.avg_revenue), 12),
            (&format_compact_currency(s.revenue_at_risk), 10),
        ]);
    }
    Ok(())
}

pub fn regions(format: OutputFormat) -> Result<()> {
    let ctx = CommandContext::load()?;
    let regions = ctx.assistant.regions();

    if format == OutputFormat::Json {
        return print_json(&regions);
    }

    let out = Output::new();
    out.section("Regions (by revenue at risk)");
    out.table_header(&[
        ("Region", 10),
        ("Customers", 12),
        ("Churn", 8),
        ("Revenue", 12),
        ("At Risk", 10),
    ]);
    for r in &regions {
        out.table_row(&[
            (&r.region, 10),
            (&format_thousands(r.customer_count.max(0) as u64), 12),
            (&format!("{:.2}%", r.churn_rate), 8),
            (&format_compact_currency(r.total_revenue), 12),
            (&format_compact_currency(r.revenue_at_risk), 10),
        ]);
    }
    Ok(())
}

pub fn reasons(format: OutputFormat) -> Result<()> {
    let ctx = CommandContext::load()?;
    let reasons = ctx.assistant.churn_reasons();

    if format == OutputFormat::Json {
        return print_json(&reasons);
    }

    let out = Output::new();
    out.section("Top Churn Reasons");
    out.table_header(&[("Reason", 28), ("Customers", 12), ("Share", 8)]);
    for r in &reasons {
        out.table_row(&[
            (&r.reason, 28),
            (&format_thousands(r.affected_count.max(0) as u64), 12),
            (&format!("{:.1}%", r.percentage), 8),
        ]);
    }
    Ok(())
}

pub fn revenue(format: OutputFormat) -> Result<()> {
    let ctx = CommandContext::load()?;
    let channels = ctx.assistant.revenue_breakdown();

    if format == OutputFormat::Json {
        return print_json(&channels);
    }

    let total: f64 = channels.iter().map(|c| c.revenue).sum();
    let out = Output::new();
    out.section("Revenue by Acquisition Channel");
    out.table_header(&[("Channel", 10), ("Revenue", 12), ("Share", 8)]);
    for c in &channels {
        let share = if total > 0.0 {
            c.revenue / total * 100.0
        } else {
            0.0
        };
        out.table_row(&[
            (&c.channel, 10),
            (&format_compact_currency(c.revenue), 12),
            (&format!("{:.1}%", share), 8),
        ]);
    }
    Ok(())
}
