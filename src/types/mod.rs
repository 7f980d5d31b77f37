pub mod error;
pub mod metrics;
pub mod utils;

pub use error::{ChurnError, ErrorCategory, ErrorClassifier, LlmError, Result, ResultExt};
pub use metrics::{
    ChannelRevenue, ChurnReason, DerivedMetrics, KpiSnapshot, Keyed, RegionRecord, SegmentRecord,
    fallback_churn_reasons, fallback_regions, fallback_revenue_breakdown, fallback_segments,
    find_by_key,
};
pub use utils::{
    format_compact_currency, format_currency, format_decimal, format_percent, format_thousands,
    log_filter_warn, non_negative, round2,
};
