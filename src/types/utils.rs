//! Shared numeric and formatting helpers.

use std::fmt::Display;

// =============================================================================
// Numeric Helpers
// =============================================================================

/// Round to two decimal places (half away from zero)
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Replace NaN, infinities and negatives with zero
#[inline]
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

// =============================================================================
// Display Formatting
// =============================================================================

/// Insert `,` thousands separators into an integer: `1200000` → `1,200,000`
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format with thousands separators and exactly two decimals: `1241.7` → `1,241.70`
pub fn format_decimal(value: f64) -> String {
    let cents = (non_negative(value) * 100.0).round() as u64;
    format!("{}.{:02}", format_thousands(cents / 100), cents % 100)
}

/// Percentage with one or two decimals: `18.0` → `18.0%`, `24.63` → `24.63%`
pub fn format_percent(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.strip_suffix('0').unwrap_or(&fixed);
    format!("{}%", trimmed)
}

/// Dollar amount with separators and no decimals: `$1,490,000,000`
pub fn format_currency(value: u64) -> String {
    format!("${}", format_thousands(value))
}

/// Compact dollar amount for tables: `$4.23B`, `$289.31M`, `$1,241.70`
pub fn format_compact_currency(value: f64) -> String {
    let value = non_negative(value);
    if value >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else {
        format!("${}", format_decimal(value))
    }
}

// =============================================================================
// Logging Helpers
// =============================================================================

/// Convert a failed row into `None`, logging at warn level.
pub fn log_filter_warn<T, E: Display>(result: Result<T, E>, context: &str) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("{}: {}", context, e);
            None
        }
    }
}
