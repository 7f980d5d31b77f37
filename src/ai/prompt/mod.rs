//! Prompt Builder System
//!
//! Builds the analyst prompt sent to the completion service.
//!
//! ## Layout
//!
//! 1. **Role**: analyst persona line
//! 2. **Business Context**: fixed operator description
//! 3. **Metrics**: the eight derived KPI lines, grouped
//! 4. **Key Insights**: seven static dashboard findings (one interpolates ARPU)
//! 5. **Question**: the user's text, verbatim
//! 6. **Instructions**: seven response rules
//!
//! Output depends only on the question and the metrics, so identical input
//! produces a byte-identical prompt.

use crate::types::{
    DerivedMetrics, format_currency, format_decimal, format_percent, format_thousands,
};

/// Prompt section types
#[derive(Debug, Clone)]
pub enum PromptSection {
    /// Opening persona line
    Role(String),
    /// Raw text with optional header
    Text {
        header: Option<String>,
        content: String,
    },
    /// Titled groups of `- label: value` lines
    Metrics {
        header: String,
        groups: Vec<MetricGroup>,
    },
    /// Numbered list under a header
    Numbered { header: String, items: Vec<String> },
    /// Closing cue, emitted last as-is
    Closing(String),
}

/// One titled block of metric lines
#[derive(Debug, Clone)]
pub struct MetricGroup {
    pub title: String,
    pub lines: Vec<(String, String)>,
}

impl MetricGroup {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            lines: Vec::new(),
        }
    }

    pub fn line(mut self, label: &str, value: impl Into<String>) -> Self {
        self.lines.push((label.to_string(), value.into()));
        self
    }
}

/// Prompt builder for consistent prompt construction
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the persona line
    pub fn role(mut self, role: &str) -> Self {
        self.sections.push(PromptSection::Role(role.to_string()));
        self
    }

    /// Add text section with header
    pub fn section(mut self, header: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: Some(header.to_string()),
            content: content.to_string(),
        });
        self
    }

    /// Add a grouped metrics section
    pub fn metrics(mut self, header: &str, groups: Vec<MetricGroup>) -> Self {
        self.sections.push(PromptSection::Metrics {
            header: header.to_string(),
            groups,
        });
        self
    }

    /// Add a numbered list section
    pub fn numbered<S: Into<String>>(mut self, header: &str, items: Vec<S>) -> Self {
        self.sections.push(PromptSection::Numbered {
            header: header.to_string(),
            items: items.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Add the closing cue
    pub fn closing(mut self, content: &str) -> Self {
        self.sections
            .push(PromptSection::Closing(content.to_string()));
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let mut prompt = String::new();

        for section in self.sections {
            match section {
                PromptSection::Role(role) => {
                    prompt.push_str(&role);
                    prompt.push_str("\n\n");
                }
                PromptSection::Text { header, content } => {
                    if let Some(h) = header {
                        prompt.push_str(&format!("{}:\n", h));
                    }
                    prompt.push_str(&content);
                    prompt.push_str("\n\n");
                }
                PromptSection::Metrics { header, groups } => {
                    prompt.push_str(&format!("{}:\n", header));
                    for group in groups {
                        prompt.push_str(&format!("{}:\n", group.title));
                        for (label, value) in group.lines {
                            prompt.push_str(&format!("- {}: {}\n", label, value));
                        }
                        prompt.push('\n');
                    }
                }
                PromptSection::Numbered { header, items } => {
                    prompt.push_str(&format!("{}:\n", header));
                    for (i, item) in items.iter().enumerate() {
                        prompt.push_str(&format!("{}. {}\n", i + 1, item));
                    }
                    prompt.push('\n');
                }
                PromptSection::Closing(content) => {
                    prompt.push_str(&content);
                    prompt.push_str("\n\n");
                }
            }
        }

        prompt.trim_end().to_string()
    }
}

// =============================================================================
// Retention Analyst Prompt
// =============================================================================

const ROLE: &str = "You are an expert retention analyst for a Telecom company's Enterprise Customer Churn Intelligence Platform.";

const BUSINESS_CONTEXT: &str = "This is a large-scale telecom operation with 1.2M+ customers across 4 regions (South, North, West, East) with both Retail and SME segments.";

const INSTRUCTIONS: [&str; 7] = [
    "Answer based on the REAL metrics provided above",
    "Keep response concise (3-5 sentences maximum)",
    "Include specific numbers and percentages from the data",
    "Provide actionable, data-driven recommendations",
    "Reference dashboard insights when relevant",
    "Focus on revenue impact and retention ROI",
    "Use professional but conversational business language",
];

const CLOSING: &str = "Answer the customer's question with data-driven insights:";

const SUGGESTED_QUESTIONS: [&str; 4] = [
    "Why is churn happening?",
    "How is revenue generated?",
    "Which segments are at risk?",
    "Best retention strategies?",
];

fn key_insights(metrics: &DerivedMetrics) -> Vec<String> {
    vec![
        "Retail customers represent the highest churn exposure (19% churn rate, $254M+ at risk)"
            .to_string(),
        "Regional churn is balanced but South has highest revenue at risk ($102M)".to_string(),
        "A 3% churn reduction could protect $40-50M annually".to_string(),
        format!("High ARPU (${:.2}) indicates valuable customer base", metrics.arpu),
        "Service quality issues (32%), competitive pricing (28%), and poor customer service (24%) are top churn drivers".to_string(),
        "Early lifecycle churn (first 6-9 months) represents highest risk period".to_string(),
        "High-value customers with network downtime are critical risk segment".to_string(),
    ]
}

fn metric_groups(metrics: &DerivedMetrics) -> Vec<MetricGroup> {
    vec![
        MetricGroup::new("📊 Customer Base")
            .line("Total Customers", format_thousands(metrics.total_customers))
            .line(
                "Churned Customers",
                format_thousands(metrics.churned_customers),
            )
            .line("Churn Rate", format_percent(metrics.churn_rate))
            .line("Retention Rate", format_percent(metrics.retention_rate)),
        MetricGroup::new("💰 Revenue Impact")
            .line("Total Revenue", format_currency(metrics.total_revenue))
            .line("Revenue at Risk", format_currency(metrics.revenue_at_risk))
            .line(
                "Revenue Protected",
                format_currency(metrics.revenue_protected),
            )
            .line(
                "ARPU (Average Revenue Per User)",
                format!("${}", format_decimal(metrics.arpu)),
            ),
    ]
}

/// Build the analyst prompt for one question.
pub fn build_prompt(question: &str, metrics: &DerivedMetrics) -> String {
    PromptBuilder::new()
        .role(ROLE)
        .section("BUSINESS CONTEXT", BUSINESS_CONTEXT)
        .metrics("CURRENT BUSINESS METRICS (Real Data)", metric_groups(metrics))
        .numbered("🎯 KEY BUSINESS INSIGHTS FROM DASHBOARDS", key_insights(metrics))
        .section("CUSTOMER QUESTION", question)
        .numbered("RESPONSE INSTRUCTIONS", INSTRUCTIONS.to_vec())
        .closing(CLOSING)
        .build()
}

/// Starter questions offered to the user.
pub fn suggested_questions() -> [&'static str; 4] {
    SUGGESTED_QUESTIONS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::derive_metrics;
    use crate::types::KpiSnapshot;

    fn dashboard_metrics() -> DerivedMetrics {
        derive_metrics(&KpiSnapshot::FALLBACK)
    }

    #[test]
    fn test_builder_sections() {
        let prompt = PromptBuilder::new()
            .role("You are a tester.")
            .section("CONTEXT", "Some context")
            .numbered("STEPS", vec!["First", "Second"])
            .closing("Go:")
            .build();

        assert!(prompt.starts_with("You are a tester.\n\nCONTEXT:\nSome context"));
        assert!(prompt.contains("STEPS:\n1. First\n2. Second\n"));
        assert!(prompt.ends_with("Go:"));
    }

    #[test]
    fn test_metric_lines_are_formatted() {
        let prompt = build_prompt("Why is churn happening?", &dashboard_metrics());

        assert!(prompt.contains("- Total Customers: 1,200,000"));
        assert!(prompt.contains("- Churned Customers: 222,000"));
        assert!(prompt.contains("- Churn Rate: 18.5%"));
        assert!(prompt.contains("- Retention Rate: 81.5%"));
        assert!(prompt.contains("- Total Revenue: $1,490,000,000"));
        assert!(prompt.contains("- Revenue at Risk: $289,310,000"));
        assert!(prompt.contains("- Revenue Protected: $1,200,690,000"));
        assert!(prompt.contains("- ARPU (Average Revenue Per User): $1,241.67"));
    }

    #[test]
    fn test_insights_interpolate_arpu() {
        let prompt = build_prompt("anything", &dashboard_metrics());

        assert!(prompt.contains("4. High ARPU ($1241.67) indicates valuable customer base"));
        assert!(prompt.contains("7. High-value customers with network downtime"));
    }

    #[test]
    fn test_whole_numbers_keep_fixed_decimals() {
        let metrics = DerivedMetrics {
            churn_rate: 18.0,
            retention_rate: 82.0,
            arpu: 1241.7,
            ..dashboard_metrics()
        };
        let prompt = build_prompt("anything", &metrics);

        assert!(prompt.contains("- Churn Rate: 18.0%"));
        assert!(prompt.contains("- Retention Rate: 82.0%"));
        assert!(prompt.contains("High ARPU ($1241.70) indicates"));
    }

    #[test]
    fn test_question_and_instructions_present() {
        let question = "Which segments are at risk?";
        let prompt = build_prompt(question, &dashboard_metrics());

        assert!(prompt.contains("CUSTOMER QUESTION:\nWhich segments are at risk?\n"));
        assert!(prompt.contains("2. Keep response concise (3-5 sentences maximum)"));
        assert!(prompt.ends_with(CLOSING));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let metrics = dashboard_metrics();
        assert_eq!(
            build_prompt("How is revenue generated?", &metrics),
            build_prompt("How is revenue generated?", &metrics)
        );
    }

    #[test]
    fn test_prompt_grows_only_with_question() {
        let metrics = dashboard_metrics();
        let short = build_prompt("a", &metrics);
        let long = build_prompt(&"a".repeat(101), &metrics);
        assert_eq!(long.len() - short.len(), 100);
    }

    #[test]
    fn test_suggested_questions() {
        let questions = suggested_questions();
        assert_eq!(questions.len(), 4);
        assert_eq!(questions[0], "Why is churn happening?");
        assert_eq!(questions[3], "Best retention strategies?");
    }
}
