//! Local Analyst
//!
//! Deterministic answers used whenever the completion service is not
//! configured or fails. Routing is an ordered rule table over the raw
//! question, matched case-insensitively; the first matching rule wins and
//! anything unmatched gets the capability overview.

mod templates;

use serde::Serialize;

/// Answer topic selected by the router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    ChurnDrivers,
    RevenueBreakdown,
    SegmentRisk,
    RetentionStrategy,
    Regional,
    CustomerInsights,
    Overview,
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ChurnDrivers => "churn drivers",
            Self::RevenueBreakdown => "revenue breakdown",
            Self::SegmentRisk => "segment risk",
            Self::RetentionStrategy => "retention strategy",
            Self::Regional => "regional",
            Self::CustomerInsights => "customer insights",
            Self::Overview => "overview",
        };
        f.write_str(name)
    }
}

/// Keyword condition over the lowercased question
#[derive(Debug, Clone, Copy)]
pub enum KeywordMatch {
    /// Every keyword must appear
    All(&'static [&'static str]),
    /// At least one keyword must appear
    Any(&'static [&'static str]),
}

impl KeywordMatch {
    fn matches(&self, haystack: &str) -> bool {
        match self {
            Self::All(words) => words.iter().all(|w| haystack.contains(w)),
            Self::Any(words) => words.iter().any(|w| haystack.contains(w)),
        }
    }
}

/// One routing rule
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub topic: Topic,
    pub matcher: KeywordMatch,
    pub template: &'static str,
}

/// Routing table, evaluated top to bottom
pub const RULES: &[Rule] = &[
    Rule {
        topic: Topic::ChurnDrivers,
        matcher: KeywordMatch::All(&["churn", "why"]),
        template: templates::CHURN_DRIVERS,
    },
    Rule {
        topic: Topic::RevenueBreakdown,
        matcher: KeywordMatch::Any(&["revenue"]),
        template: templates::REVENUE_BREAKDOWN,
    },
    Rule {
        topic: Topic::SegmentRisk,
        matcher: KeywordMatch::Any(&["segment", "risk"]),
        template: templates::SEGMENT_RISK,
    },
    Rule {
        topic: Topic::RetentionStrategy,
        matcher: KeywordMatch::Any(&["retention", "strateg"]),
        template: templates::RETENTION_STRATEGY,
    },
    Rule {
        topic: Topic::Regional,
        matcher: KeywordMatch::Any(&["region", "south"]),
        template: templates::REGIONAL,
    },
    Rule {
        topic: Topic::CustomerInsights,
        matcher: KeywordMatch::Any(&["customer"]),
        template: templates::CUSTOMER_INSIGHTS,
    },
];

const OVERVIEW: &str = templates::OVERVIEW;

/// Route a question to its topic and canned answer.
pub fn respond(question: &str) -> (Topic, &'static str) {
    let lowered = question.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matcher.matches(&lowered))
        .map_or((Topic::Overview, OVERVIEW), |rule| {
            (rule.topic, rule.template)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_churn_why_wins_over_region() {
        let (topic, text) = respond("Why is churn happening in my region?");
        assert_eq!(topic, Topic::ChurnDrivers);
        assert!(text.contains("Top 3 Drivers"));
    }

    #[test]
    fn test_churn_without_why_falls_through() {
        let (topic, _) = respond("Show churn in the south");
        assert_eq!(topic, Topic::Regional);
    }

    #[test]
    fn test_revenue_answer_uses_static_figures() {
        let (topic, text) = respond("How is revenue generated?");
        assert_eq!(topic, Topic::RevenueBreakdown);
        assert!(text.contains("Online Channel"));
        assert!(text.contains("$4.23B"));
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(respond("Which segments are at risk?").0, Topic::SegmentRisk);
        assert_eq!(respond("Revenue at risk?").0, Topic::RevenueBreakdown);
        assert_eq!(respond("Best retention strategies?").0, Topic::RetentionStrategy);
        assert_eq!(respond("Tell me about my customers").0, Topic::CustomerInsights);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(respond("WHY IS CHURN SO HIGH").0, Topic::ChurnDrivers);
        assert_eq!(respond("StRaTeGy").0, Topic::RetentionStrategy);
    }

    #[test]
    fn test_empty_and_unmatched_get_overview() {
        let (topic, text) = respond("");
        assert_eq!(topic, Topic::Overview);
        assert!(text.starts_with("I'm your AI Retention Analyst"));
        assert_eq!(respond("hello there").0, Topic::Overview);
    }

    #[test]
    fn test_every_template_non_empty() {
        assert!(RULES.iter().all(|r| !r.template.trim().is_empty()));
        assert!(!OVERVIEW.trim().is_empty());
    }
}
