//! Style templates and action tables
//!
//! Three template sets (professional / casual / technical). Every set
//! expresses the same facts - time bucket, feature description plus
//! confidence, meaning - and differs in phrasing only.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::features::TimeBucket;
use crate::profile::ExplanationStyle;
use crate::types::{SignificanceBracket, SymbolicFeature};

// ============================================================================
// CLAUSES
// ============================================================================

pub fn opening_clause(style: ExplanationStyle, bucket: Option<TimeBucket>) -> String {
    match (style, bucket) {
        (ExplanationStyle::Professional, Some(b)) => {
            format!("An event was recorded during the {} hours.", b.as_str())
        }
        (ExplanationStyle::Professional, None) => "An event was recorded.".to_string(),
        (ExplanationStyle::Casual, Some(b)) => {
            format!("Something happened during the {}.", b.as_str())
        }
        (ExplanationStyle::Casual, None) => "Something happened.".to_string(),
        (ExplanationStyle::Technical, Some(b)) => {
            format!("Event captured; temporal bucket: {}.", b.as_str())
        }
        (ExplanationStyle::Technical, None) => {
            "Event captured; temporal bucket: unknown.".to_string()
        }
    }
}

pub fn feature_clause(style: ExplanationStyle, feature: &SymbolicFeature) -> String {
    let description = decapitalize(&feature.human_description);
    let percent = (feature.confidence * 100.0).round() as u32;
    match style {
        ExplanationStyle::Professional => {
            format!("Analysis indicates {} ({}% confidence).", description, percent)
        }
        ExplanationStyle::Casual => {
            format!("Looks like {} ({}% sure).", description, percent)
        }
        ExplanationStyle::Technical => {
            format!("Feature {}: {} [confidence {}%].", feature.feature_name, description, percent)
        }
    }
}

pub fn closing_clause(style: ExplanationStyle, meaning: &str) -> String {
    match style {
        ExplanationStyle::Professional => {
            format!("Overall, this is interpreted as {}.", meaning)
        }
        ExplanationStyle::Casual => format!("All in all, this looks like {}.", meaning),
        ExplanationStyle::Technical => format!("Classification: {}.", meaning),
    }
}

fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// ============================================================================
// ACTION TABLES
// ============================================================================

/// Base recommended actions per significance bracket.
static BRACKET_ACTIONS: Lazy<BTreeMap<SignificanceBracket, Vec<&'static str>>> =
    Lazy::new(|| {
        BTreeMap::from([
            (
                SignificanceBracket::Low,
                vec!["Log event for pattern analysis"],
            ),
            (
                SignificanceBracket::Medium,
                vec![
                    "Log event for pattern analysis",
                    "Monitor for similar activity in this area",
                ],
            ),
            (
                SignificanceBracket::High,
                vec![
                    "Log event for pattern analysis",
                    "Trigger alert",
                    "Notify monitoring staff",
                ],
            ),
        ])
    });

/// Extra action when the event fell in the night bucket.
pub const NIGHT_ACTION: &str = "Increase monitoring sensitivity during night hours";

/// Extra action for security-focused brands on notable events.
pub const SECURITY_REVIEW_ACTION: &str = "Review against recent security incidents";

pub fn base_actions(bracket: SignificanceBracket) -> &'static [&'static str] {
    BRACKET_ACTIONS
        .get(&bracket)
        .map(|v| v.as_slice())
        .unwrap_or(&[])
}

// ============================================================================
// TESTS
// ============================================================================
