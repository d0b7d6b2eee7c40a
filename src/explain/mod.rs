//! Explanation Renderer - features + reasoning outcome -> text + actions
//!
//! Fixed clause sequence: temporal opening, one clause per salient
//! feature (top-K by confidence), closing clause stating the meaning.
//! Brand vocabulary is substituted into the final rendered text and the
//! recommended actions only, so reasoning stays vocabulary-independent.

pub mod templates;
pub mod vocabulary;

pub use vocabulary::Vocabulary;

use crate::features::temporal;
use crate::profile::BrandProfile;
use crate::types::{FeatureCategory, SignificanceBracket, SymbolicFeature};

/// Salience cut: how many features make it into the explanation.
pub const SALIENT_FEATURE_COUNT: usize = 3;

/// Rendered output for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendering {
    pub human_explanation: String,
    pub recommended_actions: Vec<String>,
}

pub fn render(
    features: &[SymbolicFeature],
    meaning: &str,
    bracket: SignificanceBracket,
    profile: &BrandProfile,
) -> Rendering {
    let vocabulary = Vocabulary::from_map(&profile.custom_vocabulary);
    let style = profile.explanation_style;
    let bucket = temporal::bucket_of(features);

    let mut clauses = vec![templates::opening_clause(style, bucket)];
    for feature in salient_features(features) {
        clauses.push(templates::feature_clause(style, feature));
    }
    clauses.push(templates::closing_clause(style, meaning));

    let human_explanation = vocabulary.apply(&clauses.join(" "));

    let mut actions: Vec<String> = templates::base_actions(bracket)
        .iter()
        .map(|a| a.to_string())
        .collect();
    if bucket.map_or(false, |b| b.is_off_hours()) {
        actions.push(templates::NIGHT_ACTION.to_string());
    }
    let security_focused = profile
        .focus_areas
        .iter()
        .any(|a| matches!(a.to_lowercase().as_str(), "security" | "safety"));
    if security_focused && bracket >= SignificanceBracket::Medium {
        actions.push(templates::SECURITY_REVIEW_ACTION.to_string());
    }
    let recommended_actions = actions.iter().map(|a| vocabulary.apply(a)).collect();

    Rendering {
        human_explanation,
        recommended_actions,
    }
}

/// Top-K features by confidence. The temporal feature is excluded - the
/// opening clause already states it. Stable sort keeps extraction order
/// for equal confidences.
fn salient_features(features: &[SymbolicFeature]) -> Vec<&SymbolicFeature> {
    let mut candidates: Vec<&SymbolicFeature> = features
        .iter()
        .filter(|f| f.category != FeatureCategory::Temporal)
        .collect();
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(SALIENT_FEATURE_COUNT);
    candidates
}

// ============================================================================
// TESTS
// ============================================================================
