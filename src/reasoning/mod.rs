//! Reasoning Stage - fixed multi-step inference over symbolic features
//!
//! Executes a fixed ordered set of operations, each producing exactly
//! one auditable `ReasoningStep`. Operations disabled through the brand
//! profile are skipped, never erroring. Deterministic: identical
//! features and profile yield bit-identical output.

pub mod rules;

use std::collections::BTreeMap;

use crate::error::{EngineError, EngineResult};
use crate::event::EventData;
use crate::features::temporal;
use crate::profile::BrandProfile;
use crate::types::{
    FeatureCategory, ReasoningOp, ReasoningStep, SignificanceBracket, SymbolicFeature,
};

/// Everything the reasoning stage hands to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct ReasoningOutcome {
    pub steps: Vec<ReasoningStep>,
    pub significance_score: f32,
    pub bracket: SignificanceBracket,
    pub meaning: String,
}

// ============================================================================
// STAGE ENTRY POINT
// ============================================================================

/// Run the fixed operation sequence. The event itself is only consulted
/// for context/location cross-referencing; all other signal comes from
/// the extracted features.
pub fn run(
    event: &EventData,
    features: &[SymbolicFeature],
    profile: &BrandProfile,
) -> EngineResult<ReasoningOutcome> {
    let mut steps: Vec<ReasoningStep> = Vec::new();
    let mut next_id: u32 = 1;
    let mut emit = |steps: &mut Vec<ReasoningStep>, op: ReasoningOp, confidence: f32, explanation: String| {
        steps.push(ReasoningStep {
            step_id: next_id,
            operation: op,
            confidence,
            explanation,
        });
        next_id += 1;
    };

    if profile.is_enabled(ReasoningOp::FeatureAggregation.as_str()) {
        let (confidence, explanation) = aggregation_step(features);
        emit(&mut steps, ReasoningOp::FeatureAggregation, confidence, explanation);
    }

    if profile.is_enabled(ReasoningOp::TemporalContext.as_str()) {
        let (confidence, explanation) = temporal_step(features);
        emit(&mut steps, ReasoningOp::TemporalContext, confidence, explanation);
    }

    if profile.is_enabled(ReasoningOp::ContextualInference.as_str()) {
        let (confidence, explanation) = contextual_step(event, profile);
        emit(&mut steps, ReasoningOp::ContextualInference, confidence, explanation);
    }

    if !profile.is_enabled(ReasoningOp::SignificanceSynthesis.as_str()) {
        // Without synthesis there is no principled combination; fall
        // back to the single-feature heuristic and leave the event
        // unclassified, keeping the steps already produced.
        let score = fallback_score(features);
        return Ok(ReasoningOutcome {
            steps,
            significance_score: score,
            bracket: profile.tuning.brackets.bracket_for(score),
            meaning: "unclassified".to_string(),
        });
    }

    let (score, explanation) = synthesize(&steps, profile)?;
    let bracket = profile.tuning.brackets.bracket_for(score);
    let meaning = meaning_for(dominant_category(features), bracket).to_string();
    emit(&mut steps, ReasoningOp::SignificanceSynthesis, score, explanation);

    Ok(ReasoningOutcome {
        steps,
        significance_score: score,
        bracket,
        meaning,
    })
}

/// Fallback scoring when the reasoning stage (or synthesis) is
/// disabled: the strongest detected object speaks for the event.
/// Sensor, temporal and context features carry structural confidences
/// (often a fixed 1.0) and are excluded from this heuristic.
pub fn fallback_score(features: &[SymbolicFeature]) -> f32 {
    features
        .iter()
        .filter(|f| f.category == FeatureCategory::Object)
        .map(|f| f.confidence)
        .fold(0.0_f32, f32::max)
        .clamp(0.0, 1.0)
}

// ============================================================================
// INDIVIDUAL OPERATIONS
// ============================================================================

fn aggregation_step(features: &[SymbolicFeature]) -> (f32, String) {
    if features.is_empty() {
        return (
            0.0,
            "No symbolic features could be derived from the event data".to_string(),
        );
    }

    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for f in features {
        *counts.entry(f.category.as_str()).or_insert(0) += 1;
    }
    let breakdown: Vec<String> = counts
        .iter()
        .map(|(cat, n)| format!("{} {}", n, cat))
        .collect();

    let mean =
        features.iter().map(|f| f.confidence).sum::<f32>() / features.len() as f32;

    (
        mean.clamp(0.0, 1.0),
        format!(
            "Aggregated {} symbolic features ({})",
            features.len(),
            breakdown.join(", ")
        ),
    )
}

fn temporal_step(features: &[SymbolicFeature]) -> (f32, String) {
    match temporal::bucket_of(features) {
        Some(bucket) if bucket.is_off_hours() => (
            bucket.interest(),
            "Activity during night hours is outside normal patterns and treated as elevated interest"
                .to_string(),
        ),
        Some(bucket) => (
            bucket.interest(),
            format!(
                "Activity during {} hours is consistent with expected daily patterns",
                bucket.as_str()
            ),
        ),
        None => (
            rules::NO_TEMPORAL_CONFIDENCE,
            "No temporal feature was derivable for this event".to_string(),
        ),
    }
}

fn contextual_step(event: &EventData, profile: &BrandProfile) -> (f32, String) {
    if profile.focus_areas.is_empty() || event.context.is_empty() {
        return (
            0.0,
            "No contextual signals to cross-reference against brand focus areas".to_string(),
        );
    }

    let areas: Vec<String> = profile
        .focus_areas
        .iter()
        .map(|a| a.to_lowercase())
        .collect();
    let matches = event
        .context
        .iter()
        .filter(|(key, value)| {
            let key = key.to_lowercase();
            let value = value.to_lowercase();
            areas.iter().any(|a| key.contains(a) || value.contains(a))
        })
        .count();

    let fraction = matches as f32 / event.context.len() as f32;
    (
        fraction.clamp(0.0, 1.0),
        format!(
            "{} of {} context entries match brand focus areas",
            matches,
            event.context.len()
        ),
    )
}

/// Weighted mean of the contributing step confidences. A focus area in
/// the boost table raises its step's weight by `tuning.focus_boost`.
fn synthesize(steps: &[ReasoningStep], profile: &BrandProfile) -> EngineResult<(f32, String)> {
    let mut weighted_sum = 0.0_f32;
    let mut weight_total = 0.0_f32;
    for step in steps {
        let mut weight = profile.tuning.weights.weight_for(step.operation);
        let boosted = profile
            .focus_areas
            .iter()
            .any(|area| rules::boosted_step(&area.to_lowercase()) == Some(step.operation));
        if boosted {
            weight *= profile.tuning.focus_boost;
        }
        weighted_sum += weight * step.confidence;
        weight_total += weight;
    }

    if weight_total <= 0.0 {
        // Synthesis was requested but every upstream step it depends on
        // is disabled. Refusing beats presenting a hollow score.
        return Err(EngineError::Stage {
            stage: "significance_synthesis",
            reason: "no contributing reasoning steps".to_string(),
        });
    }

    let score = (weighted_sum / weight_total).clamp(0.0, 1.0);
    Ok((
        score,
        format!(
            "Synthesized significance {:.2} from {} contributing steps",
            score,
            steps.len()
        ),
    ))
}

// ============================================================================
// MEANING SELECTION
// ============================================================================

/// Category with the highest summed confidence; ties resolve in fixed
/// category order.
pub(crate) fn dominant_category(features: &[SymbolicFeature]) -> Option<FeatureCategory> {
    let mut totals: BTreeMap<FeatureCategory, f32> = BTreeMap::new();
    for f in features {
        *totals.entry(f.category).or_insert(0.0) += f.confidence;
    }
    totals
        .into_iter()
        .max_by(|(cat_a, sum_a), (cat_b, sum_b)| {
            sum_a
                .partial_cmp(sum_b)
                .unwrap_or(std::cmp::Ordering::Equal)
                // On equal sums, prefer the earlier category.
                .then_with(|| cat_b.cmp(cat_a))
        })
        .map(|(cat, _)| cat)
}

pub(crate) fn meaning_for(
    dominant: Option<FeatureCategory>,
    bracket: SignificanceBracket,
) -> &'static str {
    use FeatureCategory::*;
    use SignificanceBracket::*;

    match (dominant, bracket) {
        (Some(Object), Low) => "routine activity with standard patterns",
        (Some(Object), Medium) => "notable activity with moderate importance",
        (Some(Object), High) => "significant activity requiring attention",
        (Some(Sensor), Low) => "stable environmental readings",
        (Some(Sensor), Medium) => "environmental change worth noting",
        (Some(Sensor), High) => "environmental anomaly requiring attention",
        (Some(Temporal), Low) => "routine activity for the time of day",
        (Some(Temporal), Medium) => "off-hours activity worth noting",
        (Some(Temporal), High) => "unusual off-hours activity requiring attention",
        (Some(Context), Low) => "routine event in a known context",
        (Some(Context), Medium) => "contextual match with moderate importance",
        (Some(Context), High) => "high-priority contextual match",
        (None, _) => "unclassified",
    }
}

// ============================================================================
// TESTS
// ============================================================================
