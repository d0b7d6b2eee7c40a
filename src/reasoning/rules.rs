//! Reasoning Rules & Thresholds
//!
//! Constants and brand-configurable tuning. No stage logic here.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::types::{ReasoningOp, SignificanceBracket};

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Objects below this detection confidence produce no feature.
pub const MIN_OBJECT_CONFIDENCE: f32 = 0.5;

/// At or above this score = Medium bracket (inclusive lower bound).
pub const MEDIUM_THRESHOLD: f32 = 0.4;

/// At or above this score = High bracket (inclusive lower bound).
pub const HIGH_THRESHOLD: f32 = 0.7;

/// Default weight of every reasoning step in significance synthesis.
pub const STEP_WEIGHT: f32 = 1.0;

/// Weight multiplier applied to a step boosted by a matching focus area.
pub const FOCUS_BOOST: f32 = 1.5;

/// Temporal-context interest by time bucket. Night counts as off-hours
/// and carries full interest; see `reasoning::temporal_step`.
pub const NIGHT_INTEREST: f32 = 1.0;
pub const EVENING_INTEREST: f32 = 0.7;
pub const MORNING_INTEREST: f32 = 0.5;
pub const AFTERNOON_INTEREST: f32 = 0.4;

/// Temporal step confidence when no temporal feature was derivable.
pub const NO_TEMPORAL_CONFIDENCE: f32 = 0.2;

/// Which reasoning step a focus area boosts.
pub fn boosted_step(focus_area: &str) -> Option<ReasoningOp> {
    match focus_area {
        "security" | "safety" => Some(ReasoningOp::TemporalContext),
        "operations" => Some(ReasoningOp::FeatureAggregation),
        "compliance" => Some(ReasoningOp::ContextualInference),
        _ => None,
    }
}

// ============================================================================
// BRACKET THRESHOLDS
// ============================================================================

/// Bracket boundaries, brand-configurable. Semantics are always
/// inclusive-lower / exclusive-upper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BracketThresholds {
    /// Scores >= this are Medium (or High).
    pub medium_min: f32,
    /// Scores >= this are High.
    pub high_min: f32,
}

impl Default for BracketThresholds {
    fn default() -> Self {
        Self {
            medium_min: MEDIUM_THRESHOLD,
            high_min: HIGH_THRESHOLD,
        }
    }
}

impl BracketThresholds {
    pub fn bracket_for(&self, score: f32) -> SignificanceBracket {
        if score >= self.high_min {
            SignificanceBracket::High
        } else if score >= self.medium_min {
            SignificanceBracket::Medium
        } else {
            SignificanceBracket::Low
        }
    }
}

// ============================================================================
// STEP WEIGHTS
// ============================================================================

/// Base weight per contributing step. Equal by default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepWeights {
    pub feature_aggregation: f32,
    pub temporal_context: f32,
    pub contextual_inference: f32,
}

impl Default for StepWeights {
    fn default() -> Self {
        Self {
            feature_aggregation: STEP_WEIGHT,
            temporal_context: STEP_WEIGHT,
            contextual_inference: STEP_WEIGHT,
        }
    }
}

impl StepWeights {
    pub fn weight_for(&self, op: ReasoningOp) -> f32 {
        match op {
            ReasoningOp::FeatureAggregation => self.feature_aggregation,
            ReasoningOp::TemporalContext => self.temporal_context,
            ReasoningOp::ContextualInference => self.contextual_inference,
            // Synthesis consumes the others; it carries no weight itself.
            ReasoningOp::SignificanceSynthesis => 0.0,
        }
    }
}

// ============================================================================
// ENGINE TUNING
// ============================================================================

/// Brand-adjustable scoring constants. The exact weighting scheme is a
/// design choice, so every knob is exposed here rather than hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineTuning {
    pub min_object_confidence: f32,
    pub weights: StepWeights,
    pub focus_boost: f32,
    pub brackets: BracketThresholds,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            min_object_confidence: MIN_OBJECT_CONFIDENCE,
            weights: StepWeights::default(),
            focus_boost: FOCUS_BOOST,
            brackets: BracketThresholds::default(),
        }
    }
}

impl EngineTuning {
    pub fn validate(&self) -> EngineResult<()> {
        if !(0.0..=1.0).contains(&self.min_object_confidence) {
            return Err(EngineError::Configuration(format!(
                "min_object_confidence {} is outside [0, 1]",
                self.min_object_confidence
            )));
        }
        let b = &self.brackets;
        if !(0.0..=1.0).contains(&b.medium_min)
            || !(0.0..=1.0).contains(&b.high_min)
            || b.medium_min > b.high_min
        {
            return Err(EngineError::Configuration(format!(
                "bracket thresholds ({}, {}) must be ordered within [0, 1]",
                b.medium_min, b.high_min
            )));
        }
        if self.focus_boost < 1.0 {
            return Err(EngineError::Configuration(format!(
                "focus_boost {} must be >= 1.0",
                self.focus_boost
            )));
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_boundaries_are_inclusive_lower() {
        let brackets = BracketThresholds::default();
        assert_eq!(brackets.bracket_for(0.39), SignificanceBracket::Low);
        assert_eq!(brackets.bracket_for(0.4), SignificanceBracket::Medium);
        assert_eq!(brackets.bracket_for(0.69), SignificanceBracket::Medium);
        assert_eq!(brackets.bracket_for(0.7), SignificanceBracket::High);
        assert_eq!(brackets.bracket_for(1.0), SignificanceBracket::High);
    }

    #[test]
    fn test_focus_boost_table() {
        assert_eq!(boosted_step("security"), Some(ReasoningOp::TemporalContext));
        assert_eq!(boosted_step("operations"), Some(ReasoningOp::FeatureAggregation));
        assert_eq!(boosted_step("retail"), None);
    }

    #[test]
    fn test_tuning_validation() {
        assert!(EngineTuning::default().validate().is_ok());

        let bad = EngineTuning {
            brackets: BracketThresholds {
                medium_min: 0.8,
                high_min: 0.4,
            },
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
