//! Core pipeline types
//!
//! Data structures only - no stage logic lives here.
//! Serde field order on `ProcessingResult` matches the canonical
//! response shape consumed by the API layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VALUE / CATEGORY
// ============================================================================

/// Value carried by a symbolic feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl std::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureValue::Bool(b) => write!(f, "{}", b),
            FeatureValue::Number(n) => write!(f, "{}", n),
            FeatureValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Category a feature was extracted from. Internal - not part of the
/// wire shape. Ordering doubles as the dominance tie-breaker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum FeatureCategory {
    Object,
    Sensor,
    Temporal,
    #[default]
    Context,
}

impl FeatureCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureCategory::Object => "object",
            FeatureCategory::Sensor => "sensor",
            FeatureCategory::Temporal => "temporal",
            FeatureCategory::Context => "context",
        }
    }
}

// ============================================================================
// SYMBOLIC FEATURE
// ============================================================================

/// A discrete, named, confidence-scored fact extracted from raw event
/// data. Scoped to one processing call; sequence order is extraction
/// order, not importance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolicFeature {
    /// Name from the closed feature vocabulary.
    pub feature_name: String,
    pub feature_value: FeatureValue,
    /// Confidence in the extraction, within [0, 1].
    pub confidence: f32,
    /// Pre-substitution template text. Brand vocabulary is applied to
    /// rendered output only, never here.
    pub human_description: String,
    #[serde(skip)]
    pub category: FeatureCategory,
}

impl SymbolicFeature {
    pub fn new(
        name: &str,
        value: FeatureValue,
        confidence: f32,
        description: String,
        category: FeatureCategory,
    ) -> Self {
        Self {
            feature_name: name.to_string(),
            feature_value: value,
            confidence,
            human_description: description,
            category,
        }
    }
}

// ============================================================================
// REASONING STEPS
// ============================================================================

/// Closed set of reasoning operations, executed in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningOp {
    FeatureAggregation,
    TemporalContext,
    ContextualInference,
    SignificanceSynthesis,
}

impl ReasoningOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningOp::FeatureAggregation => "feature_aggregation",
            ReasoningOp::TemporalContext => "temporal_context",
            ReasoningOp::ContextualInference => "contextual_inference",
            ReasoningOp::SignificanceSynthesis => "significance_synthesis",
        }
    }
}

impl std::fmt::Display for ReasoningOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One auditable step of the reasoning stage. Steps read outputs of
/// earlier steps explicitly; there is no hidden shared state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningStep {
    /// 1-based, monotonic within the call.
    pub step_id: u32,
    pub operation: ReasoningOp,
    pub confidence: f32,
    pub explanation: String,
}

// ============================================================================
// SIGNIFICANCE BRACKET
// ============================================================================

/// Score bracket driving meaning selection and recommended actions.
///
/// Boundaries are inclusive-lower / exclusive-upper: a score of exactly
/// 0.4 is Medium, not Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignificanceBracket {
    Low,
    Medium,
    High,
}

impl SignificanceBracket {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignificanceBracket::Low => "low",
            SignificanceBracket::Medium => "medium",
            SignificanceBracket::High => "high",
        }
    }
}

impl std::fmt::Display for SignificanceBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PROCESSING RESULT
// ============================================================================

/// The pipeline's sole output. Immutable; not persisted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub event_id: String,
    pub processed_at: DateTime<Utc>,
    pub meaning: String,
    pub human_explanation: String,
    /// Overall significance, within [0, 1].
    pub significance_score: f32,
    pub symbolic_features: Vec<SymbolicFeature>,
    pub reasoning_steps: Vec<ReasoningStep>,
    pub recommended_actions: Vec<String>,
    pub processing_time_ms: f64,
}

impl ProcessingResult {
    /// Compact JSON form for structured logging.
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "event_id": self.event_id,
            "meaning": self.meaning,
            "significance_score": self.significance_score,
            "feature_count": self.symbolic_features.len(),
            "step_count": self.reasoning_steps.len(),
            "processing_time_ms": self.processing_time_ms,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
