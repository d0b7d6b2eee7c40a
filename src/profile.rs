//! Brand Profile - Per-brand customization bundle
//!
//! Vocabulary, style, focus areas and feature gating. Configured once,
//! read-only during processing, passed explicitly into every stage so
//! the pipeline stays reentrant across brands and events.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::reasoning::rules::EngineTuning;

// ============================================================================
// FEATURE GATE NAMES
// ============================================================================

/// Gate for the whole reasoning stage.
pub const FEATURE_REASONING: &str = "reasoning";
/// Gate for the explanation renderer.
pub const FEATURE_EXPLANATIONS: &str = "explanations";

// ============================================================================
// EXPLANATION STYLE
// ============================================================================

/// Rendering style. All styles express identical facts; only the
/// phrasing differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplanationStyle {
    #[default]
    Professional,
    Casual,
    Technical,
}

impl ExplanationStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExplanationStyle::Professional => "professional",
            ExplanationStyle::Casual => "casual",
            ExplanationStyle::Technical => "technical",
        }
    }
}

impl FromStr for ExplanationStyle {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "professional" => Ok(ExplanationStyle::Professional),
            "casual" => Ok(ExplanationStyle::Casual),
            "technical" => Ok(ExplanationStyle::Technical),
            other => Err(EngineError::Configuration(format!(
                "unknown explanation_style `{}`",
                other
            ))),
        }
    }
}

// ============================================================================
// BRAND PROFILE
// ============================================================================

/// Configuration for brand licensing and customization.
///
/// Quota fields are carried for the surrounding API layer and never
/// read by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandProfile {
    pub brand_name: String,
    /// Opaque license key, not interpreted by the core.
    pub license_key: String,
    #[serde(default)]
    pub explanation_style: ExplanationStyle,
    /// term -> replacement, applied case-insensitively to rendered text.
    #[serde(default)]
    pub custom_vocabulary: BTreeMap<String, String>,
    /// Domain tags that boost matching reasoning steps.
    #[serde(default)]
    pub focus_areas: BTreeSet<String>,
    /// Feature gates. Empty set = everything enabled; a non-empty set
    /// is an allow-list of stage and operation names.
    #[serde(default)]
    pub enabled_features: BTreeSet<String>,
    /// Quota: consumed only by the external API layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_request_limit: Option<u32>,
    /// Quota: consumed only by the external API layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_per_minute: Option<u32>,
    /// Brand-adjustable scoring constants (weights, brackets, falloffs).
    #[serde(default)]
    pub tuning: EngineTuning,
}

impl BrandProfile {
    pub fn new(brand_name: &str, license_key: &str) -> Self {
        Self {
            brand_name: brand_name.to_string(),
            license_key: license_key.to_string(),
            explanation_style: ExplanationStyle::default(),
            custom_vocabulary: BTreeMap::new(),
            focus_areas: BTreeSet::new(),
            enabled_features: BTreeSet::new(),
            daily_request_limit: None,
            rate_limit_per_minute: None,
            tuning: EngineTuning::default(),
        }
    }

    pub fn with_style(mut self, style: ExplanationStyle) -> Self {
        self.explanation_style = style;
        self
    }

    pub fn with_vocabulary(mut self, vocabulary: BTreeMap<String, String>) -> Self {
        self.custom_vocabulary = vocabulary;
        self
    }

    pub fn with_vocabulary_entry(mut self, term: &str, replacement: &str) -> Self {
        self.custom_vocabulary
            .insert(term.to_string(), replacement.to_string());
        self
    }

    pub fn with_focus_areas<I: IntoIterator<Item = S>, S: Into<String>>(
        mut self,
        areas: I,
    ) -> Self {
        self.focus_areas = areas.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_enabled_features<I: IntoIterator<Item = S>, S: Into<String>>(
        mut self,
        features: I,
    ) -> Self {
        self.enabled_features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tuning(mut self, tuning: EngineTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Check a stage or operation gate.
    ///
    /// An empty `enabled_features` set enables everything; otherwise the
    /// set is an allow-list.
    pub fn is_enabled(&self, feature: &str) -> bool {
        self.enabled_features.is_empty() || self.enabled_features.contains(feature)
    }

    /// Validate the profile at construction time, before any event is
    /// processed with it.
    pub fn validate(&self) -> EngineResult<()> {
        if self.brand_name.trim().is_empty() {
            return Err(EngineError::Configuration(
                "brand_name must be non-empty".to_string(),
            ));
        }
        for (term, replacement) in &self.custom_vocabulary {
            if term.trim().is_empty() {
                return Err(EngineError::Configuration(
                    "custom_vocabulary contains an empty term".to_string(),
                ));
            }
            if replacement.trim().is_empty() {
                return Err(EngineError::Configuration(format!(
                    "custom_vocabulary replacement for `{}` is empty",
                    term
                )));
            }
        }
        self.tuning.validate()?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
