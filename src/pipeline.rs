//! Pipeline Orchestrator
//!
//! Sequences extraction -> reasoning -> rendering for one event,
//! applies feature gating from the brand profile, times execution and
//! assembles the immutable result. Batch processing treats every event
//! as independent: one bad event never aborts its siblings.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;

use crate::error::EngineResult;
use crate::event::EventData;
use crate::explain::{self, Rendering};
use crate::features;
use crate::profile::{BrandProfile, FEATURE_EXPLANATIONS, FEATURE_REASONING};
use crate::reasoning::{self, ReasoningOutcome};
use crate::types::{ProcessingResult, SymbolicFeature};

/// Default bound on an injected custom scorer call.
pub const DEFAULT_SCORER_TIMEOUT: Duration = Duration::from_millis(250);

// ============================================================================
// CUSTOM SCORER EXTENSION POINT
// ============================================================================

/// Injected brand-specific significance model.
///
/// The pipeline bounds every call with an explicit timeout; on timeout
/// or error it keeps the synthesized heuristic score, so the core never
/// blocks indefinitely on an external dependency. Retries, if any,
/// belong to the implementation behind this trait.
pub trait CustomScorer: Send + Sync + 'static {
    fn name(&self) -> &str {
        "custom"
    }

    /// Significance score in [0, 1] for the extracted features.
    fn score(&self, features: &[SymbolicFeature]) -> Result<f32, String>;
}

// ============================================================================
// PIPELINE
// ============================================================================

/// The metacognition pipeline. Holds no per-event state: concurrent
/// calls share only the read-only profile the caller passes in.
#[derive(Default)]
pub struct Pipeline {
    scorer: Option<Arc<dyn CustomScorer>>,
    scorer_timeout: Option<Duration>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject a brand-specific scorer, bounded by the default timeout.
    pub fn with_scorer(mut self, scorer: Arc<dyn CustomScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn with_scorer_timeout(mut self, timeout: Duration) -> Self {
        self.scorer_timeout = Some(timeout);
        self
    }

    /// Process one event through the complete pipeline.
    ///
    /// Fails with a validation error before any stage runs if the event
    /// is malformed, and with a configuration error if the profile is.
    pub fn process_event(
        &self,
        event: &EventData,
        profile: &BrandProfile,
    ) -> EngineResult<ProcessingResult> {
        let started = Instant::now();

        profile.validate()?;
        event.validate()?;

        let processed_at = Utc::now();
        // The temporal feature derives from the event's own timestamp;
        // processing time is only the documented default for events
        // that carry none.
        let effective_time = event.timestamp.unwrap_or(processed_at);

        let symbolic_features = features::extract(event, effective_time, &profile.tuning);

        let mut outcome = if profile.is_enabled(FEATURE_REASONING) {
            reasoning::run(event, &symbolic_features, profile)?
        } else {
            let score = reasoning::fallback_score(&symbolic_features);
            ReasoningOutcome {
                steps: Vec::new(),
                significance_score: score,
                bracket: profile.tuning.brackets.bracket_for(score),
                meaning: "unclassified".to_string(),
            }
        };

        if profile.is_enabled(FEATURE_REASONING) {
            if let Some(score) = self.run_custom_scorer(&symbolic_features) {
                outcome.significance_score = score;
                outcome.bracket = profile.tuning.brackets.bracket_for(score);
                outcome.meaning = reasoning::meaning_for(
                    reasoning::dominant_category(&symbolic_features),
                    outcome.bracket,
                )
                .to_string();
            }
        }

        let rendering = if profile.is_enabled(FEATURE_EXPLANATIONS) {
            explain::render(
                &symbolic_features,
                &outcome.meaning,
                outcome.bracket,
                profile,
            )
        } else {
            Rendering {
                human_explanation: String::new(),
                recommended_actions: Vec::new(),
            }
        };

        let result = ProcessingResult {
            event_id: event.event_id.clone(),
            processed_at,
            meaning: outcome.meaning,
            human_explanation: rendering.human_explanation,
            significance_score: outcome.significance_score,
            symbolic_features,
            reasoning_steps: outcome.steps,
            recommended_actions: rendering.recommended_actions,
            processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        };

        log::info!(
            "Processed event {} for brand {} in {:.2}ms",
            result.event_id,
            profile.brand_name,
            result.processing_time_ms
        );
        Ok(result)
    }

    /// Process a batch with continue-on-error semantics. Events are
    /// independent; each result is identical to processing that event
    /// alone.
    pub fn process_batch(
        &self,
        events: &[EventData],
        profile: &BrandProfile,
    ) -> Vec<EngineResult<ProcessingResult>> {
        events
            .iter()
            .map(|event| {
                let result = self.process_event(event, profile);
                if let Err(e) = &result {
                    log::warn!("Batch event {} failed: {}", event.event_id, e);
                }
                result
            })
            .collect()
    }

    /// Run the injected scorer on a helper thread, bounded by the
    /// configured timeout. `None` means: keep the heuristic score.
    fn run_custom_scorer(&self, features: &[SymbolicFeature]) -> Option<f32> {
        let scorer = Arc::clone(self.scorer.as_ref()?);
        let timeout = self.scorer_timeout.unwrap_or(DEFAULT_SCORER_TIMEOUT);
        let name = scorer.name().to_string();

        let owned: Vec<SymbolicFeature> = features.to_vec();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(scorer.score(&owned));
        });

        match rx.recv_timeout(timeout) {
            Ok(Ok(score)) if score.is_finite() => Some(score.clamp(0.0, 1.0)),
            Ok(Ok(score)) => {
                log::warn!("Custom scorer `{}` returned non-finite {}, keeping heuristic score", name, score);
                None
            }
            Ok(Err(reason)) => {
                log::warn!("Custom scorer `{}` failed ({}), keeping heuristic score", name, reason);
                None
            }
            Err(_) => {
                log::warn!("Custom scorer `{}` timed out after {:?}, keeping heuristic score", name, timeout);
                None
            }
        }
    }
}

// ============================================================================
// FREE-FUNCTION INTERFACE
// ============================================================================

/// Process one event with a default pipeline (no custom scorer).
pub fn process_event(
    event: &EventData,
    profile: &BrandProfile,
) -> EngineResult<ProcessingResult> {
    Pipeline::default().process_event(event, profile)
}

/// Process a batch with a default pipeline.
pub fn process_batch(
    events: &[EventData],
    profile: &BrandProfile,
) -> Vec<EngineResult<ProcessingResult>> {
    Pipeline::default().process_batch(events, profile)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::event::{DetectedObject, EventType, SensorValue};
    use crate::profile::ExplanationStyle;
    use crate::types::SignificanceBracket;
    use chrono::{TimeZone, Utc};

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn scenario_event(hour: u32) -> EventData {
        let mut event = EventData::new("scenario-1", EventType::ObjectDetection);
        event.timestamp = Some(Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0).unwrap());
        event.detected_objects = vec![
            DetectedObject::new("person", 0.92),
            DetectedObject::new("car", 0.87),
        ];
        event
            .sensor_data
            .insert("motion".to_string(), SensorValue::Bool(true));
        event
            .sensor_data
            .insert("light_level".to_string(), SensorValue::Number(0.8));
        event
    }

    fn scenario_profile() -> BrandProfile {
        BrandProfile::new("TestBrand", "test-key-123")
            .with_vocabulary_entry("person", "customer")
    }

    #[test]
    fn test_midday_scenario() {
        init_logs();
        let result = process_event(&scenario_event(13), &scenario_profile()).unwrap();

        let names: Vec<&str> = result
            .symbolic_features
            .iter()
            .map(|f| f.feature_name.as_str())
            .collect();
        assert!(names.contains(&"human_activity"));
        assert!(names.contains(&"vehicle_presence"));

        // Vocabulary applied to rendered text only.
        assert!(result.human_explanation.contains("customer"));
        assert!(!result.human_explanation.to_lowercase().contains("person"));

        // No off-hours flag: low-to-medium significance.
        let bracket = scenario_profile()
            .tuning
            .brackets
            .bracket_for(result.significance_score);
        assert!(bracket <= SignificanceBracket::Medium);
    }

    #[test]
    fn test_two_am_outscores_midday() {
        let profile = scenario_profile();
        let day = process_event(&scenario_event(13), &profile).unwrap();
        let night = process_event(&scenario_event(2), &profile).unwrap();

        assert!(night.significance_score > day.significance_score);
    }

    #[test]
    fn test_determinism_modulo_timing() {
        let profile = scenario_profile();
        let event = scenario_event(13);

        let a = process_event(&event, &profile).unwrap();
        let b = process_event(&event, &profile).unwrap();

        assert_eq!(a.event_id, b.event_id);
        assert_eq!(a.meaning, b.meaning);
        assert_eq!(a.human_explanation, b.human_explanation);
        assert_eq!(a.significance_score, b.significance_score);
        assert_eq!(a.symbolic_features, b.symbolic_features);
        assert_eq!(a.reasoning_steps, b.reasoning_steps);
        assert_eq!(a.recommended_actions, b.recommended_actions);
    }

    #[test]
    fn test_no_input_mutation() {
        let profile = scenario_profile();
        let event = scenario_event(13);
        let snapshot = event.clone();

        let _ = process_event(&event, &profile).unwrap();
        assert_eq!(event, snapshot);
    }

    #[test]
    fn test_batch_isolates_invalid_event() {
        init_logs();
        let profile = scenario_profile();
        let mut bad = scenario_event(13);
        bad.event_id = String::new();

        let events = vec![scenario_event(13), bad, scenario_event(2)];
        let results = process_batch(&events, &profile);

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1].as_ref().unwrap_err(),
            EngineError::Validation { .. }
        ));
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_batch_matches_individual_processing() {
        let profile = scenario_profile();
        let events: Vec<EventData> = (0..4)
            .map(|i| {
                let mut e = scenario_event(13);
                e.event_id = uuid::Uuid::new_v4().to_string();
                e.detected_objects[0].confidence = 0.6 + 0.08 * i as f32;
                e
            })
            .collect();

        let batch = process_batch(&events, &profile);
        for (event, batched) in events.iter().zip(&batch) {
            let single = process_event(event, &profile).unwrap();
            let batched = batched.as_ref().unwrap();
            assert_eq!(single.significance_score, batched.significance_score);
            assert_eq!(single.human_explanation, batched.human_explanation);
            assert_eq!(single.reasoning_steps, batched.reasoning_steps);
        }
    }

    #[test]
    fn test_reasoning_disabled_fallback() {
        let profile = scenario_profile().with_enabled_features([FEATURE_EXPLANATIONS]);
        let result = process_event(&scenario_event(13), &profile).unwrap();

        assert!(result.reasoning_steps.is_empty());
        assert_eq!(result.meaning, "unclassified");
        assert_eq!(result.significance_score, 0.92); // max detected-object confidence
        assert!(!result.human_explanation.is_empty());
    }

    #[test]
    fn test_explanations_disabled_still_scores() {
        let profile = scenario_profile().with_enabled_features([
            FEATURE_REASONING,
            "feature_aggregation",
            "temporal_context",
            "contextual_inference",
            "significance_synthesis",
        ]);
        let result = process_event(&scenario_event(13), &profile).unwrap();

        assert!(result.human_explanation.is_empty());
        assert!(result.recommended_actions.is_empty());
        assert!(!result.symbolic_features.is_empty());
        assert_eq!(result.reasoning_steps.len(), 4);
        assert!((0.0..=1.0).contains(&result.significance_score));
    }

    #[test]
    fn test_style_invariance_of_facts() {
        let event = scenario_event(13);
        let mut rendered = Vec::new();
        for style in [
            ExplanationStyle::Professional,
            ExplanationStyle::Casual,
            ExplanationStyle::Technical,
        ] {
            let profile = BrandProfile::new("T", "k").with_style(style);
            rendered.push(process_event(&event, &profile).unwrap());
        }

        // Same meaning, score, features and steps across styles; only
        // the phrasing may differ.
        for result in &rendered[1..] {
            assert_eq!(result.meaning, rendered[0].meaning);
            assert_eq!(result.significance_score, rendered[0].significance_score);
            assert_eq!(result.symbolic_features, rendered[0].symbolic_features);
            assert_eq!(result.reasoning_steps, rendered[0].reasoning_steps);
        }
        assert_ne!(rendered[0].human_explanation, rendered[1].human_explanation);
    }

    #[test]
    fn test_response_wire_shape() {
        let result = process_event(&scenario_event(13), &scenario_profile()).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        let obj = json.as_object().unwrap();

        for key in [
            "event_id",
            "processed_at",
            "meaning",
            "human_explanation",
            "significance_score",
            "symbolic_features",
            "reasoning_steps",
            "recommended_actions",
            "processing_time_ms",
        ] {
            assert!(obj.contains_key(key), "missing response key {}", key);
        }
        assert_eq!(obj.len(), 9);
    }

    // ------------------------------------------------------------------
    // Custom scorer extension point
    // ------------------------------------------------------------------

    struct FixedScorer(f32);

    impl CustomScorer for FixedScorer {
        fn score(&self, _features: &[SymbolicFeature]) -> Result<f32, String> {
            Ok(self.0)
        }
    }

    struct StuckScorer;

    impl CustomScorer for StuckScorer {
        fn name(&self) -> &str {
            "stuck"
        }

        fn score(&self, _features: &[SymbolicFeature]) -> Result<f32, String> {
            thread::sleep(Duration::from_secs(5));
            Ok(0.99)
        }
    }

    #[test]
    fn test_custom_scorer_overrides_score_and_meaning() {
        let pipeline = Pipeline::new().with_scorer(Arc::new(FixedScorer(0.95)));
        let result = pipeline
            .process_event(&scenario_event(13), &scenario_profile())
            .unwrap();

        assert_eq!(result.significance_score, 0.95);
        // Sensor features dominate this scenario by summed confidence.
        assert_eq!(result.meaning, "environmental anomaly requiring attention");
    }

    #[test]
    fn test_stuck_scorer_times_out_to_heuristic() {
        let profile = scenario_profile();
        let baseline = process_event(&scenario_event(13), &profile).unwrap();

        let pipeline = Pipeline::new()
            .with_scorer(Arc::new(StuckScorer))
            .with_scorer_timeout(Duration::from_millis(20));
        let result = pipeline
            .process_event(&scenario_event(13), &profile)
            .unwrap();

        assert_eq!(result.significance_score, baseline.significance_score);
    }

    #[test]
    fn test_scorer_result_clamped() {
        let pipeline = Pipeline::new().with_scorer(Arc::new(FixedScorer(7.0)));
        let result = pipeline
            .process_event(&scenario_event(13), &scenario_profile())
            .unwrap();
        assert_eq!(result.significance_score, 1.0);
    }
}
