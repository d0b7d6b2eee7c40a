//! Feature Extractor - EventData -> ordered symbolic features
//!
//! Total function: missing optional inputs degrade by omitting the
//! features they would have produced, never by failing. Output order is
//! fixed: objects (input order), sensors (canonical table order),
//! temporal, context.

pub mod objects;
pub mod sensors;
pub mod temporal;


pub use temporal::TimeBucket;

use chrono::{DateTime, Utc};

use crate::event::EventData;
use crate::reasoning::rules::EngineTuning;
use crate::types::SymbolicFeature;

/// Extract all symbolic features for one event.
///
/// `effective_time` is the event timestamp, already defaulted to
/// processing time by the orchestrator when the event carried none.
pub fn extract(
    event: &EventData,
    effective_time: DateTime<Utc>,
    tuning: &EngineTuning,
) -> Vec<SymbolicFeature> {
    let mut features = Vec::new();

    objects::extract(
        &event.detected_objects,
        tuning.min_object_confidence,
        &mut features,
    );
    sensors::extract(&event.sensor_data, &mut features);
    temporal::extract_temporal(effective_time, &mut features);
    temporal::extract_context(event, &mut features);

    log::debug!(
        "Extracted {} symbolic features for event {}",
        features.len(),
        event.event_id
    );
    features
}
