//! Event Data - Input types from detection hardware
//!
//! Wire shape (bit-exact with the API layer):
//! `{event_id, event_type, timestamp?, detected_objects:[{name,confidence,bbox?}],
//!   sensor_data:{...}, location?:{lat,lng}, context?:{...}}`

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

// ============================================================================
// EVENT TYPE
// ============================================================================

/// Closed set of event types accepted at the boundary.
///
/// Modeled as a tagged enum so unrecognized wire values are rejected at
/// deserialization instead of silently accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    ObjectDetection,
    MotionDetection,
    FacialRecognition,
    AnomalyDetection,
    Custom,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::ObjectDetection => "object_detection",
            EventType::MotionDetection => "motion_detection",
            EventType::FacialRecognition => "facial_recognition",
            EventType::AnomalyDetection => "anomaly_detection",
            EventType::Custom => "custom",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SENSOR VALUES
// ============================================================================

/// A single sensor reading. Boolean, numeric or free-text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl SensorValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SensorValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            SensorValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

// ============================================================================
// DETECTED OBJECTS / LOCATION
// ============================================================================

/// One detected object with its detection confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    /// Object label from the upstream detector ("person", "car", ...)
    #[serde(rename = "name")]
    pub label: String,
    /// Detection confidence, must be within [0, 1]
    pub confidence: f32,
    /// Optional bounding box: [x, y, width, height]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f32; 4]>,
}

impl DetectedObject {
    pub fn new(label: &str, confidence: f32) -> Self {
        Self {
            label: label.to_string(),
            confidence,
            bbox: None,
        }
    }
}

/// Latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

// ============================================================================
// EVENT DATA
// ============================================================================

/// Input event data from hardware / object detection systems.
///
/// Consumed once per processing call; the pipeline never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    /// Unique identifier, used as correlation key. Must be non-empty.
    pub event_id: String,
    /// Type of event detected.
    pub event_type: EventType,
    /// When the event occurred. Defaults to processing time when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Detected objects with confidence scores, in detector order.
    #[serde(default)]
    pub detected_objects: Vec<DetectedObject>,
    /// Additional sensor readings keyed by sensor name.
    #[serde(default)]
    pub sensor_data: BTreeMap<String, SensorValue>,
    /// Location coordinates if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    /// Additional contextual information (camera id, zone, ...).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
}

impl EventData {
    pub fn new(event_id: &str, event_type: EventType) -> Self {
        Self {
            event_id: event_id.to_string(),
            event_type,
            timestamp: None,
            detected_objects: Vec::new(),
            sensor_data: BTreeMap::new(),
            location: None,
            context: BTreeMap::new(),
        }
    }

    /// Validate the event before any stage runs.
    ///
    /// Out-of-range confidences are rejected, not clamped. The event
    /// type is already closed by the enum, so only value-level checks
    /// remain here.
    pub fn validate(&self) -> EngineResult<()> {
        if self.event_id.trim().is_empty() {
            return Err(EngineError::validation("event_id", "must be non-empty"));
        }

        for (i, obj) in self.detected_objects.iter().enumerate() {
            if obj.label.trim().is_empty() {
                return Err(EngineError::validation(
                    &format!("detected_objects[{}].name", i),
                    "must be non-empty",
                ));
            }
            if !obj.confidence.is_finite() || !(0.0..=1.0).contains(&obj.confidence) {
                return Err(EngineError::validation(
                    &format!("detected_objects[{}].confidence", i),
                    format!("{} is outside [0, 1]", obj.confidence),
                ));
            }
        }

        if let Some(loc) = &self.location {
            if !(-90.0..=90.0).contains(&loc.lat) || !(-180.0..=180.0).contains(&loc.lng) {
                return Err(EngineError::validation(
                    "location",
                    format!("({}, {}) is not a valid coordinate pair", loc.lat, loc.lng),
                ));
            }
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
