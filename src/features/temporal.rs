//! Temporal and context features
//!
//! The time bucket drives the `temporal_context` reasoning step later;
//! night counts as off-hours with elevated interest.

use chrono::{DateTime, Timelike, Utc};

use crate::event::EventData;
use crate::reasoning::rules;
use crate::types::{FeatureCategory, FeatureValue, SymbolicFeature};

// ============================================================================
// TIME BUCKETS
// ============================================================================

/// Hour-of-day bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBucket {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeBucket {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimeBucket::Morning,
            12..=17 => TimeBucket::Afternoon,
            18..=21 => TimeBucket::Evening,
            _ => TimeBucket::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeBucket::Morning => "morning",
            TimeBucket::Afternoon => "afternoon",
            TimeBucket::Evening => "evening",
            TimeBucket::Night => "night",
        }
    }

    /// Interest factor used by the temporal reasoning step. Off-hours
    /// activity is the elevated-interest case.
    pub fn interest(&self) -> f32 {
        match self {
            TimeBucket::Night => rules::NIGHT_INTEREST,
            TimeBucket::Evening => rules::EVENING_INTEREST,
            TimeBucket::Morning => rules::MORNING_INTEREST,
            TimeBucket::Afternoon => rules::AFTERNOON_INTEREST,
        }
    }

    pub fn is_off_hours(&self) -> bool {
        matches!(self, TimeBucket::Night)
    }

    fn description(&self) -> &'static str {
        match self {
            TimeBucket::Morning => {
                "Event occurred during morning hours, suggesting daily routine activity"
            }
            TimeBucket::Afternoon => {
                "Event occurred during the afternoon, indicating an active daytime period"
            }
            TimeBucket::Evening => {
                "Event occurred during the evening, suggesting end-of-day activity"
            }
            TimeBucket::Night => {
                "Event occurred during night hours, indicating off-hours activity"
            }
        }
    }
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// One `time_of_day` feature from the effective event timestamp.
pub fn extract_temporal(effective_time: DateTime<Utc>, out: &mut Vec<SymbolicFeature>) {
    let bucket = TimeBucket::from_hour(effective_time.hour());
    out.push(SymbolicFeature::new(
        "time_of_day",
        FeatureValue::Text(bucket.as_str().to_string()),
        1.0,
        bucket.description().to_string(),
        FeatureCategory::Temporal,
    ));
}

/// Context features: currently location presence only.
pub fn extract_context(event: &EventData, out: &mut Vec<SymbolicFeature>) {
    if event.location.is_some() {
        out.push(SymbolicFeature::new(
            "location_tracked",
            FeatureValue::Bool(true),
            1.0,
            "Event carries location information, enabling spatial context".to_string(),
            FeatureCategory::Context,
        ));
    }
}

/// Bucket recorded in a feature list, if a temporal feature is present.
pub fn bucket_of(features: &[SymbolicFeature]) -> Option<TimeBucket> {
    features
        .iter()
        .find(|f| f.feature_name == "time_of_day")
        .and_then(|f| match &f.feature_value {
            FeatureValue::Text(s) => match s.as_str() {
                "morning" => Some(TimeBucket::Morning),
                "afternoon" => Some(TimeBucket::Afternoon),
                "evening" => Some(TimeBucket::Evening),
                "night" => Some(TimeBucket::Night),
                _ => None,
            },
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_hour_buckets() {
        assert_eq!(TimeBucket::from_hour(2), TimeBucket::Night);
        assert_eq!(TimeBucket::from_hour(6), TimeBucket::Morning);
        assert_eq!(TimeBucket::from_hour(11), TimeBucket::Morning);
        assert_eq!(TimeBucket::from_hour(14), TimeBucket::Afternoon);
        assert_eq!(TimeBucket::from_hour(19), TimeBucket::Evening);
        assert_eq!(TimeBucket::from_hour(22), TimeBucket::Night);
    }

    #[test]
    fn test_night_has_highest_interest() {
        assert!(TimeBucket::Night.interest() > TimeBucket::Afternoon.interest());
        assert!(TimeBucket::Night.is_off_hours());
        assert!(!TimeBucket::Afternoon.is_off_hours());
    }

    #[test]
    fn test_temporal_feature_round_trip() {
        let two_am = Utc.with_ymd_and_hms(2026, 3, 14, 2, 0, 0).unwrap();
        let mut out = Vec::new();
        extract_temporal(two_am, &mut out);

        assert_eq!(out[0].feature_name, "time_of_day");
        assert_eq!(bucket_of(&out), Some(TimeBucket::Night));
    }
}
