//! Sensor features
//!
//! Closed sensor vocabulary, iterated in canonical table order so the
//! output ordering is independent of the caller's map ordering.
//! Boolean sensors report with full confidence; continuous sensors get
//! a linear-falloff confidence from their expected operating range
//! (1.0 inside the range, slope 1/range-width outside, clamped to [0,1]).

use std::collections::BTreeMap;

use crate::event::SensorValue;
use crate::types::{FeatureCategory, FeatureValue, SymbolicFeature};

enum SensorKind {
    Boolean,
    /// Expected operating range (inclusive).
    Continuous { min: f64, max: f64, unit: &'static str },
}

struct SensorSpec {
    key: &'static str,
    feature_name: &'static str,
    kind: SensorKind,
}

/// Canonical sensor table. Order here is the output order.
const SENSOR_TABLE: &[SensorSpec] = &[
    SensorSpec {
        key: "motion",
        feature_name: "motion_activity",
        kind: SensorKind::Boolean,
    },
    SensorSpec {
        key: "door_open",
        feature_name: "entry_activity",
        kind: SensorKind::Boolean,
    },
    SensorSpec {
        key: "light_level",
        feature_name: "ambient_light",
        kind: SensorKind::Continuous { min: 0.1, max: 0.9, unit: "" },
    },
    SensorSpec {
        key: "temperature",
        feature_name: "ambient_temperature",
        kind: SensorKind::Continuous { min: 10.0, max: 35.0, unit: " degrees" },
    },
    SensorSpec {
        key: "humidity",
        feature_name: "ambient_humidity",
        kind: SensorKind::Continuous { min: 20.0, max: 80.0, unit: " percent" },
    },
    SensorSpec {
        key: "sound_level",
        feature_name: "ambient_sound",
        kind: SensorKind::Continuous { min: 0.0, max: 0.7, unit: "" },
    },
];

/// Linear falloff from the expected operating range.
fn range_confidence(value: f64, min: f64, max: f64) -> f32 {
    if (min..=max).contains(&value) {
        return 1.0;
    }
    let width = max - min;
    let distance = if value < min { min - value } else { value - max };
    (1.0 - distance / width).clamp(0.0, 1.0) as f32
}

pub fn extract(sensor_data: &BTreeMap<String, SensorValue>, out: &mut Vec<SymbolicFeature>) {
    for spec in SENSOR_TABLE {
        let Some(reading) = sensor_data.get(spec.key) else {
            continue;
        };

        match &spec.kind {
            SensorKind::Boolean => {
                // A boolean reading of the wrong wire type degrades to
                // no feature rather than an error.
                let Some(state) = reading.as_bool() else {
                    continue;
                };
                let state_desc = if state { "activity" } else { "no activity" };
                out.push(SymbolicFeature::new(
                    spec.feature_name,
                    FeatureValue::Bool(state),
                    1.0,
                    format!("Sensor {} reported {}", spec.key, state_desc),
                    FeatureCategory::Sensor,
                ));
            }
            SensorKind::Continuous { min, max, unit } => {
                let Some(value) = reading.as_number() else {
                    continue;
                };
                out.push(SymbolicFeature::new(
                    spec.feature_name,
                    FeatureValue::Number(value),
                    range_confidence(value, *min, *max),
                    format!("Sensor {} measured {}{}", spec.key, value, unit),
                    FeatureCategory::Sensor,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings(entries: &[(&str, SensorValue)]) -> BTreeMap<String, SensorValue> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_boolean_sensor_full_confidence() {
        let data = readings(&[("motion", SensorValue::Bool(true))]);
        let mut out = Vec::new();
        extract(&data, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].feature_name, "motion_activity");
        assert_eq!(out[0].confidence, 1.0);
    }

    #[test]
    fn test_in_range_continuous_full_confidence() {
        let data = readings(&[("light_level", SensorValue::Number(0.8))]);
        let mut out = Vec::new();
        extract(&data, &mut out);

        assert_eq!(out[0].feature_name, "ambient_light");
        assert_eq!(out[0].confidence, 1.0);
    }

    #[test]
    fn test_linear_falloff_outside_range() {
        // temperature range is [10, 35], width 25: 47.5 is half a
        // width above the max.
        assert!((range_confidence(47.5, 10.0, 35.0) - 0.5).abs() < 1e-6);
        // Far outside clamps to zero.
        assert_eq!(range_confidence(200.0, 10.0, 35.0), 0.0);
        // Below the range falls off symmetrically.
        assert!((range_confidence(-2.5, 10.0, 35.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_canonical_order_independent_of_input() {
        let data = readings(&[
            ("temperature", SensorValue::Number(21.0)),
            ("motion", SensorValue::Bool(true)),
            ("light_level", SensorValue::Number(0.5)),
        ]);
        let mut out = Vec::new();
        extract(&data, &mut out);

        let names: Vec<&str> = out.iter().map(|f| f.feature_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["motion_activity", "ambient_light", "ambient_temperature"]
        );
    }

    #[test]
    fn test_unrecognized_and_mistyped_keys_ignored() {
        let data = readings(&[
            ("geiger", SensorValue::Number(3.0)),
            ("motion", SensorValue::Text("yes".to_string())),
        ]);
        let mut out = Vec::new();
        extract(&data, &mut out);
        assert!(out.is_empty());
    }
}
