//! Object features
//!
//! One symbolic feature per detected object at or above the minimum
//! detection confidence. Labels map into a closed symbolic vocabulary;
//! unknown labels fall back to a generic presence feature.

use crate::event::DetectedObject;
use crate::types::{FeatureCategory, FeatureValue, SymbolicFeature};

/// Closed label -> symbolic feature name mapping.
pub fn symbolic_name(label: &str) -> &'static str {
    match label.to_ascii_lowercase().as_str() {
        "person" => "human_activity",
        "car" | "truck" | "bus" | "bicycle" | "motorcycle" => "vehicle_presence",
        "dog" | "cat" | "bird" => "animal_presence",
        _ => "object_presence",
    }
}

pub fn extract(
    objects: &[DetectedObject],
    min_confidence: f32,
    out: &mut Vec<SymbolicFeature>,
) {
    for obj in objects {
        if obj.confidence < min_confidence {
            log::debug!(
                "Skipping object `{}` below confidence gate ({:.2} < {:.2})",
                obj.label,
                obj.confidence,
                min_confidence
            );
            continue;
        }

        let name = symbolic_name(&obj.label);
        out.push(SymbolicFeature::new(
            name,
            FeatureValue::Bool(true),
            obj.confidence,
            format!(
                "Presence of {} suggests {}",
                obj.label.to_ascii_lowercase(),
                name.replace('_', " ")
            ),
            FeatureCategory::Object,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_gate() {
        let objects = vec![
            DetectedObject::new("person", 0.92),
            DetectedObject::new("cat", 0.3),
        ];

        let mut out = Vec::new();
        extract(&objects, 0.5, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].feature_name, "human_activity");
        assert_eq!(out[0].confidence, 0.92);
    }

    #[test]
    fn test_label_mapping() {
        assert_eq!(symbolic_name("Person"), "human_activity");
        assert_eq!(symbolic_name("car"), "vehicle_presence");
        assert_eq!(symbolic_name("dog"), "animal_presence");
        assert_eq!(symbolic_name("umbrella"), "object_presence");
    }

    #[test]
    fn test_input_order_preserved() {
        let objects = vec![
            DetectedObject::new("car", 0.87),
            DetectedObject::new("person", 0.92),
        ];

        let mut out = Vec::new();
        extract(&objects, 0.5, &mut out);

        assert_eq!(out[0].feature_name, "vehicle_presence");
        assert_eq!(out[1].feature_name, "human_activity");
    }
}
