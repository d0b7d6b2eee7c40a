//! Deep Reason - Metacognition Engine Core
//!
//! Converts structured detection-event data into a human-readable
//! interpretation: meaning label, natural-language explanation,
//! significance score and recommended follow-up actions.
//!
//! The crate is the pure reasoning pipeline only. The surrounding
//! service layer owns transport, authentication, rate limiting and
//! persistence; it calls [`process_event`] / [`process_batch`] with a
//! validated event and a brand profile and receives an immutable
//! [`ProcessingResult`].
//!
//! ## Pipeline
//! - `features` - EventData -> ordered symbolic features
//! - `reasoning` - features + profile -> reasoning steps, significance, meaning
//! - `explain` - features + outcome + profile -> explanation text, actions
//! - `pipeline` - orchestration, gating, timing, batch processing

pub mod error;
pub mod event;
pub mod explain;
pub mod features;
pub mod pipeline;
pub mod profile;
pub mod reasoning;
pub mod types;

pub use error::{EngineError, EngineResult};
pub use event::{DetectedObject, EventData, EventType, GeoPoint, SensorValue};
pub use pipeline::{process_batch, process_event, CustomScorer, Pipeline};
pub use profile::{BrandProfile, ExplanationStyle};
pub use reasoning::rules::EngineTuning;
pub use types::{
    ProcessingResult, ReasoningOp, ReasoningStep, SignificanceBracket, SymbolicFeature,
};
