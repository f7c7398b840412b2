//! Qualitative rooftop analysis record.
//!
//! The record comes straight from a vision model and is untrusted. Every
//! field is optional, and a field carrying the wrong JSON type is treated as
//! absent instead of failing the whole record.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::labels::{RoofProfile, SunlightExposure, UsableArea};

/// Qualitative assessment of a rooftop image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "Value")]
pub struct QualitativeAnalysis {
    /// Roof outline category, e.g. "rectangular", "L-shaped", "complex"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roof_shape: Option<String>,
    /// Obstructions in the order the model listed them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_obstacles: Option<Vec<String>>,
    /// Sunlight category, e.g. "excellent", "poor - significant shading"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunlight_exposure: Option<String>,
    /// Usable area category, e.g. "small", "medium", "large"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usable_area_qualitative: Option<String>,
    /// Free-form summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_assessment: Option<String>,
}

/// Error decoding an analysis record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisDecodeError {
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("invalid JSON: {0}")]
    InvalidJson(String),
}

impl QualitativeAnalysis {
    /// Decode a record from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, AnalysisDecodeError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| AnalysisDecodeError::InvalidJson(e.to_string()))?;
        Self::try_from(value)
    }

    /// Decode a record from a JSON object, ignoring unknown keys.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            roof_shape: string_field(map, "roof_shape"),
            main_obstacles: obstacles_field(map),
            sunlight_exposure: string_field(map, "sunlight_exposure"),
            usable_area_qualitative: string_field(map, "usable_area_qualitative"),
            overall_assessment: string_field(map, "overall_assessment"),
        }
    }

    /// Canonicalize the free-text labels that drive the estimate.
    ///
    /// This is the only place raw label text is matched.
    pub fn profile(&self) -> RoofProfile {
        RoofProfile {
            sunlight: SunlightExposure::classify(self.sunlight_exposure.as_deref()),
            usable_area: UsableArea::classify(self.usable_area_qualitative.as_deref()),
        }
    }
}

impl TryFrom<Value> for QualitativeAnalysis {
    type Error = AnalysisDecodeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self::from_map(&map)),
            other => Err(AnalysisDecodeError::NotAnObject(json_kind(&other))),
        }
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

fn obstacles_field(map: &Map<String, Value>) -> Option<Vec<String>> {
    match map.get("main_obstacles")? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        ),
        Value::String(single) => Some(vec![single.clone()]),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
