//! Canonical qualitative labels.
//!
//! Free-text labels from the vision model are classified once into closed
//! enums. Matching is a case-insensitive substring test and the first rule
//! in the documented order wins.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sunlight exposure of the usable roof area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum SunlightExposure {
    Excellent,
    Good,
    Moderate,
    /// Poor exposure or significant shading
    Poor,
    /// Missing or unrecognized label
    #[default]
    Unknown,
}

impl SunlightExposure {
    /// All exposure labels.
    pub const ALL: &'static [SunlightExposure] = &[
        SunlightExposure::Excellent,
        SunlightExposure::Good,
        SunlightExposure::Moderate,
        SunlightExposure::Poor,
        SunlightExposure::Unknown,
    ];

    /// Classify raw label text.
    ///
    /// Order: "excellent", "moderate", "poor" or "significant shading",
    /// "good", otherwise `Unknown`.
    pub fn classify(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return SunlightExposure::Unknown;
        };
        let text = raw.to_lowercase();

        if text.contains("excellent") {
            SunlightExposure::Excellent
        } else if text.contains("moderate") {
            SunlightExposure::Moderate
        } else if text.contains("poor") || text.contains("significant shading") {
            SunlightExposure::Poor
        } else if text.contains("good") {
            SunlightExposure::Good
        } else {
            SunlightExposure::Unknown
        }
    }

    /// Multiplier applied to nominal yearly production.
    pub fn production_factor(&self) -> f64 {
        match self {
            SunlightExposure::Excellent => 1.2,
            SunlightExposure::Moderate => 0.8,
            SunlightExposure::Poor => 0.5,
            SunlightExposure::Good | SunlightExposure::Unknown => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SunlightExposure::Excellent => "excellent",
            SunlightExposure::Good => "good",
            SunlightExposure::Moderate => "moderate",
            SunlightExposure::Poor => "poor",
            SunlightExposure::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SunlightExposure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Qualitative usable roof area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum UsableArea {
    Large,
    Medium,
    Small,
    /// Missing or unrecognized label
    #[default]
    Unknown,
}

impl UsableArea {
    /// All area labels.
    pub const ALL: &'static [UsableArea] = &[
        UsableArea::Large,
        UsableArea::Medium,
        UsableArea::Small,
        UsableArea::Unknown,
    ];

    /// Classify raw label text.
    ///
    /// Order: "large", "medium", "small", otherwise `Unknown`. A label such
    /// as "medium-large" resolves to `Large`.
    pub fn classify(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return UsableArea::Unknown;
        };
        let text = raw.to_lowercase();

        if text.contains("large") {
            UsableArea::Large
        } else if text.contains("medium") {
            UsableArea::Medium
        } else if text.contains("small") {
            UsableArea::Small
        } else {
            UsableArea::Unknown
        }
    }

    /// Estimated usable area in square feet.
    pub fn square_feet(&self) -> u32 {
        match self {
            UsableArea::Large => 600,
            UsableArea::Medium => 300,
            UsableArea::Small => 100,
            UsableArea::Unknown => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UsableArea::Large => "large",
            UsableArea::Medium => "medium",
            UsableArea::Small => "small",
            UsableArea::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UsableArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The canonical labels that drive the estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RoofProfile {
    pub sunlight: SunlightExposure,
    pub usable_area: UsableArea,
}
