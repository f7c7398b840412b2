//! Fixed instruction sent with every rooftop image.

/// Keys the model is asked to return.
pub const RESPONSE_KEYS: &[&str] = &[
    "roof_shape",
    "main_obstacles",
    "sunlight_exposure",
    "usable_area_qualitative",
    "overall_assessment",
];

pub const ROOF_ANALYSIS_PROMPT: &str = r#"Analyze this satellite image of a rooftop for solar panel installation potential.
Identify the main rooftop area, approximate shape, and detect any significant obstructions like chimneys, vents, skylights, or trees casting shadows.
Provide a qualitative assessment of sunlight exposure.
Estimate the approximate usable area for solar panels qualitatively (e.g., "small", "medium", "large").
Output the analysis in a JSON format with the following keys:
- "roof_shape": (e.g., "rectangular", "L-shaped", "complex")
- "main_obstacles": (list of strings, e.g., ["chimney", "vent", "tree shading"])
- "sunlight_exposure": (e.g., "excellent", "good", "moderate", "poor - significant shading")
- "usable_area_qualitative": (e.g., "small", "medium", "large")
- "overall_assessment": (a concise summary string)
Ensure the output is valid JSON, starting and ending with curly braces `{}`."#;
