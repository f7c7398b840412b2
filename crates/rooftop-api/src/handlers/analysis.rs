//! Rooftop analysis handlers.

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::{debug, info};

use rooftop_models::{QualitativeAnalysis, SolarAssumptions};

use crate::error::{ApiError, ApiResult};
use crate::pipeline::{run_analysis, AnalysisOutcome};
use crate::state::AppState;

/// Multipart field names accepted for the image.
const IMAGE_FIELDS: &[&str] = &["image", "file"];

const ACCEPTED_MIME: &[&str] = &["image/jpeg", "image/jpg", "image/png"];
const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Upload a rooftop image and get the analysis plus estimate.
///
/// POST /api/analyze (multipart/form-data, field `image`)
pub async fn analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<AnalysisOutcome>> {
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if !IMAGE_FIELDS.contains(&name.as_str()) {
            debug!(field = %name, "Skipping unknown multipart field");
            continue;
        }

        check_image_type(field.content_type(), field.file_name())?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?;
        image = Some(bytes);
        break;
    }

    let image = image.ok_or_else(|| ApiError::bad_request("Missing `image` field"))?;
    if image.is_empty() {
        return Err(ApiError::bad_request("Uploaded image is empty"));
    }

    info!(image_bytes = image.len(), "Received rooftop image");

    let outcome = run_analysis(state.analyzer.as_ref(), &state.assumptions, &image).await?;
    Ok(Json(outcome))
}

/// Estimate from an analysis record supplied by the caller.
///
/// POST /api/estimate. No vision call is made.
pub async fn estimate_from_analysis(
    State(state): State<AppState>,
    Json(analysis): Json<QualitativeAnalysis>,
) -> Json<AnalysisOutcome> {
    Json(AnalysisOutcome::from_analysis(analysis, &state.assumptions))
}

/// Active sizing assumptions.
///
/// GET /api/assumptions
pub async fn get_assumptions(State(state): State<AppState>) -> Json<SolarAssumptions> {
    Json(state.assumptions.as_ref().clone())
}

/// Accept JPEG or PNG by declared content type or file extension.
fn check_image_type(content_type: Option<&str>, file_name: Option<&str>) -> ApiResult<()> {
    let mime_ok = content_type
        .map(|ct| ACCEPTED_MIME.contains(&ct.to_lowercase().as_str()))
        .unwrap_or(false);

    let extension_ok = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ACCEPTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false);

    if mime_ok || extension_ok {
        Ok(())
    } else {
        Err(ApiError::unsupported_media(format!(
            "Expected a JPEG or PNG image, got {}",
            content_type.or(file_name).unwrap_or("an untyped upload")
        )))
    }
}
