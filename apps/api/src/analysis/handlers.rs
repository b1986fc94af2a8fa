//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::analysis::analyzer::{analyze_resume, analyze_resume_text, AnalysisViewModel};
use crate::errors::{require_text, AppError};
use crate::media::ImageBlob;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub job_role: String,
    pub resume_text: String,
}

/// POST /api/v1/analyze
///
/// Multipart form: `resume` (PNG / JPEG / WEBP / HEIC image) and `job_role`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisViewModel>, AppError> {
    let mut job_role: Option<String> = None;
    let mut resume: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("job_role") => {
                job_role = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Invalid job_role field: {e}"))
                })?);
            }
            Some("resume") => {
                resume = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Invalid resume upload: {e}"))
                })?);
            }
            _ => {}
        }
    }

    let job_role = require_text(job_role, "job_role")?;
    let resume = resume.ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;
    let image = ImageBlob::from_upload(resume, state.config.max_upload_bytes)?;

    let view = analyze_resume(&job_role, &image, &state.dataset, state.gateway.as_ref()).await;
    Ok(Json(view))
}

/// POST /api/v1/analyze/text
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalysisViewModel>, AppError> {
    let job_role = require_text(Some(request.job_role), "job_role")?;
    let resume_text = require_text(Some(request.resume_text), "resume_text")?;

    let view =
        analyze_resume_text(&job_role, &resume_text, &state.dataset, state.gateway.as_ref()).await;
    Ok(Json(view))
}
