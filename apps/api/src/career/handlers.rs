//! Axum route handlers for the Career API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::models::AnalysisResult;
use crate::career::aggregator::{aggregate, CareerRecommendations};
use crate::career::roadmap::generate_roadmap;
use crate::career::suggestions::suggest_from_analysis;
use crate::errors::{require_text, AppError};
use crate::media::extract_pdf_text;
use crate::parsing::{CareerSuggestion, RoadmapStep};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RoadmapRequest {
    pub current_job: String,
}

#[derive(Debug, Serialize)]
pub struct RoadmapResponse {
    pub current_job: String,
    pub roadmap: Vec<RoadmapStep>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionsRequest {
    pub resume_text: String,
}

/// `analysis_data` is usually the `raw_analysis_data` of an earlier analysis,
/// so it is read leniently rather than deserialized into `AnalysisResult`.
#[derive(Debug, Deserialize)]
pub struct FromAnalysisRequest {
    #[serde(default)]
    pub analysis_data: Value,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<CareerSuggestion>,
}

/// POST /api/v1/roadmap
pub async fn handle_roadmap(
    State(state): State<AppState>,
    Json(request): Json<RoadmapRequest>,
) -> Result<Json<RoadmapResponse>, AppError> {
    let current_job = require_text(Some(request.current_job), "current_job")?;
    let roadmap = generate_roadmap(&current_job, state.gateway.as_ref()).await;
    Ok(Json(RoadmapResponse {
        current_job,
        roadmap,
    }))
}

/// POST /api/v1/suggestions
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Json(request): Json<SuggestionsRequest>,
) -> Result<Json<CareerRecommendations>, AppError> {
    let resume_text = require_text(Some(request.resume_text), "resume_text")?;
    Ok(Json(run_aggregate(&state, &resume_text).await))
}

/// POST /api/v1/suggestions/upload
///
/// Multipart form with a single PDF field `resume`.
pub async fn handle_suggestions_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CareerRecommendations>, AppError> {
    let mut resume: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("resume") {
            resume = Some(field.bytes().await.map_err(|e| {
                AppError::Validation(format!("Invalid resume upload: {e}"))
            })?);
        }
    }

    let resume = resume.ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;
    let text = extract_pdf_text(resume, state.config.max_upload_bytes).await?;
    let resume_text = require_text(Some(text), "resume text")?;

    Ok(Json(run_aggregate(&state, &resume_text).await))
}

/// POST /api/v1/suggestions/from-analysis
pub async fn handle_suggestions_from_analysis(
    State(state): State<AppState>,
    Json(request): Json<FromAnalysisRequest>,
) -> Json<SuggestionsResponse> {
    let analysis = match &request.analysis_data {
        Value::Object(map) => AnalysisResult::from_json(map),
        _ => AnalysisResult::default(),
    };
    let suggestions = suggest_from_analysis(&analysis, state.gateway.as_ref()).await;
    Json(SuggestionsResponse { suggestions })
}

async fn run_aggregate(state: &AppState, resume_text: &str) -> CareerRecommendations {
    aggregate(
        resume_text,
        state.gateway.as_ref(),
        &state.dataset,
        state.config.shortlist_size,
    )
    .await
}
