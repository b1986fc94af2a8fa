//! Resume analysis pipeline.
//!
//! Flow: dataset reference skills → analysis prompt → gateway (image or text) →
//!       JSON block + Markdown sections → fit score → view model.

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::models::AnalysisResult;
use crate::analysis::prompts::{
    build_analysis_prompt, build_text_analysis_prompt, CAREER_POSITIONING_HEADER,
    MISSING_SKILLS_HEADER, RECOMMENDATIONS_HEADER,
};
use crate::analysis::scoring::compute_score;
use crate::dataset::DatasetIndex;
use crate::llm_client::LlmGateway;
use crate::media::ImageBlob;
use crate::parsing::{extract_json_block, extract_markdown_section};

/// Everything a client needs to render an analysis report.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisViewModel {
    pub request_id: Uuid,
    pub job_role: String,
    /// 0–100, unrounded.
    pub score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub missing_skills_html: String,
    pub recommendations_html: String,
    pub career_advice_html: String,
    pub analysis_data: AnalysisResult,
    /// The fenced JSON object exactly as the model returned it.
    pub raw_analysis_data: Value,
}

impl AnalysisViewModel {
    /// Builds the view model from one model reply. Never fails: an empty or
    /// off-format reply yields a zero score, empty lists and placeholders.
    pub fn from_response(request_id: Uuid, job_role: &str, response_text: &str) -> Self {
        let raw = extract_json_block(response_text);
        let analysis_data = AnalysisResult::from_json(&raw);

        let matched_skills = analysis_data.analysis.matched_skills.clone();
        let missing_skills = analysis_data.analysis.missing_skills.clone();
        let score = compute_score(matched_skills.as_slice(), missing_skills.as_slice());

        Self {
            request_id,
            job_role: job_role.to_string(),
            score,
            matched_skills,
            missing_skills,
            missing_skills_html: extract_markdown_section(response_text, MISSING_SKILLS_HEADER),
            recommendations_html: extract_markdown_section(response_text, RECOMMENDATIONS_HEADER),
            career_advice_html: extract_markdown_section(response_text, CAREER_POSITIONING_HEADER),
            analysis_data,
            raw_analysis_data: Value::Object(raw),
        }
    }
}

/// Analyzes an uploaded resume image against a target job role.
pub async fn analyze_resume(
    job_role: &str,
    image: &ImageBlob,
    dataset: &DatasetIndex,
    gateway: &dyn LlmGateway,
) -> AnalysisViewModel {
    let request_id = Uuid::new_v4();
    let prompt = build_analysis_prompt(job_role, dataset.reference_skills_for(job_role));

    let span = info_span!("analyze_resume", %request_id, job_role);
    async move {
        info!("Analyzing {} resume image ({} bytes)", image.mime_type, image.bytes.len());
        let response = gateway
            .generate_text_with_image(&prompt, image)
            .await
            .unwrap_or_else(|e| {
                error!("Analysis LLM call failed: {e}");
                String::new()
            });
        finish(request_id, job_role, &response)
    }
    .instrument(span)
    .await
}

/// Analyzes a resume supplied as plain text against a target job role.
pub async fn analyze_resume_text(
    job_role: &str,
    resume_text: &str,
    dataset: &DatasetIndex,
    gateway: &dyn LlmGateway,
) -> AnalysisViewModel {
    let request_id = Uuid::new_v4();
    let prompt =
        build_text_analysis_prompt(job_role, dataset.reference_skills_for(job_role), resume_text);

    let span = info_span!("analyze_resume_text", %request_id, job_role);
    async move {
        info!("Analyzing resume text ({} chars)", resume_text.len());
        let response = gateway.generate_text(&prompt).await.unwrap_or_else(|e| {
            error!("Analysis LLM call failed: {e}");
            String::new()
        });
        finish(request_id, job_role, &response)
    }
    .instrument(span)
    .await
}

fn finish(request_id: Uuid, job_role: &str, response: &str) -> AnalysisViewModel {
    let view = AnalysisViewModel::from_response(request_id, job_role, response);
    info!(
        "Analysis complete: score={:.1}, matched={}, missing={}",
        view.score,
        view.matched_skills.len(),
        view.missing_skills.len()
    );
    view
}
