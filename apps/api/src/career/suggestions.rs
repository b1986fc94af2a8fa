//! General-market career suggestions, not grounded on the dataset.

use tracing::{debug, info, warn};

use crate::analysis::models::AnalysisResult;
use crate::career::prompts::{build_suggestion_prompt, SuggestionProfile};
use crate::llm_client::{GatewayError, LlmGateway};
use crate::parsing::{parse_paragraph_suggestions, CareerSuggestion};

pub async fn suggest_careers(
    profile: SuggestionProfile<'_>,
    gateway: &dyn LlmGateway,
) -> Result<Vec<CareerSuggestion>, GatewayError> {
    let prompt = build_suggestion_prompt(profile);
    let reply = gateway.generate_text(&prompt).await?;
    let suggestions = parse_paragraph_suggestions(&reply);
    info!("General pipeline produced {} suggestions", suggestions.len());
    Ok(suggestions)
}

/// Suggestions from the summary of an earlier analysis. Returns nothing, and
/// makes no call, when the analysis lists neither skills nor experience.
/// A failed call also yields an empty list.
pub async fn suggest_from_analysis(
    analysis: &AnalysisResult,
    gateway: &dyn LlmGateway,
) -> Vec<CareerSuggestion> {
    let skills = &analysis.summary.skills;
    let experience = &analysis.summary.experience;
    if skills.is_empty() && experience.is_empty() {
        debug!("Analysis has no skills or experience; skipping suggestions");
        return Vec::new();
    }

    suggest_careers(SuggestionProfile::Summary { skills, experience }, gateway)
        .await
        .unwrap_or_else(|e| {
            warn!("Suggestions from analysis failed: {e}");
            Vec::new()
        })
}
