//! Recommendation Aggregator: runs the dataset-grounded and general-market
//! pipelines side by side and merges their results.

use serde::Serialize;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::career::prompts::SuggestionProfile;
use crate::career::recommender::{recommend_careers, RecommendationEntry};
use crate::career::suggestions::suggest_careers;
use crate::dataset::DatasetIndex;
use crate::llm_client::LlmGateway;
use crate::parsing::CareerSuggestion;

#[derive(Debug, Clone, Serialize)]
pub struct CareerRecommendations {
    pub request_id: Uuid,
    pub dataset_recommendations: Vec<RecommendationEntry>,
    pub general_suggestions: Vec<CareerSuggestion>,
}

/// Both pipelines are polled concurrently and joined once. A gateway failure
/// in one pipeline empties that pipeline's result only.
pub async fn aggregate(
    resume_text: &str,
    gateway: &dyn LlmGateway,
    index: &DatasetIndex,
    shortlist_size: usize,
) -> CareerRecommendations {
    let request_id = Uuid::new_v4();

    let dataset_pipeline = async {
        recommend_careers(resume_text, gateway, index, shortlist_size)
            .await
            .unwrap_or_else(|e| {
                warn!("Dataset recommendation pipeline failed: {e}");
                Vec::new()
            })
    }
    .instrument(info_span!("dataset_pipeline", %request_id));

    let general_pipeline = async {
        suggest_careers(SuggestionProfile::ResumeText(resume_text), gateway)
            .await
            .unwrap_or_else(|e| {
                warn!("General suggestion pipeline failed: {e}");
                Vec::new()
            })
    }
    .instrument(info_span!("general_pipeline", %request_id));

    let (dataset_recommendations, general_suggestions) =
        tokio::join!(dataset_pipeline, general_pipeline);

    info!(
        %request_id,
        "Aggregated {} dataset recommendations and {} general suggestions",
        dataset_recommendations.len(),
        general_suggestions.len()
    );

    CareerRecommendations {
        request_id,
        dataset_recommendations,
        general_suggestions,
    }
}
