//! Dataset-grounded career recommendations.
//!
//! Flow: skill pre-filter → recommendation prompt with shortlist → gateway →
//!       fenced JSON → `recommendations` array.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::career::prefilter::filter_candidates;
use crate::career::prompts::build_recommendation_prompt;
use crate::dataset::DatasetIndex;
use crate::llm_client::{GatewayError, LlmGateway};
use crate::parsing::extract_json_block;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationEntry {
    pub job_title: String,
    /// 0 – 100
    pub match_score: u8,
    pub justification: String,
}

impl RecommendationEntry {
    /// Reads one element of the `recommendations` array. Entries without a
    /// job title are dropped; scores may be numbers or numeric strings and are
    /// clamped to 0–100.
    pub fn from_value(value: &Value) -> Option<Self> {
        let job_title = value.get("job_title")?.as_str()?.trim();
        if job_title.is_empty() {
            return None;
        }

        let match_score = value
            .get("match_score")
            .and_then(score_from_value)
            .unwrap_or(0.0)
            .round()
            .clamp(0.0, 100.0) as u8;

        let justification = value
            .get("justification")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .trim()
            .to_string();

        Some(Self {
            job_title: job_title.to_string(),
            match_score,
            justification,
        })
    }
}

fn score_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    }
}

/// Reads `recommendations` from a model reply; anything off-format is empty.
pub fn parse_recommendations(response_text: &str) -> Vec<RecommendationEntry> {
    extract_json_block(response_text)
        .get("recommendations")
        .and_then(|v| v.as_array())
        .map(|items| items.iter().filter_map(RecommendationEntry::from_value).collect())
        .unwrap_or_default()
}

/// Runs the dataset-grounded pipeline. Returns an empty list without a second
/// gateway call when the shortlist is empty.
pub async fn recommend_careers(
    resume_text: &str,
    gateway: &dyn LlmGateway,
    index: &DatasetIndex,
    top_n: usize,
) -> Result<Vec<RecommendationEntry>, GatewayError> {
    let shortlist = filter_candidates(resume_text, gateway, index, top_n).await;
    if shortlist.is_empty() {
        debug!("Empty shortlist; no dataset recommendations");
        return Ok(Vec::new());
    }

    let prompt = build_recommendation_prompt(resume_text, &shortlist);
    let reply = gateway.generate_text(&prompt).await?;
    let recommendations = parse_recommendations(&reply);

    info!(
        "Dataset pipeline produced {} recommendations from {} candidates",
        recommendations.len(),
        shortlist.len()
    );
    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::JobRecord;
    use crate::llm_client::scripted::ScriptedGateway;
    use serde_json::json;

    const RECOMMENDATION_REPLY: &str = "Sure!\n```json\n{\n  \"recommendations\": [\n    {\"job_title\": \"Data Scientist\", \"match_score\": 91, \"justification\": \"Strong ML work\"},\n    {\"job_title\": \"ML Engineer\", \"match_score\": \"78%\", \"justification\": \"Deployment gaps\"},\n    {\"job_title\": \"\", \"match_score\": 50}\n  ]\n}\n```";

    fn index() -> DatasetIndex {
        DatasetIndex::from_records(vec![JobRecord {
            job_role: "Data Scientist".to_string(),
            reference_skills: "Python, Machine Learning".to_string(),
        }])
    }

    #[test]
    fn test_entry_clamps_and_rounds_score() {
        let entry = RecommendationEntry::from_value(&json!({
            "job_title": "Analyst", "match_score": 120.4
        }))
        .unwrap();
        assert_eq!(entry.match_score, 100);
        assert_eq!(entry.justification, "");

        let entry = RecommendationEntry::from_value(&json!({
            "job_title": "Analyst", "match_score": 66.6, "justification": " ok "
        }))
        .unwrap();
        assert_eq!(entry.match_score, 67);
        assert_eq!(entry.justification, "ok");
    }

    #[test]
    fn test_entry_without_title_is_dropped() {
        assert!(RecommendationEntry::from_value(&json!({"match_score": 80})).is_none());
        assert!(RecommendationEntry::from_value(&json!("Data Scientist")).is_none());
    }

    #[test]
    fn test_parse_recommendations_reads_array() {
        let entries = parse_recommendations(RECOMMENDATION_REPLY);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].job_title, "Data Scientist");
        assert_eq!(entries[0].match_score, 91);
        assert_eq!(entries[1].match_score, 78);
    }

    #[test]
    fn test_parse_recommendations_without_key_is_empty() {
        assert!(parse_recommendations("```json\n{\"jobs\": []}\n```").is_empty());
        assert!(parse_recommendations("no json here").is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_end_to_end() {
        let gateway = ScriptedGateway::new()
            .reply("comma-separated", "Python, Machine Learning")
            .reply("match_score", RECOMMENDATION_REPLY);
        let entries = recommend_careers("resume", &gateway, &index(), 10)
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(gateway.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_index_skips_recommendation_call() {
        let gateway = ScriptedGateway::new()
            .reply("comma-separated", "Python")
            .reply("match_score", RECOMMENDATION_REPLY);
        let entries = recommend_careers("resume", &gateway, &DatasetIndex::default(), 10)
            .await
            .unwrap();
        assert!(entries.is_empty());
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_recommendation_call_failure_propagates() {
        let gateway = ScriptedGateway::new()
            .reply("comma-separated", "Python")
            .fail("match_score", 429);
        let result = recommend_careers("resume", &gateway, &index(), 10).await;
        assert!(matches!(result, Err(GatewayError::Api { status: 429, .. })));
    }
}
