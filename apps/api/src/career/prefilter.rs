//! Skill Pre-filter: turns resume text into a shortlist of dataset job roles.

use tracing::{debug, warn};

use crate::career::prompts::build_skill_extraction_prompt;
use crate::dataset::DatasetIndex;
use crate::llm_client::LlmGateway;

/// Asks the model for a comma-separated skill line. Empty input, gateway
/// failures and blank replies all give an empty list.
pub async fn extract_skills(resume_text: &str, gateway: &dyn LlmGateway) -> Vec<String> {
    if resume_text.trim().is_empty() {
        return Vec::new();
    }

    let prompt = build_skill_extraction_prompt(resume_text);
    match gateway.generate_text(&prompt).await {
        Ok(reply) => split_skills(&reply),
        Err(e) => {
            warn!("Skill extraction failed: {e}");
            Vec::new()
        }
    }
}

fn split_skills(reply: &str) -> Vec<String> {
    reply
        .split(',')
        .map(|s| s.trim().trim_end_matches('.').trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Extracts skills, then ranks dataset job roles by overlap. An empty result
/// means "no grounded recommendations available", not an error.
pub async fn filter_candidates(
    resume_text: &str,
    gateway: &dyn LlmGateway,
    index: &DatasetIndex,
    top_n: usize,
) -> Vec<String> {
    let skills = extract_skills(resume_text, gateway).await;
    if skills.is_empty() {
        debug!("No skills extracted; skipping dataset shortlist");
        return Vec::new();
    }

    let shortlist = index.top_matches(&skills, top_n);
    debug!(
        "Shortlisted {} job roles from {} extracted skills",
        shortlist.len(),
        skills.len()
    );
    shortlist
}
