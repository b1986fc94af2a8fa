use tracing::{error, info};

use crate::career::prompts::build_roadmap_prompt;
use crate::llm_client::LlmGateway;
use crate::parsing::{parse_pipe_delimited_roadmap, RoadmapStep};

/// Asks for a one-line roadmap starting at `current_job` and splits it into steps.
/// A failed call yields an empty roadmap.
pub async fn generate_roadmap(current_job: &str, gateway: &dyn LlmGateway) -> Vec<RoadmapStep> {
    let prompt = build_roadmap_prompt(current_job);
    match gateway.generate_text(&prompt).await {
        Ok(reply) => {
            let steps = parse_pipe_delimited_roadmap(&reply);
            info!("Roadmap for '{}' has {} steps", current_job, steps.len());
            steps
        }
        Err(e) => {
            error!("Roadmap generation failed for '{}': {e}", current_job);
            Vec::new()
        }
    }
}
