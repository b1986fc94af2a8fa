// Career guidance: skill pre-filter, dataset-grounded recommendations,
// general-market suggestions, roadmaps, and the aggregator joining them.
// All LLM calls go through llm_client; no direct HTTP calls here.

pub mod aggregator;
pub mod handlers;
pub mod prefilter;
pub mod prompts;
pub mod recommender;
pub mod roadmap;
pub mod suggestions;
