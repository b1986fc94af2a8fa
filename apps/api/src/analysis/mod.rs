// Resume analysis: prompt construction, reply parsing, fit score.
// All LLM calls go through llm_client; no direct HTTP calls here.

pub mod analyzer;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod scoring;
