use std::sync::Arc;

use crate::config::Config;
use crate::dataset::DatasetIndex;
use crate::llm_client::LlmGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup; read-only for the life of the process.
    pub dataset: Arc<DatasetIndex>,
    /// Gemini client wrapped in a per-call timeout. Tests swap in a scripted gateway.
    pub gateway: Arc<dyn LlmGateway>,
    pub config: Config,
}
