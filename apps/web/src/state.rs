use crate::config::Config;
use crate::llm_client::GeminiClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; requests never share mutable data.
#[derive(Clone)]
pub struct AppState {
    pub llm: GeminiClient,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let llm = GeminiClient::new(config.google_api_key.clone(), config.gemini_api_base.clone());
        Self { llm, config }
    }
}
