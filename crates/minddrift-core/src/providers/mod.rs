pub mod llm;

use std::sync::Arc;

use crate::config::{ModelConfig, ProviderKind};
use crate::errors::{GameError, GameResult};
use llm::fake::FakeClient;
use llm::gemini::GeminiClient;
use llm::LlmClient;

/// Build the model client selected by `config`.
pub fn build_client(config: &ModelConfig) -> GameResult<Arc<dyn LlmClient>> {
    match config.provider {
        ProviderKind::Gemini => {
            let api_key = config
                .api_key
                .clone()
                .ok_or_else(|| GameError::config("GEMINI_API_KEY is not set"))?;
            let client = GeminiClient::new(
                config.model.clone(),
                api_key,
                config.temperature,
                &config.base_url,
                config.timeout(),
            )
            .map_err(|e| GameError::Pipeline {
                message: e.to_string(),
            })?;
            Ok(Arc::new(client))
        }
        ProviderKind::Fake => Ok(Arc::new(FakeClient::new(config.model.clone()))),
    }
}
