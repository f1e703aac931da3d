pub mod fake;
pub mod gemini;

use async_trait::async_trait;

/// Output shape requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Text,
    /// Ask for strict JSON (providers without a JSON mode ignore this).
    Json,
}

/// One model invocation.
#[derive(Debug, Clone, Copy)]
pub struct LlmRequest<'a> {
    /// Short name of the pipeline step, used for logging and by the fake provider.
    pub task: &'static str,
    pub prompt: &'a str,
    pub format: ResponseFormat,
}

impl<'a> LlmRequest<'a> {
    pub fn text(task: &'static str, prompt: &'a str) -> Self {
        Self {
            task,
            prompt,
            format: ResponseFormat::Text,
        }
    }

    pub fn json(task: &'static str, prompt: &'a str) -> Self {
        Self {
            task,
            prompt,
            format: ResponseFormat::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
}

/// The external generative model: given a prompt, returns text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &LlmRequest<'_>) -> anyhow::Result<LlmResponse>;

    fn provider_name(&self) -> &'static str;
}
