use super::{LlmClient, LlmRequest, LlmResponse, ResponseFormat};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

const USER_AGENT_VALUE: &str = concat!("minddrift/", env!("CARGO_PKG_VERSION"));

/// Client for the Google Generative Language `generateContent` endpoint.
pub struct GeminiClient {
    pub model: String,
    api_key: String,
    pub temperature: f32,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(
        model: String,
        api_key: String,
        temperature: f32,
        base_url: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to create HTTP client: {}", e))?;

        Ok(Self {
            model,
            api_key,
            temperature,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn build_body(&self, request: &LlmRequest<'_>) -> Value {
        let mut generation_config = json!({ "temperature": self.temperature });
        if request.format == ResponseFormat::Json {
            generation_config["responseMimeType"] = json!("application/json");
        }

        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }],
            }],
            "generationConfig": generation_config,
        })
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(body: &Value) -> anyhow::Result<String> {
    if let Some(reason) = body
        .pointer("/promptFeedback/blockReason")
        .and_then(|v| v.as_str())
    {
        anyhow::bail!("Gemini blocked the prompt: {}", reason);
    }

    let parts = body
        .pointer("/candidates/0/content/parts")
        .and_then(|v| v.as_array())
        .ok_or_else(|| {
            let finish = body
                .pointer("/candidates/0/finishReason")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");
            anyhow::anyhow!("Gemini response missing content (finishReason={})", finish)
        })?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.is_empty() {
        anyhow::bail!("Gemini response contained no text parts");
    }
    Ok(text)
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, request: &LlmRequest<'_>) -> anyhow::Result<LlmResponse> {
        let url = self.endpoint();
        debug!(task = request.task, model = %self.model, "calling Gemini");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.build_body(request))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_else(|_| String::new());
            anyhow::bail!(
                "Gemini API error (status {}): {}",
                status.as_u16(),
                error_text
            );
        }

        let body: Value = resp.json().await?;
        let text = extract_text(&body)?;

        Ok(LlmResponse {
            text,
            provider: "gemini".to_string(),
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}
