//! Prompt pipeline: guess, synthesize, regenerate questions.
//!
//! Every model call is wrapped on its own. A failing call never reaches the
//! caller as an error: `generate` degrades to [`FAILED_LABEL`] plus an error
//! page, `regenerate_questions` degrades to a single fallback question.

mod fence;
mod parse;
mod prompt;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::model::{Question, QuestionBatch};
use crate::providers::llm::{LlmClient, LlmRequest};

pub use fence::unwrap_code_fence;

/// Label reported when a prediction could not be generated.
pub const FAILED_LABEL: &str = "failed";

/// Id of the single question returned when question generation fails.
pub const FALLBACK_QUESTION_ID: i64 = 999;

const FALLBACK_QUESTION_TEXT: &str =
    "Something went wrong while generating new questions. Please try again.";

/// Why a pipeline step produced no usable output.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("model call failed: {0}")]
    Provider(String),

    #[error("model call timed out after {0:?}")]
    Timeout(Duration),

    #[error("unusable model output: {0}")]
    Malformed(String),
}

/// Label and document produced for an answer sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub label: String,
    pub document: String,
}

impl Generation {
    fn failed(err: &StepError) -> Self {
        Self {
            label: FAILED_LABEL.to_string(),
            document: failure_document(&err.to_string()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.label == FAILED_LABEL
    }
}

#[derive(Clone)]
pub struct PromptPipeline {
    client: Arc<dyn LlmClient>,
    timeout: Duration,
}

impl PromptPipeline {
    pub fn new(client: Arc<dyn LlmClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn provider_name(&self) -> &'static str {
        self.client.provider_name()
    }

    async fn invoke(&self, request: LlmRequest<'_>) -> Result<String, StepError> {
        debug!(task = request.task, provider = self.provider_name(), "invoking model");
        match tokio::time::timeout(self.timeout, self.client.complete(&request)).await {
            Ok(Ok(resp)) => Ok(resp.text),
            Ok(Err(e)) => Err(StepError::Provider(e.to_string())),
            Err(_) => Err(StepError::Timeout(self.timeout)),
        }
    }

    /// Ask the model for one concrete object consistent with `answers`.
    pub async fn guess<S: AsRef<str>>(&self, answers: &[S]) -> Result<String, StepError> {
        let prompt = prompt::guess_prompt(answers);
        let raw = self.invoke(LlmRequest::text("guess", &prompt)).await?;
        parse::parse_label(&raw).map_err(|e| StepError::Malformed(e.to_string()))
    }

    /// Ask the model for a standalone HTML page visualizing `label`.
    pub async fn synthesize(&self, label: &str) -> Result<String, StepError> {
        let prompt = prompt::synthesize_prompt(label);
        let raw = self.invoke(LlmRequest::text("synthesize", &prompt)).await?;
        let document = unwrap_code_fence(&raw);
        if document.is_empty() {
            return Err(StepError::Malformed("empty document".to_string()));
        }
        Ok(document.to_string())
    }

    /// Guess, then synthesize. Never fails: any failed step yields the
    /// sentinel label and an error page. `synthesize` is skipped when the
    /// guess already failed.
    pub async fn generate<S: AsRef<str>>(&self, answers: &[S]) -> Generation {
        let label = match self.guess(answers).await {
            Ok(label) => label,
            Err(e) => {
                warn!(error = %e, "guess failed");
                return Generation::failed(&e);
            }
        };
        info!(label = %label, "model guessed");

        match self.synthesize(&label).await {
            Ok(document) => Generation { label, document },
            Err(e) => {
                warn!(error = %e, label = %label, "document synthesis failed");
                Generation::failed(&e)
            }
        }
    }

    /// Five fresh discriminating questions. Never fails: on any error the
    /// batch holds only the fallback question.
    pub async fn regenerate_questions<S: AsRef<str>>(&self, answers: &[S]) -> QuestionBatch {
        let prompt = prompt::questions_prompt(answers);
        let parsed = match self.invoke(LlmRequest::json("questions", &prompt)).await {
            Ok(raw) => parse::parse_question_batch(&raw)
                .map_err(|e| StepError::Malformed(e.to_string())),
            Err(e) => Err(e),
        };

        match parsed {
            Ok(batch) => {
                if batch.len() != 5 {
                    debug!(count = batch.len(), "model returned an unexpected number of questions");
                }
                batch
            }
            Err(e) => {
                warn!(error = %e, "question generation failed");
                fallback_questions()
            }
        }
    }
}

pub fn fallback_questions() -> QuestionBatch {
    vec![Question::new(FALLBACK_QUESTION_ID, FALLBACK_QUESTION_TEXT)]
}

/// Minimal human-readable error page.
pub fn failure_document(reason: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>MindDrift error</title></head>\n\
         <body style=\"background:#333;color:#eee;font-family:sans-serif\">\n\
         <h1>System error</h1>\n<p>{}</p>\n\
         <button id=\"btn-quit\" onclick=\"window.close()\">Quit</button>\n\
         </body>\n</html>",
        escape_html(reason)
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
