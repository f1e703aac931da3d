use super::{LlmClient, LlmRequest, LlmResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

const FAKE_LABEL: &str = "Teapot";

const FAKE_QUESTIONS: &str = r#"{"questions": [
  {"id": 101, "text": "Is it used to hold liquid?"},
  {"id": 102, "text": "Does it have a handle?"},
  {"id": 103, "text": "Is it made of ceramic?"},
  {"id": 104, "text": "Is it heated before use?"},
  {"id": 105, "text": "Would you find it on a table?"}
]}"#;

const FAKE_DOCUMENT: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Teapot</title></head>
<body style="margin:0;background:#333;color:#eee;font-family:sans-serif">
<div style="position:absolute;top:10px;left:10px">
<button id="btn-accept" onclick="window.opener&&window.opener.postMessage({type:'minddrift:confirm',prediction:'Teapot',html:document.documentElement.outerHTML},'*');window.close()">Correct</button>
<button id="btn-retry" onclick="window.opener&&window.opener.postMessage({type:'minddrift:continue'},'*');window.close()">Wrong, ask more</button>
<button id="btn-quit" onclick="window.close()">Quit</button>
</div>
<h1 style="text-align:center;margin-top:40vh">Teapot</h1>
</body>
</html>"#;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum FakeReply {
    Text(String),
    Fail(String),
}

/// Deterministic offline provider.
///
/// Scripted replies are consumed first, in order; once exhausted it answers
/// with canned content chosen by the request's task name.
#[derive(Debug)]
pub struct FakeClient {
    model: String,
    script: Mutex<VecDeque<FakeReply>>,
    calls: Mutex<Vec<String>>,
}

impl FakeClient {
    pub fn new(model: String) -> Self {
        Self {
            model,
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_replies(self, replies: impl IntoIterator<Item = FakeReply>) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.extend(replies);
        }
        self
    }

    /// Queue a successful reply.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_replies([FakeReply::Text(text.into())])
    }

    /// Queue a failing reply.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.with_replies([FakeReply::Fail(message.into())])
    }

    /// Task names of every request seen so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    fn canned(task: &str) -> &'static str {
        match task {
            "questions" => FAKE_QUESTIONS,
            "synthesize" => FAKE_DOCUMENT,
            _ => FAKE_LABEL,
        }
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn complete(&self, request: &LlmRequest<'_>) -> anyhow::Result<LlmResponse> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.task.to_string());
        }

        let scripted = self.script.lock().ok().and_then(|mut s| s.pop_front());
        let text = match scripted {
            Some(FakeReply::Text(text)) => text,
            Some(FakeReply::Fail(message)) => anyhow::bail!("{}", message),
            None => Self::canned(request.task).to_string(),
        };

        Ok(LlmResponse {
            text,
            provider: "fake".to_string(),
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn script_then_canned() {
        let client = FakeClient::new("fake".to_string())
            .with_text("Apple")
            .with_failure("boom");

        let first = client.complete(&LlmRequest::text("guess", "p")).await.unwrap();
        assert_eq!(first.text, "Apple");

        let second = client.complete(&LlmRequest::text("synthesize", "p")).await;
        assert_eq!(second.unwrap_err().to_string(), "boom");

        let third = client.complete(&LlmRequest::json("questions", "p")).await.unwrap();
        assert!(third.text.contains("\"questions\""));

        assert_eq!(client.calls(), vec!["guess", "synthesize", "questions"]);
    }

    #[test]
    fn canned_document_carries_controls() {
        for id in ["btn-accept", "btn-retry", "btn-quit"] {
            assert!(FAKE_DOCUMENT.contains(id));
        }
    }
}
