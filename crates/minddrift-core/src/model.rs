//! Values exchanged between the cache, the pipeline and the HTTP layer.

use serde::{Deserialize, Serialize};

/// A single game question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub text: String,
}

impl Question {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// Ordered batch of questions, as sent to the client.
pub type QuestionBatch = Vec<Question>;

/// A confirmed guess stored in the answer cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Derived key (see [`crate::CacheKey`]).
    pub key: String,
    /// The answers the key was derived from, in order.
    pub answers: Vec<String>,
    pub label: String,
    pub document: String,
    /// RFC 3339 timestamp of the last confirm.
    pub confirmed_at: String,
}

/// Where a prediction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
    Cache,
    Generated,
}

impl PredictionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Generated => "generated",
        }
    }
}

/// Result of a predict turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionResult {
    pub label: String,
    pub document: String,
    pub source: PredictionSource,
    /// Public URL of the document written for this prediction.
    pub url: String,
}
