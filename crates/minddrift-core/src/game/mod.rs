//! Game orchestration: start, predict, continue, confirm.
//!
//! No session state is kept here. Every call is a function of the answer
//! sequence the client sends, the answer cache, and the model.

mod documents;

use tracing::info;

use crate::cache::AnswerCache;
use crate::config::GameConfig;
use crate::errors::{GameError, GameResult};
use crate::model::{PredictionResult, PredictionSource, QuestionBatch};
use crate::pipeline::PromptPipeline;
use crate::providers::build_client;
use crate::questions::start_questions;

pub use documents::{sanitize_label, DocumentStore, PAGES_ROUTE};

#[derive(Clone)]
pub struct GameService {
    cache: AnswerCache,
    pipeline: PromptPipeline,
    documents: DocumentStore,
}

impl GameService {
    pub fn new(cache: AnswerCache, pipeline: PromptPipeline, documents: DocumentStore) -> Self {
        Self {
            cache,
            pipeline,
            documents,
        }
    }

    /// Wire everything from configuration: model client, SQLite cache, pages dir.
    pub fn from_config(config: &GameConfig) -> GameResult<Self> {
        config.validate()?;
        let client = build_client(&config.model)?;
        let pipeline = PromptPipeline::new(client, config.model.timeout());
        let cache = AnswerCache::open(&config.db_path)?;
        let documents = DocumentStore::new(&config.pages_dir, &config.public_url)?;
        Ok(Self::new(cache, pipeline, documents))
    }

    pub fn cache(&self) -> &AnswerCache {
        &self.cache
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn start_game(&self) -> QuestionBatch {
        start_questions()
    }

    /// Cached label/document if these exact answers were confirmed before,
    /// otherwise a fresh guess and document from the model. The document is
    /// written to disk either way; the cache is never written here.
    pub async fn predict(&self, answers: &[String]) -> GameResult<PredictionResult> {
        let cache = self.cache.clone();
        let lookup_answers = answers.to_vec();
        let cached = blocking(move || cache.lookup(&lookup_answers)).await?;

        if let Some(entry) = cached {
            info!(label = %entry.label, "prediction served from cache");
            let url = self.documents.write(&entry.label, &entry.document).await?;
            return Ok(PredictionResult {
                label: entry.label,
                document: entry.document,
                source: PredictionSource::Cache,
                url,
            });
        }

        info!(answers = answers.len(), provider = self.pipeline.provider_name(), "generating prediction");
        let generation = self.pipeline.generate(answers).await;
        let url = self
            .documents
            .write(&generation.label, &generation.document)
            .await?;

        Ok(PredictionResult {
            label: generation.label,
            document: generation.document,
            source: PredictionSource::Generated,
            url,
        })
    }

    /// Fresh questions after a wrong guess.
    pub async fn continue_game(&self, answers: &[String]) -> QuestionBatch {
        self.pipeline.regenerate_questions(answers).await
    }

    /// Record a guess the player confirmed as correct. The caller's
    /// assertion is trusted as-is.
    pub async fn confirm_success(
        &self,
        answers: Vec<String>,
        label: String,
        document: String,
    ) -> GameResult<()> {
        let cache = self.cache.clone();
        let saved_label = label.clone();
        blocking(move || cache.upsert(&answers, &label, &document)).await?;
        info!(label = %saved_label, "confirmed prediction saved");
        Ok(())
    }
}

/// Run a cache operation on the blocking pool.
async fn blocking<T, F>(f: F) -> GameResult<T>
where
    F: FnOnce() -> GameResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| GameError::storage(format!("cache task failed: {}", e)))?
}
