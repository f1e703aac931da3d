//! Core of the MindDrift guessing game.
//!
//! This crate provides:
//!
//! - [`AnswerCache`]: SQLite-backed store of confirmed guesses, keyed by the
//!   exact, ordered answer sequence
//! - [`PromptPipeline`]: prompt builders and response cleanup around an
//!   [`LlmClient`](providers::llm::LlmClient)
//! - [`GameService`]: the start / predict / continue / confirm lifecycle
//!
//! # Quick Start
//!
//! ```no_run
//! use minddrift_core::{GameConfig, GameService};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::from_env();
//! let game = GameService::from_config(&config)?;
//!
//! let answers = vec!["Is it alive?: No".to_string(), "Is it metal?: Yes".to_string()];
//! let result = game.predict(&answers).await?;
//! println!("{} ({:?})", result.label, result.source);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod errors;
pub mod game;
pub mod model;
pub mod pipeline;
pub mod providers;
pub mod questions;

pub use cache::{AnswerCache, CacheKey};
pub use config::{GameConfig, ModelConfig, ProviderKind};
pub use errors::{GameError, GameResult};
pub use game::{DocumentStore, GameService};
pub use model::{CacheEntry, PredictionResult, PredictionSource, Question, QuestionBatch};
pub use pipeline::{PromptPipeline, FAILED_LABEL, FALLBACK_QUESTION_ID};
