//! AnswerCache: SQLite-backed store of confirmed guesses.
//!
//! Exact-match lookups on the ordered answer sequence, last-write-wins
//! upserts, no expiry.

mod key;
mod schema;

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::errors::{GameError, GameResult};
use crate::model::CacheEntry;

pub use key::CacheKey;
use schema::CACHE_SCHEMA;

#[derive(Clone)]
pub struct AnswerCache {
    conn: Arc<Mutex<Connection>>,
}

impl AnswerCache {
    /// Open a file-backed cache, creating the schema if needed.
    pub fn open(path: &Path) -> GameResult<Self> {
        let conn = Connection::open(path).map_err(|e| {
            GameError::storage(format!("failed to open {}: {}", path.display(), e))
        })?;
        Self::from_connection(conn)
    }

    /// In-memory cache (for tests).
    pub fn memory() -> GameResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> GameResult<Self> {
        Self::init_connection(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn init_connection(conn: &Connection) -> GameResult<()> {
        // WAL for file-backed DBs (no-op for in-memory)
        let _ = conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()));
        conn.execute_batch(CACHE_SCHEMA)?;
        Ok(())
    }

    fn lock(&self) -> GameResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| GameError::storage("cache connection mutex poisoned"))
    }

    /// Exact-match lookup. No side effects.
    pub fn lookup<S: AsRef<str>>(&self, answers: &[S]) -> GameResult<Option<CacheEntry>> {
        let key = CacheKey::from_answers(answers);
        let conn = self.lock()?;

        let row: Option<(String, String, String, String)> = conn
            .query_row(
                "SELECT answers_json, prediction, html_content, confirmed_at
                 FROM successful_predictions WHERE answers_key = ?1",
                params![key.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .optional()?;

        let Some((answers_json, label, document, confirmed_at)) = row else {
            debug!(key = %key, "cache miss");
            return Ok(None);
        };

        let answers = serde_json::from_str(&answers_json).map_err(|e| {
            GameError::storage(format!("corrupt answers_json for key {}: {}", key, e))
        })?;

        debug!(key = %key, label = %label, "cache hit");
        Ok(Some(CacheEntry {
            key: key.to_string(),
            answers,
            label,
            document,
            confirmed_at,
        }))
    }

    /// Insert or fully replace the entry for `answers`.
    ///
    /// Re-confirming an identical entry leaves the row untouched, including
    /// its `confirmed_at`.
    pub fn upsert<S: AsRef<str>>(
        &self,
        answers: &[S],
        label: &str,
        document: &str,
    ) -> GameResult<()> {
        let key = CacheKey::from_answers(answers);
        let answers: Vec<&str> = answers.iter().map(|a| a.as_ref()).collect();
        let answers_json = serde_json::to_string(&answers)
            .map_err(|e| GameError::storage(format!("failed to encode answers: {}", e)))?;

        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO successful_predictions (
                answers_key, answers_json, prediction, html_content, confirmed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(answers_key) DO UPDATE SET
                answers_json = excluded.answers_json,
                prediction = excluded.prediction,
                html_content = excluded.html_content,
                confirmed_at = CASE
                    WHEN answers_json = excluded.answers_json
                     AND prediction = excluded.prediction
                     AND html_content = excluded.html_content
                    THEN confirmed_at
                    ELSE excluded.confirmed_at
                END
            "#,
            params![
                key.as_str(),
                answers_json,
                label,
                document,
                Utc::now().to_rfc3339()
            ],
        )?;

        debug!(key = %key, label = %label, "cache entry saved");
        Ok(())
    }

    /// Number of stored entries.
    pub fn count(&self) -> GameResult<u64> {
        let conn = self.lock()?;
        let n: i64 = conn.query_row(
            "SELECT COUNT(*) FROM successful_predictions",
            [],
            |row| row.get(0),
        )?;
        Ok(n as u64)
    }
}
