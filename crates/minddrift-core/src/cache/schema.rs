//! SQLite schema for the answer cache.

/// DDL for confirmed predictions.
///
/// Schema version: 1
pub const CACHE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS successful_predictions (
    answers_key    TEXT PRIMARY KEY,
    answers_json   TEXT NOT NULL,
    prediction     TEXT NOT NULL,
    html_content   TEXT NOT NULL,
    confirmed_at   TEXT NOT NULL
);
"#;
