//! Error types for the game core.
//!
//! Model-provider failures never show up here: the pipeline turns them into
//! sentinel results. What remains are the failures with no safe fallback.

/// Game errors.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The answer cache could not be read or written.
    #[error("storage error: {message}")]
    Storage { message: String },

    /// A generated document could not be written to disk.
    #[error("failed to write document {path}: {message}")]
    Document { path: String, message: String },

    /// Invalid or incomplete configuration.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// The pipeline could not be constructed (e.g. HTTP client setup).
    #[error("pipeline error: {message}")]
    Pipeline { message: String },
}

impl GameError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<rusqlite::Error> for GameError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
