//! Generated document files, named after the (sanitized) label.
//!
//! ```text
//! <pages_dir>/
//!   Apple.html
//!   Red_Bicycle.html
//! ```

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;
use url::Url;

use crate::errors::{GameError, GameResult};

/// URL path segment the pages directory is served under.
pub const PAGES_ROUTE: &str = "generated_pages";

const MAX_STEM_CHARS: usize = 80;
const EMPTY_STEM: &str = "prediction";

/// Turn an untrusted label into a safe file stem.
///
/// Keeps letters, digits and `-`; whitespace and `_` runs collapse to a
/// single `_`; everything else (path separators, dots, control characters)
/// is dropped. Never empty, at most 80 characters.
pub fn sanitize_label(label: &str) -> String {
    let mut stem = String::new();
    let mut pending_sep = false;

    for c in label.trim().chars() {
        if c.is_alphanumeric() || c == '-' {
            if pending_sep && !stem.is_empty() {
                stem.push('_');
            }
            pending_sep = false;
            stem.push(c);
        } else if c.is_whitespace() || c == '_' {
            pending_sep = true;
        }
    }

    let stem: String = stem.chars().take(MAX_STEM_CHARS).collect();
    if stem.is_empty() {
        EMPTY_STEM.to_string()
    } else {
        stem
    }
}

#[derive(Debug, Clone)]
pub struct DocumentStore {
    dir: PathBuf,
    pages_base: Url,
}

impl DocumentStore {
    /// `public_url` is the server's externally reachable base URL.
    pub fn new(dir: impl Into<PathBuf>, public_url: &str) -> GameResult<Self> {
        let mut base = Url::parse(public_url)
            .map_err(|e| GameError::config(format!("invalid public url '{}': {}", public_url, e)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let pages_base = base
            .join(&format!("{}/", PAGES_ROUTE))
            .map_err(|e| GameError::config(format!("invalid public url '{}': {}", public_url, e)))?;

        Ok(Self {
            dir: dir.into(),
            pages_base,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(label: &str) -> String {
        format!("{}.html", sanitize_label(label))
    }

    pub fn path_for(&self, label: &str) -> PathBuf {
        self.dir.join(Self::file_name(label))
    }

    pub fn url_for(&self, label: &str) -> String {
        self.pages_base
            .join(&Self::file_name(label))
            .map(String::from)
            .unwrap_or_else(|_| format!("{}{}", self.pages_base, Self::file_name(label)))
    }

    /// Write `document` for `label` and return its public URL.
    ///
    /// Written to a temp file and renamed into place; concurrent writers of
    /// the same label end with one complete document (last rename wins).
    pub async fn write(&self, label: &str, document: &str) -> GameResult<String> {
        let path = self.path_for(label);
        let err = |e: std::io::Error| GameError::Document {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        fs::create_dir_all(&self.dir).await.map_err(err)?;

        let temp_path = self
            .dir
            .join(format!(".{}.tmp", uuid::Uuid::new_v4()));
        fs::write(&temp_path, document).await.map_err(err)?;
        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(err(e));
        }

        debug!(path = %path.display(), bytes = document.len(), "document written");
        Ok(self.url_for(label))
    }
}
