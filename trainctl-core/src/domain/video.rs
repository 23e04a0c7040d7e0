//! Recorded video artifacts

use serde::{Deserialize, Serialize};

/// A video recorded by a training or evaluation run
///
/// Produced by the server; `file` is a path segment relative to the
/// static video directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub name: String,
    pub file: String,
}

impl VideoRecord {
    /// Resolves the file against a static base path (e.g. "/static/videos")
    pub fn source_path(&self, base_path: &str) -> String {
        format!(
            "{}/{}",
            base_path.trim_end_matches('/'),
            self.file.trim_start_matches('/')
        )
    }
}
