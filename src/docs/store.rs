use std::path::{Path, PathBuf};

use tracing::warn;

/// Reads packaged markdown files from a fixed documentation root.
///
/// The store is only ever invoked with filenames produced by the closed
/// topic mapping, never with raw caller input.
#[derive(Debug, Clone)]
pub struct DocStore {
    root: PathBuf,
}

impl DocStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read one file under the documentation root, decoded as UTF-8 and
    /// returned exactly as stored.
    ///
    /// A missing or unreadable file is a packaging problem rather than a
    /// caller error: the unresolved path is logged as a warning and the
    /// result degrades to an empty string. Content is read fresh on every
    /// call; nothing is cached.
    pub fn retrieve(&self, filename: &str) -> String {
        let path = self.root.join(filename);
        match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("documentation file unavailable: {}: {e}", path.display());
                String::new()
            }
        }
    }
}
