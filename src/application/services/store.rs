//! Tree persistence service
//!
//! Loads and saves guess trees in the plain-text format of `domain::codec`.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::codec;
use crate::domain::GuessTree;
use crate::infrastructure::traits::FileSystem;

/// Service for reading and writing tree files.
pub struct TreeStore {
    fs: Arc<dyn FileSystem>,
}

impl TreeStore {
    /// Create a new tree store.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load a tree file.
    ///
    /// A malformed file fails as a whole with `TreeFile`; no partial tree is
    /// returned.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<GuessTree> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::FileNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read tree file", path)?;
        let tree = codec::decode(&content).map_err(|source| ApplicationError::TreeFile {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("load: {} nodes from {}", tree.len(), path.display());
        Ok(tree)
    }

    /// Save `tree`, replacing `path` atomically.
    ///
    /// On failure the previous file content is left in place.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn save(&self, path: &Path, tree: &GuessTree) -> ApplicationResult<()> {
        let content = codec::encode(tree)?;
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write_atomic(path, &content)
            .with_path_context("write tree file", path)?;
        debug!("save: {} nodes to {}", tree.len(), path.display());
        Ok(())
    }

    /// Write a fresh tree file; refuses to overwrite unless `force`.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn create(&self, path: &Path, tree: &GuessTree, force: bool) -> ApplicationResult<()> {
        if !force && self.fs.exists(path) {
            return Err(ApplicationError::FileExists(path.to_path_buf()));
        }
        self.save(path, tree)
    }
}
