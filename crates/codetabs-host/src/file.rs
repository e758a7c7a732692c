//! JSON file-backed host.
//!
//! The document is a JSON file holding the ordered block list:
//!
//! ```json
//! {
//!   "blocks": [
//!     { "id": "intro", "kind": "markdown", "content": "# Title" },
//!     { "id": "code", "kind": "markdown", "content": "```\n::: JS\nx()\n```" }
//!   ]
//! }
//! ```
//!
//! Changes are kept in memory until [`JsonFileHost::save`].

use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::block::{Attrs, BlockId, BlockKind, BlockRef};
use crate::host::{Host, HostError, HostErrorKind};
use crate::store::{Block, BlockStore};

const BACKEND: &str = "File";

/// Host reading and writing a JSON block document.
#[derive(Debug)]
pub struct JsonFileHost {
    path: PathBuf,
    store: RwLock<BlockStore>,
}

impl JsonFileHost {
    /// Load a document from `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HostError> {
        let path = path.into();
        let raw = std::fs::read_to_string(&path).map_err(|e| HostError::io(e).with_backend(BACKEND))?;
        let store: BlockStore = serde_json::from_str(&raw).map_err(|e| {
            HostError::new(HostErrorKind::Corrupted)
                .with_backend(BACKEND)
                .with_source(e)
        })?;
        tracing::debug!(path = %path.display(), blocks = store.blocks.len(), "Loaded block document");
        Ok(Self {
            path,
            store: RwLock::new(store),
        })
    }

    /// Create an in-memory document that will be written to `path`.
    #[must_use]
    pub fn create(path: impl Into<PathBuf>, blocks: Vec<Block>) -> Self {
        Self {
            path: path.into(),
            store: RwLock::new(BlockStore::new(blocks)),
        }
    }

    /// Document path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the document back to its file.
    pub fn save(&self) -> Result<(), HostError> {
        let json = serde_json::to_string_pretty(&*self.read()?).map_err(|e| {
            HostError::new(HostErrorKind::Corrupted)
                .with_backend(BACKEND)
                .with_source(e)
        })?;
        std::fs::write(&self.path, json + "\n").map_err(|e| HostError::io(e).with_backend(BACKEND))?;
        tracing::info!(path = %self.path.display(), "Saved block document");
        Ok(())
    }

    /// Snapshot of all blocks in document order.
    pub fn blocks(&self) -> Result<Vec<Block>, HostError> {
        Ok(self.read()?.blocks.clone())
    }

    /// Markdown blocks holding a fenced code block.
    pub fn code_blocks(&self) -> Result<Vec<BlockRef>, HostError> {
        Ok(self.read()?.code_blocks())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BlockStore>, HostError> {
        self.store.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BlockStore>, HostError> {
        self.store.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> HostError {
    HostError::new(HostErrorKind::Unavailable).with_backend(BACKEND)
}

impl Host for JsonFileHost {
    fn get_attrs(&self, id: &BlockId) -> Result<Attrs, HostError> {
        let store = self.read()?;
        let block = store.get(id).map_err(|e| e.with_backend(BACKEND))?;
        Ok(block.attrs.clone())
    }

    fn set_attrs(&self, id: &BlockId, attrs: &Attrs) -> Result<(), HostError> {
        self.write()?
            .set_attrs(id, attrs)
            .map_err(|e| e.with_backend(BACKEND))
    }

    fn insert_block(
        &self,
        kind: BlockKind,
        content: &str,
        anchor: Option<&BlockId>,
    ) -> Result<BlockId, HostError> {
        self.write()?
            .insert(kind, content, anchor)
            .map_err(|e| e.with_backend(BACKEND))
    }

    fn delete_block(&self, id: &BlockId) -> Result<(), HostError> {
        self.write()?.delete(id).map_err(|e| e.with_backend(BACKEND))
    }

    fn update_block(&self, kind: BlockKind, content: &str, id: &BlockId) -> Result<(), HostError> {
        self.write()?
            .update(kind, content, id)
            .map_err(|e| e.with_backend(BACKEND))
    }

    fn blocks_with_attr(&self, key: &str) -> Result<Vec<BlockRef>, HostError> {
        Ok(self.read()?.with_attr(key))
    }
}
