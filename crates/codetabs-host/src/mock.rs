//! Mock host implementation for testing.
//!
//! Provides [`MockHost`] for unit testing without an editor.

use std::collections::HashSet;
use std::sync::RwLock;

use crate::block::{Attrs, BlockId, BlockKind, BlockRef};
use crate::host::{Host, HostError, HostErrorKind};
use crate::store::{Block, BlockStore};

/// Host operation, used to inject failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostOp {
    GetAttrs,
    SetAttrs,
    Insert,
    Delete,
    Update,
}

/// Mock host for testing.
///
/// Stores blocks in memory. Use the builder methods to configure the mock
/// with test data and [`fail`](Self::fail) to make specific calls error.
///
/// # Example
///
/// ```ignore
/// use codetabs_host::{BlockId, BlockKind, Host, MockHost};
///
/// let host = MockHost::new().with_block("a", BlockKind::Markdown, "```\n::: A\nx\n```");
/// host.update_block(BlockKind::Html, "<div></div>", &BlockId::new("a")).unwrap();
///
/// assert_eq!(host.block(&BlockId::new("a")).unwrap().kind, BlockKind::Html);
/// ```
#[derive(Debug, Default)]
pub struct MockHost {
    store: RwLock<BlockStore>,
    failures: RwLock<HashSet<(HostOp, BlockId)>>,
}

impl MockHost {
    /// Create a new empty mock host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block at the end of the document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_block(
        self,
        id: impl Into<BlockId>,
        kind: BlockKind,
        content: impl Into<String>,
    ) -> Self {
        self.store
            .write()
            .unwrap()
            .blocks
            .push(Block::new(id, kind, content));
        self
    }

    /// Add an attribute to an existing block.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned or the block does not exist.
    #[must_use]
    pub fn with_attr(self, id: impl Into<BlockId>, key: &str, value: impl Into<String>) -> Self {
        let attrs = Attrs::from([(key.to_owned(), value.into())]);
        self.store
            .write()
            .unwrap()
            .set_attrs(&id.into(), &attrs)
            .unwrap();
        self
    }

    /// Make every `op` on block `id` fail with [`HostErrorKind::Unavailable`].
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn fail(&self, op: HostOp, id: impl Into<BlockId>) {
        self.failures.write().unwrap().insert((op, id.into()));
    }

    /// Snapshot of a block.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn block(&self, id: &BlockId) -> Option<Block> {
        self.store.read().unwrap().get(id).ok().cloned()
    }

    /// Snapshot of all blocks in document order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn blocks(&self) -> Vec<Block> {
        self.store.read().unwrap().blocks.clone()
    }

    /// Markdown blocks holding a fenced code block.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn code_blocks(&self) -> Vec<BlockRef> {
        self.store.read().unwrap().code_blocks()
    }

    fn check(&self, op: HostOp, id: &BlockId) -> Result<(), HostError> {
        if self.failures.read().unwrap().contains(&(op, id.clone())) {
            return Err(HostError::new(HostErrorKind::Unavailable)
                .with_block(id)
                .with_backend("Mock"));
        }
        Ok(())
    }
}

impl Host for MockHost {
    fn get_attrs(&self, id: &BlockId) -> Result<Attrs, HostError> {
        self.check(HostOp::GetAttrs, id)?;
        let store = self.store.read().unwrap();
        Ok(store
            .get(id)
            .map_err(|e| e.with_backend("Mock"))?
            .attrs
            .clone())
    }

    fn set_attrs(&self, id: &BlockId, attrs: &Attrs) -> Result<(), HostError> {
        self.check(HostOp::SetAttrs, id)?;
        self.store
            .write()
            .unwrap()
            .set_attrs(id, attrs)
            .map_err(|e| e.with_backend("Mock"))
    }

    fn insert_block(
        &self,
        kind: BlockKind,
        content: &str,
        anchor: Option<&BlockId>,
    ) -> Result<BlockId, HostError> {
        if let Some(anchor) = anchor {
            self.check(HostOp::Insert, anchor)?;
        }
        self.store
            .write()
            .unwrap()
            .insert(kind, content, anchor)
            .map_err(|e| e.with_backend("Mock"))
    }

    fn delete_block(&self, id: &BlockId) -> Result<(), HostError> {
        self.check(HostOp::Delete, id)?;
        self.store
            .write()
            .unwrap()
            .delete(id)
            .map_err(|e| e.with_backend("Mock"))
    }

    fn update_block(&self, kind: BlockKind, content: &str, id: &BlockId) -> Result<(), HostError> {
        self.check(HostOp::Update, id)?;
        self.store
            .write()
            .unwrap()
            .update(kind, content, id)
            .map_err(|e| e.with_backend("Mock"))
    }

    fn blocks_with_attr(&self, key: &str) -> Result<Vec<BlockRef>, HostError> {
        Ok(self.store.read().unwrap().with_attr(key))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_mock_host_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockHost>();
    }

    #[test]
    fn test_new_empty() {
        let host = MockHost::new();
        assert!(host.blocks().is_empty());
        assert!(host.blocks_with_attr("x").unwrap().is_empty());
    }

    #[test]
    fn test_with_attr() {
        let host = MockHost::new()
            .with_block("a", BlockKind::Html, "<div></div>")
            .with_attr("a", "k", "v");

        let attrs = host.get_attrs(&BlockId::new("a")).unwrap();
        assert_eq!(attrs.get("k").map(String::as_str), Some("v"));
        assert_eq!(
            host.blocks_with_attr("k").unwrap(),
            vec![BlockRef::Dom {
                id: Some(BlockId::new("a")),
                text: "<div></div>".to_owned(),
            }]
        );
    }

    #[test]
    fn test_insert_and_delete() {
        let host = MockHost::new().with_block("a", BlockKind::Html, "w");
        let id = host
            .insert_block(BlockKind::Markdown, "```\nx\n```", Some(&BlockId::new("a")))
            .unwrap();
        host.delete_block(&BlockId::new("a")).unwrap();

        let blocks = host.blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].id, id);
    }

    #[test]
    fn test_missing_block() {
        let host = MockHost::new();
        let err = host.get_attrs(&BlockId::new("nope")).unwrap_err();
        assert_eq!(err.kind, HostErrorKind::NotFound);
        assert_eq!(err.to_string(), "[Mock] Block not found (block: nope)");
    }

    #[test]
    fn test_injected_failure_only_hits_named_op_and_block() {
        let host = MockHost::new()
            .with_block("a", BlockKind::Markdown, "x")
            .with_block("b", BlockKind::Markdown, "y");
        host.fail(HostOp::Update, "a");

        let err = host
            .update_block(BlockKind::Html, "z", &BlockId::new("a"))
            .unwrap_err();
        assert_eq!(err.kind, HostErrorKind::Unavailable);
        assert!(host.update_block(BlockKind::Html, "z", &BlockId::new("b")).is_ok());
        assert!(host.get_attrs(&BlockId::new("a")).is_ok());
    }
}
