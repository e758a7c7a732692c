//! In-memory block document shared by the bundled hosts.

use serde::{Deserialize, Serialize};

use crate::block::{Attrs, BlockId, BlockKind, BlockRef};
use crate::host::HostError;

/// One stored block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    pub attrs: Attrs,
}

impl Block {
    /// Create a block without attributes.
    #[must_use]
    pub fn new(id: impl Into<BlockId>, kind: BlockKind, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            content: content.into(),
            attrs: Attrs::new(),
        }
    }

    /// Reference used for converter intake.
    ///
    /// Markdown blocks are storage rows; HTML blocks expose their content as
    /// element text.
    #[must_use]
    pub fn to_ref(&self) -> BlockRef {
        match self.kind {
            BlockKind::Markdown => BlockRef::Row {
                id: Some(self.id.clone()),
                markdown: self.content.clone(),
            },
            BlockKind::Html => BlockRef::Dom {
                id: Some(self.id.clone()),
                text: self.content.clone(),
            },
        }
    }
}

/// Ordered blocks of one document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStore {
    pub blocks: Vec<Block>,
    #[serde(default)]
    next_id: u64,
}

impl BlockStore {
    #[must_use]
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks, next_id: 0 }
    }

    fn position(&self, id: &BlockId) -> Result<usize, HostError> {
        self.blocks
            .iter()
            .position(|b| &b.id == id)
            .ok_or_else(|| HostError::not_found(id))
    }

    pub fn get(&self, id: &BlockId) -> Result<&Block, HostError> {
        self.position(id).map(|idx| &self.blocks[idx])
    }

    fn get_mut(&mut self, id: &BlockId) -> Result<&mut Block, HostError> {
        let idx = self.position(id)?;
        Ok(&mut self.blocks[idx])
    }

    pub fn set_attrs(&mut self, id: &BlockId, attrs: &Attrs) -> Result<(), HostError> {
        let block = self.get_mut(id)?;
        block
            .attrs
            .extend(attrs.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    pub fn insert(
        &mut self,
        kind: BlockKind,
        content: &str,
        anchor: Option<&BlockId>,
    ) -> Result<BlockId, HostError> {
        let at = match anchor {
            Some(anchor) => self.position(anchor)? + 1,
            None => self.blocks.len(),
        };
        let id = self.fresh_id();
        self.blocks.insert(at, Block::new(id.clone(), kind, content));
        Ok(id)
    }

    pub fn delete(&mut self, id: &BlockId) -> Result<(), HostError> {
        let idx = self.position(id)?;
        self.blocks.remove(idx);
        Ok(())
    }

    pub fn update(&mut self, kind: BlockKind, content: &str, id: &BlockId) -> Result<(), HostError> {
        let block = self.get_mut(id)?;
        block.kind = kind;
        content.clone_into(&mut block.content);
        Ok(())
    }

    #[must_use]
    pub fn with_attr(&self, key: &str) -> Vec<BlockRef> {
        self.blocks
            .iter()
            .filter(|b| b.attrs.contains_key(key))
            .map(Block::to_ref)
            .collect()
    }

    /// Markdown blocks holding a fenced code block.
    #[must_use]
    pub fn code_blocks(&self) -> Vec<BlockRef> {
        self.blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Markdown)
            .filter(|b| {
                let content = b.content.trim_start();
                content.starts_with("```") || content.starts_with("~~~")
            })
            .map(Block::to_ref)
            .collect()
    }

    fn fresh_id(&mut self) -> BlockId {
        loop {
            self.next_id += 1;
            let id = BlockId::new(format!("block-{}", self.next_id));
            if self.position(&id).is_err() {
                return id;
            }
        }
    }
}
