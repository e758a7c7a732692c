//! Host trait and error types.
//!
//! The host is the editor that owns the blocks. Every operation names the
//! block it acts on explicitly; nothing is derived from editor state.

use std::fmt;

use crate::block::{Attrs, BlockId, BlockKind, BlockRef};

/// Semantic error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum HostErrorKind {
    /// Block does not exist.
    NotFound,
    /// The host refused the change.
    PermissionDenied,
    /// Host is temporarily unavailable.
    Unavailable,
    /// Persisted host state could not be read or written.
    Corrupted,
    /// Other/unknown error category.
    Other,
}

/// Host error with semantic kind, block context and backend-specific source.
#[derive(Debug)]
pub struct HostError {
    /// Semantic error category.
    pub kind: HostErrorKind,
    /// Block the operation was acting on.
    pub block: Option<BlockId>,
    /// Backend identifier (e.g., "File", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl HostError {
    /// Create a new host error.
    #[must_use]
    pub fn new(kind: HostErrorKind) -> Self {
        Self {
            kind,
            block: None,
            backend: None,
            source: None,
        }
    }

    /// Attach block context.
    #[must_use]
    pub fn with_block(mut self, block: &BlockId) -> Self {
        self.block = Some(block.clone());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error for a block.
    #[must_use]
    pub fn not_found(block: &BlockId) -> Self {
        Self::new(HostErrorKind::NotFound).with_block(block)
    }

    /// Create a host error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => HostErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => HostErrorKind::PermissionDenied,
            _ => HostErrorKind::Other,
        };
        Self::new(kind).with_source(err)
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "[Backend] Kind: message (block: id)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            HostErrorKind::NotFound => "Block not found",
            HostErrorKind::PermissionDenied => "Permission denied",
            HostErrorKind::Unavailable => "Unavailable",
            HostErrorKind::Corrupted => "Corrupted host state",
            HostErrorKind::Other => "Error",
        };
        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        if let Some(block) = &self.block {
            write!(f, " (block: {block})")?;
        }

        Ok(())
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Block operations the converter needs from the editor.
///
/// Implementations must be safe to call from several threads at once; batch
/// conversions issue calls for different blocks concurrently.
pub trait Host: Send + Sync {
    /// Read all attributes of a block.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the block does not exist or can't be read.
    fn get_attrs(&self, id: &BlockId) -> Result<Attrs, HostError>;

    /// Set attributes on a block, keeping attributes not named in `attrs`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the block does not exist or the host refuses.
    fn set_attrs(&self, id: &BlockId, attrs: &Attrs) -> Result<(), HostError>;

    /// Insert a block after `anchor` (or at the end) and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the anchor does not exist or the host refuses.
    fn insert_block(
        &self,
        kind: BlockKind,
        content: &str,
        anchor: Option<&BlockId>,
    ) -> Result<BlockId, HostError>;

    /// Delete a block.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the block does not exist or the host refuses.
    fn delete_block(&self, id: &BlockId) -> Result<(), HostError>;

    /// Replace a block's content and kind.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the block does not exist or the host refuses.
    fn update_block(&self, kind: BlockKind, content: &str, id: &BlockId) -> Result<(), HostError>;

    /// Blocks carrying attribute `key`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the host can't be queried.
    fn blocks_with_attr(&self, key: &str) -> Result<Vec<BlockRef>, HostError>;
}
