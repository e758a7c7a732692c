//! Host editor contract for codetabs.
//!
//! The converter never talks to an editor directly. It goes through the
//! [`Host`] trait, which exposes block attributes and block
//! insert/update/delete, always addressed by an explicit [`BlockId`].
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Host`] trait and [`HostError`] with semantic [`HostErrorKind`]
//! - [`BlockRef`]: blocks as handed over by an editor (rendered element or
//!   storage row), resolved once into a [`Candidate`]
//! - [`JsonFileHost`]: a JSON block document on disk, used by the CLI
//! - [`MockHost`] for testing (behind `mock` feature flag)

mod block;
mod file;
mod host;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod store;

pub use block::{Attrs, BlockId, BlockKind, BlockRef, Candidate, strip_code_fence};
pub use file::JsonFileHost;
pub use host::{Host, HostError, HostErrorKind};
#[cfg(any(test, feature = "mock"))]
pub use mock::{HostOp, MockHost};
pub use store::{Block, BlockStore};
