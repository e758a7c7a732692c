//! Structured tab data for the codetabs widget.
//!
//! A widget persists its tabs on the host block as an encoded attribute:
//!
//! - [`TABS_DATA_ATTR`]: base64 JSON of [`TabsData`] (see [`encode`])
//! - [`LEGACY_SOURCE_ATTR`]: the tab syntax source, written by older
//!   versions and upgraded on read with [`upgrade_from_legacy`]
//!
//! Everything read from an attribute is normalized, so consumers can rely on
//! non-empty titles, lowercase languages and an in-range active index.
//!
//! # Example
//!
//! ```
//! use codetabs_data::{TabItem, TabsData, decode, encode};
//!
//! let data = TabsData::create_default(1).with_tab_added(TabItem::new("Rust", "Rust", "fn main() {}"));
//! let stored = encode(&data);
//!
//! let restored = decode(Some(&stored)).unwrap();
//! assert_eq!(restored.tabs[1].lang, "rust");
//! ```

mod codec;
mod legacy;
mod model;
mod validate;

pub use codec::{
    CodecError, LEGACY_NEWLINE_MARKER, decode, decode_text, encode, encode_text, try_decode,
};
pub use legacy::upgrade_from_legacy;
pub use model::{CURRENT_VERSION, PLACEHOLDER_CODE, TabItem, TabsData};
pub use validate::{Validation, ValidationError, validate};

/// Block attribute holding encoded [`TabsData`].
pub const TABS_DATA_ATTR: &str = "custom-tabs-data";

/// Block attribute holding the encoded tab syntax source.
pub const LEGACY_SOURCE_ATTR: &str = "custom-tabs";

/// Read a widget's data from its attributes.
///
/// Structured data wins; the source attribute is only consulted when the
/// structured attribute is absent or unreadable.
pub fn read_attrs(
    data_attr: Option<&str>,
    source_attr: Option<&str>,
    registry: Option<&dyn codetabs_syntax::LanguageRegistry>,
) -> Option<TabsData> {
    decode(data_attr).or_else(|| {
        let source = decode_text(source_attr?)
            .inspect_err(|err| tracing::debug!(error = %err, "Unreadable tab source attribute"))
            .ok()?;
        upgrade_from_legacy(&source, registry)
    })
}
