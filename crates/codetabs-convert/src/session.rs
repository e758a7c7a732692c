//! Editing one widget.

use codetabs_data::{LEGACY_SOURCE_ATTR, TABS_DATA_ATTR, TabsData, Validation, encode, read_attrs};
use codetabs_host::{Attrs, BlockId, BlockKind, Host};
use codetabs_renderer::HtmlRenderer;
use codetabs_syntax::LanguageRegistry;

use crate::error::ConvertError;

/// Live state of one widget while it is being edited.
///
/// The session exclusively owns the current [`TabsData`]. Anything that runs
/// off the session (previews, background checks) works on a
/// [`snapshot`](Self::snapshot). Nothing reaches the host until
/// [`commit`](Self::commit).
pub struct EditSession<'a> {
    host: &'a dyn Host,
    renderer: HtmlRenderer<'a>,
    block: BlockId,
    data: TabsData,
    dirty: bool,
}

impl<'a> EditSession<'a> {
    /// Load the widget stored on `block`.
    ///
    /// Structured data is preferred; a widget carrying only the legacy source
    /// attribute is upgraded.
    pub fn open(
        host: &'a dyn Host,
        renderer: HtmlRenderer<'a>,
        block: BlockId,
        registry: Option<&dyn LanguageRegistry>,
    ) -> Result<Self, ConvertError> {
        let attrs = host.get_attrs(&block)?;
        let data = read_attrs(
            attrs.get(TABS_DATA_ATTR).map(String::as_str),
            attrs.get(LEGACY_SOURCE_ATTR).map(String::as_str),
            registry,
        )
        .ok_or_else(|| ConvertError::NotAWidget(block.clone()))?;

        Ok(Self {
            host,
            renderer,
            block,
            data,
            dirty: false,
        })
    }

    /// Block being edited.
    #[must_use]
    pub fn block(&self) -> &BlockId {
        &self.block
    }

    /// Current data.
    #[must_use]
    pub fn data(&self) -> &TabsData {
        &self.data
    }

    /// Independent copy of the current data.
    #[must_use]
    pub fn snapshot(&self) -> TabsData {
        self.data.snapshot()
    }

    /// Apply an editing step, e.g. `|d| d.with_tab_moved(0, 2)`.
    pub fn update(&mut self, f: impl FnOnce(&TabsData) -> TabsData) {
        self.replace(f(&self.data));
    }

    /// Replace the data wholesale.
    ///
    /// Unlike [`update`](Self::update) the value is stored as given, so an
    /// editing form can hold an incomplete tab until it is validated.
    pub fn replace(&mut self, data: TabsData) {
        if data != self.data {
            self.data = data;
            self.dirty = true;
        }
    }

    /// Whether the data changed since opening or the last commit.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Check the current data without saving.
    #[must_use]
    pub fn validate(&self) -> Validation {
        self.data.validate()
    }

    /// Validate, render and publish the data to the host.
    ///
    /// Invalid data is rejected with every problem and nothing is written.
    pub fn commit(&mut self) -> Result<(), ConvertError> {
        let validation = self.validate();
        if !validation.is_ok() {
            return Err(ConvertError::Invalid(validation.errors));
        }

        let data = self.data.snapshot();
        let attrs = Attrs::from([(TABS_DATA_ATTR.to_owned(), encode(&data))]);
        self.host.set_attrs(&self.block, &attrs)?;
        let html = self.renderer.render(&data);
        self.host.update_block(BlockKind::Html, &html, &self.block)?;

        tracing::info!(block = %self.block, tabs = data.tabs.len(), "Saved tabs widget");
        self.data = data;
        self.dirty = false;
        Ok(())
    }
}
