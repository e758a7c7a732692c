//! Conversion between code blocks and tabs widgets.
//!
//! [`Converter`] runs batches over host blocks in either direction and
//! returns a [`BatchReport`] with one [`Outcome`] per block. Batches settle
//! every item: a host error on one block is logged and counted, and the rest
//! of the batch still runs.
//!
//! Single-widget operations live beside it:
//! - [`EditSession`]: load, edit and commit one widget
//! - [`insert_widget`]: add a new widget to the document

mod converter;
mod error;
mod insert;
mod report;
mod session;

pub use converter::{Converter, INVISIBLE_MARKERS};
pub use error::ConvertError;
pub use insert::{insert_widget, insert_widget_with};
pub use report::{BatchReport, Direction, InvalidReason, Outcome, SkipReason, Summary};
pub use session::EditSession;
