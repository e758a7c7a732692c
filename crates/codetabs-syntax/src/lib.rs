//! Tab syntax for multi-tab code blocks.
//!
//! This crate owns the textual side of the tabs widget:
//!
//! - [`resolve`] / [`is_supported`]: language tag normalization against an
//!   optional [`LanguageRegistry`]
//! - [`TabParser`]: parses the current `:::` grammar and the legacy `tab:::`
//!   grammar into [`TabRecord`]s
//! - [`generate_syntax`]: serializes records back to the current grammar
//! - [`Notifier`]: seam for user-facing messages
//!
//! # Example
//!
//! ```
//! use codetabs_syntax::{TabParser, generate_syntax};
//!
//! let parser = TabParser::new(None).silent();
//! let records = parser.parse("tab::: Shell\nlang::: bash\nls").unwrap();
//!
//! assert_eq!(generate_syntax(&records, None), "::: Shell | bash\nls");
//! ```

mod generate;
mod language;
mod notify;
mod parser;

pub use generate::generate_syntax;
pub use language::{KnownLanguages, LanguageRegistry, MARKDOWN_RENDER, PLAINTEXT, is_supported, resolve};
pub use notify::{Level, Notifier, NullNotifier, RecordingNotifier};
pub use parser::{
    CURRENT_MARKER, Grammar, LEGACY_MARKER, ParseError, ParseErrorKind, TabParser, TabRecord,
    detect_grammar,
};
