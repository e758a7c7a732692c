//! `codetabs parse` command implementation.

use std::path::PathBuf;

use clap::Args;
use codetabs_config::Config;
use codetabs_data::TabsData;
use codetabs_syntax::{LanguageRegistry, TabParser};

use super::{Toolkit, read_input};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the parse command.
#[derive(Args)]
pub(crate) struct ParseArgs {
    /// File holding tab syntax (default: stdin).
    input: Option<PathBuf>,

    /// Print normalized tab data instead of raw records.
    #[arg(long)]
    data: bool,

    /// Path to configuration file (default: auto-discover codetabs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ParseArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let toolkit = Toolkit::new(&config);

        let text = read_input(self.input.as_deref())?;
        output.print(&parse_to_json(&text, toolkit.registry(), self.data)?);
        Ok(())
    }
}

fn parse_to_json(text: &str, registry: &dyn LanguageRegistry, data: bool) -> Result<String, CliError> {
    let records = TabParser::new(Some(registry)).silent().parse(text)?;
    let json = if data {
        serde_json::to_string_pretty(&TabsData::from_records(records))?
    } else {
        serde_json::to_string_pretty(&records)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use codetabs_syntax::KnownLanguages;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_prints_records() {
        let registry: KnownLanguages = ["js"].into_iter().collect();
        let json = parse_to_json("::: JS | active\nx()", &registry, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value,
            serde_json::json!([{"title": "JS", "language": "js", "code": "x()", "is_active": true}])
        );
    }

    #[test]
    fn test_parse_prints_data() {
        let registry = KnownLanguages::new();
        let json = parse_to_json("::: A\nx\n::: B\ny", &registry, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["active"], 0);
        assert_eq!(value["tabs"][1]["lang"], "plaintext");
    }

    #[test]
    fn test_parse_error() {
        let registry = KnownLanguages::new();
        let err = parse_to_json("::: A\n", &registry, false).unwrap_err();
        assert!(err.to_string().starts_with("Invalid tab syntax: tab 1: tab has no code"));
    }
}
