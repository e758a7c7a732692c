//! `codetabs encode` and `codetabs decode` command implementations.

use std::path::PathBuf;

use clap::Args;
use codetabs_config::Config;
use codetabs_data::{decode_text, encode, encode_text, try_decode};
use codetabs_syntax::{LanguageRegistry, generate_syntax};

use super::{Toolkit, read_input};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the encode command.
#[derive(Args)]
pub(crate) struct EncodeArgs {
    /// File holding tab data JSON, or raw text with `--source` (default: stdin).
    input: Option<PathBuf>,

    /// Encode the input verbatim, as stored in the source attribute.
    #[arg(long)]
    source: bool,
}

impl EncodeArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let input = read_input(self.input.as_deref())?;
        output.print(&encode_input(&input, self.source)?);
        Ok(())
    }
}

fn encode_input(input: &str, source: bool) -> Result<String, CliError> {
    if source {
        return Ok(encode_text(input));
    }
    Ok(encode(&try_decode(input)?))
}

/// Arguments for the decode command.
#[derive(Args)]
pub(crate) struct DecodeArgs {
    /// File holding the attribute value (default: stdin).
    input: Option<PathBuf>,

    /// Print the decoded text verbatim (source attribute).
    #[arg(long, conflicts_with = "syntax")]
    source: bool,

    /// Print the data as tab syntax instead of JSON.
    #[arg(long)]
    syntax: bool,

    /// Path to configuration file (default: auto-discover codetabs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// What `decode` prints.
#[derive(Clone, Copy)]
enum DecodeFormat {
    Json,
    Source,
    Syntax,
}

impl DecodeArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let toolkit = Toolkit::new(&config);

        let format = if self.source {
            DecodeFormat::Source
        } else if self.syntax {
            DecodeFormat::Syntax
        } else {
            DecodeFormat::Json
        };
        let input = read_input(self.input.as_deref())?;
        output.print(&decode_input(&input, format, toolkit.registry())?);
        Ok(())
    }
}

fn decode_input(
    input: &str,
    format: DecodeFormat,
    registry: &dyn LanguageRegistry,
) -> Result<String, CliError> {
    match format {
        DecodeFormat::Source => Ok(decode_text(input)?),
        DecodeFormat::Json => Ok(serde_json::to_string_pretty(&try_decode(input)?)?),
        DecodeFormat::Syntax => {
            let data = try_decode(input)?;
            Ok(generate_syntax(&data.to_records(), Some(registry)))
        }
    }
}

#[cfg(test)]
mod tests {
    use codetabs_syntax::KnownLanguages;
    use pretty_assertions::assert_eq;

    use super::*;

    const JSON: &str = r#"{"version": 1, "active": 1, "tabs": [
        {"title": "Python", "lang": "python", "code": "print(1)"},
        {"title": "Shell", "lang": "bash", "code": "ls"}
    ]}"#;

    #[test]
    fn test_encode_then_decode_syntax() {
        let registry: KnownLanguages = ["python", "bash"].into_iter().collect();
        let encoded = encode_input(JSON, false).unwrap();

        let syntax = decode_input(&encoded, DecodeFormat::Syntax, &registry).unwrap();
        assert_eq!(syntax, "::: Python\nprint(1)\n\n::: Shell | bash | active\nls");
    }

    #[test]
    fn test_decode_json_is_normalized() {
        let registry = KnownLanguages::new();
        let encoded = encode_input(r#"{"active": 9, "tabs": [{"title": " A ", "lang": "JS", "code": "x"}]}"#, false)
            .unwrap();

        let json = decode_input(&encoded, DecodeFormat::Json, &registry).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"version": 1, "active": 0, "tabs": [{"title": "A", "lang": "js", "code": "x"}]})
        );
    }

    #[test]
    fn test_source_round_trip() {
        let registry = KnownLanguages::new();
        let encoded = encode_input("tab::: A\nx", true).unwrap();
        assert_eq!(decode_input(&encoded, DecodeFormat::Source, &registry).unwrap(), "tab::: A\nx");
    }

    #[test]
    fn test_decode_garbage() {
        let registry = KnownLanguages::new();
        let err = decode_input("%%%", DecodeFormat::Json, &registry).unwrap_err();
        assert!(err.to_string().starts_with("Unreadable tab data: "));
    }
}
