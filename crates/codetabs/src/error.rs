//! CLI error types.

use codetabs_config::ConfigError;
use codetabs_convert::ConvertError;
use codetabs_data::CodecError;
use codetabs_host::HostError;
use codetabs_syntax::ParseError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Host(#[from] HostError),

    #[error("{0}")]
    Convert(#[from] ConvertError),

    #[error("Invalid tab syntax: {0}")]
    Parse(#[from] ParseError),

    #[error("Unreadable tab data: {0}")]
    Codec(#[from] CodecError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
