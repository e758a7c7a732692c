//! `codetabs render` command implementation.

use std::path::PathBuf;

use clap::Args;
use codetabs_config::{CliSettings, Config};
use codetabs_data::{TabsData, try_decode};
use codetabs_syntax::{LanguageRegistry, TabParser};

use super::{Toolkit, read_input};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// File holding tab syntax, or tab data with `--json` (default: stdin).
    input: Option<PathBuf>,

    /// Read tab data JSON instead of tab syntax.
    #[arg(long)]
    json: bool,

    /// Disable syntax highlighting.
    #[arg(long)]
    no_highlight: bool,

    /// Path to configuration file (default: auto-discover codetabs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let cli_settings = CliSettings {
            highlight: self.no_highlight.then_some(false),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let toolkit = Toolkit::new(&config);

        let input = read_input(self.input.as_deref())?;
        let data = load_data(&input, self.json, toolkit.registry())?;
        output.print(&toolkit.renderer().render(&data));
        Ok(())
    }
}

fn load_data(input: &str, json: bool, registry: &dyn LanguageRegistry) -> Result<TabsData, CliError> {
    if json {
        return Ok(try_decode(input)?);
    }
    let records = TabParser::new(Some(registry)).silent().parse(input)?;
    Ok(TabsData::from_records(records))
}
