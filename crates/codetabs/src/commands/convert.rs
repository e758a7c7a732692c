//! `codetabs convert` subcommand group.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use codetabs_config::{CliSettings, Config};
use codetabs_convert::{BatchReport, Converter, Direction};
use codetabs_host::JsonFileHost;
use codetabs_syntax::Notifier;

use super::Toolkit;
use crate::error::CliError;
use crate::output::Output;

/// Conversion commands.
#[derive(Subcommand)]
pub(crate) enum ConvertCommand {
    /// Turn code blocks holding tab syntax into tabs widgets.
    ToTabs(ConvertArgs),
    /// Turn tabs widgets back into code blocks.
    ToCode(ConvertArgs),
}

impl ConvertCommand {
    /// Execute the convert subcommand.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        match self {
            Self::ToTabs(args) => args.execute(Direction::ToTabs),
            Self::ToCode(args) => args.execute(Direction::ToCode),
        }
    }
}

/// Arguments shared by both conversion directions.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Block document to convert (overrides config).
    #[arg(short, long, env = "CODETABS_STORE")]
    store: Option<PathBuf>,

    /// Info string of generated code blocks (overrides config).
    #[arg(long)]
    code_language: Option<String>,

    /// Report what would change without saving the document.
    #[arg(long)]
    dry_run: bool,

    /// Path to configuration file (default: auto-discover codetabs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ConvertArgs {
    fn execute(self, direction: Direction) -> Result<(), CliError> {
        let output = Output::new();
        let cli_settings = CliSettings {
            store_path: self.store.clone(),
            code_language: self.code_language.clone(),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let host = JsonFileHost::open(config.require_store_path()?)?;
        let toolkit = Toolkit::new(&config);

        output.info(&format!("Document: {}", host.path().display()));
        let report = run_batch(&host, &config, &toolkit, &output, direction)?;

        for (block, error) in report.failures() {
            output.warning(&format!("  - {block}: {error}"));
        }

        let summary = report.summary();
        if self.dry_run {
            output.info("[DRY RUN] Document not saved.");
        } else if summary.success > 0 {
            host.save()?;
            output.success(&format!("Saved {}", host.path().display()));
        }

        if summary.failure > 0 {
            return Err(CliError::Validation(format!(
                "{} block(s) could not be converted",
                summary.failure
            )));
        }
        Ok(())
    }
}

/// Run one batch over the document in memory.
fn run_batch(
    host: &JsonFileHost,
    config: &Config,
    toolkit: &Toolkit,
    notifier: &dyn Notifier,
    direction: Direction,
) -> Result<BatchReport, CliError> {
    let mut converter = Converter::new(host)
        .with_registry(toolkit.registry())
        .with_renderer(toolkit.renderer())
        .with_notifier(notifier)
        .with_code_language(config.convert.code_language.clone());
    if let Some(chars) = config.convert.strip_chars() {
        converter = converter.with_strip_chars(chars);
    }

    let report = match direction {
        Direction::ToTabs => converter.code_to_tabs(host.code_blocks()?),
        Direction::ToCode => converter.tabs_to_code(converter.widget_blocks()?),
    };
    Ok(report)
}
