//! codetabs CLI - multi-tab code blocks.
//!
//! Provides commands for:
//! - `parse`, `render`: turn tab syntax into records or widget HTML
//! - `encode`, `decode`, `validate`: work with stored widget attributes
//! - `convert to-tabs` / `convert to-code`: batch conversion of a block document
//! - `insert`: add a new widget to a block document

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    ConvertCommand, DecodeArgs, EncodeArgs, InsertArgs, ParseArgs, RenderArgs, ValidateArgs,
};
use output::Output;

/// codetabs - multi-tab code blocks.
#[derive(Parser)]
#[command(name = "codetabs", version, about)]
struct Cli {
    /// Enable info-level logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse tab syntax and print the tab records as JSON.
    Parse(ParseArgs),
    /// Render tab syntax or tab data as widget HTML.
    Render(RenderArgs),
    /// Encode tab data JSON as a block attribute value.
    Encode(EncodeArgs),
    /// Decode a block attribute value.
    Decode(DecodeArgs),
    /// Validate tab data JSON.
    Validate(ValidateArgs),
    /// Convert blocks of a block document.
    #[command(subcommand)]
    Convert(ConvertCommand),
    /// Insert a new widget into a block document.
    Insert(InsertArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Parse(args) => args.execute(),
        Commands::Render(args) => args.execute(),
        Commands::Encode(args) => args.execute(),
        Commands::Decode(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
        Commands::Convert(cmd) => cmd.execute(),
        Commands::Insert(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
