//! hoverscope - annotate astronomy text with catalog entities
//!
//! # Usage
//!
//! ```bash
//! # Annotate text (positional, -t, -f, or stdin)
//! hoverscope annotate "JWST and Euclid observed COSMOS."
//! echo "Doe, J. A. discussed Planck." | hoverscope annotate --format json
//!
//! # Describe one entity
//! hoverscope show jwst
//!
//! # List catalog entities
//! hoverscope list --category survey
//!
//! # Inspect the effective configuration
//! hoverscope config show
//! ```

use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{annotate, config, list, show, GlobalArgs};
use output::color;

// ============================================================================
// CLI Structure
// ============================================================================

/// Entity annotation for astronomy text
#[derive(Parser, Debug)]
#[command(name = "hoverscope", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Find entity mentions in text
    #[command(visible_alias = "a")]
    Annotate(annotate::AnnotateArgs),

    /// Show one entity's details
    Show(show::ShowArgs),

    /// List catalog entities
    #[command(visible_alias = "ls")]
    List(list::ListArgs),

    /// Inspect configuration
    Config(config::ConfigArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.global.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let result: Result<(), String> = match cli.command {
        Commands::Annotate(args) => annotate::run(&cli.global, args),
        Commands::Show(args) => show::run(&cli.global, args),
        Commands::List(args) => list::run(&cli.global, args),
        Commands::Config(args) => config::run(&cli.global, args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", color("31", "error:"), e);
            ExitCode::FAILURE
        }
    }
}
