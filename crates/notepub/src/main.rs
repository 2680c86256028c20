//! notepub CLI - publish the MCP configuration analysis page to Notion.
//!
//! Provides commands for:
//! - `publish`: Create the page in the configured database
//! - `preview`: Print the JSON request body without sending it

mod commands;
mod document;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{PreviewArgs, PublishArgs};
use output::Output;

/// notepub - Notion page publisher.
#[derive(Parser)]
#[command(name = "notepub", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the analysis page in a Notion database.
    Publish(PublishArgs),
    /// Print the page request body as JSON.
    Preview(PreviewArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Publish(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Publish(args) => {
            output.banner("MCP configuration analysis - Notion publisher");
            output.rule();
            args.execute()
        }
        Commands::Preview(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
