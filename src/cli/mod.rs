//! Command-line interface for import-tidy
//!
//! Provides `strip-versions` and `comment-unused` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod strip;
mod unused;
mod utils;

/// Strip pinned versions from import specifiers in a source tree
#[derive(Parser)]
#[command(name = "import-tidy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Read settings from this file instead of auto-discovering one in PATH
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite "pkg@1.2.3" specifiers to "pkg" in place
    StripVersions(strip::StripArgs),

    /// Comment out imports whose bindings are never used
    CommentUnused(unused::UnusedArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::StripVersions(args) => strip::run(args, config_path),
        Commands::CommentUnused(args) => unused::run(args, config_path),
    }
}
