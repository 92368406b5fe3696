//! pagevar — workspace variable synchronization CLI.
//!
//! # Usage
//!
//! ```text
//! pagevar sync [--dry-run]
//! pagevar poll [--interval-secs N]
//! ```
//!
//! Credentials come from `./.env` or `./settings.json` (see
//! `pagevar_core::settings`).

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{poll::PollArgs, sync::SyncArgs};

#[derive(Parser, Debug)]
#[command(
    name = "pagevar",
    version,
    about = "Propagate inline variable assignments across workspace pages",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Collect variable assignments and rewrite placeholders across all pages.
    Sync(SyncArgs),

    /// Poll the configured database for records modified after the watermark.
    Poll(PollArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Poll(args) => args.run(),
    }
}
