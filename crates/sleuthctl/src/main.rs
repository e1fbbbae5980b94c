//! Sleuth Control - CLI client for the mailsleuth daemon.
//!
//! Talks to a running sleuthd over HTTP and renders lookup results in the
//! terminal.

mod client;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sleuthctl")]
#[command(about = "mailsleuth - email intelligence lookup", long_about = None)]
#[command(version)]
struct Cli {
    /// Daemon address (also SLEUTHD_ADDR)
    #[arg(long, global = true)]
    addr: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up an email address
    Lookup {
        email: String,

        /// Assert that you have consent to query this address
        #[arg(long)]
        yes: bool,

        /// Skip data breach records
        #[arg(long)]
        no_breaches: bool,

        /// Server-side lookup timeout in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Print the raw JSON response instead of rendering it
        #[arg(long)]
        json: bool,
    },

    /// Show daemon health
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let addr = client::resolve_addr(cli.addr);

    match cli.command {
        Commands::Lookup {
            email,
            yes,
            no_breaches,
            timeout_ms,
            json,
        } => commands::lookup(&addr, &email, yes, no_breaches, timeout_ms, json).await,
        Commands::Status => commands::status(&addr).await,
    }
}
