//! Flytrap CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Write a default config file
//! - `serve`   — Start the HTTP gateway
//! - `engage`  — Run a single honeypot turn locally

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "flytrap",
    about = "Flytrap — an LLM-backed scam honeypot",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Onboard,

    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run a single honeypot turn against a message
    Engage {
        /// The incoming scammer message
        #[arg(short, long)]
        message: String,

        /// Path to a JSON file holding prior conversation history
        #[arg(long)]
        history: Option<std::path::PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run()?,
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Engage { message, history } => commands::engage::run(&message, history).await?,
    }

    Ok(())
}
