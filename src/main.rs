// ABOUTME: Entry point for the kiln CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use kiln::commands::{reimage, ReimageArgs};
use kiln::config::{self, Config};
use kiln::error::Result;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { force } => {
            let cwd = env::current_dir().expect("Failed to get current directory");
            config::init_config(&cwd, force)
        }
        Commands::Reimage {
            machine,
            os_type,
            os_version,
            machine_type,
        } => {
            let cwd = env::current_dir().expect("Failed to get current directory");
            let config = Config::discover(&cwd)?;
            reimage(
                &config,
                ReimageArgs {
                    machine,
                    os_type,
                    os_version,
                    machine_type,
                },
            )
            .await
        }
    }
}
