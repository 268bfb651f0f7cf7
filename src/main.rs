use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use catalog::commands::{self, serve::Overrides};
use catalog::config::{BackendKind, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Marketplace item catalog API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Path to the config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Port to listen on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
        /// Catalog backend (overrides storage.backend)
        #[arg(short, long, value_enum)]
        backend: Option<BackendKind>,
    },
    /// Validate the config and initialize storage, then exit
    Check {
        /// Path to the config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            port,
            backend,
        } => commands::serve::execute(&config, Overrides { port, backend }).await,
        Commands::Check { config } => commands::check::execute(&config).await,
    }
}
