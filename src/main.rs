//! Customer Backend - REST API
//!
//! Run modes:
//!   customer-api serve [--port <port>] [--store sqlite|memory] [--db-path <path>] [--seed]
//!   customer-api config

use clap::{Parser, Subcommand};
use customer_backend::common::{self, AppConfig, StoreKind};
use customer_backend::{build_service, start_server};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "customer-api")]
#[command(about = "Customer record management REST API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API server
    Serve {
        /// Port to listen on (overrides CUSTOMER_API_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Storage engine: sqlite or memory (overrides CUSTOMER_STORE)
        #[arg(short, long)]
        store: Option<StoreKind>,

        /// SQLite database path (overrides CUSTOMER_DB_PATH)
        #[arg(long)]
        db_path: Option<PathBuf>,

        /// Seed the memory store with demo customers
        #[arg(long)]
        seed: bool,
    },

    /// Print the resolved configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.error_code(), "{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> common::Result<()> {
    let mut config = AppConfig::from_env()?;

    match cli.command {
        Commands::Serve {
            port,
            store,
            db_path,
            seed,
        } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(store) = store {
                config.store = store;
            }
            if let Some(db_path) = db_path {
                config.db_path = db_path;
            }
            config.seed |= seed;

            common::init_from_config(&config)?;
            info!(store = %config.store, port = config.port, "starting customer API");

            let service = build_service(&config)?;
            start_server(service, config.port).await?;

            info!("customer API stopped");
        }
        Commands::Config => config.print_summary(),
    }

    Ok(())
}
