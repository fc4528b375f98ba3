//! SUFT command-line client
//!
//! Entry point: initialize logging first, then parse arguments and
//! dispatch. Resource commands open a client from the persisted session and
//! write back the token pair when the gateway rotated it.

use anyhow::Result;
use clap::Parser;
use suft_client::ClientConfig;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod draft;
mod session;

use cli::{Cli, Commands};
use session::SessionStore;

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SUFT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.base_url {
        Some(base_url) => ClientConfig::new(base_url)?,
        None => ClientConfig::default(),
    };
    let store = SessionStore::open_default()?;

    match cli.command {
        Commands::Login => {
            let message = commands::login(&store, &config).await?;
            print!("{message}");
        }
        Commands::Logout => {
            let message = commands::logout(&store)?;
            print!("{message}");
        }
        command => {
            let client = commands::open_client(&store, &config).await?;
            let before = client.token().await;

            let output = commands::run_resource(&client, command, store.dir()).await?;
            print!("{output}");

            commands::persist_rotation(&store, &client, &before).await?;
        }
    }

    Ok(())
}
