//! Folio HTTP Server Binary Entry Point

use std::path::PathBuf;

use clap::Parser;
use folio_server::{config::load_config, run_server};

#[derive(Parser, Debug)]
#[command(name = "folio-server", version, about = "Serve an Obsidian vault as a JSON notes API")]
struct Args {
    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vault directory, overrides config and OBSIDIAN_VAULT_PATH
    #[arg(long)]
    vault: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:8000
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(vault) = args.vault {
        config.vault.path = vault;
    }
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!("Folio server starting...");
    run_server(config).await
}
