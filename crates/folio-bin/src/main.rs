//! Folio terminal client

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use folio_core::model::ContactMessage;
use folio_core::{Browser, FolioConfig, LocalApi, MemoryHistory, NotesApi, Vault};

mod client;
mod display;
mod repl;

use client::HttpNotesApi;
use repl::Repl;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Browse a personal notes vault from the terminal")]
struct Cli {
    /// YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Notes API base URL, defaults to browser.api_base
    #[arg(long, global = true, conflicts_with = "vault")]
    api: Option<String>,

    /// Read this vault directly instead of talking to a server
    #[arg(long, global = true)]
    vault: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive category -> book -> note browser (default)
    Browse,
    /// Print a random quote from the vault
    Quote {
        #[arg(long)]
        category: Option<String>,
        /// List quote categories instead
        #[arg(long)]
        categories: bool,
    },
    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

fn notes_api(cli: &Cli, config: &FolioConfig) -> anyhow::Result<Arc<dyn NotesApi>> {
    if let Some(path) = &cli.vault {
        let mut config = config.clone();
        config.vault.path = path.clone();
        log::info!("Reading vault at {:?}", path);
        return Ok(Arc::new(LocalApi::new(Arc::new(Vault::from_config(&config)))));
    }

    let base = cli.api.as_deref().unwrap_or(&config.browser.api_base);
    let api = HttpNotesApi::new(base).with_context(|| format!("invalid API URL: {}", base))?;
    log::info!("Using notes API at {}", api.base());
    Ok(Arc::new(api))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => FolioConfig::load(path)?,
        None => FolioConfig::default(),
    };
    config.apply_env();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    let api = notes_api(&cli, &config)?;

    match cli.command.unwrap_or(Command::Browse) {
        Command::Browse => {
            let browser = Browser::new(api, MemoryHistory::new(), &config.browser);
            Repl::new(browser).run().await?;
        }
        Command::Quote {
            categories: true, ..
        } => {
            for category in api.quote_categories().await? {
                println!("{}", category);
            }
        }
        Command::Quote { category, .. } => {
            let quote = api.random_quote(category.as_deref()).await?;
            println!("\"{}\"", quote.text);
            match &quote.book {
                Some(book) => println!("  - {}, {}", quote.source, book),
                None => println!("  - {}", quote.source),
            }
        }
        Command::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let receipt = api
                .submit_contact(ContactMessage {
                    name,
                    email,
                    subject,
                    message,
                })
                .await?;
            println!("{}", receipt.message);
        }
    }

    Ok(())
}
