//! clipdeck - URL copy deck
//!
//! A terminal-based deck of links: pick one, hit Enter, and the URL lands
//! on the system clipboard with a transient confirmation toast.

mod app;
mod config;
mod models;
mod screens;
mod services;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// clipdeck - copy URLs to the clipboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Config file path (default: ~/.config/clipdeck/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Links file path (default: from config)
    #[arg(short, long)]
    links: Option<String>,

    /// Copy a single URL and exit instead of opening the deck
    #[arg(long, value_name = "URL")]
    copy: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let filter = if args.debug {
        "clipdeck=debug,info"
    } else {
        "clipdeck=info,warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let mut config = if let Some(path) = args.config {
        config::Config::from_file(&path)?
    } else {
        config::Config::load()?
    };

    // Override links file if specified
    if let Some(links) = args.links {
        config.links.file = links;
    }

    // One-shot mode: copy the argument and print the confirmation
    if let Some(url) = args.copy {
        return match services::clipboard::copy(&url).await {
            Ok(outcome) => {
                tracing::debug!(?outcome, "copied");
                println!("{}", services::toast::copied_message(&url));
                Ok(())
            }
            Err(e) => {
                tracing::error!("{e}");
                std::process::exit(1);
            }
        };
    }

    let links_file = config.links_file();
    let links = models::LinkList::from_file(&links_file)?;
    if links.is_empty() {
        anyhow::bail!("no links in {}", links_file.display());
    }

    // Run the TUI application
    let mut app = app::App::new(&config, links);
    app.run().await
}
