use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kbws_interaction::ClientConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "kbws")]
#[command(about = "kbws - save expression and network datasets into KBase workspaces", long_about = None)]
struct Cli {
    /// Workspace service URL (overrides config.json and KBWS_WORKSPACE_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Path to a config.json (default: ~/.config/kbws/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List your workspaces
    List {
        /// Include workspaces readable by everyone
        #[arg(long)]
        include_global: bool,
    },
    /// Look up a workspace by name
    Find {
        name: String,
        /// Also search workspaces readable by everyone
        #[arg(long)]
        search_global: bool,
    },
    /// Save a dataset document into a workspace
    Save {
        /// Name of the target workspace
        #[arg(long)]
        workspace: String,
        /// JSON file holding a dataset, e.g. {"kind": "expression_series", ...}
        #[arg(long)]
        file: PathBuf,
        /// Also search workspaces readable by everyone
        #[arg(long)]
        search_global: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config =
        ClientConfig::load(cli.config.as_deref()).context("Failed to load client configuration")?;
    if let Some(url) = cli.url {
        config.url = url;
    }
    tracing::debug!(url = %config.url, "using workspace service");
    let directory = kbws_interaction::connect(config)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::List { include_global } => {
            commands::list::run(&directory, include_global, &mut out).await?
        }
        Commands::Find {
            name,
            search_global,
        } => commands::find::run(&directory, &name, search_global, &mut out).await?,
        Commands::Save {
            workspace,
            file,
            search_global,
        } => commands::save::run(&directory, &workspace, &file, search_global, &mut out).await?,
    }

    Ok(())
}
