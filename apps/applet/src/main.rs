//! apt-fetch panel applet entry point.

mod app;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "apt-fetch-applet", version, about = "Panel applet for apt-fetch")]
struct Cli {
    /// Configuration file (default: ~/.config/apt-fetch/applet.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the applet (default)
    Run,
    /// Fetch the apt-fetch status once and print it
    Status {
        /// Print the decoded status as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `status` output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let config = config::Config::load(&config_path)?;
    tracing::debug!(path = %config_path.display(), "configuration loaded");

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            tracing::info!(
                version = env!("CARGO_PKG_VERSION"),
                "starting apt-fetch applet"
            );
            rt.block_on(app::run(config))?;
            tracing::info!("applet shut down cleanly");
        }
        Commands::Status { json } => rt.block_on(app::print_status(&config, json))?,
    }

    Ok(())
}
