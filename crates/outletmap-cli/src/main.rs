mod commands;
mod render;
mod session;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "outletmap-cli")]
#[command(about = "Browse retail outlets, highlight nearby ones, and search by location or closing time")]
struct Cli {
    /// Override the configured backend base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every outlet marker
    Outlets,
    /// Select an outlet and highlight the outlets around it
    Nearby {
        /// Outlet name (exact match; the first outlet with this name is used)
        name: String,
        /// Highlight radius in meters (defaults to the configured radius)
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Search outlets by location or closing time
    Search {
        /// Free-text query, sent to the backend unchanged
        query: String,
    },
    /// Write the marker set as GeoJSON
    Geojson {
        /// Apply a search before exporting
        #[arg(long)]
        search: Option<String>,
        /// Select an outlet by name before exporting
        #[arg(long)]
        nearby: Option<String>,
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Interactive session: list, click, and search against one loaded map
    Shell,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = outletmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Some(base_url) = cli.base_url {
        config = config.with_api_base_url(base_url);
    }
    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        Some(Commands::Outlets) => commands::run_outlets(&config).await?,
        Some(Commands::Nearby { name, radius }) => {
            commands::run_nearby(&config, &name, radius).await?;
        }
        Some(Commands::Search { query }) => commands::run_search(&config, &query).await?,
        Some(Commands::Geojson {
            search,
            nearby,
            output,
        }) => {
            commands::run_geojson(&config, search.as_deref(), nearby.as_deref(), output.as_deref())
                .await?;
        }
        Some(Commands::Shell) => shell::run_shell(&config).await?,
        None => commands::run_outlets(&config).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
