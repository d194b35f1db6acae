mod commands;
mod http;
mod settings;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tidewise_relevance::SortBy;
use tracing_subscriber::EnvFilter;

use commands::SearchArgs;
use settings::Settings;

#[derive(Parser)]
#[command(name = "tidewise")]
#[command(author, version, about = "Personalized search and recommendations for product catalogs")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Path to the settings file (default: tidewise.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the JSON product catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Path to the preferences database (default: in-memory)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Print command output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog
    Search {
        /// Search query
        query: String,

        /// Only return products in this category ("all" disables the filter)
        #[arg(long)]
        category: Option<String>,

        /// Minimum price, inclusive
        #[arg(long)]
        min_price: Option<f64>,

        /// Maximum price, inclusive
        #[arg(long)]
        max_price: Option<f64>,

        /// Only return products in stock
        #[arg(long)]
        in_stock: bool,

        /// Result ordering: relevance, price, rating or popularity
        #[arg(short, long, default_value = "relevance")]
        sort: SortBy,

        /// Maximum results
        #[arg(short, long)]
        limit: Option<usize>,

        /// Preference profile to learn into
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Autocomplete a partial query
    Suggest {
        /// Partial query
        partial: String,
    },

    /// Recommend products from learned preferences
    Recommend {
        /// Maximum products
        #[arg(short, long)]
        limit: Option<usize>,

        /// Preference profile to recommend for
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Show learned preferences and store statistics
    Stats {
        /// Preference profile to summarize
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// Allowed CORS origin (default: all origins)
        #[arg(long)]
        cors_origin: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let settings = Settings::load(cli.config.as_deref())?.with_overrides(cli.catalog, cli.database);
    let json = cli.json;

    match cli.command {
        Commands::Search {
            query,
            category,
            min_price,
            max_price,
            in_stock,
            sort,
            limit,
            profile,
        } => {
            let args = SearchArgs {
                category,
                min_price,
                max_price,
                in_stock,
                sort,
                limit,
            };
            commands::search(&settings, &query, args, profile, json).await
        }
        Commands::Suggest { partial } => commands::suggest(&settings, &partial, json).await,
        Commands::Recommend { limit, profile } => {
            commands::recommend(&settings, limit, profile, json).await
        }
        Commands::Stats { profile } => commands::stats(&settings, profile, json).await,
        Commands::Serve { port, cors_origin } => {
            commands::serve(&settings, port, cors_origin).await
        }
    }
}
