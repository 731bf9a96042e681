mod commands;
mod render;

use clap::{Parser, Subcommand};
use smartgrid_browser::{BrowserSession, CollectionBrowser, HttpGateway};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "smartgrid")]
#[command(about = "Browse a shop's collections and their products")]
struct Cli {
    /// Print the final session snapshot as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Print the session's diagnostic log after the command finishes
    #[arg(long, global = true)]
    show_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every collection, pinned collections first
    List,
    /// Search collections by title prefix (a blank term lists everything)
    Search {
        /// Title prefix to match
        term: String,
    },
    /// Open a collection and page through its products
    Products {
        /// Collection GID, e.g. gid://shopify/Collection/123
        collection_id: String,

        /// Number of product pages to load
        #[arg(
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..),
            conflicts_with = "all"
        )]
        pages: u32,

        /// Keep loading until the collection has no further pages
        #[arg(long)]
        all: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = smartgrid_core::load_app_config()?;
    // Logs go to stderr so `--json` output on stdout stays parseable.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, shop = %config.shop_domain, "starting smartgrid");

    let gateway = HttpGateway::from_config(&config)?;
    let browser = CollectionBrowser::from_config(gateway, &config);
    let mut session = BrowserSession::new();

    let outcome = match &cli.command {
        Commands::List => commands::run_list(&browser, &mut session).await,
        Commands::Search { term } => commands::run_search(&browser, &mut session, term).await,
        Commands::Products {
            collection_id,
            pages,
            all,
        } => {
            let limit = if *all {
                commands::PageLimit::All
            } else {
                commands::PageLimit::Pages(*pages)
            };
            commands::run_products(&browser, &mut session, collection_id, limit).await
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else if outcome.is_ok() {
        match cli.command {
            Commands::Products { .. } => render::print_selection(&session),
            Commands::List | Commands::Search { .. } => render::print_collections(&session),
        }
    }
    if cli.show_log {
        render::print_log(&session);
    }

    outcome
}
