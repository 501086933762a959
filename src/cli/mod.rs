//! CLI for the diamond gateway
//!
//! Diagnostic counterpart of the storefront integration: search the remote
//! inventory, inspect single stones, probe connectivity and manage the
//! query cache from a terminal.

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::config::AppConfig;
use crate::domain::{FilterSet, OneOrMany, Pagination};
use crate::infrastructure::logging;

/// Diamond Gateway - Nivoda inventory client
#[derive(Parser)]
#[command(name = "ndc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Search the remote inventory
    Search(SearchArgs),

    /// Fetch a single diamond by provider id
    Get {
        id: String,
        /// Bypass the query cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Fetch image/video/certificate links for a diamond
    Media { id: String },

    /// List the filter values the provider recognizes
    FilterOptions,

    /// Probe API reachability and report inventory size
    TestConnection,

    /// Show query-cache statistics
    CacheStats,

    /// Flush all cached query responses
    ClearCache,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Shape filter; repeat for multiple values
    #[arg(long)]
    pub shape: Vec<String>,

    /// Color grade filter; repeat for multiple values
    #[arg(long)]
    pub color: Vec<String>,

    /// Clarity grade filter; repeat for multiple values
    #[arg(long)]
    pub clarity: Vec<String>,

    /// Cut grade filter; repeat for multiple values
    #[arg(long)]
    pub cut: Vec<String>,

    /// Grading lab filter; repeat for multiple values
    #[arg(long)]
    pub lab: Vec<String>,

    #[arg(long)]
    pub carat_min: Option<f64>,

    #[arg(long)]
    pub carat_max: Option<f64>,

    #[arg(long)]
    pub price_min: Option<f64>,

    #[arg(long)]
    pub price_max: Option<f64>,

    /// Only stones with (true) or without (false) a 360 video
    #[arg(long)]
    pub has_video: Option<bool>,

    /// Only stones with (true) or without (false) an image
    #[arg(long)]
    pub has_image: Option<bool>,

    /// 1-based result page
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Results per page
    #[arg(long, default_value_t = 20)]
    pub limit: u32,

    /// Bypass the query cache
    #[arg(long)]
    pub no_cache: bool,
}

impl SearchArgs {
    pub fn filter_set(&self) -> FilterSet {
        FilterSet {
            shape: many(&self.shape),
            color: many(&self.color),
            clarity: many(&self.clarity),
            cut: many(&self.cut),
            lab: many(&self.lab),
            carat_min: self.carat_min,
            carat_max: self.carat_max,
            price_min: self.price_min,
            price_max: self.price_max,
            has_video: self.has_video,
            has_image: self.has_image,
            ..FilterSet::default()
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.limit)
    }
}

fn many(values: &[String]) -> Option<OneOrMany> {
    if values.is_empty() {
        None
    } else {
        Some(OneOrMany::Many(values.to_vec()))
    }
}

/// Runs one CLI command to completion
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let service = crate::create_service(&config)?;

    match cli.command {
        Command::Search(args) => {
            let page = service
                .search(&args.filter_set(), args.pagination(), args.no_cache)
                .await?;
            print_json(&page)
        }
        Command::Get { id, no_cache } => {
            let diamond = service.get(&id, no_cache).await?;
            print_json(&diamond)
        }
        Command::Media { id } => {
            let media = service.media(&id).await?;
            print_json(&media)
        }
        Command::FilterOptions => print_json(&service.filter_options()),
        Command::TestConnection => {
            let status = service.test_connection().await;
            print_json(&status)?;

            if !status.connected {
                std::process::exit(1);
            }

            Ok(())
        }
        Command::CacheStats => {
            let stats = service.cache_stats().await?;
            print_json(&stats)
        }
        Command::ClearCache => {
            let cleared = service.clear_cache().await?;
            print_json(&serde_json::json!({ "cleared": cleared }))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
