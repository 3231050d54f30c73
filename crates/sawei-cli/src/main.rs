mod build;
mod query;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use sawei_catalogue::SortBy;
use sawei_core::{Currency, Locale};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sawei")]
#[command(about = "Build and query the SAWEI product catalogue")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the catalogue document from the scrape tree
    Build {
        /// Scrape tree root (defaults to SAWEI_SCRAPE_DIR)
        #[arg(long)]
        scrape_dir: Option<PathBuf>,
        /// Bulk export to merge in (defaults to SAWEI_COMPLETE_EXPORT_PATH)
        #[arg(long)]
        export: Option<PathBuf>,
        /// Output document (defaults to SAWEI_CATALOGUE_PATH)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Also write the build diagnostics as JSON
        #[arg(long)]
        report: Option<PathBuf>,
        /// Run the build and print the summary without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Show catalogue totals and per-category counts
    Stats {
        /// Catalogue document (defaults to SAWEI_CATALOGUE_PATH)
        #[arg(long)]
        catalogue: Option<PathBuf>,
    },
    /// List products matching filters
    Query {
        #[arg(long)]
        catalogue: Option<PathBuf>,
        /// Category slug, or "all"
        #[arg(long)]
        category: Option<String>,
        /// Minimum EUR price, inclusive
        #[arg(long)]
        min_price: Option<Decimal>,
        /// Maximum EUR price, inclusive
        #[arg(long)]
        max_price: Option<Decimal>,
        /// Substring of the title or category name
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "fr")]
        locale: Locale,
        /// price-asc, price-desc, name-asc or newest
        #[arg(long, default_value = "price-desc")]
        sort: SortBy,
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Full-text search across titles, descriptions, categories and SKUs
    Search {
        query: String,
        #[arg(long)]
        catalogue: Option<PathBuf>,
        #[arg(long, default_value = "fr")]
        locale: Locale,
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Print the checkout amount for a product
    Quote {
        product_id: String,
        #[arg(long)]
        catalogue: Option<PathBuf>,
        #[arg(long, default_value = "EUR")]
        currency: Currency,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = sawei_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalogue_or_default =
        |path: Option<PathBuf>| path.unwrap_or_else(|| config.catalogue_path.clone());

    match cli.command {
        Some(Commands::Build {
            scrape_dir,
            export,
            output,
            report,
            dry_run,
        }) => build::run_build(
            &config,
            &build::BuildArgs {
                scrape_dir: scrape_dir.unwrap_or_else(|| config.scrape_dir.clone()),
                export: export.or_else(|| config.complete_export_path.clone()),
                output: catalogue_or_default(output),
                report,
                dry_run,
            },
        ),
        Some(Commands::Stats { catalogue }) => query::run_stats(&catalogue_or_default(catalogue)),
        Some(Commands::Query {
            catalogue,
            category,
            min_price,
            max_price,
            search,
            locale,
            sort,
            limit,
        }) => query::run_query(
            &catalogue_or_default(catalogue),
            &sawei_catalogue::ProductFilter {
                category,
                min_price,
                max_price,
                search_text: search,
                locale,
                sort_by: sort,
            },
            limit,
        ),
        Some(Commands::Search {
            query,
            catalogue,
            locale,
            limit,
        }) => query::run_search(&catalogue_or_default(catalogue), &query, locale, limit),
        Some(Commands::Quote {
            product_id,
            catalogue,
            currency,
        }) => query::run_quote(&catalogue_or_default(catalogue), &product_id, currency),
        None => {
            println!("sawei: run `sawei --help` for available commands");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
