//! The `build` command: scrape tree to catalogue document.
//!
//! Excluded records never fail the command; they are counted in the summary
//! and listed in the optional report file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use sawei_catalogue::{BuildOptions, CatalogueStore};
use sawei_core::{AppConfig, BuildReport};
use sawei_ingest::{ingest, IngestOptions, NormalizeContext};

#[derive(Debug, Clone)]
pub(crate) struct BuildArgs {
    pub scrape_dir: PathBuf,
    pub export: Option<PathBuf>,
    pub output: PathBuf,
    pub report: Option<PathBuf>,
    pub dry_run: bool,
}

/// Build the catalogue and write it (and the report) unless `dry_run`.
///
/// # Errors
///
/// Returns an error if the category table or scrape root cannot be read, or
/// if writing the outputs fails.
pub(crate) fn run_build(config: &AppConfig, args: &BuildArgs) -> anyhow::Result<()> {
    let categories = sawei_core::load_categories(&config.categories_path).with_context(|| {
        format!(
            "loading category table {}",
            config.categories_path.display()
        )
    })?;

    let generated_at = Utc::now();
    let context = NormalizeContext::from_config(config, categories, generated_at);
    let fx_rates = context.pricing.fx_rates();

    let output = ingest(&IngestOptions {
        scrape_dir: args.scrape_dir.clone(),
        complete_export: args.export.clone(),
        context,
    })
    .with_context(|| format!("reading scrape tree {}", args.scrape_dir.display()))?;

    let mut report = output.report;
    let (store, diagnostics) = CatalogueStore::build(
        output.products,
        BuildOptions {
            generated_at,
            source: args.scrape_dir.display().to_string(),
            fx_rates: Some(fx_rates),
        },
    );
    report.extend(diagnostics);

    print_summary(&store, &report);

    if args.dry_run {
        println!("dry-run: nothing written");
        return Ok(());
    }

    store
        .save(&args.output)
        .with_context(|| format!("writing catalogue {}", args.output.display()))?;
    println!("wrote {}", args.output.display());

    if let Some(report_path) = &args.report {
        write_report(report_path, &report)?;
        println!("wrote {}", report_path.display());
    }
    Ok(())
}

fn print_summary(store: &CatalogueStore, report: &BuildReport) {
    let meta = store.metadata();
    println!(
        "built catalogue: {} products, {} categories, {} images",
        meta.total_products, meta.total_categories, meta.total_images
    );
    println!("  {:<24}{}", "excluded records", report.exclusions());
    for (kind, count) in report.counts() {
        println!("  {:<24}{count}", kind.as_str());
    }
}

fn write_report(path: &Path, report: &BuildReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json).with_context(|| format!("writing report {}", path.display()))
}
