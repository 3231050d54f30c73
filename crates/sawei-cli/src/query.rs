//! Read-only commands over a built catalogue document.

use std::path::Path;

use anyhow::Context;
use sawei_catalogue::{quote_for_checkout, CatalogueStore, ProductFilter};
use sawei_core::{Currency, Locale, Product};

fn load_store(path: &Path) -> anyhow::Result<CatalogueStore> {
    let (store, diagnostics) = CatalogueStore::load(path)
        .with_context(|| format!("loading catalogue {}; run `sawei build` first", path.display()))?;
    for diagnostic in &diagnostics {
        tracing::warn!(kind = %diagnostic.kind(), "catalogue document needed repair on load");
    }
    Ok(store)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

fn print_products(products: &[&Product], locale: Locale, limit: usize) {
    if products.is_empty() {
        println!("no products found");
        return;
    }

    println!("{:<10}{:<12}{:<36}TITLE", "ID", "EUR", "SLUG");
    for product in products.iter().take(limit) {
        println!(
            "{:<10}{:<12}{:<36}{}",
            product.id,
            format!("{:.2}", product.price_eur()),
            truncate(&product.slug, 34),
            truncate(product.title.get(locale), 50)
        );
    }
    if products.len() > limit {
        println!("... {} more", products.len() - limit);
    }
}

/// # Errors
///
/// Returns an error if the catalogue cannot be loaded.
pub(crate) fn run_stats(path: &Path) -> anyhow::Result<()> {
    let store = load_store(path)?;
    let meta = store.metadata();

    println!("generated: {}", meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("source:    {}", meta.source);
    println!(
        "totals:    {} products, {} categories, {} images",
        meta.total_products, meta.total_categories, meta.total_images
    );
    if let Some((lo, hi)) = store.price_range() {
        println!("prices:    {lo:.2} € - {hi:.2} €");
    }
    println!();
    println!("{:<32}{:<8}NAME", "CATEGORY", "COUNT");
    for category in store.categories() {
        println!(
            "{:<32}{:<8}{}",
            category.slug,
            category.product_count,
            category.name.get(Locale::Fr)
        );
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the catalogue cannot be loaded.
pub(crate) fn run_query(path: &Path, filter: &ProductFilter, limit: usize) -> anyhow::Result<()> {
    let store = load_store(path)?;
    let products = store.filter(filter);
    print_products(&products, filter.locale, limit);
    Ok(())
}

/// # Errors
///
/// Returns an error if the catalogue cannot be loaded.
pub(crate) fn run_search(
    path: &Path,
    query: &str,
    locale: Locale,
    limit: usize,
) -> anyhow::Result<()> {
    let store = load_store(path)?;
    let products = store.search(query, locale);
    print_products(&products, locale, limit);
    Ok(())
}

/// # Errors
///
/// Returns an error if the catalogue cannot be loaded or the product is unknown.
pub(crate) fn run_quote(path: &Path, product_id: &str, currency: Currency) -> anyhow::Result<()> {
    let store = load_store(path)?;
    let quote = quote_for_checkout(&store, product_id, currency)?;
    println!("{}", serde_json::to_string(&quote)?);
    Ok(())
}
