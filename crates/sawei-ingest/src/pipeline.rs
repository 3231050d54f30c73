//! The ingest pipeline: read sources, normalize, repair images, dedupe.
//!
//! Per-record failures are logged, recorded in the [`BuildReport`] and
//! skipped. Only an unreadable scrape root aborts the run.

use std::collections::HashSet;
use std::path::PathBuf;

use sawei_core::{BuildReport, CategoriesFile, Diagnostic, Product};

use crate::dedup::dedupe;
use crate::error::IngestError;
use crate::normalize::{normalize_record, NormalizeContext, NormalizedRecord};
use crate::remediate::remediate_qr_only;
use crate::source::{read_complete_export, read_scrape_tree, SourceBatch, SourcedRecord};

#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub scrape_dir: PathBuf,
    pub complete_export: Option<PathBuf>,
    pub context: NormalizeContext,
}

#[derive(Debug, Clone, Default)]
pub struct IngestOutput {
    /// Valid, deduplicated products in source order.
    pub products: Vec<Product>,
    pub report: BuildReport,
}

/// Read the scrape tree (and the bulk export when configured) and produce the
/// product list for a catalogue build.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the scrape root cannot be listed. An
/// unreadable export is recorded as [`Diagnostic::SkippedSource`] instead.
pub fn ingest(options: &IngestOptions) -> Result<IngestOutput, IngestError> {
    let tree = read_scrape_tree(&options.scrape_dir)?;

    let export = match options.complete_export.as_deref() {
        Some(path) => match read_complete_export(path) {
            Ok(batch) => Some(batch),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping complete export");
                Some(SourceBatch {
                    records: Vec::new(),
                    skipped: vec![e.to_diagnostic()],
                })
            }
        },
        None => None,
    };

    let ctx = &options.context;
    let mut report = BuildReport::new();
    report.extend(tree.skipped);
    let export = export.map(|batch| {
        report.extend(batch.skipped);
        batch.records
    });

    let mut total = tree.records.len();
    let mut normalized = normalize_batch(&tree.records, ctx, &mut report);
    if let Some(records) = export {
        let tree_ids: HashSet<String> = normalized.iter().map(|r| r.product.id.clone()).collect();
        let missing = records_missing_from_tree(records, &tree_ids, &ctx.categories);
        total += missing.len();
        normalized.extend(normalize_batch(&missing, ctx, &mut report));
    }

    Ok(finish(normalized, total, report))
}

/// Normalize, remediate and dedupe already-read records.
#[must_use]
pub fn ingest_records(records: Vec<SourcedRecord>, ctx: &NormalizeContext) -> IngestOutput {
    let mut report = BuildReport::new();
    let normalized = normalize_batch(&records, ctx, &mut report);
    finish(normalized, records.len(), report)
}

fn normalize_batch(
    records: &[SourcedRecord],
    ctx: &NormalizeContext,
    report: &mut BuildReport,
) -> Vec<NormalizedRecord> {
    let mut normalized = Vec::with_capacity(records.len());
    for sourced in records {
        match normalize_record(sourced, ctx) {
            Ok(record) => normalized.push(record),
            Err(e) => {
                tracing::warn!(source = %sourced.origin, error = %e, "record excluded");
                report.push(e.to_diagnostic());
            }
        }
    }
    normalized
}

fn finish(
    mut normalized: Vec<NormalizedRecord>,
    total: usize,
    mut report: BuildReport,
) -> IngestOutput {
    report.extend(remediate_qr_only(&mut normalized));

    let deduped = dedupe(normalized);
    report.extend(deduped.diagnostics);

    let mut products = Vec::with_capacity(deduped.items.len());
    for record in deduped.items {
        if record.qr_only {
            tracing::warn!(id = %record.product.id, slug = %record.product.slug, "product only has the placeholder image");
            report.push(Diagnostic::QrOnlyWarning {
                id: record.product.id.clone(),
                slug: record.product.slug.clone(),
            });
        }
        products.push(record.product);
    }

    tracing::info!(
        records = total,
        products = products.len(),
        diagnostics = report.diagnostics.len(),
        "ingest complete"
    );

    IngestOutput { products, report }
}

/// Export records whose id is not already among the valid scrape-tree
/// products, with their category mapped onto the tree's folder slugs.
fn records_missing_from_tree(
    records: Vec<SourcedRecord>,
    tree_ids: &HashSet<String>,
    categories: &CategoriesFile,
) -> Vec<SourcedRecord> {
    let mut missing = Vec::with_capacity(records.len());
    for mut sourced in records {
        if sourced
            .record
            .id
            .as_deref()
            .is_some_and(|id| tree_ids.contains(id))
        {
            tracing::debug!(source = %sourced.origin, "export record already in scrape tree");
            continue;
        }
        sourced.category_slug = canonical_category_slug(&sourced.category_slug, categories);
        missing.push(sourced);
    }
    missing
}

/// Map an export category name onto the translation table's folder slug when
/// one matches, so export products join the scrape-tree categories.
#[must_use]
pub fn canonical_category_slug(name: &str, categories: &CategoriesFile) -> String {
    let underscored = name.replace(' ', "_");
    categories
        .categories
        .iter()
        .find(|c| c.slug == name || c.slug == underscored || c.fr == name)
        .map_or_else(|| name.to_string(), |c| c.slug.clone())
}
