//! Readers for the two record sources: the scrape tree and the bulk export.
//!
//! Unreadable or malformed product files are reported as
//! [`Diagnostic::SkippedSource`] and skipped rather than propagated, so one
//! bad folder never aborts a build. Only a missing root is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use sawei_core::{Diagnostic, LocalizedString};

use crate::error::IngestError;
use crate::types::{CompleteExport, RawRecord};

pub const PRODUCT_FILE: &str = "info_produit.json";

/// Scratch folders left behind by interrupted scrape runs.
const SCRATCH_PREFIX: &str = "tmpclaude";

/// One raw record plus where it came from.
#[derive(Debug, Clone)]
pub struct SourcedRecord {
    /// File path (or export location) used in diagnostics.
    pub origin: String,
    pub category_slug: String,
    /// Product folder name within the category, scrape tree only.
    pub folder: Option<String>,
    /// Category names carried by the source itself (export only).
    pub category_name: Option<LocalizedString>,
    pub record: RawRecord,
}

#[derive(Debug, Clone, Default)]
pub struct SourceBatch {
    pub records: Vec<SourcedRecord>,
    pub skipped: Vec<Diagnostic>,
}

/// Read every `{category}/{product}/info_produit.json` under `root`.
///
/// Directories are visited in sorted order so builds are reproducible.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if `root` itself cannot be listed.
pub fn read_scrape_tree(root: &Path) -> Result<SourceBatch, IngestError> {
    let mut batch = SourceBatch::default();

    let category_dirs = sorted_subdirs(root).map_err(|source| IngestError::Io {
        path: root.display().to_string(),
        source,
    })?;

    for category_dir in category_dirs {
        let Some(category_slug) = dir_name(&category_dir) else {
            continue;
        };

        let product_dirs = match sorted_subdirs(&category_dir) {
            Ok(dirs) => dirs,
            Err(e) => {
                tracing::warn!(path = %category_dir.display(), error = %e, "skipping unreadable category directory");
                batch.skipped.push(Diagnostic::SkippedSource {
                    path: category_dir.display().to_string(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        for product_dir in product_dirs {
            let Some(folder) = dir_name(&product_dir) else {
                continue;
            };
            let info_path = product_dir.join(PRODUCT_FILE);
            if !info_path.is_file() {
                tracing::debug!(path = %product_dir.display(), "no product file, skipping folder");
                continue;
            }

            match read_record(&info_path) {
                Ok(record) => batch.records.push(SourcedRecord {
                    origin: info_path.display().to_string(),
                    category_slug: category_slug.clone(),
                    folder: Some(folder),
                    category_name: None,
                    record,
                }),
                Err(e) => {
                    tracing::warn!(path = %info_path.display(), error = %e, "skipping malformed product file");
                    batch.skipped.push(e.to_diagnostic());
                }
            }
        }
    }

    tracing::info!(
        root = %root.display(),
        records = batch.records.len(),
        skipped = batch.skipped.len(),
        "scrape tree read"
    );
    Ok(batch)
}

/// Read the bulk export. Each export category's French name is used as the
/// category slug.
///
/// # Errors
///
/// Returns [`IngestError::Io`] or [`IngestError::Deserialize`] when the file
/// cannot be read or parsed.
pub fn read_complete_export(path: &Path) -> Result<SourceBatch, IngestError> {
    let content = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let export: CompleteExport =
        serde_json::from_str(&content).map_err(|source| IngestError::Deserialize {
            context: path.display().to_string(),
            source,
        })?;

    let mut batch = SourceBatch::default();
    for (cat_idx, category) in export.categories.into_iter().enumerate() {
        let slug = category.name_fr.trim().to_string();
        if slug.is_empty() {
            tracing::warn!(index = cat_idx, "skipping export category without a name");
            batch.skipped.push(Diagnostic::SkippedSource {
                path: format!("{}#categories[{cat_idx}]", path.display()),
                reason: "category has no name_fr".to_string(),
            });
            continue;
        }
        let name = LocalizedString::new(
            category.name_fr.trim(),
            category.name_en.trim(),
            category.name_cn.trim(),
        );

        for (prod_idx, product) in category.products.into_iter().enumerate() {
            batch.records.push(SourcedRecord {
                origin: format!(
                    "{}#categories[{cat_idx}].products[{prod_idx}]",
                    path.display()
                ),
                category_slug: slug.clone(),
                folder: None,
                category_name: Some(name.clone()),
                record: product.into_raw_record(),
            });
        }
    }

    tracing::info!(path = %path.display(), records = batch.records.len(), "complete export read");
    Ok(batch)
}

fn read_record(path: &Path) -> Result<RawRecord, IngestError> {
    let content = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| IngestError::Deserialize {
        context: path.display().to_string(),
        source,
    })
}

fn sorted_subdirs(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        if dir_name(&path).is_some_and(|name| name.starts_with(SCRATCH_PREFIX)) {
            continue;
        }
        dirs.push(path);
    }
    dirs.sort();
    Ok(dirs)
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_product(root: &Path, category: &str, folder: &str, body: &str) {
        let dir = root.join(category).join(folder);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(PRODUCT_FILE), body).unwrap();
    }

    #[test]
    fn reads_records_in_sorted_order() {
        let tmp = tempfile::tempdir().unwrap();
        write_product(tmp.path(), "Outils_SATA", "b-kit", r#"{"id":"2"}"#);
        write_product(tmp.path(), "Outils_SATA", "a-kit", r#"{"id":"1"}"#);
        write_product(tmp.path(), "Equipement_de_levage", "cric", r#"{"id":"3"}"#);

        let batch = read_scrape_tree(tmp.path()).unwrap();
        let ids: Vec<_> = batch
            .records
            .iter()
            .map(|r| r.record.id.clone().unwrap())
            .collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
        assert_eq!(batch.records[1].category_slug, "Outils_SATA");
        assert_eq!(batch.records[1].folder.as_deref(), Some("a-kit"));
        assert!(batch.skipped.is_empty());
    }

    #[test]
    fn skips_scratch_folders_and_folders_without_product_file() {
        let tmp = tempfile::tempdir().unwrap();
        write_product(tmp.path(), "tmpclaude-1234", "x", r#"{"id":"9"}"#);
        write_product(tmp.path(), "Outils_JTC", "tmpclaude-a", r#"{"id":"8"}"#);
        fs::create_dir_all(tmp.path().join("Outils_JTC").join("empty")).unwrap();
        write_product(tmp.path(), "Outils_JTC", "ok", r#"{"id":"7"}"#);

        let batch = read_scrape_tree(tmp.path()).unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].record.id.as_deref(), Some("7"));
    }

    #[test]
    fn malformed_file_becomes_skipped_source() {
        let tmp = tempfile::tempdir().unwrap();
        write_product(tmp.path(), "Outils_JTC", "broken", "{not json");
        write_product(tmp.path(), "Outils_JTC", "fine", r#"{"id":"1"}"#);

        let batch = read_scrape_tree(tmp.path()).unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.skipped.len(), 1);
        assert!(matches!(batch.skipped[0], Diagnostic::SkippedSource { ref path, .. } if path.contains("broken")));
    }

    #[test]
    fn missing_root_is_an_error() {
        let err = read_scrape_tree(Path::new("/nonexistent/scrape")).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }

    #[test]
    fn export_records_carry_category_names() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("catalogue_complet.json");
        fs::write(
            &path,
            r#"{"categories":[
                {"name_fr":"Outils SATA","name_en":"SATA Tools","name_cn":"世达工具",
                 "products":[{"id":"5","title_cn":"扳手","price_cny":"30"}]},
                {"name_fr":"","products":[{"id":"6"}]}
            ]}"#,
        )
        .unwrap();

        let batch = read_complete_export(&path).unwrap();
        assert_eq!(batch.records.len(), 1);
        let record = &batch.records[0];
        assert_eq!(record.category_slug, "Outils SATA");
        assert_eq!(record.category_name.as_ref().unwrap().en, "SATA Tools");
        assert!(record.origin.ends_with("#categories[0].products[0]"));
        assert_eq!(batch.skipped.len(), 1);
    }

    #[test]
    fn malformed_export_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.json");
        fs::write(&path, "[1,2").unwrap();
        assert!(matches!(
            read_complete_export(&path),
            Err(IngestError::Deserialize { .. })
        ));
    }
}
