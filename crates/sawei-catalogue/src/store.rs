//! The assembled, immutable catalogue.
//!
//! A store is only ever produced by [`CatalogueStore::build`]; categories,
//! metadata and lookup tables are derived from the product list there and
//! nowhere else, so they cannot drift. Loading a document goes through the
//! same path.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sawei_core::{
    CatalogueDocument, CatalogueMetadata, Category, Diagnostic, FxRates, Locale, Product,
};

use crate::error::CatalogueError;
use crate::search::SearchIndex;

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub generated_at: DateTime<Utc>,
    /// Free-form provenance, e.g. the scrape directory.
    pub source: String,
    pub fx_rates: Option<FxRates>,
}

impl BuildOptions {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            source: source.into(),
            fx_rates: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogueStore {
    products: Vec<Product>,
    categories: Vec<Category>,
    metadata: CatalogueMetadata,
    by_id: HashMap<String, usize>,
    by_slug: HashMap<String, usize>,
    search: SearchIndex,
}

impl CatalogueStore {
    /// Assemble a store from deduplicated products.
    ///
    /// Products without a positive unit cost and EUR price are dropped with an
    /// `InvalidPrice` diagnostic. Guarantees unique ids (later duplicates are
    /// dropped) and unique slugs
    /// (a later colliding product becomes `{slug}-{id}`). Categories are
    /// grouped on `category.slug` in first-seen order and keep the first name
    /// seen; every product's embedded category name is aligned to it.
    #[must_use]
    pub fn build(products: Vec<Product>, options: BuildOptions) -> (Self, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let mut kept: Vec<Product> = Vec::with_capacity(products.len());
        let mut by_id: HashMap<String, usize> = HashMap::with_capacity(products.len());
        let mut taken_slugs: HashSet<String> = HashSet::with_capacity(products.len());

        for mut product in products {
            if let Some(reason) = unpublishable_price(&product) {
                tracing::warn!(id = %product.id, reason, "dropping product with invalid price");
                diagnostics.push(Diagnostic::InvalidPrice {
                    id: product.id,
                    source: options.source.clone(),
                    reason: reason.to_string(),
                });
                continue;
            }

            if let Some(&pos) = by_id.get(&product.id) {
                diagnostics.push(Diagnostic::DuplicateIdentifier {
                    id: product.id.clone(),
                    kept_slug: kept[pos].slug.clone(),
                    dropped_slug: product.slug,
                });
                continue;
            }

            if taken_slugs.contains(&product.slug) {
                let original = product.slug.clone();
                let assigned = unique_slug(&original, &product.id, &taken_slugs);
                tracing::warn!(id = %product.id, original = %original, assigned = %assigned, "slug collision");
                diagnostics.push(Diagnostic::SlugCollision {
                    id: product.id.clone(),
                    original_slug: original,
                    assigned_slug: assigned.clone(),
                });
                product.slug = assigned;
            }

            taken_slugs.insert(product.slug.clone());
            by_id.insert(product.id.clone(), kept.len());
            kept.push(product);
        }

        let categories = derive_categories(&mut kept, &mut diagnostics);

        let metadata = CatalogueMetadata {
            total_products: kept.len(),
            total_categories: categories.len(),
            total_images: kept.iter().map(|p| p.images.len()).sum(),
            generated_at: options.generated_at,
            source: options.source,
            fx_rates: options.fx_rates,
        };

        let by_slug = kept
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.slug.clone(), idx))
            .collect();
        let search = SearchIndex::build(&kept);

        let store = Self {
            products: kept,
            categories,
            metadata,
            by_id,
            by_slug,
            search,
        };
        (store, diagnostics)
    }

    /// Rebuild a store from a serialized document. The document's own
    /// categories and counts are ignored and re-derived.
    #[must_use]
    pub fn from_document(document: CatalogueDocument) -> (Self, Vec<Diagnostic>) {
        let options = BuildOptions {
            generated_at: document.metadata.generated_at,
            source: document.metadata.source,
            fx_rates: document.metadata.fx_rates,
        };
        Self::build(document.products, options)
    }

    #[must_use]
    pub fn to_document(&self) -> CatalogueDocument {
        CatalogueDocument {
            products: self.products.clone(),
            categories: self.categories.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// Read a catalogue document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Io`] or [`CatalogueError::Deserialize`].
    pub fn load(path: &Path) -> Result<(Self, Vec<Diagnostic>), CatalogueError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogueError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let document: CatalogueDocument =
            serde_json::from_str(&content).map_err(|source| CatalogueError::Deserialize {
                path: path.display().to_string(),
                source,
            })?;
        let (store, diagnostics) = Self::from_document(document);
        tracing::info!(
            path = %path.display(),
            products = store.products.len(),
            categories = store.categories.len(),
            "catalogue loaded"
        );
        Ok((store, diagnostics))
    }

    /// Write the catalogue document, replacing `path` atomically.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Serialize`] or [`CatalogueError::Io`].
    pub fn save(&self, path: &Path) -> Result<(), CatalogueError> {
        let io_err = |source| CatalogueError::Io {
            path: path.display().to_string(),
            source,
        };

        let json =
            serde_json::to_string_pretty(&self.to_document()).map_err(CatalogueError::Serialize)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;
        Ok(())
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn metadata(&self) -> &CatalogueMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub(crate) fn position_by_id(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub(crate) fn position_by_slug(&self, slug: &str) -> Option<usize> {
        self.by_slug.get(slug).copied()
    }

    pub(crate) fn search_positions(&self, query: &str, locale: Locale) -> Vec<usize> {
        self.search.search(query, locale)
    }
}

fn unpublishable_price(product: &Product) -> Option<&'static str> {
    if product.pricing.original_unit_cost.amount <= Decimal::ZERO {
        Some("unit cost must be positive")
    } else if product.pricing.computed.eur <= Decimal::ZERO {
        Some("EUR price must be positive")
    } else {
        None
    }
}

fn unique_slug(slug: &str, id: &str, taken: &HashSet<String>) -> String {
    let candidate = format!("{slug}-{id}");
    if !taken.contains(&candidate) {
        return candidate;
    }
    (2..)
        .map(|n| format!("{candidate}-{n}"))
        .find(|c| !taken.contains(c))
        .unwrap_or(candidate)
}

fn derive_categories(products: &mut [Product], diagnostics: &mut Vec<Diagnostic>) -> Vec<Category> {
    let mut categories: Vec<Category> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut reported: HashSet<(String, String)> = HashSet::new();

    for product in products.iter_mut() {
        let slug = &product.category.slug;
        let Some(&pos) = positions.get(slug) else {
            positions.insert(slug.clone(), categories.len());
            categories.push(Category {
                id: product.category.id.clone(),
                slug: slug.clone(),
                name: product.category.name.clone(),
                product_count: 1,
            });
            continue;
        };

        let category = &mut categories[pos];
        category.product_count += 1;
        if product.category.name != category.name {
            let ignored = product.category.name.get(Locale::Fr).to_string();
            if reported.insert((slug.clone(), ignored.clone())) {
                tracing::warn!(slug = %slug, kept = %category.name.get(Locale::Fr), ignored = %ignored, "category name conflict");
                diagnostics.push(Diagnostic::CategoryNameConflict {
                    slug: slug.clone(),
                    kept: category.name.get(Locale::Fr).to_string(),
                    ignored,
                });
            }
            product.category.name = category.name.clone();
        }
        if category.id.is_none() {
            category.id.clone_from(&product.category.id);
        }
    }
    categories
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
