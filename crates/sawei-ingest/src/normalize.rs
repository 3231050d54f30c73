//! Normalization from [`RawRecord`]s to published [`Product`]s.
//!
//! Title generation lives in [`crate::title`], slug rules in [`crate::slug`],
//! image filtering in [`crate::images`] and pricing in [`crate::pricing`];
//! this module decides which input wins for each field.

use chrono::{DateTime, Utc};
use sawei_core::{
    categories::fallback_name, parse_timestamp, AppConfig, CategoriesFile, CategoryRef, Locale,
    LocalizedString, Product,
};

use crate::error::IngestError;
use crate::images::{select_images, to_product_images};
use crate::pricing::{parse_cost, PricingPolicy};
use crate::slug::resolve_slug;
use crate::source::SourcedRecord;
use crate::title::{generate_title, source_title, template_description};

pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "5e1152055e503.jpg";

/// Everything normalization needs besides the record itself.
#[derive(Debug, Clone)]
pub struct NormalizeContext {
    pub categories: CategoriesFile,
    pub pricing: PricingPolicy,
    /// Substring identifying the placeholder QR-code image.
    pub placeholder_image: String,
    /// `createdAt` for records without a usable `scraped_at`.
    pub built_at: DateTime<Utc>,
}

impl NormalizeContext {
    #[must_use]
    pub fn new(categories: CategoriesFile, built_at: DateTime<Utc>) -> Self {
        Self {
            categories,
            pricing: PricingPolicy::default(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            built_at,
        }
    }

    #[must_use]
    pub fn from_config(
        config: &AppConfig,
        categories: CategoriesFile,
        built_at: DateTime<Utc>,
    ) -> Self {
        Self {
            categories,
            pricing: PricingPolicy::from_config(config),
            placeholder_image: config.placeholder_image.clone(),
            built_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub product: Product,
    /// Only placeholder images survived filtering.
    pub qr_only: bool,
    /// Product folder the record was read from, when it came from the scrape tree.
    pub folder: Option<String>,
}

/// Normalizes one sourced record into a [`Product`].
///
/// # Errors
///
/// Returns [`IngestError::InvalidRecord`] when the record has no identifier,
/// no source-locale title or no cost, and [`IngestError::InvalidPrice`] when
/// the cost is not a finite positive number.
pub fn normalize_record(
    sourced: &SourcedRecord,
    ctx: &NormalizeContext,
) -> Result<NormalizedRecord, IngestError> {
    let record = &sourced.record;
    let invalid = |id: Option<&str>, reason: &str| IngestError::InvalidRecord {
        id: id.map(str::to_string),
        source_path: sourced.origin.clone(),
        reason: reason.to_string(),
    };

    let id = record
        .id
        .as_deref()
        .ok_or_else(|| invalid(None, "missing identifier"))?;

    let raw_title = non_blank(record.title_cn.as_deref())
        .ok_or_else(|| invalid(Some(id), "missing source-locale title"))?;

    let raw_cost = record
        .raw_cost()
        .ok_or_else(|| invalid(Some(id), "missing source cost"))?;

    let pricing = parse_cost(raw_cost)
        .and_then(|cost| ctx.pricing.price(cost))
        .map_err(|reason| IngestError::InvalidPrice {
            id: id.to_string(),
            source_path: sourced.origin.clone(),
            reason,
        })?;

    let category_name = resolve_category_name(sourced, &ctx.categories);

    let title = LocalizedString {
        fr: non_blank(record.title_fr.as_deref()).map_or_else(
            || generate_title(raw_title, Locale::Fr, category_name.get(Locale::Fr)),
            str::to_string,
        ),
        en: non_blank(record.title_en.as_deref()).map_or_else(
            || generate_title(raw_title, Locale::En, category_name.get(Locale::En)),
            str::to_string,
        ),
        cn: source_title(raw_title),
    };

    let description = LocalizedString {
        fr: description_for(record.description_fr.as_deref(), Locale::Fr, &title),
        en: description_for(record.description_en.as_deref(), Locale::En, &title),
        cn: description_for(record.description_cn.as_deref(), Locale::Cn, &title),
    };

    let source_url = record.source_url.as_deref().unwrap_or("").trim().to_string();
    let explicit_slug = non_blank(record.slug.as_deref()).or(sourced.folder.as_deref());
    let slug = resolve_slug(explicit_slug, &source_url, &title.en, id);

    let sku = non_blank(record.sku.as_deref()).map_or_else(|| format!("SAWEI-{id}"), str::to_string);

    let selection = select_images(&record.images, &ctx.placeholder_image);
    let images = to_product_images(&selection.images, &title.fr);

    let created_at = record
        .scraped_at
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or(ctx.built_at);

    let product = Product {
        id: id.to_string(),
        slug,
        sku,
        title,
        description,
        category: CategoryRef {
            id: non_blank(record.category_id.as_deref()).map(str::to_string),
            slug: sourced.category_slug.clone(),
            name: category_name,
        },
        pricing,
        images,
        source_url,
        created_at: Some(created_at),
    };

    Ok(NormalizedRecord {
        product,
        qr_only: selection.qr_only,
        folder: sourced.folder.clone(),
    })
}

/// Category name: translation table, then names carried by the export, then
/// the record's own `category_*` fields, then the spaced-out slug.
fn resolve_category_name(sourced: &SourcedRecord, categories: &CategoriesFile) -> LocalizedString {
    if let Some(entry) = categories.translation(&sourced.category_slug) {
        return entry.name();
    }
    if let Some(name) = sourced.category_name.as_ref().filter(|n| !n.is_blank()) {
        return name.clone();
    }

    let record = &sourced.record;
    let spaced = |field: Option<&str>| non_blank(field).map(|s| s.replace('_', " ")).unwrap_or_default();
    let from_record = LocalizedString::new(
        spaced(record.category_fr.as_deref()),
        spaced(record.category_en.as_deref()),
        spaced(record.category_cn.as_deref()),
    );
    if from_record.is_blank() {
        fallback_name(&sourced.category_slug)
    } else {
        from_record
    }
}

fn description_for(explicit: Option<&str>, locale: Locale, title: &LocalizedString) -> String {
    non_blank(explicit).map_or_else(
        || template_description(locale, title.get(locale)),
        |s| s.trim().to_string(),
    )
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
