//! The published catalogue document model.
//!
//! Every struct here serializes with camelCase field names because the
//! document is consumed by the storefront's read layer as-is. Deserialization
//! tolerates the optional legacy fields older documents carry (flat
//! `original.cny` / `baseCny` pricing, date-only `createdAt`, `lastUpdated`).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::locale::{Currency, LocalizedString};

/// One product image. The first image of a product is its listing thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
}

/// An amount in a specific currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub currency: Currency,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Customer-facing prices, always derived by the pricing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComputedPrices {
    #[serde(with = "rust_decimal::serde::float")]
    pub eur: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cny: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub xaf: Decimal,
}

impl ComputedPrices {
    #[must_use]
    pub fn get(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Eur => self.eur,
            Currency::Cny => self.cny,
            Currency::Xaf => self.xaf,
        }
    }
}

/// Pre-formatted price strings, e.g. `"12.99 €"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceDisplay {
    pub eur: String,
    pub cny: String,
    pub xaf: String,
}

/// Exchange rates a catalogue was priced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxRates {
    #[serde(with = "rust_decimal::serde::float")]
    pub eur_cny: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub eur_xaf: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct LegacyOriginal {
    #[serde(with = "rust_decimal::serde::float")]
    cny: Decimal,
}

/// Product pricing: the source unit cost, the margin applied, and the
/// derived three-currency price set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PricingWire", into = "PricingWire")]
pub struct Pricing {
    pub original_unit_cost: Money,
    pub computed: ComputedPrices,
    pub margin: Decimal,
    pub display: Option<PriceDisplay>,
}

/// Wire shape of [`Pricing`]. Every field is optional so that documents
/// written by the legacy import scripts still load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PricingWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    original_unit_cost: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    original: Option<LegacyOriginal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    base_cny: Option<Decimal>,
    #[serde(default)]
    computed: ComputedPrices,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    margin: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display: Option<PriceDisplay>,
}

impl From<PricingWire> for Pricing {
    fn from(wire: PricingWire) -> Self {
        let original_unit_cost = wire
            .original_unit_cost
            .or_else(|| {
                wire.original
                    .map(|o| o.cny)
                    .or(wire.base_cny)
                    .map(|amount| Money {
                        currency: Currency::Cny,
                        amount,
                    })
            })
            .unwrap_or(Money {
                currency: Currency::Cny,
                amount: Decimal::ZERO,
            });

        Self {
            original_unit_cost,
            computed: wire.computed,
            margin: wire.margin.unwrap_or(Decimal::ZERO),
            display: wire.display,
        }
    }
}

impl From<Pricing> for PricingWire {
    fn from(pricing: Pricing) -> Self {
        // Legacy readers require `original.cny`; mirror it when the source
        // currency allows.
        let original = (pricing.original_unit_cost.currency == Currency::Cny).then_some(
            LegacyOriginal {
                cny: pricing.original_unit_cost.amount,
            },
        );

        Self {
            original_unit_cost: Some(pricing.original_unit_cost),
            original,
            base_cny: None,
            computed: pricing.computed,
            margin: Some(pricing.margin),
            display: pricing.display,
        }
    }
}

/// The category reference embedded in each product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub slug: String,
    pub name: LocalizedString,
}

/// A catalogue category, derived from the products that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub slug: String,
    pub name: LocalizedString,
    #[serde(default)]
    pub product_count: usize,
}

/// A sellable product as published in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identity across re-imports.
    pub id: String,
    /// Public, human-readable identifier. May change between builds.
    pub slug: String,
    #[serde(default)]
    pub sku: String,
    pub title: LocalizedString,
    #[serde(default)]
    pub description: LocalizedString,
    pub category: CategoryRef,
    pub pricing: Pricing,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub source_url: String,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// The customer-facing EUR price.
    #[must_use]
    pub fn price_eur(&self) -> Decimal {
        self.pricing.computed.eur
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogueMetadata {
    pub total_products: usize,
    pub total_categories: usize,
    pub total_images: usize,
    #[serde(alias = "lastUpdated")]
    pub generated_at: DateTime<Utc>,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fx_rates: Option<FxRates>,
}

/// The serialized catalogue: the sole contract between the build step and
/// the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueDocument {
    pub products: Vec<Product>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub metadata: CatalogueMetadata,
}

/// Parses an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (taken as
/// midnight UTC).
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
