//! Read-only queries over a [`CatalogueStore`].
//!
//! Every operation returns borrowed products in a deterministic order. Sorts
//! are stable, so products with equal keys keep their store order.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use sawei_core::{Category, Locale, Product};
use serde::{Deserialize, Serialize};

use crate::collate::compare_names;
use crate::store::CatalogueStore;

/// Category value that means "no category constraint".
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    PriceAsc,
    #[default]
    PriceDesc,
    NameAsc,
    Newest,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "priceasc" => Ok(SortBy::PriceAsc),
            "pricedesc" => Ok(SortBy::PriceDesc),
            "nameasc" => Ok(SortBy::NameAsc),
            "newest" => Ok(SortBy::Newest),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Filter parameters. Absent fields impose no constraint; present ones are
/// AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    /// Inclusive EUR lower bound.
    pub min_price: Option<Decimal>,
    /// Inclusive EUR upper bound.
    pub max_price: Option<Decimal>,
    /// Case-insensitive substring of the localized title or category name.
    pub search_text: Option<String>,
    pub locale: Locale,
    pub sort_by: SortBy,
}

impl ProductFilter {
    fn category_constraint(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES))
    }

    fn matches(&self, product: &Product, needle: Option<&str>) -> bool {
        let price = product.price_eur();
        self.category_constraint()
            .is_none_or(|slug| product.category.slug == slug)
            && self.min_price.is_none_or(|min| price >= min)
            && self.max_price.is_none_or(|max| price <= max)
            && needle.is_none_or(|needle| {
                product.title.get(self.locale).to_lowercase().contains(needle)
                    || product
                        .category
                        .name
                        .get(self.locale)
                        .to_lowercase()
                        .contains(needle)
            })
    }
}

impl CatalogueStore {
    #[must_use]
    pub fn get_by_slug(&self, slug: &str) -> Option<&Product> {
        self.position_by_slug(slug).map(|idx| &self.products()[idx])
    }

    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&Product> {
        self.position_by_id(id).map(|idx| &self.products()[idx])
    }

    #[must_use]
    pub fn get_category(&self, slug: &str) -> Option<&Category> {
        self.categories().iter().find(|c| c.slug == slug)
    }

    /// Products in `slug`, in store order. `"all"` returns every product.
    #[must_use]
    pub fn products_in_category(&self, slug: &str) -> Vec<&Product> {
        if slug.eq_ignore_ascii_case(ALL_CATEGORIES) {
            return self.products().iter().collect();
        }
        self.products()
            .iter()
            .filter(|p| p.category.slug == slug)
            .collect()
    }

    /// Lowest and highest EUR price, or `None` for an empty store.
    #[must_use]
    pub fn price_range(&self) -> Option<(Decimal, Decimal)> {
        let mut prices = self.products().iter().map(Product::price_eur);
        let first = prices.next()?;
        Some(prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    #[must_use]
    pub fn filter(&self, filter: &ProductFilter) -> Vec<&Product> {
        let needle = filter
            .search_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut matches: Vec<&Product> = self
            .products()
            .iter()
            .filter(|p| filter.matches(p, needle.as_deref()))
            .collect();

        sort_products(&mut matches, filter.sort_by, filter.locale);
        matches
    }

    /// Other products of the same category, in store order, at most `limit`.
    #[must_use]
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products()
            .iter()
            .filter(|p| p.category.slug == product.category.slug && p.id != product.id)
            .take(limit)
            .collect()
    }

    /// Products where every query token is a case-insensitive substring of
    /// the title, description, category name, SKU or id. Title hits rank
    /// first; ties keep store order. A blank query returns nothing.
    #[must_use]
    pub fn search(&self, query: &str, locale: Locale) -> Vec<&Product> {
        self.search_positions(query, locale)
            .into_iter()
            .map(|idx| &self.products()[idx])
            .collect()
    }

    /// Distinct localized titles of search hits that contain the whole query.
    #[must_use]
    pub fn suggest(&self, query: &str, locale: Locale, limit: usize) -> Vec<String> {
        let needle = query.trim().to_lowercase();
        let mut suggestions: Vec<String> = Vec::new();
        for product in self.search(query, locale) {
            if suggestions.len() >= limit {
                break;
            }
            let title = product.title.get(locale);
            if title.to_lowercase().contains(&needle) && !suggestions.iter().any(|s| s == title) {
                suggestions.push(title.to_string());
            }
        }
        suggestions
    }
}

fn sort_products(products: &mut [&Product], sort_by: SortBy, locale: Locale) {
    match sort_by {
        SortBy::PriceAsc => products.sort_by(|a, b| a.price_eur().cmp(&b.price_eur())),
        SortBy::PriceDesc => products.sort_by(|a, b| b.price_eur().cmp(&a.price_eur())),
        SortBy::NameAsc => {
            products.sort_by(|a, b| compare_names(a.title.get(locale), b.title.get(locale), locale));
        }
        SortBy::Newest => products.sort_by(|a, b| newest_first(a, b)),
    }
}

/// `createdAt` descending; products without a timestamp go last.
fn newest_first(a: &Product, b: &Product) -> Ordering {
    match (a.created_at, b.created_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
