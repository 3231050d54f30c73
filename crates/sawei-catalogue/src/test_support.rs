use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use sawei_core::{
    CategoryRef, ComputedPrices, Currency, LocalizedString, Money, Pricing, Product, ProductImage,
};

use crate::store::{BuildOptions, CatalogueStore};

pub(crate) fn category(slug: &str) -> CategoryRef {
    CategoryRef {
        id: None,
        slug: slug.to_string(),
        name: LocalizedString::new(slug, slug, slug),
    }
}

/// A product priced at `eur` (two decimals), created on `day` of January 2025.
pub(crate) fn product(id: &str, slug: &str, category_slug: &str, eur: &str, day: u32) -> Product {
    let eur: Decimal = eur.parse().expect("valid decimal");
    Product {
        id: id.to_string(),
        slug: slug.to_string(),
        sku: format!("SAWEI-{id}"),
        title: LocalizedString::new(format!("Produit {id}"), format!("Product {id}"), "产品"),
        description: LocalizedString::default(),
        category: category(category_slug),
        pricing: Pricing {
            original_unit_cost: Money {
                currency: Currency::Cny,
                amount: Decimal::ONE_HUNDRED,
            },
            computed: ComputedPrices {
                eur,
                cny: eur * Decimal::new(769, 2),
                xaf: (eur * Decimal::new(655_957, 3)).round(),
            },
            margin: Decimal::new(10, 2),
            display: None,
        },
        images: vec![ProductImage {
            url: format!("https://cdn.example/{id}.jpg"),
            alt: String::new(),
            local_path: None,
        }],
        source_url: String::new(),
        created_at: Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).single(),
    }
}

pub(crate) fn store(products: Vec<Product>) -> CatalogueStore {
    let options = BuildOptions {
        generated_at: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
        source: "test".to_string(),
        fx_rates: None,
    };
    CatalogueStore::build(products, options).0
}
