use sawei_core::LocalizedString;

use super::*;
use crate::test_support::{product, store};

fn options() -> BuildOptions {
    BuildOptions::new("test")
}

#[test]
fn categories_aggregate_in_first_seen_order() {
    let products = vec![
        product("1", "a", "levage", "100.50", 1),
        product("2", "b", "pneu", "200.99", 2),
        product("3", "c", "levage", "300.50", 3),
        product("4", "d", "outils", "9.99", 4),
    ];
    let (store, diagnostics) = CatalogueStore::build(products, options());

    let slugs: Vec<_> = store.categories().iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs, vec!["levage", "pneu", "outils"]);
    let counts: Vec<_> = store.categories().iter().map(|c| c.product_count).collect();
    assert_eq!(counts, vec![2, 1, 1]);
    assert_eq!(counts.iter().sum::<usize>(), store.len());
    assert!(diagnostics.is_empty());
}

#[test]
fn metadata_is_derived() {
    let mut p = product("2", "b", "pneu", "20.50", 2);
    p.images.push(p.images[0].clone());
    let (store, _) = CatalogueStore::build(
        vec![product("1", "a", "levage", "10.50", 1), p],
        options(),
    );
    let meta = store.metadata();
    assert_eq!(meta.total_products, 2);
    assert_eq!(meta.total_categories, 2);
    assert_eq!(meta.total_images, 3);
    assert_eq!(meta.source, "test");
}

#[test]
fn conflicting_category_name_keeps_first() {
    let mut later = product("2", "b", "levage", "20.50", 2);
    later.category.name = LocalizedString::new("Levage (autre)", "Lifting", "举升");
    let (store, diagnostics) =
        CatalogueStore::build(vec![product("1", "a", "levage", "10.50", 1), later], options());

    assert_eq!(store.categories()[0].name.fr, "levage");
    assert_eq!(store.products()[1].category.name.fr, "levage");
    assert_eq!(
        diagnostics,
        vec![Diagnostic::CategoryNameConflict {
            slug: "levage".into(),
            kept: "levage".into(),
            ignored: "Levage (autre)".into(),
        }]
    );
}

#[test]
fn colliding_slug_is_suffixed_with_id() {
    let (store, diagnostics) = CatalogueStore::build(
        vec![
            product("1", "cric", "levage", "10.50", 1),
            product("2", "cric", "levage", "20.50", 2),
        ],
        options(),
    );
    assert_eq!(store.products()[1].slug, "cric-2");
    assert_eq!(
        diagnostics,
        vec![Diagnostic::SlugCollision {
            id: "2".into(),
            original_slug: "cric".into(),
            assigned_slug: "cric-2".into(),
        }]
    );
}

#[test]
fn duplicate_ids_are_dropped_first_wins() {
    let (store, diagnostics) = CatalogueStore::build(
        vec![
            product("1", "a", "levage", "10.50", 1),
            product("1", "a-longer", "levage", "20.50", 2),
        ],
        options(),
    );
    assert_eq!(store.len(), 1);
    assert_eq!(store.products()[0].slug, "a");
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn legacy_products_without_cost_are_dropped() {
    let document: CatalogueDocument = serde_json::from_value(serde_json::json!({
        "products": [{
            "id": "7",
            "slug": "widget-7",
            "title": { "fr": "Outil" },
            "category": { "slug": "outils", "name": { "fr": "Outils" } },
            "pricing": { "original": { "cny": 0 }, "computed": { "eur": 0.99, "cny": 7.62, "xaf": 649 } }
        }],
        "metadata": { "totalProducts": 1, "lastUpdated": "2024-01-01T00:00:00Z" }
    }))
    .unwrap();

    let (store, diagnostics) = CatalogueStore::from_document(document);
    assert_eq!(store.len(), 0);
    assert!(store.categories().is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        &diagnostics[0],
        Diagnostic::InvalidPrice { id, .. } if id == "7"
    ));
}

#[test]
fn zero_eur_price_is_dropped() {
    let mut free = product("2", "free", "x", "1.00", 2);
    free.pricing.computed.eur = Decimal::ZERO;
    let (store, diagnostics) =
        CatalogueStore::build(vec![product("1", "a", "x", "9.99", 1), free], options());
    assert_eq!(store.len(), 1);
    assert!(store.get_by_id("2").is_none());
    assert!(matches!(&diagnostics[0], Diagnostic::InvalidPrice { id, .. } if id == "2"));
}

#[test]
fn from_document_rederives_categories() {
    let original = store(vec![
        product("1", "a", "levage", "10.50", 1),
        product("2", "b", "pneu", "20.50", 2),
    ]);
    let mut document = original.to_document();
    document.categories.clear();
    document.metadata.total_products = 99;

    let (rebuilt, _) = CatalogueStore::from_document(document);
    assert_eq!(rebuilt.categories().len(), 2);
    assert_eq!(rebuilt.metadata().total_products, 2);
    assert_eq!(rebuilt.metadata().generated_at, original.metadata().generated_at);
}

#[test]
fn save_then_load_preserves_products() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("data").join("catalogue.json");
    let original = store(vec![
        product("1", "a", "levage", "10.50", 1),
        product("2", "b", "pneu", "20.99", 2),
    ]);

    original.save(&path).unwrap();
    assert!(!path.with_extension("json.tmp").exists());

    let (loaded, diagnostics) = CatalogueStore::load(&path).unwrap();
    assert!(diagnostics.is_empty());
    assert_eq!(loaded.products(), original.products());
    assert_eq!(loaded.categories(), original.categories());
}

#[test]
fn saved_document_uses_camel_case_fields() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("catalogue.json");
    store(vec![product("1", "a", "levage", "10.50", 1)])
        .save(&path)
        .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["metadata"]["totalProducts"], 1);
    assert_eq!(value["categories"][0]["productCount"], 1);
    assert_eq!(value["products"][0]["pricing"]["computed"]["eur"], 10.5);
}

#[test]
fn load_reports_missing_and_malformed_files() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = CatalogueStore::load(&tmp.path().join("nope.json")).unwrap_err();
    assert!(matches!(missing, CatalogueError::Io { .. }));

    let bad = tmp.path().join("bad.json");
    std::fs::write(&bad, "{\"products\": 3}").unwrap();
    let malformed = CatalogueStore::load(&bad).unwrap_err();
    assert!(matches!(malformed, CatalogueError::Deserialize { .. }));
}
