//! Ingest pipeline tests against scrape trees written to a temp directory.

use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};
use sawei_core::{CategoriesFile, CategoryTranslation, Diagnostic, DiagnosticKind};
use sawei_ingest::{ingest, IngestOptions, NormalizeContext};
use serde_json::json;

const QR: &str = "https://img.example.cn/upload/5e1152055e503.jpg";

fn write_product(root: &Path, category: &str, folder: &str, body: &serde_json::Value) {
    let dir = root.join(category).join(folder);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("info_produit.json"), body.to_string()).unwrap();
}

fn options(root: &Path) -> IngestOptions {
    let categories = CategoriesFile {
        categories: vec![CategoryTranslation {
            slug: "Equipement_de_levage".into(),
            fr: "Équipement de levage".into(),
            en: "Lifting Equipment".into(),
            cn: "举升设备".into(),
        }],
    };
    IngestOptions {
        scrape_dir: root.to_path_buf(),
        complete_export: None,
        context: NormalizeContext::new(
            categories,
            Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        ),
    }
}

fn lift(id: &str, cost: serde_json::Value, images: &[&str]) -> serde_json::Value {
    json!({
        "id": id,
        "title_cn": "剪式举升机",
        "pricing": {"price_cny_raw": cost},
        "images": images.iter().map(|u| json!({"url": u})).collect::<Vec<_>>(),
    })
}

#[test]
fn duplicates_collapse_to_shorter_slug() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write_product(root, "Equipement_de_levage", "widget-42", &lift("42", json!(900), &["https://cdn/a.jpg"]));
    write_product(
        root,
        "Equipement_de_levage",
        "widget-42-y-9-99",
        &lift("42", json!(950), &["https://cdn/b.jpg"]),
    );

    let out = ingest(&options(root)).unwrap();

    assert_eq!(out.products.len(), 1);
    assert_eq!(out.products[0].slug, "widget-42");
    assert_eq!(out.report.count(DiagnosticKind::DuplicateIdentifier), 1);
}

#[test]
fn invalid_records_are_excluded_not_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write_product(root, "Equipement_de_levage", "ok", &lift("1", json!(500), &["https://cdn/a.jpg"]));
    write_product(root, "Equipement_de_levage", "zero", &lift("2", json!(0), &["https://cdn/b.jpg"]));
    write_product(root, "Equipement_de_levage", "text", &lift("3", json!("n/a"), &["https://cdn/c.jpg"]));
    write_product(root, "Equipement_de_levage", "no-title", &json!({"id": "4", "price_cny_raw": 10}));
    fs::create_dir_all(root.join("Equipement_de_levage").join("broken")).unwrap();
    fs::write(
        root.join("Equipement_de_levage").join("broken").join("info_produit.json"),
        "{",
    )
    .unwrap();

    let out = ingest(&options(root)).unwrap();

    let ids: Vec<_> = out.products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1"]);
    assert_eq!(out.report.count(DiagnosticKind::InvalidPrice), 2);
    assert_eq!(out.report.count(DiagnosticKind::InvalidRecord), 1);
    assert_eq!(out.report.count(DiagnosticKind::SkippedSource), 1);
}

#[test]
fn placeholder_only_products_are_remediated_or_flagged() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write_product(root, "Equipement_de_levage", "cric", &lift("10", json!(300), &[QR]));
    write_product(
        root,
        "Equipement_de_levage",
        "cric-y-129-99",
        &lift("11", json!(310), &[QR, "https://cdn/cric.jpg"]),
    );
    write_product(root, "Equipement_de_levage", "pont", &lift("12", json!(800), &[QR]));

    let out = ingest(&options(root)).unwrap();

    let cric = out.products.iter().find(|p| p.id == "10").unwrap();
    assert_eq!(cric.images[0].url, "https://cdn/cric.jpg");
    assert_eq!(out.report.count(DiagnosticKind::QrRemediated), 1);

    let pont = out.products.iter().find(|p| p.id == "12").unwrap();
    assert_eq!(pont.images[0].url, QR);
    let warnings: Vec<_> = out.report.of_kind(DiagnosticKind::QrOnlyWarning).collect();
    assert_eq!(
        warnings,
        vec![&Diagnostic::QrOnlyWarning {
            id: "12".into(),
            slug: "pont".into()
        }]
    );
}

#[test]
fn export_fills_in_records_missing_from_the_tree() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("scrape");
    write_product(&root, "Equipement_de_levage", "a", &lift("1", json!(500), &["https://cdn/a.jpg"]));

    let export_path = tmp.path().join("catalogue_complet.json");
    fs::write(
        &export_path,
        json!({"categories": [{
            "name_fr": "Équipement de levage",
            "name_en": "Lifting Equipment",
            "name_cn": "举升设备",
            "products": [
                {"id": "1", "title_cn": "重复", "price_cny": 1},
                {"id": "2", "title_cn": "千斤顶", "price_cny": "250", "image_url": "https://cdn/j.jpg"}
            ]
        }]})
        .to_string(),
    )
    .unwrap();

    let mut opts = options(&root);
    opts.complete_export = Some(export_path);
    let out = ingest(&opts).unwrap();

    assert_eq!(out.products.len(), 2);
    assert_eq!(out.products[0].title.cn, "剪式举升机");
    let jack = &out.products[1];
    assert_eq!(jack.id, "2");
    assert_eq!(jack.category.slug, "Equipement_de_levage");
    assert_eq!(jack.images[0].url, "https://cdn/j.jpg");
}

#[test]
fn export_replaces_tree_records_that_fail_validation() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("scrape");
    write_product(&root, "Equipement_de_levage", "a", &lift("5", json!(0), &["https://cdn/a.jpg"]));

    let export_path = tmp.path().join("catalogue_complet.json");
    fs::write(
        &export_path,
        json!({"categories": [{
            "name_fr": "Équipement de levage",
            "products": [
                {"id": "5", "title_cn": "剪式举升机", "price_cny": 800, "image_url": "https://cdn/e.jpg"}
            ]
        }]})
        .to_string(),
    )
    .unwrap();

    let mut opts = options(&root);
    opts.complete_export = Some(export_path);
    let out = ingest(&opts).unwrap();

    assert_eq!(out.products.len(), 1);
    assert_eq!(out.products[0].id, "5");
    assert_eq!(out.products[0].images[0].url, "https://cdn/e.jpg");
    assert_eq!(out.report.count(DiagnosticKind::InvalidPrice), 1);
}

#[test]
fn cost_too_large_to_price_is_excluded() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write_product(root, "Equipement_de_levage", "ok", &lift("1", json!(500), &["https://cdn/a.jpg"]));
    write_product(
        root,
        "Equipement_de_levage",
        "huge",
        &lift("2", json!("1000000000000000000000000000"), &["https://cdn/b.jpg"]),
    );

    let out = ingest(&options(root)).unwrap();

    assert_eq!(out.products.len(), 1);
    assert_eq!(out.products[0].id, "1");
    assert_eq!(out.report.count(DiagnosticKind::InvalidPrice), 1);
}

#[test]
fn missing_export_is_reported_not_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("scrape");
    write_product(&root, "Equipement_de_levage", "a", &lift("1", json!(500), &["https://cdn/a.jpg"]));

    let mut opts = options(&root);
    opts.complete_export = Some(tmp.path().join("missing.json"));
    let out = ingest(&opts).unwrap();

    assert_eq!(out.products.len(), 1);
    assert_eq!(out.report.count(DiagnosticKind::SkippedSource), 1);
}
