//! Image remediation for placeholder-only products.
//!
//! The scraper often captured the same listing twice, once with a price
//! suffix in the folder name (`cric-y-129-99`). When one capture only got the
//! QR code, a sibling capture in the same category usually has real photos.

use sawei_core::{Diagnostic, ProductImage};

use crate::normalize::NormalizedRecord;
use crate::slug::base_slug;

/// Give each placeholder-only record the images of the first sibling in the
/// same category whose slug or folder starts with the record's base slug and
/// which has real images.
///
/// Only images change; id, slug and pricing are untouched. Returns one
/// [`Diagnostic::QrRemediated`] per repaired record.
pub fn remediate_qr_only(records: &mut [NormalizedRecord]) -> Vec<Diagnostic> {
    let snapshot: &[NormalizedRecord] = records;
    let plan: Vec<(usize, usize)> = snapshot
        .iter()
        .enumerate()
        .filter(|(_, r)| r.qr_only)
        .filter_map(|(idx, record)| find_donor(snapshot, idx, record).map(|donor| (idx, donor)))
        .collect();

    let mut diagnostics = Vec::with_capacity(plan.len());
    for (idx, donor_idx) in plan {
        let donor_slug = records[donor_idx].product.slug.clone();
        let title = records[idx].product.title.fr.clone();
        let images: Vec<ProductImage> = records[donor_idx]
            .product
            .images
            .iter()
            .enumerate()
            .map(|(n, img)| ProductImage {
                url: img.url.clone(),
                alt: format!("{title} - Image {}", n + 1),
                local_path: img.local_path.clone(),
            })
            .collect();

        let record = &mut records[idx];
        tracing::info!(
            id = %record.product.id,
            slug = %record.product.slug,
            donor = %donor_slug,
            images = images.len(),
            "placeholder images replaced from sibling record"
        );
        diagnostics.push(Diagnostic::QrRemediated {
            id: record.product.id.clone(),
            slug: record.product.slug.clone(),
            donor_slug,
            images: images.len(),
        });
        record.product.images = images;
        record.qr_only = false;
    }
    diagnostics
}

fn find_donor(records: &[NormalizedRecord], idx: usize, record: &NormalizedRecord) -> Option<usize> {
    let base = base_slug(&record.product.slug);
    if base.is_empty() {
        return None;
    }

    records.iter().enumerate().position(|(other_idx, other)| {
        other_idx != idx
            && !other.qr_only
            && !other.product.images.is_empty()
            && other.product.category.slug == record.product.category.slug
            && (other.product.slug.starts_with(base)
                || other.folder.as_deref().is_some_and(|f| f.starts_with(base)))
    })
}
