//! Placeholder (QR code) image filtering.

use sawei_core::ProductImage;

use crate::types::RawImage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSelection {
    pub images: Vec<RawImage>,
    /// Every remaining image is the placeholder. The caller flags the product.
    pub qr_only: bool,
}

/// Drop placeholder images unless they are all the record has.
///
/// Images with an empty url are discarded first. Relative order is kept in
/// both partitions.
#[must_use]
pub fn select_images(images: &[RawImage], placeholder: &str) -> ImageSelection {
    let (flagged, good): (Vec<RawImage>, Vec<RawImage>) = images
        .iter()
        .filter(|img| !img.url().trim().is_empty())
        .cloned()
        .partition(|img| is_placeholder(img.url(), placeholder));

    if good.is_empty() {
        ImageSelection {
            qr_only: !flagged.is_empty(),
            images: flagged,
        }
    } else {
        ImageSelection {
            images: good,
            qr_only: false,
        }
    }
}

#[must_use]
pub fn is_placeholder(url: &str, placeholder: &str) -> bool {
    !placeholder.is_empty() && url.contains(placeholder)
}

/// Published images with alt text `"{title} - Image {n}"`, 1-based.
#[must_use]
pub fn to_product_images(images: &[RawImage], title: &str) -> Vec<ProductImage> {
    images
        .iter()
        .enumerate()
        .map(|(idx, img)| ProductImage {
            url: img.url().trim().to_string(),
            alt: format!("{title} - Image {}", idx + 1),
            local_path: img.local_path().map(str::to_string),
        })
        .collect()
}
