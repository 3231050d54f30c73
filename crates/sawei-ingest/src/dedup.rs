//! One entry per product id.
//!
//! When two entries share an id the one with the shorter slug is kept, on the
//! assumption that price-suffixed slugs (`widget-42-y-9-99`) come from noisier
//! scrape passes. Equal lengths keep the first entry seen. This is a
//! heuristic: it can discard the more complete record, which is why every
//! drop is reported as [`Diagnostic::DuplicateIdentifier`].

use std::collections::HashMap;

use sawei_core::{Diagnostic, Product};

use crate::normalize::NormalizedRecord;

pub trait Identified {
    fn id(&self) -> &str;
    fn slug(&self) -> &str;
}

impl Identified for Product {
    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}

impl Identified for NormalizedRecord {
    fn id(&self) -> &str {
        &self.product.id
    }

    fn slug(&self) -> &str {
        &self.product.slug
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deduplicated<T> {
    pub items: Vec<T>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Collapse entries sharing an id. The survivor occupies the position of the
/// id's first occurrence. Running this on its own output is a no-op.
#[must_use]
pub fn dedupe<T: Identified>(items: Vec<T>) -> Deduplicated<T> {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(items.len());
    let mut kept: Vec<T> = Vec::with_capacity(items.len());
    let mut diagnostics = Vec::new();

    for item in items {
        let Some(&pos) = positions.get(item.id()) else {
            positions.insert(item.id().to_string(), kept.len());
            kept.push(item);
            continue;
        };

        let existing = &kept[pos];
        let (kept_slug, dropped_slug) = if item.slug().len() < existing.slug().len() {
            (item.slug().to_string(), existing.slug().to_string())
        } else {
            (existing.slug().to_string(), item.slug().to_string())
        };
        tracing::debug!(id = %item.id(), kept = %kept_slug, dropped = %dropped_slug, "duplicate product id");
        diagnostics.push(Diagnostic::DuplicateIdentifier {
            id: item.id().to_string(),
            kept_slug,
            dropped_slug,
        });

        if item.slug().len() < kept[pos].slug().len() {
            kept[pos] = item;
        }
    }

    Deduplicated {
        items: kept,
        diagnostics,
    }
}
