//! In-process full-text search over the catalogue.
//!
//! Each locale gets a trigram index over the lowercased searchable fields of
//! every product. The index only narrows candidates; every candidate is then
//! verified with a plain substring check, so recall is exactly "every query
//! token is a substring of some field".

use std::collections::{BTreeSet, HashMap};

use sawei_core::{Locale, Product};

const TITLE_WEIGHT: u32 = 8;
const CODE_WEIGHT: u32 = 4;
const CATEGORY_WEIGHT: u32 = 2;
const DESCRIPTION_WEIGHT: u32 = 1;

#[derive(Debug, Clone, Default)]
struct Document {
    title: String,
    description: String,
    category: String,
    sku: String,
    id: String,
}

impl Document {
    fn new(product: &Product, locale: Locale) -> Self {
        Self {
            title: product.title.get(locale).to_lowercase(),
            description: product.description.get(locale).to_lowercase(),
            category: product.category.name.get(locale).to_lowercase(),
            sku: product.sku.to_lowercase(),
            id: product.id.to_lowercase(),
        }
    }

    fn fields(&self) -> [&str; 5] {
        [
            self.title.as_str(),
            self.description.as_str(),
            self.category.as_str(),
            self.sku.as_str(),
            self.id.as_str(),
        ]
    }

    /// Weight of the best field containing `token`, or `None` if no field does.
    fn score(&self, token: &str) -> Option<u32> {
        [
            (&self.title, TITLE_WEIGHT),
            (&self.sku, CODE_WEIGHT),
            (&self.id, CODE_WEIGHT),
            (&self.category, CATEGORY_WEIGHT),
            (&self.description, DESCRIPTION_WEIGHT),
        ]
        .into_iter()
        .filter(|(field, _)| field.contains(token))
        .map(|(_, weight)| weight)
        .max()
    }
}

#[derive(Debug, Clone, Default)]
struct LocaleIndex {
    documents: Vec<Document>,
    trigrams: HashMap<String, BTreeSet<usize>>,
}

impl LocaleIndex {
    fn build(products: &[Product], locale: Locale) -> Self {
        let documents: Vec<Document> = products.iter().map(|p| Document::new(p, locale)).collect();
        let mut trigrams: HashMap<String, BTreeSet<usize>> = HashMap::new();
        for (idx, doc) in documents.iter().enumerate() {
            for field in doc.fields() {
                for gram in trigrams_of(field) {
                    trigrams.entry(gram).or_default().insert(idx);
                }
            }
        }
        Self {
            documents,
            trigrams,
        }
    }

    /// Documents that may contain `token`. Tokens shorter than a trigram
    /// cannot be narrowed and return every document.
    fn candidates(&self, token: &str) -> BTreeSet<usize> {
        let grams = trigrams_of(token);
        if grams.is_empty() {
            return (0..self.documents.len()).collect();
        }

        let mut result: Option<BTreeSet<usize>> = None;
        for gram in grams {
            let Some(postings) = self.trigrams.get(&gram) else {
                return BTreeSet::new();
            };
            result = Some(match result {
                None => postings.clone(),
                Some(acc) => acc.intersection(postings).copied().collect(),
            });
        }
        result.unwrap_or_default()
    }
}

/// Search index for all locales, positionally aligned with the store's
/// product list.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    locales: HashMap<Locale, LocaleIndex>,
}

impl SearchIndex {
    #[must_use]
    pub fn build(products: &[Product]) -> Self {
        let locales = Locale::ALL
            .into_iter()
            .map(|locale| (locale, LocaleIndex::build(products, locale)))
            .collect();
        Self { locales }
    }

    /// Product positions matching every whitespace-separated token of
    /// `query`, best matches first. Ties keep store order. A blank query
    /// matches nothing.
    #[must_use]
    pub fn search(&self, query: &str, locale: Locale) -> Vec<usize> {
        let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        let Some(index) = self.locales.get(&locale) else {
            return Vec::new();
        };
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut candidates: Option<BTreeSet<usize>> = None;
        for token in &tokens {
            let next = index.candidates(token);
            candidates = Some(match candidates {
                None => next,
                Some(acc) => acc.intersection(&next).copied().collect(),
            });
        }

        let mut scored: Vec<(usize, u32)> = candidates
            .unwrap_or_default()
            .into_iter()
            .filter_map(|idx| {
                let doc = &index.documents[idx];
                tokens
                    .iter()
                    .map(|token| doc.score(token))
                    .sum::<Option<u32>>()
                    .map(|score| (idx, score))
            })
            .collect();

        // Candidates come out of the BTreeSet in store order; a stable sort
        // keeps that order among equal scores.
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(idx, _)| idx).collect()
    }
}

fn trigrams_of(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .windows(3)
        .map(|w| w.iter().collect::<String>())
        .filter(|g| !g.chars().any(char::is_whitespace))
        .collect()
}
