//! Locale-aware name ordering for the `nameAsc` sort.
//!
//! Latin-script locales compare on a lowercase key with diacritics folded,
//! so `Écrou` sorts next to `ecrou` rather than after `z`. Ties fall back to
//! the raw text. `cn` compares by code point.

use std::cmp::Ordering;

use sawei_core::Locale;

/// Lowercase `text` and fold Latin diacritics and ligatures to ASCII.
#[must_use]
pub fn collation_key(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    for ch in text.chars().flat_map(char::to_lowercase) {
        match ch {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => key.push('a'),
            'ç' => key.push('c'),
            'è' | 'é' | 'ê' | 'ë' => key.push('e'),
            'ì' | 'í' | 'î' | 'ï' => key.push('i'),
            'ñ' => key.push('n'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => key.push('o'),
            'ù' | 'ú' | 'û' | 'ü' => key.push('u'),
            'ý' | 'ÿ' => key.push('y'),
            'œ' => key.push_str("oe"),
            'æ' => key.push_str("ae"),
            'ß' => key.push_str("ss"),
            other => key.push(other),
        }
    }
    key
}

#[must_use]
pub fn compare_names(a: &str, b: &str, locale: Locale) -> Ordering {
    match locale {
        Locale::Cn => a.cmp(b),
        Locale::Fr | Locale::En => collation_key(a)
            .cmp(&collation_key(b))
            .then_with(|| a.cmp(b)),
    }
}
