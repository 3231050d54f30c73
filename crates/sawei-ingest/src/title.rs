//! Title cleanup and fr/en title generation from the source-locale title.
//!
//! Generation is a fixed glyph substitution, not translation. When Han
//! characters survive substitution the title falls back to
//! `"{category} - {first 30 chars of the cleaned source title}"`.

use regex::Regex;
use sawei_core::Locale;

const FALLBACK_PREFIX_CHARS: usize = 30;

/// Glyph table, multi-glyph entries first so `工具` wins over any single glyph.
const GLYPHS: &[(&str, &str, &str)] = &[
    ("工具", "Outils", "Tools"),
    ("组套", "Kit", "Kit"),
    ("机", "Machine", "Machine"),
    ("器", "Appareil", "Device"),
    ("车", "Chariot", "Cart"),
    ("件", "pièces", "pieces"),
];

/// Keep the first line of a scraped title and strip price runs (`¥1,199.00`)
/// and the trailing stock annotation (`库存 12`).
#[must_use]
pub fn clean_source_title(raw: &str) -> String {
    let price_re = Regex::new(r"[¥￥]\s*[\d,.]+").expect("valid price regex");
    let stock_re = Regex::new(r"库存.*$").expect("valid stock regex");

    let first_line = raw.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let without_price = price_re.replace_all(first_line, " ");
    let without_stock = stock_re.replace(&without_price, "");
    collapse_whitespace(&without_stock)
}

/// The published source-locale title: the cleaned title, or the raw title
/// when cleaning leaves nothing.
#[must_use]
pub fn source_title(raw: &str) -> String {
    let clean = clean_source_title(raw);
    if clean.is_empty() {
        collapse_whitespace(raw)
    } else {
        clean
    }
}

/// Generate a fr or en title from the raw source title.
///
/// Returns the source title unchanged for [`Locale::Cn`].
#[must_use]
pub fn generate_title(raw_source: &str, locale: Locale, category_name: &str) -> String {
    if locale == Locale::Cn {
        return source_title(raw_source);
    }
    let clean = clean_source_title(raw_source);
    if clean.is_empty() {
        return generic_title(locale).to_string();
    }

    let mut title = clean.clone();
    for (glyph, fr, en) in GLYPHS {
        let word = if locale == Locale::En { en } else { fr };
        title = title.replace(glyph, &format!(" {word} "));
    }

    if contains_han(&title) {
        let prefix: String = clean.chars().take(FALLBACK_PREFIX_CHARS).collect();
        return format!("{category_name} - {prefix}");
    }
    collapse_whitespace(&title)
}

fn generic_title(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Professional automotive equipment",
        Locale::Fr | Locale::Cn => "Équipement automobile professionnel",
    }
}

/// Template description used when the record carries none.
#[must_use]
pub fn template_description(locale: Locale, title: &str) -> String {
    match locale {
        Locale::Fr => format!("Équipement automobile professionnel: {title}"),
        Locale::En => format!("Professional automotive equipment: {title}"),
        Locale::Cn => format!("专业汽车设备: {title}"),
    }
}

/// `true` if `text` contains a CJK unified ideograph.
#[must_use]
pub fn contains_han(text: &str) -> bool {
    text.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
