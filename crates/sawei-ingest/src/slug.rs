//! Deterministic slug resolution.

use regex::Regex;

/// Lowercase, collapse every run of characters outside `[a-z0-9]` into one
/// hyphen and trim hyphens from both ends.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// `product-{digits}` from a marketplace URL of the form `.../id/{digits}/...`.
#[must_use]
pub fn slug_from_source_url(url: &str) -> Option<String> {
    let re = Regex::new(r"/id/(\d+)/").expect("valid source url regex");
    re.captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("product-{}", m.as_str()))
}

/// Resolve a product slug: explicit slug, then the source URL id, then the
/// slugified English title, then `product-{id}`.
#[must_use]
pub fn resolve_slug(explicit: Option<&str>, source_url: &str, title_en: &str, id: &str) -> String {
    if let Some(slug) = explicit.map(str::trim).filter(|s| !s.is_empty()) {
        return slug.to_string();
    }
    if let Some(slug) = slug_from_source_url(source_url) {
        return slug;
    }
    let from_title = slugify(title_en);
    if from_title.is_empty() {
        format!("product-{}", slugify(id))
    } else {
        from_title
    }
}

/// A slug with its `-y-` price suffix removed, e.g. `cric-y-129-99` → `cric`.
#[must_use]
pub fn base_slug(slug: &str) -> &str {
    slug.split_once("-y-").map_or(slug, |(base, _)| base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_and_trims() {
        assert_eq!(slugify("  SATA 120 pieces Kit!! "), "sata-120-pieces-kit");
        assert_eq!(slugify("--a__b--"), "a-b");
        assert_eq!(slugify("四柱举升机"), "");
    }

    #[test]
    fn slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("Équipement de levage"), "quipement-de-levage");
    }

    #[test]
    fn source_url_id_becomes_product_slug() {
        assert_eq!(
            slug_from_source_url("https://shop.example.cn/id/10428/detail.html").as_deref(),
            Some("product-10428")
        );
        assert!(slug_from_source_url("https://shop.example.cn/item/10428").is_none());
    }

    #[test]
    fn resolve_prefers_explicit_slug() {
        assert_eq!(
            resolve_slug(Some("cric-hydraulique"), "https://x/id/1/", "Jack", "1"),
            "cric-hydraulique"
        );
    }

    #[test]
    fn resolve_falls_through_in_order() {
        assert_eq!(resolve_slug(Some(" "), "https://x/id/7/", "Jack", "7"), "product-7");
        assert_eq!(resolve_slug(None, "", "Floor Jack 3T", "7"), "floor-jack-3t");
        assert_eq!(resolve_slug(None, "", "", "7"), "product-7");
    }

    #[test]
    fn resolve_is_deterministic() {
        let a = resolve_slug(None, "", "Tire Changer", "9");
        let b = resolve_slug(None, "", "Tire Changer", "9");
        assert_eq!(a, b);
    }

    #[test]
    fn base_slug_strips_price_suffix() {
        assert_eq!(base_slug("widget-42-y-9-99"), "widget-42");
        assert_eq!(base_slug("widget-42"), "widget-42");
    }
}
