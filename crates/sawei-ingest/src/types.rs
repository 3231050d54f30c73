//! Source record shapes as written by the scraper and the bulk export.
//!
//! ## Observed shape of `info_produit.json`
//!
//! ### `id`
//! Usually a numeric string (`"10428"`), occasionally a bare JSON number in
//! older passes. Both are accepted and kept as text.
//!
//! ### Titles
//! `title_cn` is always the scraped marketplace title and may carry a price
//! run (`¥1,199.00`) and a stock annotation (`库存 12`) on later lines.
//! `title_fr` / `title_en` are empty unless someone translated them by hand.
//!
//! ### Cost
//! `price_cny_raw` appears both at the top level and nested under `pricing`.
//! The nested value is authoritative when both exist. Values are JSON numbers
//! or strings such as `"1,199.00"` or `"¥89"`.
//!
//! ### Images
//! An ordered array of `{url, local_path}` objects. Some passes wrote bare
//! URL strings instead; both load.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One scraped product record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub id: Option<String>,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub sku: Option<String>,

    #[serde(default)]
    pub category_id: Option<String>,

    #[serde(default)]
    pub category_cn: Option<String>,
    #[serde(default)]
    pub category_fr: Option<String>,
    #[serde(default)]
    pub category_en: Option<String>,

    #[serde(default)]
    pub title_cn: Option<String>,
    #[serde(default)]
    pub title_fr: Option<String>,
    #[serde(default)]
    pub title_en: Option<String>,

    #[serde(default)]
    pub description_cn: Option<String>,
    #[serde(default)]
    pub description_fr: Option<String>,
    #[serde(default)]
    pub description_en: Option<String>,

    /// Flat source cost. Superseded by `pricing.price_cny_raw`.
    #[serde(default)]
    pub price_cny_raw: Option<Value>,

    #[serde(default)]
    pub pricing: Option<RawPricing>,

    #[serde(default)]
    pub source_url: Option<String>,

    #[serde(default)]
    pub images: Vec<RawImage>,

    #[serde(default)]
    pub scraped_at: Option<String>,
}

impl RawRecord {
    /// The source cost, preferring the nested pricing block. JSON `null`
    /// counts as absent.
    #[must_use]
    pub fn raw_cost(&self) -> Option<&Value> {
        self.pricing
            .as_ref()
            .and_then(|p| p.price_cny_raw.as_ref())
            .filter(|v| !v.is_null())
            .or_else(|| self.price_cny_raw.as_ref().filter(|v| !v.is_null()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPricing {
    #[serde(default)]
    pub price_cny_raw: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawImage {
    Url(String),
    Object {
        #[serde(default)]
        url: String,
        #[serde(default)]
        local_path: Option<String>,
    },
}

impl RawImage {
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            RawImage::Url(url) | RawImage::Object { url, .. } => url,
        }
    }

    #[must_use]
    pub fn local_path(&self) -> Option<&str> {
        match self {
            RawImage::Url(_) => None,
            RawImage::Object { local_path, .. } => local_path.as_deref(),
        }
    }
}

/// The bulk export written by the first import pass (`catalogue_complet.json`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompleteExport {
    #[serde(default)]
    pub categories: Vec<ExportCategory>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportCategory {
    #[serde(default)]
    pub name_fr: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub name_cn: String,
    #[serde(default)]
    pub products: Vec<ExportProduct>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportProduct {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub title_cn: Option<String>,
    #[serde(default)]
    pub title_fr: Option<String>,
    #[serde(default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub price_cny: Option<Value>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ExportProduct {
    /// Reshape an export entry as a scrape record so both inputs share one
    /// normalization path.
    #[must_use]
    pub fn into_raw_record(self) -> RawRecord {
        let images = self
            .image_url
            .filter(|url| !url.trim().is_empty())
            .map(RawImage::Url)
            .into_iter()
            .collect();

        RawRecord {
            id: self.id,
            title_cn: self.title_cn,
            title_fr: self.title_fr,
            title_en: self.title_en,
            price_cny_raw: self.price_cny,
            source_url: self.source_url,
            images,
            ..RawRecord::default()
        }
    }
}

fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
