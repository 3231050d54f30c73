//! Locale and currency vocabulary shared by every crate in the workspace.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseVocabularyError {
    #[error("unknown locale: {0}")]
    UnknownLocale(String),
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),
}

/// Storefront locales. `Fr` is the default display locale and `Cn` is the
/// locale every scraped record is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
    Cn,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Fr, Locale::En, Locale::Cn];
    pub const SOURCE: Locale = Locale::Cn;

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Fr => "fr",
            Locale::En => "en",
            Locale::Cn => "cn",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ParseVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fr" => Ok(Locale::Fr),
            "en" => Ok(Locale::En),
            "cn" | "zh" => Ok(Locale::Cn),
            other => Err(ParseVocabularyError::UnknownLocale(other.to_string())),
        }
    }
}

/// Currencies the storefront can display and charge in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Cny,
    Xaf,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Eur, Currency::Cny, Currency::Xaf];

    /// ISO 4217 code, e.g. `"EUR"`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Cny => "CNY",
            Currency::Xaf => "XAF",
        }
    }

    /// Number of decimal places in the currency's minor unit. XAF has none.
    #[must_use]
    pub fn minor_unit_exponent(self) -> u32 {
        match self {
            Currency::Eur | Currency::Cny => 2,
            Currency::Xaf => 0,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ParseVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "CNY" | "RMB" => Ok(Currency::Cny),
            "XAF" | "FCFA" => Ok(Currency::Xaf),
            other => Err(ParseVocabularyError::UnknownCurrency(other.to_string())),
        }
    }
}

/// Text in each storefront locale. Missing translations are stored as empty
/// strings; readers go through [`LocalizedString::get`] for fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedString {
    #[serde(default)]
    pub fr: String,
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub cn: String,
}

impl LocalizedString {
    #[must_use]
    pub fn new(fr: impl Into<String>, en: impl Into<String>, cn: impl Into<String>) -> Self {
        Self {
            fr: fr.into(),
            en: en.into(),
            cn: cn.into(),
        }
    }

    /// Raw text for `locale`, without fallback.
    #[must_use]
    pub fn raw(&self, locale: Locale) -> &str {
        match locale {
            Locale::Fr => &self.fr,
            Locale::En => &self.en,
            Locale::Cn => &self.cn,
        }
    }

    /// Text for `locale`, falling back to `fr` and then to the source locale
    /// when the requested translation is empty.
    #[must_use]
    pub fn get(&self, locale: Locale) -> &str {
        [locale, Locale::Fr, Locale::SOURCE]
            .into_iter()
            .map(|l| self.raw(l))
            .find(|s| !s.trim().is_empty())
            .unwrap_or("")
    }

    /// `true` when no locale carries any text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        Locale::ALL.iter().all(|l| self.raw(*l).trim().is_empty())
    }
}
