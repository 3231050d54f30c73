//! Category translation table, keyed by the scrape-tree folder slug.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::locale::LocalizedString;
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTranslation {
    pub slug: String,
    pub fr: String,
    pub en: String,
    pub cn: String,
}

impl CategoryTranslation {
    #[must_use]
    pub fn name(&self) -> LocalizedString {
        LocalizedString::new(&self.fr, &self.en, &self.cn)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoriesFile {
    pub categories: Vec<CategoryTranslation>,
}

impl CategoriesFile {
    #[must_use]
    pub fn translation(&self, slug: &str) -> Option<&CategoryTranslation> {
        self.categories.iter().find(|c| c.slug == slug)
    }
}

#[must_use]
pub fn fallback_name(slug: &str) -> LocalizedString {
    let spaced = slug.replace('_', " ");
    LocalizedString::new(spaced.clone(), spaced.clone(), spaced)
}

/// Load and validate the category translation table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_categories(path: &Path) -> Result<CategoriesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: CategoriesFile = serde_yaml::from_str(&content)?;
    validate_categories(&file)?;
    Ok(file)
}

fn validate_categories(file: &CategoriesFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for category in &file.categories {
        if category.slug.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category slug must be non-empty".to_string(),
            ));
        }

        if [&category.fr, &category.en, &category.cn]
            .iter()
            .any(|name| name.trim().is_empty())
        {
            return Err(ConfigError::Validation(format!(
                "category '{}' must have fr, en and cn names",
                category.slug
            )));
        }

        if !seen.insert(category.slug.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category slug: '{}'",
                category.slug
            )));
        }
    }

    Ok(())
}
