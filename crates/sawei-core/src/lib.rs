pub mod app_config;
pub mod categories;
pub mod config;
pub mod diagnostics;
pub mod locale;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use categories::{load_categories, CategoriesFile, CategoryTranslation};
pub use config::{load_app_config, load_app_config_from_env};
pub use diagnostics::{BuildReport, Diagnostic, DiagnosticKind};
pub use locale::{Currency, Locale, LocalizedString};
pub use products::{
    parse_timestamp, CatalogueDocument, CatalogueMetadata, Category, CategoryRef, ComputedPrices,
    FxRates, Money, PriceDisplay, Pricing, Product, ProductImage,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read categories file {path}: {source}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse categories file: {0}")]
    CategoriesFileParse(#[from] serde_yaml::Error),

    #[error("categories validation failed: {0}")]
    Validation(String),
}
