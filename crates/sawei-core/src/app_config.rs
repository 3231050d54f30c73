use std::net::SocketAddr;
use std::path::PathBuf;

use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub scrape_dir: PathBuf,
    pub complete_export_path: Option<PathBuf>,
    pub catalogue_path: PathBuf,
    pub categories_path: PathBuf,
    pub eur_per_cny: Decimal,
    pub margin: Decimal,
    pub placeholder_image: String,
    pub admin_tokens: Vec<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("scrape_dir", &self.scrape_dir)
            .field("complete_export_path", &self.complete_export_path)
            .field("catalogue_path", &self.catalogue_path)
            .field("categories_path", &self.categories_path)
            .field("eur_per_cny", &self.eur_per_cny)
            .field("margin", &self.margin)
            .field("placeholder_image", &self.placeholder_image)
            .field(
                "admin_tokens",
                &format_args!("[{} redacted]", self.admin_tokens.len()),
            )
            .finish()
    }
}
