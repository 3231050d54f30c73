use rust_decimal::Decimal;
use sawei_core::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid record {} from {source_path}: {reason}", id.as_deref().unwrap_or("<no id>"))]
    InvalidRecord {
        id: Option<String>,
        source_path: String,
        reason: String,
    },

    #[error("invalid price for record {id} from {source_path}: {reason}")]
    InvalidPrice {
        id: String,
        source_path: String,
        #[source]
        reason: PriceError,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl IngestError {
    /// The diagnostic recorded when this error excludes a record from a build.
    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            IngestError::InvalidRecord {
                id,
                source_path,
                reason,
            } => Diagnostic::InvalidRecord {
                id: id.clone(),
                source: source_path.clone(),
                reason: reason.clone(),
            },
            IngestError::InvalidPrice {
                id,
                source_path,
                reason,
            } => Diagnostic::InvalidPrice {
                id: id.clone(),
                source: source_path.clone(),
                reason: reason.to_string(),
            },
            IngestError::Io { path, source } => Diagnostic::SkippedSource {
                path: path.clone(),
                reason: source.to_string(),
            },
            IngestError::Deserialize { context, source } => Diagnostic::SkippedSource {
                path: context.clone(),
                reason: source.to_string(),
            },
        }
    }
}

/// Why a source cost cannot be priced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("cost is not numeric: {0}")]
    NonNumeric(String),

    #[error("cost is not finite")]
    NonFinite,

    #[error("cost must be positive, got {0}")]
    NonPositive(Decimal),

    #[error("exchange rate must be positive, got {0}")]
    InvalidRate(Decimal),

    #[error("cost {0} is too large to price")]
    OutOfRange(Decimal),
}
