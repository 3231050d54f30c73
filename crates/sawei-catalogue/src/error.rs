use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("catalogue I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalogue {path}: {source}")]
    Deserialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize catalogue: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("catalogue has not been loaded")]
    NotLoaded,
}
