//! Shared, reloadable access to the current catalogue.
//!
//! The handle starts unloaded. Each load builds a complete new store before
//! swapping it in, and readers work on their own `Arc` snapshot, so a reader
//! never sees a half-built catalogue and a reload never waits on readers.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use sawei_core::Diagnostic;

use crate::error::CatalogueError;
use crate::store::CatalogueStore;

#[derive(Debug, Clone, Default)]
pub struct CatalogueHandle {
    current: Arc<RwLock<Option<Arc<CatalogueStore>>>>,
}

impl CatalogueHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_store(store: CatalogueStore) -> Self {
        let handle = Self::new();
        handle.replace(store);
        handle
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The current store.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::NotLoaded`] before the first load.
    pub fn snapshot(&self) -> Result<Arc<CatalogueStore>, CatalogueError> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(CatalogueError::NotLoaded)
    }

    /// Swap in a new store, returning the previous one.
    pub fn replace(&self, store: CatalogueStore) -> Option<Arc<CatalogueStore>> {
        let next = Arc::new(store);
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(next)
    }

    /// Load the document at `path` and swap it in. On error the current store
    /// stays in place.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError`] if the document cannot be read or parsed.
    pub fn reload(&self, path: &Path) -> Result<Vec<Diagnostic>, CatalogueError> {
        let (store, diagnostics) = CatalogueStore::load(path)?;
        let products = store.len();
        self.replace(store);
        tracing::info!(path = %path.display(), products, diagnostics = diagnostics.len(), "catalogue swapped in");
        Ok(diagnostics)
    }
}
