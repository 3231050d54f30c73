pub mod collate;
pub mod error;
pub mod handle;
pub mod query;
pub mod quote;
pub mod search;
pub mod store;

pub use error::CatalogueError;
pub use handle::CatalogueHandle;
pub use query::{ProductFilter, SortBy};
pub use quote::{quote_for_checkout, CheckoutQuote, QuoteError};
pub use search::SearchIndex;
pub use store::{BuildOptions, CatalogueStore};

#[cfg(test)]
pub(crate) mod test_support;
