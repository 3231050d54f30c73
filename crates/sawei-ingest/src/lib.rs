pub mod dedup;
pub mod error;
pub mod images;
pub mod normalize;
pub mod pipeline;
pub mod pricing;
pub mod remediate;
pub mod slug;
pub mod source;
pub mod title;
pub mod types;

pub use dedup::{dedupe, Deduplicated, Identified};
pub use error::{IngestError, PriceError};
pub use images::{select_images, ImageSelection};
pub use normalize::{normalize_record, NormalizeContext, NormalizedRecord};
pub use pipeline::{ingest, ingest_records, IngestOptions, IngestOutput};
pub use pricing::{marketing_round, PricingPolicy, RawPrices};
pub use source::{read_complete_export, read_scrape_tree, SourceBatch, SourcedRecord};
pub use types::{CompleteExport, RawImage, RawRecord};
