//! Orchestration around the tender core: the four-stage quote pipeline,
//! the CSV catalog loader, and the RFP repository with its submission
//! workflow.

pub mod catalog_loader;
pub mod quote;
pub mod repository;
pub mod types;

pub use catalog_loader::{load_catalog, load_catalog_file, CatalogError};
pub use quote::QuotePipeline;
pub use repository::{
    submit_quote, FeedbackOutcome, InMemoryRfpRepository, NewRfp, RepositoryError, RfpDetail,
    RfpFeedback, RfpPage, RfpRecord, RfpRepository, RfpStatus,
};
pub use types::{ExtractionOutcome, MatchOutcome, QuoteDigest, RfpInput};
