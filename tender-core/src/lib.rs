//! Tender processing core: specification extraction, catalog matching,
//! and rule-based pricing.
//!
//! The stages are plain functions over plain data. Extraction turns free
//! tender text into typed observations, matching scores them against a
//! product catalog, pricing builds a cost breakdown per surviving
//! candidate, and recommendation picks one SKU to put forward. Nothing
//! here performs I/O; callers own the catalog and the clock.

pub mod catalog;
pub mod constants;
pub mod error;
pub mod extract;
pub mod matching;
pub mod pricing;
pub mod recommend;
pub mod spec;
pub mod util;

pub use catalog::{Catalog, CatalogProduct, ProductAttributes};
pub use error::{QuoteError, QuoteResult};
pub use extract::{extract_specifications, summarize, validate};
pub use matching::{match_products, ProductMatch};
pub use pricing::{
    apply_discount, calculate_pricing, calculate_pricing_at, cost_breakdown, format_inr,
    pricing_summary, CostBreakdownReport, PricingBreakdown, PricingInput, PricingSummary,
};
pub use recommend::recommend;
pub use spec::{SpecKind, SpecObservation, SpecSummary, ValidationReport};
