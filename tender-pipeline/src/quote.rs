//! End-to-end quoting pipeline.
//!
//! Stages run in a fixed order: extract, validate, match, price,
//! recommend. Each stage feeds the next and the digest keeps every
//! intermediate product, so callers can render as much or as little of
//! the build-up as they need.

use chrono::{DateTime, Utc};
use tender_core::{
    calculate_pricing_at, extract_specifications, match_products, pricing_summary, recommend,
    summarize, validate, Catalog, PricingInput, QuoteResult, SpecKind, SpecObservation,
};

use crate::types::{ExtractionOutcome, MatchOutcome, QuoteDigest, RfpInput};

/// Order size assumed when neither the tender text nor the caller states
/// one, in meters.
const DEFAULT_QUANTITY_METERS: f64 = 1000.0;

/// The four-stage quote pipeline over an injected catalog.
pub struct QuotePipeline {
    catalog: Catalog,
}

impl QuotePipeline {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Pipeline over the built-in demo catalog.
    pub fn with_builtin_catalog() -> Self {
        Self::new(Catalog::builtin())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run the pipeline once, evaluated at the current wall clock.
    pub fn run(&self, input: &RfpInput) -> QuoteResult<QuoteDigest> {
        self.run_at(input, Utc::now())
    }

    /// Run the pipeline once at an explicit instant. Urgency bands and the
    /// digest timestamp both derive from `now`.
    pub fn run_at(&self, input: &RfpInput, now: DateTime<Utc>) -> QuoteResult<QuoteDigest> {
        let observations = extract_specifications(&input.extraction_text());
        let summary = summarize(&observations);
        let validation = validate(&observations);
        log::info!(
            "rfp='{}' extracted {} observation(s), valid={}",
            input.title,
            observations.len(),
            validation.is_valid
        );

        let quantity = resolve_quantity(input, &observations);

        let matches = match_products(&self.catalog, &observations);
        log::info!(
            "rfp='{}' matched {} of {} catalog products",
            input.title,
            matches.len(),
            self.catalog.len()
        );

        let pricing_input = PricingInput {
            quantity,
            deadline: input.deadline,
            testing_requirements: input.testing_requirements.clone(),
        };
        let pricing = calculate_pricing_at(&matches, &pricing_input, now)?;
        let recommended_sku = recommend(&matches, &pricing);
        let pricing_summary = pricing_summary(&pricing);

        let total_estimate = recommended_sku
            .as_deref()
            .and_then(|sku| pricing.iter().find(|p| p.sku == sku))
            .map(|p| p.total)
            .unwrap_or(0.0);
        if let Some(sku) = &recommended_sku {
            log::info!("rfp='{}' recommending {} at {:.2}", input.title, sku, total_estimate);
        }

        Ok(QuoteDigest {
            rfp_title: input.title.clone(),
            extraction: ExtractionOutcome::from_observations(observations),
            summary,
            validation,
            matching: MatchOutcome::from_matches(matches),
            quantity_meters: quantity,
            pricing,
            pricing_summary,
            recommended_sku,
            total_estimate,
            generated_at: now,
        })
    }
}

/// Explicit caller quantity wins, then the first extracted quantity
/// observation, then the default order size.
fn resolve_quantity(input: &RfpInput, observations: &[SpecObservation]) -> f64 {
    if let Some(quantity) = input.quantity {
        return quantity;
    }
    observations
        .iter()
        .find(|o| o.kind == SpecKind::Quantity)
        .and_then(|o| o.value.parse::<f64>().ok())
        .unwrap_or(DEFAULT_QUANTITY_METERS)
}
