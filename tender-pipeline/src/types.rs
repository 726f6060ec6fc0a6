//! Wire types for the quoting pipeline.
//!
//! Stages that can legitimately come up empty report a discriminated
//! outcome instead of a bare empty list, so callers have to branch on
//! "nothing found" explicitly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tender_core::{
    PricingBreakdown, PricingSummary, ProductMatch, SpecObservation, SpecSummary, ValidationReport,
};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One tender as handed to the pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RfpInput {
    pub title: String,
    /// Free-text scope of supply.
    pub scope_text: String,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Explicit order size in meters. Overrides anything extracted.
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub testing_requirements: Vec<String>,
}

impl RfpInput {
    /// Text the extractor reads: title first, then scope, space-joined.
    /// Tenders often state the voltage class only in the title.
    pub fn extraction_text(&self) -> String {
        format!("{} {}", self.title, self.scope_text)
    }
}

// ---------------------------------------------------------------------------
// Stage outcomes
// ---------------------------------------------------------------------------

/// What extraction produced for a tender.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionOutcome {
    Found { observations: Vec<SpecObservation> },
    Empty,
}

impl ExtractionOutcome {
    pub fn from_observations(observations: Vec<SpecObservation>) -> Self {
        if observations.is_empty() {
            Self::Empty
        } else {
            Self::Found { observations }
        }
    }

    pub fn observations(&self) -> &[SpecObservation] {
        match self {
            Self::Found { observations } => observations,
            Self::Empty => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// What matching produced for a tender.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchOutcome {
    Found { matches: Vec<ProductMatch> },
    Empty,
}

impl MatchOutcome {
    pub fn from_matches(matches: Vec<ProductMatch>) -> Self {
        if matches.is_empty() {
            Self::Empty
        } else {
            Self::Found { matches }
        }
    }

    pub fn matches(&self) -> &[ProductMatch] {
        match self {
            Self::Found { matches } => matches,
            Self::Empty => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

// ---------------------------------------------------------------------------
// Digest
// ---------------------------------------------------------------------------

/// Everything one pipeline run produced for a tender.
///
/// The validation report is advisory. An invalid specification set still
/// flows through matching and pricing; the report just tells the caller
/// what the tender failed to state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteDigest {
    pub rfp_title: String,
    pub extraction: ExtractionOutcome,
    pub summary: SpecSummary,
    pub validation: ValidationReport,
    pub matching: MatchOutcome,
    /// Order size the quotes were priced at, in meters.
    pub quantity_meters: f64,
    pub pricing: Vec<PricingBreakdown>,
    pub pricing_summary: Option<PricingSummary>,
    pub recommended_sku: Option<String>,
    /// Total of the recommended quote, 0 when nothing was recommended.
    pub total_estimate: f64,
    pub generated_at: DateTime<Utc>,
}
