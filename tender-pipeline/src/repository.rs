//! RFP lifecycle store.
//!
//! Keeps tender submissions together with the quote output computed for
//! them. The trait is synchronous and object-safe so alternative stores
//! can slot in behind the same contract; the in-memory implementation
//! ships with demo seed data.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::quote::QuotePipeline;
use crate::types::{QuoteDigest, RfpInput};
use tender_core::QuoteError;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Every way a repository operation can fail.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("No RFP with id '{0}'")]
    NotFound(String),

    #[error("No free RFP id remains for {0}")]
    IdSpaceExhausted(i32),

    #[error("Quote computation failed: {0}")]
    Quote(#[from] QuoteError),
}

/// Lifecycle state of a tender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RfpStatus {
    New,
    Processing,
    Completed,
}

/// Listing row for one tender.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RfpRecord {
    pub id: String,
    pub title: String,
    pub organization: String,
    pub status: RfpStatus,
    pub deadline: Option<DateTime<Utc>>,
    pub submitted_at: DateTime<Utc>,
    /// Headline estimate from the attached quote, 0 before quoting.
    pub estimated_value: f64,
}

/// Full stored state for one tender.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RfpDetail {
    pub record: RfpRecord,
    pub scope_text: String,
    pub testing_requirements: Vec<String>,
    pub digest: Option<QuoteDigest>,
    pub feedback: Option<RfpFeedback>,
}

/// A submission before it has an id.
#[derive(Clone, Debug)]
pub struct NewRfp {
    pub organization: String,
    pub input: RfpInput,
    /// Pipeline output to persist with the record, when already computed.
    pub digest: Option<QuoteDigest>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackOutcome {
    Won,
    Lost,
}

/// Outcome feedback recorded after a tender closes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RfpFeedback {
    pub outcome: FeedbackOutcome,
    pub actual_price: Option<f64>,
    pub notes: Option<String>,
}

/// One page of listing results, newest submissions first.
#[derive(Clone, Debug)]
pub struct RfpPage {
    pub items: Vec<RfpRecord>,
    pub total: usize,
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

pub trait RfpRepository {
    /// List records, optionally narrowed to one status, newest first.
    fn list(&self, status: Option<RfpStatus>) -> RfpPage;

    /// Fetch the full stored state for one tender.
    fn get(&self, id: &str) -> Result<RfpDetail, RepositoryError>;

    /// Store a submission and assign it an id.
    fn submit(&mut self, rfp: NewRfp) -> Result<RfpRecord, RepositoryError>;

    /// Attach won/lost feedback to a stored tender.
    fn record_feedback(&mut self, id: &str, feedback: RfpFeedback)
        -> Result<(), RepositoryError>;
}

/// Run the pipeline for a tender and store the submission with its quote
/// attached.
pub fn submit_quote(
    pipeline: &QuotePipeline,
    repo: &mut dyn RfpRepository,
    organization: &str,
    input: RfpInput,
) -> Result<RfpRecord, RepositoryError> {
    let digest = pipeline.run(&input)?;
    repo.submit(NewRfp {
        organization: organization.to_owned(),
        input,
        digest: Some(digest),
    })
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

/// Random id draws before the allocator falls back to scanning the
/// suffix range in order.
const ID_ALLOC_ATTEMPTS: usize = 64;

#[derive(Default)]
pub struct InMemoryRfpRepository {
    rfps: Vec<RfpDetail>,
}

impl InMemoryRfpRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-loaded with the demo tenders.
    pub fn with_seed_data() -> Self {
        let mut repo = Self::new();
        repo.rfps = seed_rfps();
        repo
    }

    /// `RFP-<year>-<NNN>` with a random 3-digit suffix. Random draws are
    /// capped; after that the suffix range is scanned in order, and a
    /// fully allocated year is a typed error.
    fn allocate_id(&self, now: DateTime<Utc>) -> Result<String, RepositoryError> {
        let year = now.year();
        let mut rng = rand::thread_rng();
        for _ in 0..ID_ALLOC_ATTEMPTS {
            let id = format!("RFP-{}-{:03}", year, rng.gen_range(0..1000));
            if !self.rfps.iter().any(|r| r.record.id == id) {
                return Ok(id);
            }
        }
        (0..1000)
            .map(|n| format!("RFP-{}-{:03}", year, n))
            .find(|id| !self.rfps.iter().any(|r| r.record.id == *id))
            .ok_or(RepositoryError::IdSpaceExhausted(year))
    }
}

impl RfpRepository for InMemoryRfpRepository {
    fn list(&self, status: Option<RfpStatus>) -> RfpPage {
        let mut items: Vec<RfpRecord> = self
            .rfps
            .iter()
            .filter(|r| status.map_or(true, |s| r.record.status == s))
            .map(|r| r.record.clone())
            .collect();
        items.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        let total = items.len();
        RfpPage { items, total }
    }

    fn get(&self, id: &str) -> Result<RfpDetail, RepositoryError> {
        self.rfps
            .iter()
            .find(|r| r.record.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_owned()))
    }

    fn submit(&mut self, rfp: NewRfp) -> Result<RfpRecord, RepositoryError> {
        let now = Utc::now();
        let id = self.allocate_id(now)?;
        let status = if rfp.digest.is_some() {
            RfpStatus::Completed
        } else {
            RfpStatus::New
        };
        let estimated_value = rfp.digest.as_ref().map_or(0.0, |d| d.total_estimate);

        let record = RfpRecord {
            id: id.clone(),
            title: rfp.input.title.clone(),
            organization: rfp.organization,
            status,
            deadline: rfp.input.deadline,
            submitted_at: now,
            estimated_value,
        };
        log::info!("rfp={} stored '{}' as {:?}", id, record.title, status);

        self.rfps.push(RfpDetail {
            record: record.clone(),
            scope_text: rfp.input.scope_text,
            testing_requirements: rfp.input.testing_requirements,
            digest: rfp.digest,
            feedback: None,
        });
        Ok(record)
    }

    fn record_feedback(
        &mut self,
        id: &str,
        feedback: RfpFeedback,
    ) -> Result<(), RepositoryError> {
        let detail = self
            .rfps
            .iter_mut()
            .find(|r| r.record.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_owned()))?;
        log::info!("rfp={} feedback recorded: {:?}", id, feedback.outcome);
        detail.feedback = Some(feedback);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

#[allow(clippy::too_many_arguments)]
fn seed(
    id: &str,
    title: &str,
    organization: &str,
    status: RfpStatus,
    submitted: DateTime<Utc>,
    deadline: DateTime<Utc>,
    estimated_value: f64,
    scope_text: &str,
    testing: &[&str],
) -> RfpDetail {
    RfpDetail {
        record: RfpRecord {
            id: id.to_owned(),
            title: title.to_owned(),
            organization: organization.to_owned(),
            status,
            deadline: Some(deadline),
            submitted_at: submitted,
            estimated_value,
        },
        scope_text: scope_text.to_owned(),
        testing_requirements: testing.iter().map(|s| s.to_string()).collect(),
        digest: None,
        feedback: None,
    }
}

fn seed_rfps() -> Vec<RfpDetail> {
    let mut rfps = vec![
        seed(
            "RFP-2025-001",
            "33kV Underground Cable Package for Grid Extension",
            "Maharashtra State Electricity Distribution Co.",
            RfpStatus::Completed,
            day(2025, 3, 12),
            day(2025, 4, 30),
            4_862_500.0,
            "Supply and installation of 8000 meters of 33kV XLPE insulated cable, \
             3 core 185 sq.mm copper conductor, SWA armored, as per IEC 60502-2.",
            &["Type test", "Routine test"],
        ),
        seed(
            "RFP-2025-002",
            "11kV Feeder Replacement, Phase II",
            "Tata Power Distribution",
            RfpStatus::Completed,
            day(2025, 4, 2),
            day(2025, 5, 15),
            2_905_000.0,
            "Supply of 5000 meters of 11kV XLPE cables with 3 core aluminum \
             conductor, size 240 sq.mm",
            &[],
        ),
        seed(
            "RFP-2025-003",
            "LV Distribution Cable Supply for Rural Electrification",
            "Gujarat Urja Vikas Nigam",
            RfpStatus::Processing,
            day(2025, 5, 20),
            day(2025, 7, 1),
            0.0,
            "Supply of 12,000 meters of 1.1kV PVC insulated cable, 4 core 50 sq.mm \
             copper conductor, unarmored, conforming to IS 1554.",
            &[],
        ),
        seed(
            "RFP-2025-004",
            "Control Cable Supply for Substation Automation",
            "Delhi Metro Rail Corporation",
            RfpStatus::Processing,
            day(2025, 6, 8),
            day(2025, 8, 20),
            0.0,
            "Control cable, 12 core 2.5 sq.mm copper, PVC insulated, 3000 meters \
             for substation automation panels.",
            &["Sample test"],
        ),
        seed(
            "RFP-2025-005",
            "22kV Industrial Park Power Cable Tender",
            "Haryana State Industrial Development Corp.",
            RfpStatus::New,
            day(2025, 6, 25),
            day(2025, 9, 10),
            0.0,
            "Procurement of 22kV power cable, 240 sq.mm aluminum conductor, XLPE, \
             3 core, quantity 6500 meters, CPRI test certificates.",
            &[],
        ),
        seed(
            "RFP-2025-006",
            "MV Cable Procurement for Solar Park Interconnection",
            "Rajasthan Renewable Energy Corp.",
            RfpStatus::New,
            day(2025, 7, 15),
            day(2025, 10, 1),
            0.0,
            "MV power cable for solar park interconnection: 11kV, 300 sq.mm \
             aluminum conductor, XLPE insulation, supply 9000 meters.",
            &["Heat cycle test"],
        ),
    ];

    // The closed tenders carry their outcome.
    rfps[0].feedback = Some(RfpFeedback {
        outcome: FeedbackOutcome::Won,
        actual_price: Some(4_700_000.0),
        notes: Some("Awarded as L1 after one negotiation round.".to_owned()),
    });
    rfps[1].feedback = Some(RfpFeedback {
        outcome: FeedbackOutcome::Lost,
        actual_price: None,
        notes: Some("Lost on delivery schedule.".to_owned()),
    });

    rfps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> RfpInput {
        RfpInput {
            title: "Test Cable Tender".to_owned(),
            scope_text: "Supply of 5000 meters of 11kV XLPE cables with 3 core \
                         aluminum conductor, size 240 sq.mm"
                .to_owned(),
            deadline: None,
            quantity: None,
            testing_requirements: Vec::new(),
        }
    }

    /// Occupy every `RFP-<year>-NNN` id except an optional spared suffix.
    fn fill_year_ids(repo: &mut InMemoryRfpRepository, year: i32, spare: Option<u32>) {
        for n in 0..1000 {
            if Some(n) == spare {
                continue;
            }
            repo.rfps.push(seed(
                &format!("RFP-{}-{:03}", year, n),
                "Filler Tender",
                "Bulk Procurement Desk",
                RfpStatus::New,
                day(2025, 1, 1),
                day(2025, 12, 31),
                0.0,
                "Placeholder scope.",
                &[],
            ));
        }
    }

    #[test]
    fn seed_data_spans_the_lifecycle() {
        let repo = InMemoryRfpRepository::with_seed_data();
        let page = repo.list(None);
        assert_eq!(page.total, 6);
        // Newest submission leads.
        assert_eq!(page.items[0].id, "RFP-2025-006");
        assert_eq!(page.items[5].id, "RFP-2025-001");
    }

    #[test]
    fn status_filter_narrows_the_list() {
        let repo = InMemoryRfpRepository::with_seed_data();
        let completed = repo.list(Some(RfpStatus::Completed));
        assert_eq!(completed.total, 2);
        assert!(completed
            .items
            .iter()
            .all(|r| r.status == RfpStatus::Completed));
    }

    #[test]
    fn get_returns_stored_detail() {
        let repo = InMemoryRfpRepository::with_seed_data();
        let detail = repo.get("RFP-2025-001").unwrap();
        assert_eq!(detail.record.organization, "Maharashtra State Electricity Distribution Co.");
        assert!(detail.scope_text.contains("33kV"));
        assert!(matches!(
            detail.feedback,
            Some(RfpFeedback {
                outcome: FeedbackOutcome::Won,
                ..
            })
        ));
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let repo = InMemoryRfpRepository::new();
        assert!(matches!(
            repo.get("RFP-2025-999"),
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[test]
    fn submit_assigns_a_patterned_id() {
        let mut repo = InMemoryRfpRepository::new();
        let record = repo
            .submit(NewRfp {
                organization: "Acme Power".to_owned(),
                input: sample_input(),
                digest: None,
            })
            .unwrap();

        assert!(record.id.starts_with(&format!("RFP-{}-", Utc::now().year())));
        assert_eq!(record.id.len(), "RFP-2025-001".len());
        assert_eq!(record.status, RfpStatus::New);
        assert_eq!(record.estimated_value, 0.0);
        assert_eq!(repo.list(None).total, 1);
    }

    #[test]
    fn id_allocation_lands_on_the_last_free_suffix() {
        let year = Utc::now().year();
        let mut repo = InMemoryRfpRepository::new();
        fill_year_ids(&mut repo, year, Some(417));

        let record = repo
            .submit(NewRfp {
                organization: "Acme Power".to_owned(),
                input: sample_input(),
                digest: None,
            })
            .unwrap();
        assert_eq!(record.id, format!("RFP-{}-417", year));
    }

    #[test]
    fn exhausted_id_space_is_a_typed_error() {
        let year = Utc::now().year();
        let mut repo = InMemoryRfpRepository::new();
        fill_year_ids(&mut repo, year, None);

        let result = repo.submit(NewRfp {
            organization: "Acme Power".to_owned(),
            input: sample_input(),
            digest: None,
        });
        assert!(matches!(
            result,
            Err(RepositoryError::IdSpaceExhausted(y)) if y == year
        ));
        // The failed submission must not grow the store.
        assert_eq!(repo.list(None).total, 1000);
    }

    #[test]
    fn submit_quote_attaches_the_digest_and_completes() {
        let pipeline = QuotePipeline::with_builtin_catalog();
        let mut repo = InMemoryRfpRepository::new();

        let record = submit_quote(&pipeline, &mut repo, "Acme Power", sample_input()).unwrap();
        assert_eq!(record.status, RfpStatus::Completed);
        assert!(record.estimated_value > 0.0);

        let detail = repo.get(&record.id).unwrap();
        let digest = detail.digest.expect("digest stored with submission");
        assert_eq!(digest.total_estimate, record.estimated_value);
        assert!(digest.recommended_sku.is_some());
    }

    #[test]
    fn feedback_lands_on_the_record() {
        let mut repo = InMemoryRfpRepository::with_seed_data();
        repo.record_feedback(
            "RFP-2025-005",
            RfpFeedback {
                outcome: FeedbackOutcome::Lost,
                actual_price: Some(5_000_000.0),
                notes: None,
            },
        )
        .unwrap();

        let detail = repo.get("RFP-2025-005").unwrap();
        assert!(matches!(
            detail.feedback,
            Some(RfpFeedback {
                outcome: FeedbackOutcome::Lost,
                ..
            })
        ));

        assert!(matches!(
            repo.record_feedback(
                "RFP-2025-999",
                RfpFeedback {
                    outcome: FeedbackOutcome::Won,
                    actual_price: None,
                    notes: None,
                },
            ),
            Err(RepositoryError::NotFound(_))
        ));
    }
}
