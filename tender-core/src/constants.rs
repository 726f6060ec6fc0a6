//! Centralized business constants for matching, pricing, and recommendation.
//!
//! These values are the commercial rules the quoting desk runs on. They are
//! behavioral contract, not tuning knobs: scoring weights feed the match
//! rubric (in `matching.rs`), surcharge rates feed the cost model (in
//! `pricing.rs`). Change one here and every quote changes with it.

/// Minimum normalized match score a product must reach to stay in results.
pub const MATCH_SCORE_THRESHOLD: f64 = 0.3;

/// Scoring weight for voltage agreement.
pub const WEIGHT_VOLTAGE: f64 = 30.0;

/// Partial credit when voltage ratings differ by no more than
/// [`VOLTAGE_PARTIAL_WINDOW_KV`] kilovolts.
pub const VOLTAGE_PARTIAL_AWARD: f64 = 15.0;

/// Voltage difference (kV) still considered a near miss.
pub const VOLTAGE_PARTIAL_WINDOW_KV: f64 = 5.0;

/// Scoring weight for conductor cross-section agreement.
pub const WEIGHT_CONDUCTOR_SIZE: f64 = 25.0;

/// Partial credit for conductor sizes within [`SIZE_NEAR_WINDOW_SQMM`] sq.mm.
pub const SIZE_NEAR_AWARD: f64 = 15.0;

/// Conductor size difference (sq.mm) for the closer partial-credit band.
pub const SIZE_NEAR_WINDOW_SQMM: f64 = 50.0;

/// Partial credit for conductor sizes within [`SIZE_FAR_WINDOW_SQMM`] sq.mm.
pub const SIZE_FAR_AWARD: f64 = 10.0;

/// Conductor size difference (sq.mm) for the wider partial-credit band.
pub const SIZE_FAR_WINDOW_SQMM: f64 = 100.0;

/// Scoring weight for conductor material agreement.
pub const WEIGHT_CONDUCTOR_MATERIAL: f64 = 20.0;

/// Scoring weight for insulation material agreement.
pub const WEIGHT_INSULATION: f64 = 15.0;

/// Scoring weight for core count agreement.
pub const WEIGHT_CORES: f64 = 5.0;

/// Scoring weight distributed across overlapping standards.
pub const WEIGHT_STANDARDS: f64 = 5.0;

/// Match score below which a product carries extra supply risk and the
/// unit price is marked up by [`LOW_CONFIDENCE_MARKUP`].
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Unit price multiplier applied to low-confidence matches (10% premium).
pub const LOW_CONFIDENCE_MARKUP: f64 = 1.1;

/// Unit price assumed when a match carries no usable base price.
pub const FALLBACK_UNIT_PRICE: f64 = 100.0;

/// Flat delivery charge applied to every order.
pub const BASE_DELIVERY_COST: f64 = 5000.0;

/// Per-meter delivery charge on the portion of an order above
/// [`LARGE_ORDER_THRESHOLD_METERS`].
pub const DELIVERY_COST_PER_METER: f64 = 0.5;

/// Order size (meters) above which per-meter delivery charges kick in.
pub const LARGE_ORDER_THRESHOLD_METERS: f64 = 5000.0;

/// Testing surcharge keyword table: substring matched case-insensitively
/// against each testing requirement, rate applied to the subtotal.
/// Rules are independent and stack when one requirement string contains
/// several keywords; they are checked in this order.
pub const TESTING_COST_RATES: &[(&str, f64)] = &[
    ("type", 0.05),
    ("routine", 0.02),
    ("sample", 0.03),
    ("partial discharge", 0.02),
    ("impulse", 0.03),
    ("heat cycle", 0.02),
];

/// Deadlines closer than this many days carry the rush premium.
pub const URGENCY_RUSH_DAYS: i64 = 14;

/// Rush premium rate (15% of subtotal) for deadlines under two weeks.
pub const URGENCY_RUSH_RATE: f64 = 0.15;

/// Deadlines closer than this many days carry the near premium.
pub const URGENCY_NEAR_DAYS: i64 = 30;

/// Near premium rate (8% of subtotal) for deadlines under a month.
pub const URGENCY_NEAR_RATE: f64 = 0.08;

/// Deadlines closer than this many days carry the soon premium.
pub const URGENCY_SOON_DAYS: i64 = 60;

/// Soon premium rate (3% of subtotal) for deadlines under two months.
pub const URGENCY_SOON_RATE: f64 = 0.03;

/// Share of the combined recommendation score carried by match quality.
pub const RECOMMEND_MATCH_SHARE: f64 = 0.7;

/// Share of the combined recommendation score carried by relative price.
pub const RECOMMEND_PRICE_SHARE: f64 = 0.3;
