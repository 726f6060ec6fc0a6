//! Rule-based pricing for matched products.
//!
//! A price builds up in fixed stages: unit price with a low-confidence
//! markup, material subtotal, percentage testing surcharges, a delivery
//! charge with a per-meter large-order component, and a deadline urgency
//! premium. Components are rounded to the cent before the total is formed,
//! so the stored fields of a breakdown always sum to its stored total.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    BASE_DELIVERY_COST, DELIVERY_COST_PER_METER, FALLBACK_UNIT_PRICE, LARGE_ORDER_THRESHOLD_METERS,
    LOW_CONFIDENCE_MARKUP, LOW_CONFIDENCE_THRESHOLD, TESTING_COST_RATES, URGENCY_NEAR_DAYS,
    URGENCY_NEAR_RATE, URGENCY_RUSH_DAYS, URGENCY_RUSH_RATE, URGENCY_SOON_DAYS, URGENCY_SOON_RATE,
};
use crate::error::{QuoteError, QuoteResult};
use crate::matching::ProductMatch;
use crate::util::{round2, trim_numeric};

/// Quotes are always rupee-denominated.
const QUOTE_CURRENCY: &str = "INR";

/// One lakh, the threshold for abbreviated rupee formatting.
const LAKH: f64 = 100_000.0;

// ---------------------------------------------------------------------------
// Input and output records
// ---------------------------------------------------------------------------

/// Commercial terms a tender imposes on every candidate product.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PricingInput {
    /// Order size in meters.
    pub quantity: f64,
    /// Submission deadline, drives the urgency premium.
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Free-text testing requirement lines.
    #[serde(default)]
    pub testing_requirements: Vec<String>,
}

/// Full cost build-up for one candidate product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub sku: String,
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: f64,
    pub subtotal: f64,
    pub testing_cost: f64,
    pub delivery_cost: f64,
    pub urgency_adjustment: f64,
    pub total: f64,
    pub currency: String,
    /// Set once a discount has been applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,
}

/// One line of a cost breakdown report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostComponent {
    pub amount: f64,
    /// Share of the total, in percent rounded to two decimals.
    pub percentage: f64,
}

impl CostComponent {
    fn share_of(amount: f64, total: f64) -> Self {
        Self {
            amount,
            percentage: round2(amount / total * 100.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdownLines {
    pub material_cost: CostComponent,
    pub testing_cost: CostComponent,
    pub delivery_cost: CostComponent,
    pub urgency_premium: CostComponent,
}

/// Per-component view of a priced quote, for presentation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdownReport {
    pub sku: String,
    pub product_name: String,
    /// Human-readable order size, e.g. `"5000 meters"`.
    pub quantity: String,
    pub breakdown: CostBreakdownLines,
    pub unit_price: f64,
    pub total: f64,
    pub currency: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub sku: String,
    pub total: f64,
    pub formatted: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceAverage {
    pub total: f64,
    pub formatted: String,
}

/// Spread of totals across all priced candidates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingSummary {
    pub lowest: PricePoint,
    pub highest: PricePoint,
    pub average: PriceAverage,
    pub options_count: usize,
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

/// Price every match under the given commercial terms, evaluated at the
/// current wall clock.
pub fn calculate_pricing(
    matches: &[ProductMatch],
    input: &PricingInput,
) -> QuoteResult<Vec<PricingBreakdown>> {
    calculate_pricing_at(matches, input, Utc::now())
}

/// Same as [`calculate_pricing`] with an explicit evaluation instant, so
/// urgency bands can be pinned down in tests.
pub fn calculate_pricing_at(
    matches: &[ProductMatch],
    input: &PricingInput,
    now: DateTime<Utc>,
) -> QuoteResult<Vec<PricingBreakdown>> {
    if !input.quantity.is_finite() || input.quantity < 0.0 {
        return Err(QuoteError::MalformedQuantity(input.quantity));
    }

    Ok(matches
        .iter()
        .map(|m| price_match(m, input, now))
        .collect())
}

fn price_match(m: &ProductMatch, input: &PricingInput, now: DateTime<Utc>) -> PricingBreakdown {
    let mut unit_price = if m.base_price > 0.0 {
        m.base_price
    } else {
        log::warn!("sku={} has no usable base price, quoting fallback rate", m.sku);
        FALLBACK_UNIT_PRICE
    };
    if m.match_score < LOW_CONFIDENCE_THRESHOLD {
        unit_price *= LOW_CONFIDENCE_MARKUP;
    }

    let subtotal = unit_price * input.quantity;
    let testing = testing_cost(subtotal, &input.testing_requirements);
    let delivery = delivery_cost(input.quantity);
    let urgency = urgency_adjustment(subtotal, input.deadline, now);

    // Round each component before totalling, so the stored fields always
    // sum to the stored total.
    let subtotal = round2(subtotal);
    let testing = round2(testing);
    let delivery = round2(delivery);
    let urgency = round2(urgency);

    PricingBreakdown {
        sku: m.sku.clone(),
        product_name: m.name.clone(),
        unit_price: round2(unit_price),
        quantity: input.quantity,
        subtotal,
        testing_cost: testing,
        delivery_cost: delivery,
        urgency_adjustment: urgency,
        total: round2(subtotal + testing + delivery + urgency),
        currency: QUOTE_CURRENCY.to_owned(),
        discount_percent: None,
        discount_amount: None,
    }
}

/// Sum the percentage surcharges whose keyword appears in any requirement
/// line. Keywords are independent, so one line can trigger several rates
/// and repeated lines accumulate.
fn testing_cost(subtotal: f64, requirements: &[String]) -> f64 {
    let mut cost = 0.0;
    for requirement in requirements {
        let lowered = requirement.to_lowercase();
        for &(keyword, rate) in TESTING_COST_RATES {
            if lowered.contains(keyword) {
                cost += subtotal * rate;
            }
        }
    }
    cost
}

fn delivery_cost(quantity: f64) -> f64 {
    let mut cost = BASE_DELIVERY_COST;
    if quantity > LARGE_ORDER_THRESHOLD_METERS {
        cost += (quantity - LARGE_ORDER_THRESHOLD_METERS) * DELIVERY_COST_PER_METER;
    }
    cost
}

/// Premium charged as the deadline approaches. Whole days remaining pick
/// the band; a missing or distant deadline charges nothing.
fn urgency_adjustment(subtotal: f64, deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let deadline = match deadline {
        Some(d) => d,
        None => return 0.0,
    };

    let days_left = (deadline - now).num_days();
    if days_left < URGENCY_RUSH_DAYS {
        subtotal * URGENCY_RUSH_RATE
    } else if days_left < URGENCY_NEAR_DAYS {
        subtotal * URGENCY_NEAR_RATE
    } else if days_left < URGENCY_SOON_DAYS {
        subtotal * URGENCY_SOON_RATE
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Rewrite a breakdown with a percentage discount off the material subtotal.
/// The discount amount comes off both the subtotal and the total; the other
/// components are untouched.
pub fn apply_discount(
    pricing: &PricingBreakdown,
    discount_percent: f64,
) -> QuoteResult<PricingBreakdown> {
    if !(0.0..=100.0).contains(&discount_percent) {
        return Err(QuoteError::InvalidDiscount(discount_percent));
    }

    let discount_amount = pricing.subtotal * (discount_percent / 100.0);
    let mut discounted = pricing.clone();
    discounted.discount_percent = Some(discount_percent);
    discounted.discount_amount = Some(round2(discount_amount));
    discounted.subtotal = round2(pricing.subtotal - discount_amount);
    discounted.total = round2(pricing.total - discount_amount);
    Ok(discounted)
}

/// Expand a priced quote into per-component amounts and percentage shares.
pub fn cost_breakdown(pricing: &PricingBreakdown) -> CostBreakdownReport {
    let total = pricing.total;
    CostBreakdownReport {
        sku: pricing.sku.clone(),
        product_name: pricing.product_name.clone(),
        quantity: format!("{} meters", trim_numeric(pricing.quantity)),
        breakdown: CostBreakdownLines {
            material_cost: CostComponent::share_of(pricing.subtotal, total),
            testing_cost: CostComponent::share_of(pricing.testing_cost, total),
            delivery_cost: CostComponent::share_of(pricing.delivery_cost, total),
            urgency_premium: CostComponent::share_of(pricing.urgency_adjustment, total),
        },
        unit_price: pricing.unit_price,
        total,
        currency: pricing.currency.clone(),
    }
}

/// Lowest, highest, and mean totals across the priced candidates. Ties keep
/// the earliest candidate. Empty input has no summary.
pub fn pricing_summary(pricing_list: &[PricingBreakdown]) -> Option<PricingSummary> {
    if pricing_list.is_empty() {
        return None;
    }

    let mut lowest = &pricing_list[0];
    let mut highest = &pricing_list[0];
    for p in &pricing_list[1..] {
        if p.total < lowest.total {
            lowest = p;
        }
        if p.total > highest.total {
            highest = p;
        }
    }
    let average = pricing_list.iter().map(|p| p.total).sum::<f64>() / pricing_list.len() as f64;

    Some(PricingSummary {
        lowest: PricePoint {
            sku: lowest.sku.clone(),
            total: lowest.total,
            formatted: format_inr(lowest.total),
        },
        highest: PricePoint {
            sku: highest.sku.clone(),
            total: highest.total,
            formatted: format_inr(highest.total),
        },
        average: PriceAverage {
            total: round2(average),
            formatted: format_inr(average),
        },
        options_count: pricing_list.len(),
    })
}

// ---------------------------------------------------------------------------
// Currency formatting
// ---------------------------------------------------------------------------

/// Format a rupee amount. At one lakh and above the amount is abbreviated
/// (`₹4.95L`); below that it is grouped with at most two decimals
/// (`₹82,500`, `₹5,000.5`).
pub fn format_inr(amount: f64) -> String {
    if amount >= LAKH {
        return format!("₹{:.2}L", amount / LAKH);
    }

    let rounded = round2(amount);
    let paise = (rounded.abs() * 100.0).round() as i64;
    let rupees = paise / 100;
    let frac = paise % 100;

    let mut out = String::from("₹");
    if rounded < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(rupees));
    if frac > 0 {
        if frac % 10 == 0 {
            out.push_str(&format!(".{}", frac / 10));
        } else {
            out.push_str(&format!(".{frac:02}"));
        }
    }
    out
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut reversed = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            reversed.push(',');
        }
        reversed.push(ch);
    }
    reversed.chars().rev().collect()
}
