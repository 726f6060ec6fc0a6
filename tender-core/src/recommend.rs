//! Final product selection across scored and priced candidates.
//!
//! Match quality dominates at 70%, relative price counts the remaining 30%.
//! Price scores are normalized against the most expensive candidate, so the
//! cheapest option earns the largest price credit.

use crate::constants::{RECOMMEND_MATCH_SHARE, RECOMMEND_PRICE_SHARE};
use crate::matching::ProductMatch;
use crate::pricing::PricingBreakdown;

/// Pick the SKU to put forward. Without pricing the best match wins
/// outright; with pricing, match score and price score combine. Matches
/// lacking a pricing entry drop out of the ranking, and ties resolve to
/// the earlier candidate.
pub fn recommend(matches: &[ProductMatch], pricing_list: &[PricingBreakdown]) -> Option<String> {
    if matches.is_empty() {
        return None;
    }
    if pricing_list.is_empty() {
        return Some(matches[0].sku.clone());
    }

    let max_total = pricing_list
        .iter()
        .map(|p| p.total)
        .fold(f64::MIN, f64::max);

    let mut ranked: Vec<(f64, &str)> = matches
        .iter()
        .filter_map(|m| {
            let pricing = pricing_list.iter().find(|p| p.sku == m.sku)?;
            let price_score = 1.0 - pricing.total / max_total;
            let combined =
                RECOMMEND_MATCH_SHARE * m.match_score + RECOMMEND_PRICE_SHARE * price_score;
            Some((combined, m.sku.as_str()))
        })
        .collect();

    if ranked.is_empty() {
        return None;
    }

    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    Some(ranked[0].1.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductAttributes;

    fn scored(sku: &str, match_score: f64) -> ProductMatch {
        ProductMatch {
            sku: sku.to_owned(),
            name: format!("{sku} demo cable"),
            category: "MV Power Cable".to_owned(),
            match_score,
            matched_attributes: Vec::new(),
            attributes: ProductAttributes {
                voltage: "11".to_owned(),
                conductor_size: "185".to_owned(),
                conductor_material: "Aluminum".to_owned(),
                insulation_material: "XLPE".to_owned(),
                cores: "3".to_owned(),
                armor_type: "SWA".to_owned(),
            },
            standards: Vec::new(),
            base_price: 450.0,
        }
    }

    fn priced(sku: &str, total: f64) -> PricingBreakdown {
        PricingBreakdown {
            sku: sku.to_owned(),
            product_name: format!("{sku} demo cable"),
            unit_price: 100.0,
            quantity: 1000.0,
            subtotal: total,
            testing_cost: 0.0,
            delivery_cost: 0.0,
            urgency_adjustment: 0.0,
            total,
            currency: "INR".to_owned(),
            discount_percent: None,
            discount_amount: None,
        }
    }

    #[test]
    fn no_matches_means_no_recommendation() {
        assert_eq!(recommend(&[], &[]), None);
    }

    #[test]
    fn without_pricing_the_best_match_wins() {
        let matches = vec![scored("A", 0.9), scored("B", 0.8)];
        assert_eq!(recommend(&matches, &[]), Some("A".to_owned()));
    }

    #[test]
    fn cheaper_candidate_overtakes_on_combined_score() {
        let matches = vec![scored("A", 0.9), scored("B", 0.85)];
        let pricing = vec![priced("A", 100_000.0), priced("B", 50_000.0)];

        // A: 0.7*0.9 + 0.3*0.0 = 0.63. B: 0.7*0.85 + 0.3*0.5 = 0.745.
        assert_eq!(recommend(&matches, &pricing), Some("B".to_owned()));
    }

    #[test]
    fn ties_resolve_to_the_earlier_candidate() {
        let matches = vec![scored("A", 0.9), scored("B", 0.9)];
        let pricing = vec![priced("A", 80_000.0), priced("B", 80_000.0)];

        assert_eq!(recommend(&matches, &pricing), Some("A".to_owned()));
    }

    #[test]
    fn matches_without_pricing_entries_are_skipped() {
        let matches = vec![scored("A", 0.95), scored("B", 0.6)];
        let pricing = vec![priced("B", 80_000.0)];

        assert_eq!(recommend(&matches, &pricing), Some("B".to_owned()));
    }

    #[test]
    fn entirely_unpriced_matches_yield_none() {
        let matches = vec![scored("A", 0.95)];
        let pricing = vec![priced("C", 80_000.0)];

        assert_eq!(recommend(&matches, &pricing), None);
    }
}
