//! Weighted matching of extracted observations against the catalog.
//!
//! Each product is scored attribute by attribute. Only the kinds actually
//! observed in the tender contribute to the denominator, so a tender that
//! names nothing but a voltage can still produce a perfect match. Scores
//! normalize to the 0..=1 range and candidates below
//! [`MATCH_SCORE_THRESHOLD`](crate::constants::MATCH_SCORE_THRESHOLD) are
//! dropped.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogProduct, ProductAttributes};
use crate::constants::{
    MATCH_SCORE_THRESHOLD, SIZE_FAR_AWARD, SIZE_FAR_WINDOW_SQMM, SIZE_NEAR_AWARD,
    SIZE_NEAR_WINDOW_SQMM, VOLTAGE_PARTIAL_AWARD, VOLTAGE_PARTIAL_WINDOW_KV, WEIGHT_CONDUCTOR_MATERIAL,
    WEIGHT_CONDUCTOR_SIZE, WEIGHT_CORES, WEIGHT_INSULATION, WEIGHT_STANDARDS, WEIGHT_VOLTAGE,
};
use crate::spec::{SpecKind, SpecObservation};
use crate::util::round2;

// ---------------------------------------------------------------------------
// Match record
// ---------------------------------------------------------------------------

/// One catalog product scored against a tender's observations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductMatch {
    pub sku: String,
    pub name: String,
    pub category: String,
    /// Normalized 0..=1, rounded to two decimals.
    pub match_score: f64,
    /// Attribute names that matched exactly. Partial credit raises the
    /// score but is not flagged here.
    pub matched_attributes: Vec<String>,
    pub attributes: ProductAttributes,
    pub standards: Vec<String>,
    pub base_price: f64,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score every catalog product against the observations, keeping candidates
/// at or above the score floor, best first. Equal scores keep catalog order.
pub fn match_products(catalog: &Catalog, observations: &[SpecObservation]) -> Vec<ProductMatch> {
    if observations.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<ProductMatch> = catalog
        .products()
        .iter()
        .map(|product| {
            let (match_score, matched_attributes) = score_product(product, observations);
            ProductMatch {
                sku: product.sku.clone(),
                name: product.name.clone(),
                category: product.category.clone(),
                match_score,
                matched_attributes,
                attributes: product.attributes.clone(),
                standards: product.standards.clone(),
                base_price: product.base_price,
            }
        })
        .filter(|m| m.match_score >= MATCH_SCORE_THRESHOLD)
        .collect();

    matches.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches
}

/// Weighted comparison of one product against the observation set.
///
/// The first observation of each kind wins; standards are the exception
/// and contribute as a group.
fn score_product(product: &CatalogProduct, observations: &[SpecObservation]) -> (f64, Vec<String>) {
    let mut score = 0.0;
    let mut max_score = 0.0;
    let mut matched: Vec<String> = Vec::new();

    let voltage = observations.iter().find(|o| o.kind == SpecKind::Voltage);
    let conductor_size = observations.iter().find(|o| o.kind == SpecKind::ConductorSize);
    let conductor_material = observations
        .iter()
        .find(|o| o.kind == SpecKind::ConductorMaterial);
    let insulation = observations
        .iter()
        .find(|o| o.kind == SpecKind::InsulationMaterial);
    let cores = observations.iter().find(|o| o.kind == SpecKind::Cores);
    let standards: Vec<&SpecObservation> = observations
        .iter()
        .filter(|o| o.kind == SpecKind::Standard)
        .collect();

    // --- Voltage ---
    if let Some(obs) = voltage {
        max_score += WEIGHT_VOLTAGE;
        if product.attributes.voltage == obs.value {
            score += WEIGHT_VOLTAGE;
            matched.push("voltage".to_owned());
        } else if let (Ok(have), Ok(want)) = (
            product.attributes.voltage.parse::<f64>(),
            obs.value.parse::<f64>(),
        ) {
            if (have - want).abs() <= VOLTAGE_PARTIAL_WINDOW_KV {
                score += VOLTAGE_PARTIAL_AWARD;
            }
        }
    }

    // --- Conductor size ---
    if let Some(obs) = conductor_size {
        max_score += WEIGHT_CONDUCTOR_SIZE;
        if product.attributes.conductor_size == obs.value {
            score += WEIGHT_CONDUCTOR_SIZE;
            matched.push("conductor_size".to_owned());
        } else if let (Ok(have), Ok(want)) = (
            product.attributes.conductor_size.parse::<f64>(),
            obs.value.parse::<f64>(),
        ) {
            let diff = (have - want).abs();
            if diff <= SIZE_NEAR_WINDOW_SQMM {
                score += SIZE_NEAR_AWARD;
            } else if diff <= SIZE_FAR_WINDOW_SQMM {
                score += SIZE_FAR_AWARD;
            }
        }
    }

    // --- Conductor material ---
    if let Some(obs) = conductor_material {
        max_score += WEIGHT_CONDUCTOR_MATERIAL;
        if product
            .attributes
            .conductor_material
            .eq_ignore_ascii_case(&obs.value)
        {
            score += WEIGHT_CONDUCTOR_MATERIAL;
            matched.push("conductor_material".to_owned());
        }
    }

    // --- Insulation material ---
    if let Some(obs) = insulation {
        max_score += WEIGHT_INSULATION;
        if product
            .attributes
            .insulation_material
            .eq_ignore_ascii_case(&obs.value)
        {
            score += WEIGHT_INSULATION;
            matched.push("insulation_material".to_owned());
        }
    }

    // --- Cores ---
    if let Some(obs) = cores {
        max_score += WEIGHT_CORES;
        if product.attributes.cores == obs.value {
            score += WEIGHT_CORES;
            matched.push("cores".to_owned());
        }
    }

    // --- Standards ---
    if !standards.is_empty() {
        max_score += WEIGHT_STANDARDS;
        let common = standards
            .iter()
            .filter(|obs| {
                let needle = obs.value.to_lowercase();
                product
                    .standards
                    .iter()
                    .any(|s| s.to_lowercase().contains(&needle))
            })
            .count();
        if common > 0 {
            score += WEIGHT_STANDARDS * (common as f64 / standards.len() as f64);
            matched.push("standards".to_owned());
        }
    }

    let final_score = if max_score > 0.0 {
        round2(score / max_score)
    } else {
        0.0
    };
    (final_score, matched)
}
