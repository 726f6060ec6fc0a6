//! Specification extraction from tender text.
//!
//! Parses free-form RFP scope text into typed attribute observations using
//! fixed regex rule families. Each family runs independently over the same
//! input and the results are concatenated; there is no early exit between
//! families. Within a family the rules are ordered, and for single-valued
//! attributes (cable type, quantity, cores) the first rule with a match
//! wins. The patterns are deliberately naive, with no word boundaries and
//! no grammar, and that precedence behavior is part of the contract.
//!
//! Confidence values are fixed per rule, not learned.

use std::sync::LazyLock;

use regex::Regex;

use crate::spec::{SpecKind, SpecObservation, SpecSummary, ValidationReport};
use crate::util::trim_numeric;

// ---------------------------------------------------------------------------
// Extraction patterns
// ---------------------------------------------------------------------------

static RE_VOLTAGE_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*k?V").unwrap());

static RE_VOLTAGE_CUED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)voltage.*?(\d+(?:\.\d+)?)\s*k?V").unwrap());

static RE_VOLTAGE_RATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)rated.*?(\d+(?:\.\d+)?)\s*k?V").unwrap());

static RE_SIZE_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:sq\.?\s*mm|mm²|sq\s*mm)").unwrap());

static RE_SIZE_CONDUCTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)conductor.*?(\d+)\s*(?:sq\.?\s*mm|mm²)").unwrap());

static RE_SIZE_CUED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)size.*?(\d+)\s*(?:sq\.?\s*mm|mm²)").unwrap());

static RE_INSULATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:XLPE|PVC|EPR|PE)").unwrap());

static RE_CONDUCTOR_METAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:copper|aluminum|aluminium|Cu|Al)").unwrap());

static RE_ARMOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:SWA|AWA|STA|unarmored|armored)").unwrap());

static RE_STD_IEC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)IEC\s*\d+(?:-\d+)?").unwrap());

static RE_STD_IS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)IS\s*\d+").unwrap());

static RE_STD_BS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)BS\s*\d+").unwrap());

static RE_STD_CPRI: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)CPRI").unwrap());

static RE_CABLE_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:HT|LT|MV|LV|HV|control|power|instrumentation)\s*cable").unwrap()
});

static RE_QTY_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:,\d+)?)\s*(?:meters|metre|m|mtr)").unwrap());

static RE_QTY_QUANTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)quantity.*?(\d+(?:,\d+)?)\s*(?:meters|metre|m)?").unwrap());

static RE_QTY_SUPPLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)supply.*?(\d+(?:,\d+)?)\s*(?:meters|metre|m)").unwrap());

static RE_CORES_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*core").unwrap());

static RE_CORES_COMPACT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(\d+)C").unwrap());

static RE_CORES_CROSS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*x\s*\d+").unwrap());

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Extract all recognizable specification observations from tender text.
///
/// Every rule family runs against the full text; results are concatenated
/// in family order (voltage, conductor size, materials, standards, cable
/// type, quantity, cores). An empty result is a valid outcome for text
/// with no recognizable technical content, not an error.
pub fn extract_specifications(text: &str) -> Vec<SpecObservation> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut observations = extract_voltage(text);
    observations.extend(extract_conductor_size(text));
    observations.extend(extract_materials(text));
    observations.extend(extract_standards(text));
    observations.extend(extract_cable_type(text));
    observations.extend(extract_quantity(text));
    observations.extend(extract_cores(text));
    observations
}

/// Project an observation list into one display slot per kind.
///
/// Later observations of a kind overwrite earlier ones; standards
/// accumulate into a list instead.
pub fn summarize(observations: &[SpecObservation]) -> SpecSummary {
    let mut summary = SpecSummary::default();

    for obs in observations {
        match obs.kind {
            SpecKind::Voltage => {
                summary.voltage_rating = Some(format!("{} {}", obs.value, obs.unit));
            }
            SpecKind::ConductorSize => {
                summary.conductor_size = Some(format!("{} {}", obs.value, obs.unit));
            }
            SpecKind::ConductorMaterial => {
                summary.conductor_material = Some(obs.value.clone());
            }
            SpecKind::InsulationMaterial => {
                summary.insulation_type = Some(obs.value.clone());
            }
            SpecKind::CableType => {
                summary.cable_type = Some(obs.value.clone());
            }
            SpecKind::Quantity => {
                summary.quantity = Some(format!("{} {}", obs.value, obs.unit));
            }
            SpecKind::Cores => {
                summary.cores = Some(obs.value.clone());
            }
            SpecKind::Standard => {
                summary.standards.push(obs.value.clone());
            }
            // Armor is matched for scoring but never surfaced in the summary.
            SpecKind::ArmorType => {}
        }
    }

    summary
}

/// Check an observation list for quoting completeness.
///
/// Invalid unless a voltage observation AND at least one of conductor size
/// or conductor material are present. Missing insulation only warns.
pub fn validate(observations: &[SpecObservation]) -> ValidationReport {
    let has_voltage = observations.iter().any(|o| o.kind == SpecKind::Voltage);
    let has_conductor = observations
        .iter()
        .any(|o| o.kind == SpecKind::ConductorSize || o.kind == SpecKind::ConductorMaterial);
    let has_insulation = observations
        .iter()
        .any(|o| o.kind == SpecKind::InsulationMaterial);

    let mut missing_fields = Vec::new();
    let mut warnings = Vec::new();

    if !has_voltage {
        missing_fields.push("Voltage rating".to_string());
    }
    if !has_conductor {
        missing_fields.push("Conductor specification".to_string());
    }
    if !has_insulation {
        warnings.push("Insulation material not specified".to_string());
    }

    ValidationReport {
        is_valid: has_voltage && has_conductor,
        missing_fields,
        warnings,
    }
}

// ---------------------------------------------------------------------------
// Rule families
// ---------------------------------------------------------------------------

/// Voltage ratings near a kV/V token, bare or after "voltage"/"rated" cues.
/// The unit is always reported as kV regardless of the matched token.
fn extract_voltage(text: &str) -> Vec<SpecObservation> {
    let mut found = Vec::new();

    for re in [&RE_VOLTAGE_BARE, &RE_VOLTAGE_CUED, &RE_VOLTAGE_RATED] {
        for cap in re.captures_iter(text) {
            let value: f64 = cap[1].parse().unwrap_or(0.0);
            if value == 0.0 {
                // zero readings carry no information
                continue;
            }
            push_unique(
                &mut found,
                SpecObservation::new(SpecKind::Voltage, trim_numeric(value), "kV", 0.9),
            );
        }
    }

    found
}

/// Conductor cross-sections in sq.mm, bare or after "conductor"/"size" cues.
fn extract_conductor_size(text: &str) -> Vec<SpecObservation> {
    let mut found = Vec::new();

    for re in [&RE_SIZE_BARE, &RE_SIZE_CONDUCTOR, &RE_SIZE_CUED] {
        for cap in re.captures_iter(text) {
            let value: i64 = cap[1].parse().unwrap_or(0);
            if value == 0 {
                continue;
            }
            push_unique(
                &mut found,
                SpecObservation::new(
                    SpecKind::ConductorSize,
                    value.to_string(),
                    "sq.mm",
                    0.85,
                ),
            );
        }
    }

    found
}

/// Material keywords from three fixed vocabularies: insulation, conductor
/// metal (synonyms normalized), and armor construction.
fn extract_materials(text: &str) -> Vec<SpecObservation> {
    let mut found = Vec::new();

    for m in RE_INSULATION.find_iter(text) {
        push_unique(
            &mut found,
            SpecObservation::new(
                SpecKind::InsulationMaterial,
                m.as_str().to_uppercase(),
                "",
                0.9,
            ),
        );
    }

    for m in RE_CONDUCTOR_METAL.find_iter(text) {
        let value = match m.as_str().to_lowercase().as_str() {
            "aluminium" | "al" => "aluminum".to_string(),
            "cu" => "copper".to_string(),
            other => other.to_string(),
        };
        push_unique(
            &mut found,
            SpecObservation::new(SpecKind::ConductorMaterial, capitalize(&value), "", 0.85),
        );
    }

    for m in RE_ARMOR.find_iter(text) {
        push_unique(
            &mut found,
            SpecObservation::new(SpecKind::ArmorType, m.as_str().to_uppercase(), "", 0.8),
        );
    }

    found
}

/// Standards codes (IEC, IS, BS families plus literal CPRI). The matched
/// text is kept verbatim, including its casing.
fn extract_standards(text: &str) -> Vec<SpecObservation> {
    let mut found = Vec::new();

    for re in [&RE_STD_IEC, &RE_STD_IS, &RE_STD_BS, &RE_STD_CPRI] {
        for m in re.find_iter(text) {
            push_unique(
                &mut found,
                SpecObservation::new(SpecKind::Standard, m.as_str(), "", 0.95),
            );
        }
    }

    found
}

/// Cable type phrase; only the first occurrence counts, input casing kept.
fn extract_cable_type(text: &str) -> Vec<SpecObservation> {
    match RE_CABLE_TYPE.find(text) {
        Some(m) => vec![SpecObservation::new(SpecKind::CableType, m.as_str(), "", 0.85)],
        None => Vec::new(),
    }
}

/// Order quantity in meters. Rule variants are tried in priority order and
/// the first variant with any match wins; thousands separators stripped.
fn extract_quantity(text: &str) -> Vec<SpecObservation> {
    for re in [&RE_QTY_BARE, &RE_QTY_QUANTITY, &RE_QTY_SUPPLY] {
        if let Some(cap) = re.captures(text) {
            let value = cap[1].replace(',', "");
            return vec![SpecObservation::new(SpecKind::Quantity, value, "meters", 0.9)];
        }
    }
    Vec::new()
}

/// Core count from "N core", compact "NC", or cross-section "N x M" notation.
/// First rule with a match wins.
fn extract_cores(text: &str) -> Vec<SpecObservation> {
    for re in [&RE_CORES_WORD, &RE_CORES_COMPACT, &RE_CORES_CROSS] {
        if let Some(cap) = re.captures(text) {
            return vec![SpecObservation::new(
                SpecKind::Cores,
                cap[1].to_string(),
                "cores",
                0.85,
            )];
        }
    }
    Vec::new()
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Append an observation unless the same (kind, value) pair is present.
fn push_unique(list: &mut Vec<SpecObservation>, obs: SpecObservation) {
    if !list
        .iter()
        .any(|o| o.kind == obs.kind && o.value == obs.value)
    {
        list.push(obs);
    }
}

/// Uppercase the first character, leaving the rest untouched.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO_TEXT: &str =
        "Supply of 5000 meters of 11kV XLPE cables with 3 core aluminum conductor, size 240 sq.mm";

    fn find_kind(observations: &[SpecObservation], kind: SpecKind) -> Option<&SpecObservation> {
        observations.iter().find(|o| o.kind == kind)
    }

    #[test]
    fn extracts_full_cable_spec_from_tender_text() {
        let observations = extract_specifications(SCENARIO_TEXT);

        let voltage = find_kind(&observations, SpecKind::Voltage).unwrap();
        assert_eq!(voltage.value, "11");
        assert_eq!(voltage.unit, "kV");
        assert_eq!(voltage.confidence, 0.9);

        let size = find_kind(&observations, SpecKind::ConductorSize).unwrap();
        assert_eq!(size.value, "240");
        assert_eq!(size.unit, "sq.mm");

        let material = find_kind(&observations, SpecKind::ConductorMaterial).unwrap();
        assert_eq!(material.value, "Aluminum");

        let insulation = find_kind(&observations, SpecKind::InsulationMaterial).unwrap();
        assert_eq!(insulation.value, "XLPE");

        let quantity = find_kind(&observations, SpecKind::Quantity).unwrap();
        assert_eq!(quantity.value, "5000");
        assert_eq!(quantity.unit, "meters");

        let cores = find_kind(&observations, SpecKind::Cores).unwrap();
        assert_eq!(cores.value, "3");

        assert_eq!(observations.len(), 6);
    }

    #[test]
    fn voltage_values_deduplicated_across_patterns() {
        let observations = extract_specifications("11kV cable rated 11 kV, voltage 11kV");
        let voltages: Vec<_> = observations
            .iter()
            .filter(|o| o.kind == SpecKind::Voltage)
            .collect();
        assert_eq!(voltages.len(), 1);
        assert_eq!(voltages[0].value, "11");
    }

    #[test]
    fn fractional_voltage_keeps_decimal_form() {
        let observations = extract_specifications("1.1 kV PVC cable");
        let voltage = find_kind(&observations, SpecKind::Voltage).unwrap();
        assert_eq!(voltage.value, "1.1");
    }

    #[test]
    fn zero_voltage_reading_skipped() {
        let observations = extract_specifications("0 kV reference");
        assert!(find_kind(&observations, SpecKind::Voltage).is_none());
    }

    #[test]
    fn conductor_material_synonyms_normalized() {
        let observations = extract_specifications("Cu screen over aluminium conductor");
        let materials: Vec<_> = observations
            .iter()
            .filter(|o| o.kind == SpecKind::ConductorMaterial)
            .collect();
        assert_eq!(materials.len(), 2);
        assert_eq!(materials[0].value, "Copper");
        assert_eq!(materials[1].value, "Aluminum");
    }

    #[test]
    fn armor_tokens_reported_uppercase() {
        let observations = extract_specifications("SWA armored construction");
        let armor: Vec<_> = observations
            .iter()
            .filter(|o| o.kind == SpecKind::ArmorType)
            .collect();
        assert_eq!(armor.len(), 2);
        assert_eq!(armor[0].value, "SWA");
        assert_eq!(armor[1].value, "ARMORED");
        assert_eq!(armor[0].confidence, 0.8);
    }

    #[test]
    fn standards_keep_matched_text_and_dedupe() {
        let observations =
            extract_specifications("Conforming to IEC 60502-2, IS 7098 and IEC 60502-2, CPRI");
        let standards: Vec<_> = observations
            .iter()
            .filter(|o| o.kind == SpecKind::Standard)
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(standards, vec!["IEC 60502-2", "IS 7098", "CPRI"]);
    }

    #[test]
    fn first_cable_type_match_wins() {
        let observations = extract_specifications("power cable and control cable runs");
        let cable: Vec<_> = observations
            .iter()
            .filter(|o| o.kind == SpecKind::CableType)
            .collect();
        assert_eq!(cable.len(), 1);
        assert_eq!(cable[0].value, "power cable");
    }

    #[test]
    fn quantity_strips_thousands_separator() {
        let observations = extract_specifications("required length 10,000 meters");
        let quantity = find_kind(&observations, SpecKind::Quantity).unwrap();
        assert_eq!(quantity.value, "10000");
    }

    #[test]
    fn quantity_cue_pattern_used_when_no_unit_present() {
        // No bare "<n> meters" token; the "quantity" cue variant picks it up.
        let observations = extract_specifications("quantity: 750 drums");
        let quantity = find_kind(&observations, SpecKind::Quantity).unwrap();
        assert_eq!(quantity.value, "750");
        assert_eq!(quantity.unit, "meters");
    }

    #[test]
    fn cores_fall_back_to_compact_notation() {
        let observations = extract_specifications("4C armoured feeder");
        let cores = find_kind(&observations, SpecKind::Cores).unwrap();
        assert_eq!(cores.value, "4");
    }

    #[test]
    fn cross_section_notation_yields_cores() {
        let observations = extract_specifications("size 3 x 185 sq.mm");
        let cores = find_kind(&observations, SpecKind::Cores).unwrap();
        assert_eq!(cores.value, "3");
    }

    #[test]
    fn unrecognized_text_extracts_nothing() {
        assert!(extract_specifications("Please advise").is_empty());
        assert!(extract_specifications("").is_empty());
    }

    #[test]
    fn extraction_is_idempotent() {
        let first = extract_specifications(SCENARIO_TEXT);
        let second = extract_specifications(SCENARIO_TEXT);
        assert_eq!(first, second);
    }

    #[test]
    fn summary_projects_one_slot_per_kind() {
        let observations = extract_specifications(
            "Supply 5000 meters of 11kV XLPE power cable, 3x240 sq.mm aluminum, IEC 60502-2 and IS 7098",
        );
        let summary = summarize(&observations);

        assert_eq!(summary.voltage_rating.as_deref(), Some("11 kV"));
        assert_eq!(summary.conductor_size.as_deref(), Some("240 sq.mm"));
        assert_eq!(summary.conductor_material.as_deref(), Some("Aluminum"));
        assert_eq!(summary.insulation_type.as_deref(), Some("XLPE"));
        assert_eq!(summary.cable_type.as_deref(), Some("power cable"));
        assert_eq!(summary.quantity.as_deref(), Some("5000 meters"));
        assert_eq!(summary.cores.as_deref(), Some("3"));
        assert_eq!(summary.standards, vec!["IEC 60502-2", "IS 7098"]);
    }

    #[test]
    fn validation_requires_voltage_and_conductor() {
        let report = validate(&[]);
        assert!(!report.is_valid);
        assert_eq!(
            report.missing_fields,
            vec!["Voltage rating", "Conductor specification"]
        );
        assert_eq!(report.warnings, vec!["Insulation material not specified"]);
    }

    #[test]
    fn validation_warns_on_missing_insulation() {
        let observations = vec![
            SpecObservation::new(SpecKind::Voltage, "11", "kV", 0.9),
            SpecObservation::new(SpecKind::ConductorMaterial, "Copper", "", 0.85),
        ];
        let report = validate(&observations);
        assert!(report.is_valid);
        assert!(report.missing_fields.is_empty());
        assert_eq!(report.warnings, vec!["Insulation material not specified"]);
    }
}
