use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Observation types
// ---------------------------------------------------------------------------

/// The kind of technical attribute recognized in tender text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecKind {
    Voltage,
    ConductorSize,
    ConductorMaterial,
    InsulationMaterial,
    ArmorType,
    Standard,
    CableType,
    Quantity,
    Cores,
}

impl fmt::Display for SpecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecKind::Voltage => write!(f, "Voltage"),
            SpecKind::ConductorSize => write!(f, "Conductor Size"),
            SpecKind::ConductorMaterial => write!(f, "Conductor Material"),
            SpecKind::InsulationMaterial => write!(f, "Insulation Material"),
            SpecKind::ArmorType => write!(f, "Armor Type"),
            SpecKind::Standard => write!(f, "Standard"),
            SpecKind::CableType => write!(f, "Cable Type"),
            SpecKind::Quantity => write!(f, "Quantity"),
            SpecKind::Cores => write!(f, "Cores"),
        }
    }
}

/// One recognized attribute extracted from tender text.
///
/// Immutable value object; created fresh per extraction call. Within one
/// extraction result no two observations share the same `(kind, value)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecObservation {
    pub kind: SpecKind,
    /// Normalized representation (numeric string or canonical token).
    pub value: String,
    /// Unit label, possibly empty ("kV", "sq.mm", "meters", "cores", "").
    pub unit: String,
    /// Fixed per extraction rule, not learned. Range [0, 1].
    pub confidence: f64,
}

impl SpecObservation {
    pub fn new(kind: SpecKind, value: impl Into<String>, unit: &str, confidence: f64) -> Self {
        Self {
            kind,
            value: value.into(),
            unit: unit.to_string(),
            confidence,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary and validation
// ---------------------------------------------------------------------------

/// Flat projection of an observation list, one slot per kind.
///
/// Later observations of the same kind overwrite earlier ones; standards
/// accumulate instead. Used for display and for repository persistence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conductor_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conductor_material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insulation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cable_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cores: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub standards: Vec<String>,
}

/// Outcome of checking an observation list for quoting completeness.
///
/// Advisory only: an invalid report does not block matching, it surfaces
/// a warning to the submitter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub missing_fields: Vec<String>,
    pub warnings: Vec<String>,
}
