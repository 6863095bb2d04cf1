//! Interaction table types and configuration schema.
//!
//! An `InteractionTable` is deserialized from TOML and holds three ordered
//! lists: harmful drug pairs, beneficial drug pairs, and lifestyle rules.
//! The checker walks them in that order and emits one alert per match.

use serde::{Deserialize, Serialize};

use qubitry_contracts::{alert::AlertKind, patient::LifestyleFactor};

/// Two drugs that interact, and what the interaction means.
///
/// Example in TOML:
/// ```toml
/// [[harmful]]
/// drugs = ["Carboplatin", "Ifosfamide"]
/// description = "Severe kidney toxicity (risk of renal damage)"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugPair {
    /// The two drug names, compared against normalized medication names.
    /// Alerts report them in this order.
    pub drugs: [String; 2],
    pub description: String,
}

impl DrugPair {
    /// Return true if both drugs appear in `medications`.
    pub fn matches(&self, medications: &[&str]) -> bool {
        self.drugs
            .iter()
            .all(|drug| medications.contains(&drug.as_str()))
    }
}

/// A drug whose risk depends on a lifestyle exposure.
///
/// The rule fires when the patient takes `drug` and the `factor` ratio is
/// strictly greater than `threshold`.
///
/// Example in TOML:
/// ```toml
/// [[lifestyle]]
/// id = "methotrexate-alcohol"
/// factor = "alcohol"
/// threshold = 0.3
/// drug = "Methotrexate"
/// counterpart = "Alcohol"
/// description = "Liver toxicity risk increased significantly"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifestyleRule {
    /// Stable identifier used in log lines.
    pub id: String,
    pub factor: LifestyleFactor,
    pub threshold: f64,
    pub drug: String,
    /// Name reported as the second member of the alert (e.g. "Alcohol").
    pub counterpart: String,
    pub description: String,
    #[serde(default)]
    pub kind: AlertKind,
}

/// The top-level structure deserialized from an interaction table file.
///
/// Any of the three lists may be omitted; an empty table never alerts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionTable {
    #[serde(default)]
    pub harmful: Vec<DrugPair>,
    #[serde(default)]
    pub beneficial: Vec<DrugPair>,
    #[serde(default)]
    pub lifestyle: Vec<LifestyleRule>,
}
