//! Interaction alerts produced by the checker.
//!
//! Alerts are derived on every view and never stored.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a detected combination is a concern or a known synergy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertKind {
    #[default]
    Harmful,
    Beneficial,
}

impl AlertKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::Harmful => "harmful",
            AlertKind::Beneficial => "beneficial",
        }
    }
}

/// A detected drug-pair or drug-lifestyle combination.
///
/// For lifestyle alerts `drug_b` names the exposure ("Alcohol", "Smoking").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionAlert {
    pub drug_a: String,
    pub drug_b: String,
    pub description: String,
    pub kind: AlertKind,
}

impl fmt::Display for InteractionAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {} → {}", self.drug_a, self.drug_b, self.description)
    }
}
