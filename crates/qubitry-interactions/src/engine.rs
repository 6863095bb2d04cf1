//! TOML-driven interaction checker.
//!
//! `TomlInteractionChecker` loads an `InteractionTable` from a TOML string or
//! file and implements the `InteractionChecker` trait from qubitry-core.
//!
//! Evaluation algorithm:
//!
//! 1. Normalize every medication name (`normalize`).
//! 2. For each harmful pair, in declaration order, emit an alert if both
//!    drugs are present.
//! 3. The same for each beneficial pair.
//! 4. For each lifestyle rule, emit an alert if the drug is present and the
//!    lifestyle ratio is strictly above the threshold.
//!
//! Every match produces its own alert; nothing is deduplicated.

use std::path::Path;

use tracing::debug;

use qubitry_contracts::{
    alert::{AlertKind, InteractionAlert},
    error::{QubitryError, QubitryResult},
    patient::Lifestyle,
};
use qubitry_core::traits::InteractionChecker;

use crate::table::{DrugPair, InteractionTable};

/// Separator between a drug name and its catalog description.
pub const DESCRIPTION_SEPARATOR: char = '–';

/// Strip a catalog description from a medication name.
///
/// Everything from the first en dash onward is dropped and the remainder is
/// trimmed: `"Carboplatin – Platinum-based chemotherapy"` → `"Carboplatin"`.
pub fn normalize(name: &str) -> &str {
    name.split(DESCRIPTION_SEPARATOR)
        .next()
        .unwrap_or(name)
        .trim()
}

/// An `InteractionChecker` backed by a TOML interaction table.
///
/// ```rust,ignore
/// use qubitry_interactions::TomlInteractionChecker;
///
/// let checker = TomlInteractionChecker::from_file(Path::new("tables/interactions.toml"))?;
/// ```
#[derive(Debug, Clone)]
pub struct TomlInteractionChecker {
    table: InteractionTable,
}

impl TomlInteractionChecker {
    /// Build a checker directly from an already-parsed table.
    pub fn new(table: InteractionTable) -> Self {
        Self { table }
    }

    /// Parse `s` as TOML and build a checker.
    ///
    /// Returns `QubitryError::ConfigError` if the TOML is malformed or does
    /// not match the `InteractionTable` schema.
    pub fn from_toml_str(s: &str) -> QubitryResult<Self> {
        let table: InteractionTable = toml::from_str(s).map_err(|e| QubitryError::ConfigError {
            reason: format!("failed to parse interaction table TOML: {}", e),
        })?;
        Ok(Self::new(table))
    }

    /// Read the file at `path` and parse it as an interaction table.
    pub fn from_file(path: &Path) -> QubitryResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| QubitryError::ConfigError {
            reason: format!("failed to read interaction table '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn table(&self) -> &InteractionTable {
        &self.table
    }
}

fn pair_alert(pair: &DrugPair, kind: AlertKind) -> InteractionAlert {
    InteractionAlert {
        drug_a: pair.drugs[0].clone(),
        drug_b: pair.drugs[1].clone(),
        description: pair.description.clone(),
        kind,
    }
}

impl InteractionChecker for TomlInteractionChecker {
    fn check(&self, medications: &[String], lifestyle: &Lifestyle) -> Vec<InteractionAlert> {
        let clean: Vec<&str> = medications.iter().map(|m| normalize(m)).collect();
        let mut alerts = Vec::new();

        let pair_tables = [
            (&self.table.harmful, AlertKind::Harmful),
            (&self.table.beneficial, AlertKind::Beneficial),
        ];
        for (pairs, kind) in pair_tables {
            for pair in pairs.iter().filter(|p| p.matches(&clean)) {
                debug!(
                    drug_a = %pair.drugs[0],
                    drug_b = %pair.drugs[1],
                    kind = kind.as_str(),
                    "drug pair matched"
                );
                alerts.push(pair_alert(pair, kind));
            }
        }

        for rule in &self.table.lifestyle {
            let ratio = lifestyle.ratio(rule.factor);
            if ratio > rule.threshold && clean.contains(&rule.drug.as_str()) {
                debug!(
                    rule_id = %rule.id,
                    factor = rule.factor.as_str(),
                    ratio,
                    "lifestyle rule matched"
                );
                alerts.push(InteractionAlert {
                    drug_a: rule.drug.clone(),
                    drug_b: rule.counterpart.clone(),
                    description: rule.description.clone(),
                    kind: rule.kind,
                });
            }
        }

        alerts
    }
}
