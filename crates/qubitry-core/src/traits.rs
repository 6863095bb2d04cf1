//! Trait seams for the Qubitry workbench.
//!
//! - `InteractionChecker` — turns a medication list and lifestyle into alerts
//! - `IntakeValidator`    — accepts or rejects a manual-entry form
//!
//! The workbench owns one of each and calls them in a fixed order. Concrete
//! implementations live in `qubitry-interactions` and `qubitry-intake`.

use qubitry_contracts::{
    alert::InteractionAlert,
    error::QubitryResult,
    patient::Lifestyle,
    validate::{IntakeSchema, ValidationReport},
};

/// Detects known drug-pair and drug-lifestyle combinations.
///
/// Implementations must be deterministic and infallible: absent or empty
/// input simply produces no alerts.
pub trait InteractionChecker: Send + Sync {
    /// Return every alert that applies to `medications` under `lifestyle`,
    /// in rule-table order. No deduplication is performed.
    fn check(&self, medications: &[String], lifestyle: &Lifestyle) -> Vec<InteractionAlert>;
}

/// Validates a manual-entry form before it becomes a patient.
pub trait IntakeValidator: Send + Sync {
    /// Check `form` (the JSON rendering of a `PatientForm`) against `schema`.
    ///
    /// Return a report with `passed = true` when every rule passes, or
    /// `passed = false` with every failure collected. `Err` is reserved for
    /// problems with the validator itself, not with the form.
    fn validate(
        &self,
        form: &serde_json::Value,
        schema: &IntakeSchema,
    ) -> QubitryResult<ValidationReport>;
}
