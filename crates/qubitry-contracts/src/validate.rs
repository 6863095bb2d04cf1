//! Intake validation schema and report types.
//!
//! Before a manual-entry form becomes a `Patient`, the intake validator runs
//! its JSON form against an `IntakeSchema`. Only a passing
//! `ValidationReport` lets the record through.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything the validator checks a form against.
///
/// Combines a JSON Schema document for structure with declarative rules for
/// the presence and membership checks JSON Schema expresses poorly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeSchema {
    /// Unique identifier for this schema (e.g. "patient-intake-v1").
    pub schema_id: String,
    /// A JSON Schema document used for structural validation.
    pub json_schema: Value,
    /// Additional rules evaluated after structural validation.
    pub rules: Vec<ValidationRule>,
}

/// A single validation rule applied to a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Unique identifier for this rule, referenced in failure reports.
    pub rule_id: String,
    /// Human-readable description shown to the user on failure.
    pub description: String,
    pub rule_type: ValidationRuleType,
}

/// The kinds of checks the intake validator supports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ValidationRuleType {
    /// The field at `field_path` must be present and non-null.
    RequiredField {
        /// Dotted path, e.g. "lifestyle.smoking".
        field_path: String,
    },

    /// The field must be a string with non-whitespace content or a
    /// non-empty array.
    NonEmpty { field_path: String },

    /// The field must equal one of `allowed`.
    AllowedValues {
        field_path: String,
        allowed: Vec<Value>,
    },

    /// Delegate to a named function registered on the validator.
    Custom { function_name: String },
}

/// The result of running an `IntakeSchema` against a form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True only if every rule passed.
    pub passed: bool,
    /// All failures collected during this run. Empty on pass.
    pub failures: Vec<ValidationFailure>,
}

impl ValidationReport {
    /// Join every failure into one `[rule] message; …` line.
    pub fn summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("[{}] {}", f.rule_id, f.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// The `rule_id` of the rule that failed.
    pub rule_id: String,
    pub message: String,
}
