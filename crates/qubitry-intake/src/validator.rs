//! Schema-based intake validator for manual-entry patient forms.
//!
//! `FormValidator` implements the `IntakeValidator` trait from `qubitry-core`.
//! Validation runs in two phases:
//!
//! 1. **Structural** — the form is validated against
//!    `IntakeSchema::json_schema` using the `jsonschema` crate.
//! 2. **Rules** — each `ValidationRule` in `IntakeSchema::rules` is evaluated
//!    in order. All failures are collected before returning so the user sees
//!    every missing field at once.
//!
//! Custom rules delegate to named functions registered via `register_rule`;
//! catalog knowledge lives with whoever registers them, not here.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use qubitry_contracts::{
    error::QubitryResult,
    validate::{IntakeSchema, ValidationFailure, ValidationReport, ValidationRuleType},
};
use qubitry_core::traits::IntakeValidator;

/// A caller-supplied validation function.
///
/// Receives the whole form. Returns `Some(message)` when the check fails,
/// or `None` on success.
pub type CustomRuleFn = Box<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// The intake validator.
pub struct FormValidator {
    custom_rules: HashMap<String, CustomRuleFn>,
}

impl FormValidator {
    /// Create a validator with no custom rules registered.
    pub fn new() -> Self {
        Self {
            custom_rules: HashMap::new(),
        }
    }

    /// Register a custom validation function under `name`.
    ///
    /// The name must match the `function_name` of a
    /// `ValidationRuleType::Custom` rule. Registering the same name twice
    /// replaces the previous function.
    pub fn register_rule(&mut self, name: impl Into<String>, f: CustomRuleFn) {
        self.custom_rules.insert(name.into(), f);
    }

    /// Resolve a dot-notation field path (e.g. `"lifestyle.smoking"`).
    /// Returns `None` when any segment is missing or the value is `null`.
    fn resolve_path<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
        let mut current = value;
        for segment in path.split('.') {
            match current.get(segment) {
                Some(v) if !v.is_null() => current = v,
                _ => return None,
            }
        }
        Some(current)
    }

    fn is_blank(value: &Value) -> bool {
        match value {
            Value::String(s) => s.trim().is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            Value::Null => true,
            Value::Bool(_) | Value::Number(_) => false,
        }
    }
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeValidator for FormValidator {
    fn validate(&self, form: &Value, schema: &IntakeSchema) -> QubitryResult<ValidationReport> {
        let mut failures: Vec<ValidationFailure> = Vec::new();

        // ── Phase 1: JSON Schema structural validation ────────────────────────
        //
        // A null json_schema means no structural constraint.
        if !schema.json_schema.is_null() {
            match jsonschema::validator_for(&schema.json_schema) {
                Ok(validator) => {
                    for error in validator.iter_errors(form) {
                        let message = format!(
                            "JSON Schema violation at {}: {}",
                            error.instance_path, error
                        );
                        warn!(schema_id = %schema.schema_id, %message, "structural validation failure");
                        failures.push(ValidationFailure {
                            rule_id: "json-schema".to_string(),
                            message,
                        });
                    }
                }
                Err(e) => {
                    // A broken schema document rejects every form rather than
                    // letting unchecked records through.
                    let message = format!("invalid JSON Schema document: {e}");
                    warn!(schema_id = %schema.schema_id, %message, "schema compilation failure");
                    failures.push(ValidationFailure {
                        rule_id: "json-schema".to_string(),
                        message,
                    });
                }
            }
        }

        // ── Phase 2: Rule evaluation ──────────────────────────────────────────
        for rule in &schema.rules {
            debug!(
                rule_id = %rule.rule_id,
                description = %rule.description,
                "evaluating intake rule"
            );

            let failure_msg: Option<String> = match &rule.rule_type {
                ValidationRuleType::RequiredField { field_path } => {
                    if Self::resolve_path(form, field_path).is_none() {
                        Some(format!("required field '{field_path}' is missing or null"))
                    } else {
                        None
                    }
                }

                ValidationRuleType::NonEmpty { field_path } => {
                    match Self::resolve_path(form, field_path) {
                        Some(v) if !Self::is_blank(v) => None,
                        _ => Some(format!("field '{field_path}' is empty")),
                    }
                }

                ValidationRuleType::AllowedValues { field_path, allowed } => {
                    match Self::resolve_path(form, field_path) {
                        None => Some(format!(
                            "field '{field_path}' is missing; cannot check allowed values"
                        )),
                        Some(actual) if allowed.contains(actual) => None,
                        Some(actual) => Some(format!(
                            "field '{field_path}' has value {actual} which is not in the allowed set"
                        )),
                    }
                }

                // An unregistered name is itself a failure.
                ValidationRuleType::Custom { function_name } => {
                    match self.custom_rules.get(function_name.as_str()) {
                        Some(f) => f(form),
                        None => Some(format!(
                            "no custom rule registered for function name '{function_name}'"
                        )),
                    }
                }
            };

            if let Some(message) = failure_msg {
                warn!(rule_id = %rule.rule_id, %message, "intake rule failed");
                failures.push(ValidationFailure {
                    rule_id: rule.rule_id.clone(),
                    message,
                });
            }
        }

        let passed = failures.is_empty();
        debug!(
            schema_id = %schema.schema_id,
            passed,
            failure_count = failures.len(),
            "intake validation complete"
        );

        Ok(ValidationReport { passed, failures })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
