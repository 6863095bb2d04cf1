//! Assembles the oncology workbench: embedded interaction tables, the
//! manual-entry schema and the catalog check.

use std::path::Path;

use serde_json::{json, Value};
use tracing::info;

use qubitry_contracts::{
    error::QubitryResult,
    patient::CancerType,
    validate::{IntakeSchema, ValidationRule, ValidationRuleType},
};
use qubitry_core::Workbench;
use qubitry_intake::FormValidator;
use qubitry_interactions::TomlInteractionChecker;

use crate::catalog;

/// The default interaction tables, compiled into the binary.
pub const DEFAULT_TABLES: &str = include_str!("../tables/interactions.toml");

/// Name under which the catalog check is registered on the validator.
pub const CATALOG_RULE: &str = "catalog-medications";

/// The schema manual-entry forms are checked against.
pub fn intake_schema() -> IntakeSchema {
    let conditions: Vec<Value> = CancerType::ALL
        .iter()
        .map(|c| Value::String(c.as_str().to_string()))
        .collect();

    IntakeSchema {
        schema_id: "patient-intake-v1".to_string(),
        json_schema: json!({
            "type": "object",
            "required": [
                "name", "age", "condition", "medications",
                "smoking_pct", "alcohol_pct", "obesity_pct"
            ],
            "properties": {
                "name":        { "type": "string" },
                "age":         { "type": "integer", "minimum": 0, "maximum": 120 },
                "condition":   { "type": "string" },
                "medications": { "type": "array", "items": { "type": "string" } },
                "smoking_pct": { "type": "integer", "minimum": 0, "maximum": 100 },
                "alcohol_pct": { "type": "integer", "minimum": 0, "maximum": 100 },
                "obesity_pct": { "type": "integer", "minimum": 0, "maximum": 100 }
            }
        }),
        rules: vec![
            ValidationRule {
                rule_id: "name-present".to_string(),
                description: "Patient name must not be blank".to_string(),
                rule_type: ValidationRuleType::NonEmpty {
                    field_path: "name".to_string(),
                },
            },
            ValidationRule {
                rule_id: "condition-known".to_string(),
                description: "Condition must be one of the listed cancer types".to_string(),
                rule_type: ValidationRuleType::AllowedValues {
                    field_path: "condition".to_string(),
                    allowed: conditions,
                },
            },
            ValidationRule {
                rule_id: "medications-present".to_string(),
                description: "At least one medication must be selected".to_string(),
                rule_type: ValidationRuleType::NonEmpty {
                    field_path: "medications".to_string(),
                },
            },
            ValidationRule {
                rule_id: "medications-in-catalog".to_string(),
                description: "Every medication must come from the catalog".to_string(),
                rule_type: ValidationRuleType::Custom {
                    function_name: CATALOG_RULE.to_string(),
                },
            },
        ],
    }
}

/// A validator with the catalog check registered.
pub fn form_validator() -> FormValidator {
    let mut validator = FormValidator::new();
    validator.register_rule(
        CATALOG_RULE,
        Box::new(|form| {
            let meds = form.get("medications")?.as_array()?;
            meds.iter()
                .find(|m| !m.as_str().is_some_and(catalog::contains))
                .map(|m| format!("medication {m} is not in the catalog"))
        }),
    );
    validator
}

/// The checker built from the embedded tables.
pub fn default_checker() -> QubitryResult<TomlInteractionChecker> {
    TomlInteractionChecker::from_toml_str(DEFAULT_TABLES)
}

/// A workbench using the embedded interaction tables.
pub fn workbench() -> QubitryResult<Workbench> {
    Ok(assemble(default_checker()?))
}

/// A workbench using interaction tables loaded from `path`.
pub fn workbench_with_tables(path: &Path) -> QubitryResult<Workbench> {
    let checker = TomlInteractionChecker::from_file(path)?;
    info!(path = %path.display(), "loaded interaction tables");
    Ok(assemble(checker))
}

fn assemble(checker: TomlInteractionChecker) -> Workbench {
    Workbench::new(Box::new(checker), Box::new(form_validator()), intake_schema())
}
