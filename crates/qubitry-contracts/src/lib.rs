//! # qubitry-contracts
//!
//! Shared types for the Qubitry oncology workbench.
//!
//! Every crate in the workspace imports from here. Apart from the two
//! `Patient` constructors, no behavior lives in this crate — only data
//! definitions and error types.

pub mod alert;
pub mod chart;
pub mod error;
pub mod patient;
pub mod session;
pub mod validate;

#[cfg(test)]
mod tests {
    use super::*;
    use alert::{AlertKind, InteractionAlert};
    use error::QubitryError;
    use patient::{
        CancerType, ImportedRecord, Lifestyle, LifestyleFactor, Patient, PatientForm, GENE_MARKERS,
    };
    use session::{Session, SessionId};
    use validate::{ValidationFailure, ValidationReport};

    // ── CancerType ───────────────────────────────────────────────────────────

    #[test]
    fn cancer_type_labels_round_trip() {
        for cancer in CancerType::ALL {
            assert_eq!(CancerType::from_label(cancer.as_str()), Some(cancer));
        }
        assert_eq!(CancerType::from_label("Kidney Cancer"), None);
    }

    #[test]
    fn cancer_type_serializes_as_display_label() {
        let json = serde_json::to_string(&CancerType::Pancreatic).unwrap();
        assert_eq!(json, "\"Pancreatic Cancer\"");
    }

    // ── Lifestyle ────────────────────────────────────────────────────────────

    #[test]
    fn lifestyle_from_percentages_divides_by_hundred() {
        let lifestyle = Lifestyle::from_percentages(10, 5, 0);
        assert!((lifestyle.smoking - 0.10).abs() < 1e-9);
        assert!((lifestyle.alcohol - 0.05).abs() < 1e-9);
        assert_eq!(lifestyle.obesity, 0.0);
        assert!((lifestyle.ratio(LifestyleFactor::Alcohol) - 0.05).abs() < 1e-9);
    }

    #[test]
    fn default_lifestyle_is_zero() {
        assert_eq!(
            Lifestyle::default(),
            Lifestyle { smoking: 0.0, alcohol: 0.0, obesity: 0.0 }
        );
    }

    // ── Patient construction ─────────────────────────────────────────────────

    #[test]
    fn patient_from_form_attaches_owner_and_fixed_genes() {
        let form = PatientForm {
            name: "  Ada  ".to_string(),
            age: 61,
            condition: "Breast Cancer".to_string(),
            medications: vec!["Doxorubicin – Anthracycline".to_string()],
            smoking_pct: 40,
            alcohol_pct: 0,
            obesity_pct: 25,
        };

        let patient = Patient::from_form(&form, "dr-lee");

        assert_eq!(patient.name, "Ada");
        assert_eq!(patient.age, 61);
        assert_eq!(patient.owner, "dr-lee");
        assert_eq!(patient.genes, GENE_MARKERS.to_vec());
        assert!((patient.lifestyle.smoking - 0.4).abs() < 1e-9);
        assert!((patient.lifestyle.obesity - 0.25).abs() < 1e-9);
    }

    #[test]
    fn patient_from_import_has_zero_lifestyle() {
        let record = ImportedRecord {
            name: "Ben".to_string(),
            age: 47,
            condition: "Leukemia".to_string(),
            medications: vec!["Vincristine".to_string(), "Prednisone".to_string()],
        };

        let patient = Patient::from_import(record, "dr-lee");

        assert_eq!(patient.lifestyle, Lifestyle::default());
        assert_eq!(patient.medications.len(), 2);
        assert_eq!(patient.genes.len(), 4);
    }

    #[test]
    fn patient_form_defaults_match_entry_screen() {
        let form = PatientForm::default();
        assert_eq!(form.age, 50);
        assert_eq!(form.condition, "Lung Cancer");
        assert_eq!((form.smoking_pct, form.alcohol_pct, form.obesity_pct), (10, 5, 0));
        assert!(form.medications.is_empty());
    }

    // ── Alerts ───────────────────────────────────────────────────────────────

    #[test]
    fn alert_display_uses_arrow_format() {
        let alert = InteractionAlert {
            drug_a: "Carboplatin".to_string(),
            drug_b: "Ifosfamide".to_string(),
            description: "Severe kidney toxicity".to_string(),
            kind: AlertKind::Harmful,
        };
        assert_eq!(alert.to_string(), "Carboplatin + Ifosfamide → Severe kidney toxicity");
    }

    #[test]
    fn alert_kind_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&AlertKind::Beneficial).unwrap(), "\"beneficial\"");
        assert_eq!(AlertKind::default(), AlertKind::Harmful);
    }

    // ── Sessions ─────────────────────────────────────────────────────────────

    #[test]
    fn session_ids_are_unique() {
        let unique: std::collections::HashSet<String> =
            (0..100).map(|_| SessionId::new().0.to_string()).collect();
        assert_eq!(unique.len(), 100);
    }

    #[test]
    fn session_carries_username() {
        let session = Session::new("dr-lee");
        assert_eq!(session.username, "dr-lee");
    }

    // ── Validation report ────────────────────────────────────────────────────

    #[test]
    fn report_summary_joins_failures() {
        let report = ValidationReport {
            passed: false,
            failures: vec![
                ValidationFailure {
                    rule_id: "name".to_string(),
                    message: "name is empty".to_string(),
                },
                ValidationFailure {
                    rule_id: "meds".to_string(),
                    message: "no medications".to_string(),
                },
            ],
        };
        assert_eq!(report.summary(), "[name] name is empty; [meds] no medications");
    }

    // ── QubitryError ─────────────────────────────────────────────────────────

    #[test]
    fn form_problems_are_warnings() {
        assert!(QubitryError::MissingCredentials.is_warning());
        assert!(QubitryError::PasswordMismatch.is_warning());
        assert!(QubitryError::UsernameTaken { username: "a".to_string() }.is_warning());
        assert!(QubitryError::IncompleteRecord { reason: "x".to_string() }.is_warning());

        assert!(!QubitryError::InvalidCredentials.is_warning());
        assert!(!QubitryError::MalformedRow { row: 2, reason: "x".to_string() }.is_warning());
    }

    #[test]
    fn error_malformed_row_display() {
        let err = QubitryError::MalformedRow {
            row: 3,
            reason: "missing column 'meds'".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("row 3"));
        assert!(msg.contains("missing column 'meds'"));
    }

    #[test]
    fn error_username_taken_display() {
        let err = QubitryError::UsernameTaken { username: "dr-lee".to_string() };
        assert_eq!(err.to_string(), "username 'dr-lee' already exists");
    }

    #[test]
    fn error_config_error_display() {
        let err = QubitryError::ConfigError { reason: "bad table".to_string() };
        assert!(err.to_string().contains("configuration error"));
    }
}
