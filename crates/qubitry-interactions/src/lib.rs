//! # qubitry-interactions
//!
//! A TOML-driven drug-interaction checker for the Qubitry workbench.
//!
//! ## Overview
//!
//! This crate provides [`TomlInteractionChecker`], which implements the
//! [`InteractionChecker`](qubitry_core::traits::InteractionChecker) trait.
//! Harmful pairs, beneficial pairs, and lifestyle rules are declared in a
//! TOML table and checked in that order. The check is a static lookup: it
//! cannot fail, and empty input produces no alerts.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use qubitry_interactions::TomlInteractionChecker;
//!
//! let checker = TomlInteractionChecker::from_file(Path::new("tables/interactions.toml"))?;
//! // Pass `checker` to `qubitry_core::Workbench::new(...)`.
//! ```
//!
//! ## Name matching
//!
//! Medication names are compared after `normalize`, which drops a catalog
//! description following an en dash. Matching is exact and case-sensitive.

pub mod engine;
pub mod table;

pub use engine::{normalize, TomlInteractionChecker};
pub use table::{DrugPair, InteractionTable, LifestyleRule};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::Write;

    use qubitry_contracts::{
        alert::AlertKind,
        error::QubitryError,
        patient::{Lifestyle, LifestyleFactor},
    };
    use qubitry_core::traits::InteractionChecker;

    use crate::{normalize, TomlInteractionChecker};

    // ── Helpers ───────────────────────────────────────────────────────────────

    const TABLE: &str = r#"
        [[harmful]]
        drugs = ["Carboplatin", "Ifosfamide"]
        description = "Severe kidney toxicity (risk of renal damage)"

        [[harmful]]
        drugs = ["Fluorouracil", "Leucovorin"]
        description = "Excessive toxicity when overdosed"

        [[harmful]]
        drugs = ["Ifosfamide", "Cisplatin"]
        description = "Increased neurotoxicity and kidney damage"

        [[beneficial]]
        drugs = ["Carboplatin", "Paclitaxel"]
        description = "Standard combo in ovarian & lung cancer (synergistic)"

        [[beneficial]]
        drugs = ["Fluorouracil", "Leucovorin"]
        description = "Boosted efficacy in colorectal cancer"

        [[lifestyle]]
        id = "methotrexate-alcohol"
        factor = "alcohol"
        threshold = 0.3
        drug = "Methotrexate"
        counterpart = "Alcohol"
        description = "Liver toxicity risk increased significantly"

        [[lifestyle]]
        id = "erlotinib-smoking"
        factor = "smoking"
        threshold = 0.3
        drug = "Erlotinib"
        counterpart = "Smoking"
        description = "Smoking reduces Erlotinib effectiveness in lung cancer"
    "#;

    fn checker() -> TomlInteractionChecker {
        TomlInteractionChecker::from_toml_str(TABLE).unwrap()
    }

    fn meds(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn lifestyle(smoking: f64, alcohol: f64) -> Lifestyle {
        Lifestyle { smoking, alcohol, obesity: 0.0 }
    }

    // ── 1. normalization ──────────────────────────────────────────────────────

    #[test]
    fn test_normalize_strips_description() {
        assert_eq!(
            normalize("Carboplatin – Platinum-based chemotherapy (ovarian, lung, head & neck cancers)"),
            "Carboplatin"
        );
        assert_eq!(normalize("  Etoposide  "), "Etoposide");
        assert_eq!(normalize("Fluorouracil (5-FU) – Antimetabolite"), "Fluorouracil (5-FU)");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_ignores_ascii_hyphen() {
        // Only the en dash separates a description.
        assert_eq!(normalize("Platinum-based"), "Platinum-based");
    }

    // ── 2. harmful pair ───────────────────────────────────────────────────────

    #[test]
    fn test_harmful_pair_single_alert() {
        let alerts = checker().check(&meds(&["Carboplatin", "Ifosfamide"]), &Lifestyle::default());

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Harmful);
        assert_eq!(alerts[0].drug_a, "Carboplatin");
        assert_eq!(alerts[0].drug_b, "Ifosfamide");
        assert!(alerts[0].description.contains("kidney"));
    }

    #[test]
    fn test_pair_matches_regardless_of_list_order_and_suffix() {
        let alerts = checker().check(
            &meds(&[
                "Ifosfamide – Alkylating agent (sarcoma, testicular cancer, lymphoma)",
                "Carboplatin – Platinum-based chemotherapy",
            ]),
            &Lifestyle::default(),
        );

        assert_eq!(alerts.len(), 1);
        // Names are reported in table order, not medication order.
        assert_eq!(alerts[0].drug_a, "Carboplatin");
        assert_eq!(alerts[0].drug_b, "Ifosfamide");
    }

    // ── 3. lifestyle thresholds ───────────────────────────────────────────────

    #[test]
    fn test_alcohol_above_threshold_alerts() {
        let alerts = checker().check(&meds(&["Methotrexate"]), &lifestyle(0.0, 0.5));

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].drug_a, "Methotrexate");
        assert_eq!(alerts[0].drug_b, "Alcohol");
        assert_eq!(alerts[0].description, "Liver toxicity risk increased significantly");
        assert_eq!(alerts[0].kind, AlertKind::Harmful);
    }

    #[test]
    fn test_alcohol_below_threshold_is_silent() {
        let alerts = checker().check(&meds(&["Methotrexate"]), &lifestyle(0.0, 0.2));
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_threshold_is_strict() {
        let alerts = checker().check(&meds(&["Erlotinib"]), &lifestyle(0.3, 0.0));
        assert!(alerts.is_empty(), "ratio equal to the threshold must not alert");

        let alerts = checker().check(&meds(&["Erlotinib"]), &lifestyle(0.31, 0.0));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].drug_b, "Smoking");
    }

    #[test]
    fn test_lifestyle_without_drug_is_silent() {
        let alerts = checker().check(&meds(&["Cisplatin"]), &lifestyle(0.9, 0.9));
        assert!(alerts.is_empty());
    }

    // ── 4. empty and unknown input ────────────────────────────────────────────

    #[test]
    fn test_empty_medications_no_alerts() {
        let alerts = checker().check(&[], &lifestyle(1.0, 1.0));
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_unlisted_pair_no_alert() {
        let alerts = checker().check(&meds(&["Topotecan", "Bleomycin"]), &Lifestyle::default());
        assert!(alerts.is_empty());
    }

    // ── 5. ordering and duplicates ────────────────────────────────────────────

    #[test]
    fn test_pair_in_both_tables_yields_two_alerts() {
        let alerts = checker().check(&meds(&["Fluorouracil", "Leucovorin"]), &Lifestyle::default());

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].kind, AlertKind::Harmful);
        assert_eq!(alerts[1].kind, AlertKind::Beneficial);
    }

    #[test]
    fn test_alert_order_harmful_beneficial_lifestyle() {
        let alerts = checker().check(
            &meds(&[
                "Erlotinib",
                "Paclitaxel",
                "Cisplatin",
                "Carboplatin",
                "Ifosfamide",
                "Methotrexate",
            ]),
            &lifestyle(0.5, 0.5),
        );

        let pairs: Vec<(&str, &str)> = alerts
            .iter()
            .map(|a| (a.drug_a.as_str(), a.drug_b.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Carboplatin", "Ifosfamide"),
                ("Ifosfamide", "Cisplatin"),
                ("Carboplatin", "Paclitaxel"),
                ("Methotrexate", "Alcohol"),
                ("Erlotinib", "Smoking"),
            ]
        );
    }

    #[test]
    fn test_duplicate_medication_does_not_duplicate_alert() {
        let alerts = checker().check(
            &meds(&["Carboplatin", "Carboplatin", "Ifosfamide"]),
            &Lifestyle::default(),
        );
        assert_eq!(alerts.len(), 1);
    }

    // ── 6. configuration ──────────────────────────────────────────────────────

    #[test]
    fn test_empty_table_never_alerts() {
        let checker = TomlInteractionChecker::from_toml_str("").unwrap();
        let alerts = checker.check(&meds(&["Carboplatin", "Ifosfamide"]), &lifestyle(1.0, 1.0));
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_lifestyle_kind_can_be_overridden() {
        let toml = r#"
            [[lifestyle]]
            id = "obesity-note"
            factor = "obesity"
            threshold = 0.5
            drug = "Prednisone"
            counterpart = "Obesity"
            description = "test rule"
            kind = "beneficial"
        "#;
        let checker = TomlInteractionChecker::from_toml_str(toml).unwrap();
        assert_eq!(checker.table().lifestyle[0].factor, LifestyleFactor::Obesity);

        let alerts = checker.check(
            &meds(&["Prednisone"]),
            &Lifestyle { smoking: 0.0, alcohol: 0.0, obesity: 0.8 },
        );
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Beneficial);
    }

    #[test]
    fn test_toml_parse_error() {
        let result = TomlInteractionChecker::from_toml_str("this is not valid toml ][[[");

        match result {
            Err(QubitryError::ConfigError { reason }) => {
                assert!(
                    reason.contains("failed to parse interaction table TOML"),
                    "expected parse error message, got: {reason}"
                );
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_pair_with_one_drug_is_rejected() {
        let toml = r#"
            [[harmful]]
            drugs = ["Carboplatin"]
            description = "incomplete"
        "#;
        assert!(matches!(
            TomlInteractionChecker::from_toml_str(toml),
            Err(QubitryError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_from_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();

        let checker = TomlInteractionChecker::from_file(file.path()).unwrap();
        assert_eq!(checker.table().harmful.len(), 3);
        assert_eq!(checker.table().beneficial.len(), 2);
        assert_eq!(checker.table().lifestyle.len(), 2);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        match TomlInteractionChecker::from_file(&missing) {
            Err(QubitryError::ConfigError { reason }) => {
                assert!(reason.contains("absent.toml"), "unexpected reason: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }
}
