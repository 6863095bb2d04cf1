//! Placeholder scores shown on the patient analysis.
//!
//! None of these consult genetics, pharmacology or lifestyle. They depend
//! only on how many medications are listed and must not be read as
//! predictions.

use qubitry_contracts::patient::Patient;

pub const PLACEHOLDER_COMBO_SCORE: f64 = 0.85;

/// The "optimal" combination: the first two medications, or all of them when
/// fewer than two are listed, with a fixed score.
pub fn optimize_combination(_patient: &Patient, medications: &[String]) -> (Vec<String>, f64) {
    let combo = medications.iter().take(2).cloned().collect();
    (combo, PLACEHOLDER_COMBO_SCORE)
}

/// `0.7 + 0.1 * (n mod 3)` for `n` medications.
pub fn predict_effectiveness(_patient: &Patient, medications: &[String]) -> f64 {
    0.7 + 0.1 * (medications.len() % 3) as f64
}

/// `0.6 + 0.05 * n` for `n` medications.
pub fn tensor_network_score(_patient: &Patient, medications: &[String]) -> f64 {
    0.6 + 0.05 * medications.len() as f64
}

#[cfg(test)]
mod tests {
    use qubitry_contracts::patient::{ImportedRecord, Patient};

    use super::*;

    fn patient_with(meds: &[&str]) -> Patient {
        Patient::from_import(
            ImportedRecord {
                name: "Test".to_string(),
                age: 40,
                condition: "Melanoma".to_string(),
                medications: meds.iter().map(|m| m.to_string()).collect(),
            },
            "clinician",
        )
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn combination_takes_first_two() {
        let p = patient_with(&["A", "B", "C"]);
        let (combo, score) = optimize_combination(&p, &p.medications);
        assert_eq!(combo, vec!["A", "B"]);
        assert!(close(score, 0.85));

        let p = patient_with(&["A"]);
        assert_eq!(optimize_combination(&p, &p.medications).0, vec!["A"]);

        let p = patient_with(&[]);
        assert!(optimize_combination(&p, &p.medications).0.is_empty());
    }

    #[test]
    fn scores_follow_medication_count() {
        let none = patient_with(&[]);
        assert!(close(predict_effectiveness(&none, &none.medications), 0.7));
        assert!(close(tensor_network_score(&none, &none.medications), 0.6));

        let two = patient_with(&["A", "B"]);
        assert!(close(predict_effectiveness(&two, &two.medications), 0.9));

        let three = patient_with(&["A", "B", "C"]);
        assert!(close(predict_effectiveness(&three, &three.medications), 0.7));
        assert!(close(tensor_network_score(&three, &three.medications), 0.75));
    }
}
