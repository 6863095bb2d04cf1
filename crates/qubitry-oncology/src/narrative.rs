//! Plain-text explanation and clinical notes for a patient.

use serde::{Deserialize, Serialize};

use qubitry_contracts::patient::Patient;

pub const EXPLANATION_REFERENCE: &str = "PubMed ID: 12345";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub reasoning: String,
    pub reference: String,
}

pub fn explain(patient: &Patient) -> Explanation {
    let reasoning = format!(
        "Patient {} is on medications {}. Genetic mutations ({}) may alter drug response. \
         Lifestyle factors such as smoking, alcohol, and obesity further modify toxicity levels \
         and overall drug effectiveness. Clinical evaluation with genetic counseling is recommended.",
        patient.name,
        patient.medications.join(", "),
        patient.genes.join(", "),
    );

    Explanation {
        reasoning,
        reference: EXPLANATION_REFERENCE.to_string(),
    }
}

/// A short clinical summary. Smoking and alcohol are shown as whole
/// percentages; obesity is not part of the note.
pub fn clinical_notes(patient: &Patient) -> String {
    format!(
        "Patient {} ({} years old) diagnosed with {}.\n\
         Medications: {}.\n\
         Lifestyle risks: Smoking {:.0}%, Alcohol {:.0}%.\n\
         Genetic markers: {}.",
        patient.name,
        patient.age,
        patient.condition,
        patient.medications.join(", "),
        patient.lifestyle.smoking * 100.0,
        patient.lifestyle.alcohol * 100.0,
        patient.genes.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use qubitry_contracts::patient::{Patient, PatientForm};

    use super::*;

    fn patient() -> Patient {
        let form = PatientForm {
            name: "Iris".to_string(),
            age: 47,
            condition: "Leukemia".to_string(),
            medications: vec!["Vincristine".to_string(), "Prednisone".to_string()],
            smoking_pct: 25,
            alcohol_pct: 40,
            obesity_pct: 10,
        };
        Patient::from_form(&form, "clinician")
    }

    #[test]
    fn explanation_names_patient_and_drugs() {
        let e = explain(&patient());

        assert!(e
            .reasoning
            .starts_with("Patient Iris is on medications Vincristine, Prednisone. "));
        assert!(e.reasoning.contains("Genetic mutations (BRCA1, TP53, EGFR, KRAS)"));
        assert!(e.reasoning.ends_with("genetic counseling is recommended."));
        assert_eq!(e.reference, "PubMed ID: 12345");
    }

    #[test]
    fn notes_show_whole_percentages() {
        let notes = clinical_notes(&patient());

        let lines: Vec<&str> = notes.lines().collect();
        assert_eq!(lines[0], "Patient Iris (47 years old) diagnosed with Leukemia.");
        assert_eq!(lines[1], "Medications: Vincristine, Prednisone.");
        assert_eq!(lines[2], "Lifestyle risks: Smoking 25%, Alcohol 40%.");
        assert_eq!(lines[3], "Genetic markers: BRCA1, TP53, EGFR, KRAS.");
    }
}
