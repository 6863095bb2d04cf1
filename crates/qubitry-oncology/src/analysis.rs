//! Full analysis of one patient, as shown on the patients tab and in
//! `qubitry report`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use qubitry_contracts::{alert::InteractionAlert, chart::MarkerChart, patient::Patient};
use qubitry_core::traits::InteractionChecker;

use crate::{
    body_simulation::body_simulation,
    genetic_graph::genetic_graph,
    narrative::{clinical_notes, explain, Explanation},
    scoring::{optimize_combination, predict_effectiveness, tensor_network_score},
};

pub const NO_ALERTS_LINE: &str = "No risky interactions";
pub const ALERTS_HEADING: &str = "Risky Drug Interactions Detected";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientAnalysis {
    pub patient_name: String,
    pub optimal_combo: Vec<String>,
    pub combo_score: f64,
    pub effectiveness: f64,
    pub tensor_score: f64,
    pub alerts: Vec<InteractionAlert>,
    pub genetic_graph: MarkerChart,
    pub explanation: Explanation,
    pub body_simulation: MarkerChart,
    pub clinical_notes: String,
}

impl PatientAnalysis {
    /// The three score lines, two decimals each.
    pub fn score_lines(&self) -> Vec<String> {
        vec![
            format!(
                "Optimal Drug Combo: [{}] | Score: {:.2}",
                self.optimal_combo.join(", "),
                self.combo_score
            ),
            format!("Predicted Effectiveness: {:.2}", self.effectiveness),
            format!("Tensor Network Score: {:.2}", self.tensor_score),
        ]
    }

    /// One line per alert, or the single no-alerts line.
    pub fn alert_lines(&self) -> Vec<String> {
        if self.alerts.is_empty() {
            vec![NO_ALERTS_LINE.to_string()]
        } else {
            self.alerts.iter().map(ToString::to_string).collect()
        }
    }

    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }
}

/// Run every analysis step for `patient`. `rng` positions the genetic graph.
pub fn analyze<R: Rng + ?Sized>(
    patient: &Patient,
    checker: &dyn InteractionChecker,
    rng: &mut R,
) -> PatientAnalysis {
    let meds = &patient.medications;
    let (optimal_combo, combo_score) = optimize_combination(patient, meds);
    let alerts = checker.check(meds, &patient.lifestyle);

    debug!(
        patient = %patient.name,
        medications = meds.len(),
        alerts = alerts.len(),
        "patient analysed"
    );

    PatientAnalysis {
        patient_name: patient.name.clone(),
        optimal_combo,
        combo_score,
        effectiveness: predict_effectiveness(patient, meds),
        tensor_score: tensor_network_score(patient, meds),
        alerts,
        genetic_graph: genetic_graph(patient, rng),
        explanation: explain(patient),
        body_simulation: body_simulation(patient),
        clinical_notes: clinical_notes(patient),
    }
}
