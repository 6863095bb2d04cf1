//! Per-user analytics charts over the patient list.

use qubitry_contracts::{
    chart::{Bar, BarChart, PieChart, PieSlice},
    patient::Patient,
};

/// Count occurrences of each label, keeping first-appearance order.
fn tally<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, u64)> {
    let mut counts: Vec<(&str, u64)> = Vec::new();
    for label in labels {
        match counts.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label, 1)),
        }
    }
    counts
}

/// Patients per condition, largest first. Ties keep first-appearance order.
///
/// Returns `None` for an empty patient list.
pub fn disease_distribution(patients: &[&Patient]) -> Option<PieChart> {
    if patients.is_empty() {
        return None;
    }

    let mut counts = tally(patients.iter().map(|p| p.condition.as_str()));
    // Stable sort preserves first-appearance order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    Some(PieChart {
        title: "Patients by Disease".to_string(),
        slices: counts
            .into_iter()
            .map(|(label, value)| PieSlice { label: label.to_string(), value })
            .collect(),
    })
}

/// Occurrences of each medication string, as stored, in first-appearance
/// order.
///
/// Returns `None` for an empty patient list.
pub fn medication_counts(patients: &[&Patient]) -> Option<BarChart> {
    if patients.is_empty() {
        return None;
    }

    let counts = tally(
        patients
            .iter()
            .flat_map(|p| p.medications.iter().map(String::as_str)),
    );

    Some(BarChart {
        title: "Medications Count".to_string(),
        x_label: "Drug".to_string(),
        y_label: "Count".to_string(),
        bars: counts
            .into_iter()
            .map(|(label, value)| Bar { label: label.to_string(), value })
            .collect(),
    })
}
