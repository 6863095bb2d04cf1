//! Digital body simulation: fixed organ markers with the affected organs
//! highlighted for the patient's condition.

use qubitry_contracts::{
    chart::{Marker, MarkerChart},
    patient::Patient,
};

pub const BODY_SIMULATION_TITLE: &str = "Digital Body Simulation";

const DEFAULT_SIZE: u16 = 20;
const HIGHLIGHT_SIZE: u16 = 35;
const HIGHLIGHT_COLOR: &str = "red";

struct Organ {
    name: &'static str,
    x: f64,
    y: f64,
    color: &'static str,
}

const ORGANS: [Organ; 5] = [
    Organ { name: "Lungs", x: 0.0, y: 2.0, color: "lightblue" },
    Organ { name: "Heart", x: 0.0, y: 1.2, color: "pink" },
    Organ { name: "Liver", x: 0.6, y: 0.5, color: "orange" },
    Organ { name: "Kidney (Left)", x: -0.6, y: -0.5, color: "green" },
    Organ { name: "Kidney (Right)", x: 0.6, y: -0.5, color: "green" },
];

/// Organs drawn highlighted for a condition label. Unmapped conditions
/// highlight nothing.
pub fn affected_organs(condition: &str) -> &'static [&'static str] {
    match condition {
        "Lung Cancer" => &["Lungs"],
        "Breast Cancer" | "Leukemia" => &["Heart"],
        "Liver Cancer" => &["Liver"],
        "Kidney Cancer" => &["Kidney (Left)", "Kidney (Right)"],
        "Prostate Cancer" => &["Kidney (Right)"],
        "Ovarian Cancer" => &["Kidney (Left)"],
        _ => &[],
    }
}

pub fn body_simulation(patient: &Patient) -> MarkerChart {
    let affected = affected_organs(&patient.condition);

    let markers = ORGANS
        .iter()
        .map(|organ| {
            let highlighted = affected.contains(&organ.name);
            Marker {
                label: organ.name.to_string(),
                x: organ.x,
                y: organ.y,
                z: None,
                color: if highlighted { HIGHLIGHT_COLOR } else { organ.color }.to_string(),
                size: if highlighted { HIGHLIGHT_SIZE } else { DEFAULT_SIZE },
            }
        })
        .collect();

    MarkerChart {
        title: BODY_SIMULATION_TITLE.to_string(),
        markers,
        background: Some("black".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use qubitry_contracts::patient::{ImportedRecord, Patient};

    use super::*;

    fn patient(condition: &str) -> Patient {
        Patient::from_import(
            ImportedRecord {
                name: "Noor".to_string(),
                age: 63,
                condition: condition.to_string(),
                medications: Vec::new(),
            },
            "clinician",
        )
    }

    fn highlighted(chart: &MarkerChart) -> Vec<&str> {
        chart
            .markers
            .iter()
            .filter(|m| m.color == "red")
            .map(|m| m.label.as_str())
            .collect()
    }

    #[test]
    fn layout_is_fixed() {
        let chart = body_simulation(&patient("Melanoma"));

        assert_eq!(chart.title, "Digital Body Simulation");
        assert_eq!(chart.background.as_deref(), Some("black"));
        assert!(!chart.is_three_d());
        assert_eq!(chart.markers.len(), 5);
        assert_eq!(chart.markers[1].label, "Heart");
        assert_eq!((chart.markers[1].x, chart.markers[1].y), (0.0, 1.2));
        assert_eq!(chart.markers[1].color, "pink");
        assert!(highlighted(&chart).is_empty());
        assert!(chart.markers.iter().all(|m| m.size == 20));
    }

    #[test]
    fn kidney_cancer_highlights_both_kidneys() {
        let chart = body_simulation(&patient("Kidney Cancer"));
        assert_eq!(highlighted(&chart), vec!["Kidney (Left)", "Kidney (Right)"]);
        for m in chart.markers.iter().filter(|m| m.color == "red") {
            assert_eq!(m.size, 35);
        }
    }

    #[test]
    fn each_mapped_condition() {
        let cases = [
            ("Lung Cancer", vec!["Lungs"]),
            ("Breast Cancer", vec!["Heart"]),
            ("Leukemia", vec!["Heart"]),
            ("Liver Cancer", vec!["Liver"]),
            ("Prostate Cancer", vec!["Kidney (Right)"]),
            ("Ovarian Cancer", vec!["Kidney (Left)"]),
            ("Colon Cancer", vec![]),
        ];
        for (condition, expected) in cases {
            assert_eq!(highlighted(&body_simulation(&patient(condition))), expected, "{condition}");
        }
    }
}
