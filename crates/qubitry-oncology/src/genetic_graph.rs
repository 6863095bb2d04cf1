//! Genetic mutation network: one 3-D marker per gene at a random position.

use rand::Rng;

use qubitry_contracts::{
    chart::{Marker, MarkerChart},
    patient::{Patient, GENE_MARKERS},
};

pub const GENETIC_GRAPH_TITLE: &str = "Genetic Mutation Network";

const AXIS_EXTENT: f64 = 5.0;
const MARKER_SIZE: u16 = 10;

/// Marker color for a gene: red for BRCA1/TP53, orange for EGFR/KRAS,
/// green for anything else.
pub fn gene_color(gene: &str) -> &'static str {
    match gene {
        "BRCA1" | "TP53" => "red",
        "EGFR" | "KRAS" => "orange",
        _ => "green",
    }
}

/// Build the network for `patient`, drawing coordinates from `rng`.
///
/// A patient with no genes on record gets the four standard markers.
pub fn genetic_graph<R: Rng + ?Sized>(patient: &Patient, rng: &mut R) -> MarkerChart {
    let fallback: Vec<String>;
    let genes: &[String] = if patient.genes.is_empty() {
        fallback = GENE_MARKERS.iter().map(|g| g.to_string()).collect();
        &fallback
    } else {
        &patient.genes
    };

    let markers = genes
        .iter()
        .map(|gene| Marker {
            label: gene.clone(),
            x: rng.gen_range(0.0..AXIS_EXTENT),
            y: rng.gen_range(0.0..AXIS_EXTENT),
            z: Some(rng.gen_range(0.0..AXIS_EXTENT)),
            color: gene_color(gene).to_string(),
            size: MARKER_SIZE,
        })
        .collect();

    MarkerChart {
        title: GENETIC_GRAPH_TITLE.to_string(),
        markers,
        background: None,
    }
}
