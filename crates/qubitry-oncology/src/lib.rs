//! # qubitry-oncology
//!
//! The oncology assistant built on the Qubitry workbench.
//!
//! This crate owns the domain data (the medication catalog and the embedded
//! interaction tables), the per-patient analysis with its chart builders,
//! and the wiring that turns the generic components into a ready
//! [`Workbench`](qubitry_core::Workbench):
//!
//! - [`wiring::workbench`] — embedded tables, intake schema, catalog check
//! - [`analysis::analyze`] — scores, alerts, genetic graph, body simulation,
//!   explanation and clinical notes for one patient
//! - [`analytics`] — disease distribution and medication counts per user
//!
//! The scores in [`scoring`] are placeholders and say nothing clinical.

pub mod analysis;
pub mod analytics;
pub mod body_simulation;
pub mod catalog;
pub mod genetic_graph;
pub mod narrative;
pub mod scoring;
pub mod wiring;

pub use analysis::{analyze, PatientAnalysis};
pub use wiring::{workbench, workbench_with_tables};

// ── Tests ─────────────────────────────────────────────────────────────────────
