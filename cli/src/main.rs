//! Qubitry — command-line front end.
//!
//! Lists the catalog, checks an ad-hoc medication list for interactions, or
//! imports a patient CSV and prints the full report for every patient.
//!
//! Usage:
//!   cargo run -p qubitry-cli -- catalog
//!   cargo run -p qubitry-cli -- check --med Carboplatin --med Ifosfamide
//!   cargo run -p qubitry-cli -- check --med Methotrexate --alcohol 0.5
//!   cargo run -p qubitry-cli -- report patients.csv --seed 7
//!   cargo run -p qubitry-cli -- --tables my-tables.toml report patients.csv --json

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use qubitry_contracts::{
    chart::{BarChart, PieChart},
    error::QubitryError,
    patient::{CancerType, Lifestyle, Patient},
    session::SignupForm,
};
use qubitry_core::{traits::InteractionChecker, AppState, Workbench};
use qubitry_oncology::{
    analysis::{analyze, PatientAnalysis, ALERTS_HEADING},
    analytics::{disease_distribution, medication_counts},
    catalog::CANCER_DRUGS,
    wiring,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Qubitry — oncology assistant.
#[derive(Parser)]
#[command(
    name = "qubitry",
    about = "Qubitry oncology assistant",
    long_about = "Checks oncology medication lists for harmful and beneficial interactions,\n\
                  and builds per-patient analyses from a CSV upload."
)]
struct Cli {
    /// Interaction tables TOML to use instead of the built-in tables.
    #[arg(long, global = true, value_name = "PATH")]
    tables: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List cancer types and the medication catalog.
    Catalog,
    /// Print interaction alerts for a medication list.
    Check {
        /// A medication name; repeat for each drug.
        #[arg(long = "med", value_name = "NAME", required = true)]
        meds: Vec<String>,
        /// Smoking ratio, 0 to 1.
        #[arg(long, default_value_t = 0.0, value_parser = parse_ratio)]
        smoking: f64,
        /// Alcohol ratio, 0 to 1.
        #[arg(long, default_value_t = 0.0, value_parser = parse_ratio)]
        alcohol: f64,
        /// Obesity ratio, 0 to 1.
        #[arg(long, default_value_t = 0.0, value_parser = parse_ratio)]
        obesity: f64,
    },
    /// Import a patient CSV and print the table, analyses and charts.
    Report {
        /// CSV with columns name, age, condition, meds.
        csv: PathBuf,
        /// Account the patients are registered under.
        #[arg(long, default_value = "clinician")]
        user: String,
        /// Seed for the genetic graph layout.
        #[arg(long)]
        seed: Option<u64>,
        /// Print one JSON document instead of text.
        #[arg(long)]
        json: bool,
    },
}

fn parse_ratio(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is outside 0 to 1"))
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Qubitry(#[from] QubitryError),

    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CliError {
    fn is_warning(&self) -> bool {
        matches!(self, CliError::Qubitry(e) if e.is_warning())
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Catalog => {
            print_catalog();
            Ok(())
        }
        Command::Check {
            meds,
            smoking,
            alcohol,
            obesity,
        } => run_check(
            cli.tables.as_deref(),
            &meds,
            Lifestyle { smoking, alcohol, obesity },
        ),
        Command::Report {
            csv,
            user,
            seed,
            json,
        } => run_report(cli.tables.as_deref(), &csv, &user, seed, json),
    };

    if let Err(e) = result {
        if e.is_warning() {
            eprintln!("warning: {e}");
        } else {
            eprintln!("error: {e}");
        }
        std::process::exit(1);
    }
}

fn load_workbench(tables: Option<&Path>) -> Result<Workbench, CliError> {
    let workbench = match tables {
        Some(path) => wiring::workbench_with_tables(path)?,
        None => wiring::workbench()?,
    };
    Ok(workbench)
}

// ── catalog ───────────────────────────────────────────────────────────────────

fn print_catalog() {
    println!("Cancer types");
    println!("------------");
    for cancer in CancerType::ALL {
        println!("  {cancer}");
    }
    println!();
    println!("Medications");
    println!("-----------");
    for drug in CANCER_DRUGS {
        println!("  {drug}");
    }
}

// ── check ─────────────────────────────────────────────────────────────────────

fn run_check(tables: Option<&Path>, meds: &[String], lifestyle: Lifestyle) -> Result<(), CliError> {
    let workbench = load_workbench(tables)?;
    let alerts = workbench.checker().check(meds, &lifestyle);

    if alerts.is_empty() {
        println!("No risky interactions");
    } else {
        println!("{ALERTS_HEADING}");
        for alert in &alerts {
            println!("  [{}] {alert}", alert.kind.as_str());
        }
    }
    Ok(())
}

// ── report ────────────────────────────────────────────────────────────────────

/// Password for the throwaway account a report runs under.
const REPORT_PASSWORD: &str = "qubitry-report";

#[derive(Serialize)]
struct ReportDocument<'a> {
    user: &'a str,
    patients: Vec<&'a Patient>,
    analyses: Vec<PatientAnalysis>,
    disease_distribution: Option<PieChart>,
    medication_counts: Option<BarChart>,
}

fn run_report(
    tables: Option<&Path>,
    csv: &Path,
    user: &str,
    seed: Option<u64>,
    json: bool,
) -> Result<(), CliError> {
    let workbench = load_workbench(tables)?;
    let mut state = AppState::new();

    workbench.sign_up(
        &mut state,
        &SignupForm {
            username: user.to_string(),
            password: REPORT_PASSWORD.to_string(),
            confirm: REPORT_PASSWORD.to_string(),
        },
    )?;
    let session = workbench.log_in(&state, user, REPORT_PASSWORD)?;

    let records = qubitry_intake::csv_import::read_records_from_path(csv)?;
    let added = workbench.import_records(&mut state, &session, records);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let patients = workbench.patients_for(&state, &session);
    let analyses: Vec<PatientAnalysis> = patients
        .iter()
        .map(|p| analyze(p, workbench.checker(), &mut rng))
        .collect();

    let document = ReportDocument {
        user,
        disease_distribution: disease_distribution(&patients),
        medication_counts: medication_counts(&patients),
        patients,
        analyses,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        println!("{added} patients added");
        println!();
        print_report(&document);
    }
    Ok(())
}

fn print_report(doc: &ReportDocument<'_>) {
    if doc.patients.is_empty() {
        println!("No patients yet");
        return;
    }

    println!("Patient List");
    println!("{:<24} {:>3}  {:<20} Medications", "Name", "Age", "Condition");
    for p in &doc.patients {
        println!(
            "{:<24} {:>3}  {:<20} {}",
            p.name,
            p.age,
            p.condition,
            p.medications.join(", ")
        );
    }

    for analysis in &doc.analyses {
        println!();
        println!("== {} ==", analysis.patient_name);
        for line in analysis.score_lines() {
            println!("{line}");
        }
        if analysis.has_alerts() {
            println!("{ALERTS_HEADING}");
        }
        for line in analysis.alert_lines() {
            println!("  {line}");
        }

        println!("{}", analysis.genetic_graph.title);
        for m in &analysis.genetic_graph.markers {
            println!(
                "  {:<6} ({:.2}, {:.2}, {:.2}) {}",
                m.label,
                m.x,
                m.y,
                m.z.unwrap_or_default(),
                m.color
            );
        }

        println!("Explanation: {}", analysis.explanation.reasoning);
        println!("Reference: {}", analysis.explanation.reference);

        println!("{}", analysis.body_simulation.title);
        for m in &analysis.body_simulation.markers {
            println!("  {:<15} {}", m.label, m.color);
        }

        println!("Clinical notes:");
        for line in analysis.clinical_notes.lines() {
            println!("  {line}");
        }
    }

    println!();
    println!("Analytics Charts");
    if let Some(pie) = &doc.disease_distribution {
        println!("{}", pie.title);
        let total = pie.total();
        for slice in &pie.slices {
            let share = slice.value as f64 * 100.0 / total as f64;
            println!("  {:<20} {:>3}  ({share:.1}%)", slice.label, slice.value);
        }
    }
    if let Some(bars) = &doc.medication_counts {
        println!("{} ({} / {})", bars.title, bars.x_label, bars.y_label);
        for bar in &bars.bars {
            println!("  {:<40} {:>3}", bar.label, bar.value);
        }
    }
}
