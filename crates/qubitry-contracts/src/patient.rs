//! Patient records and the inputs they are built from.
//!
//! A `Patient` is assembled either from a manual-entry `PatientForm` (after the
//! intake validator has accepted it) or from an `ImportedRecord` read out of a
//! CSV upload. Both paths attach the same fixed gene markers and the owning
//! username; nothing here is persisted beyond the process.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Gene markers attached to every patient. They are not derived from input.
pub const GENE_MARKERS: [&str; 4] = ["BRCA1", "TP53", "EGFR", "KRAS"];

/// The cancer types offered on the manual-entry form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CancerType {
    #[serde(rename = "Lung Cancer")]
    Lung,
    #[serde(rename = "Breast Cancer")]
    Breast,
    #[serde(rename = "Leukemia")]
    Leukemia,
    #[serde(rename = "Colon Cancer")]
    Colon,
    #[serde(rename = "Lymphoma")]
    Lymphoma,
    #[serde(rename = "Prostate Cancer")]
    Prostate,
    #[serde(rename = "Ovarian Cancer")]
    Ovarian,
    #[serde(rename = "Liver Cancer")]
    Liver,
    #[serde(rename = "Pancreatic Cancer")]
    Pancreatic,
    #[serde(rename = "Melanoma")]
    Melanoma,
}

impl CancerType {
    /// Every cancer type, in the order the entry form lists them.
    pub const ALL: [CancerType; 10] = [
        CancerType::Lung,
        CancerType::Breast,
        CancerType::Leukemia,
        CancerType::Colon,
        CancerType::Lymphoma,
        CancerType::Prostate,
        CancerType::Ovarian,
        CancerType::Liver,
        CancerType::Pancreatic,
        CancerType::Melanoma,
    ];

    /// The display label, which is also the value stored on the patient.
    pub fn as_str(self) -> &'static str {
        match self {
            CancerType::Lung => "Lung Cancer",
            CancerType::Breast => "Breast Cancer",
            CancerType::Leukemia => "Leukemia",
            CancerType::Colon => "Colon Cancer",
            CancerType::Lymphoma => "Lymphoma",
            CancerType::Prostate => "Prostate Cancer",
            CancerType::Ovarian => "Ovarian Cancer",
            CancerType::Liver => "Liver Cancer",
            CancerType::Pancreatic => "Pancreatic Cancer",
            CancerType::Melanoma => "Melanoma",
        }
    }

    /// Look up a cancer type by its exact display label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == label)
    }
}

impl fmt::Display for CancerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the three lifestyle exposures tracked per patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifestyleFactor {
    Smoking,
    Alcohol,
    Obesity,
}

impl LifestyleFactor {
    pub fn as_str(self) -> &'static str {
        match self {
            LifestyleFactor::Smoking => "smoking",
            LifestyleFactor::Alcohol => "alcohol",
            LifestyleFactor::Obesity => "obesity",
        }
    }
}

/// Lifestyle exposure ratios, each in `[0, 1]`.
///
/// The default is all zeros, which is what CSV imports receive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Lifestyle {
    pub smoking: f64,
    pub alcohol: f64,
    pub obesity: f64,
}

impl Lifestyle {
    /// Build a lifestyle record from whole percentages (0–100).
    pub fn from_percentages(smoking: u8, alcohol: u8, obesity: u8) -> Self {
        Self {
            smoking: f64::from(smoking) / 100.0,
            alcohol: f64::from(alcohol) / 100.0,
            obesity: f64::from(obesity) / 100.0,
        }
    }

    /// The ratio recorded for `factor`.
    pub fn ratio(&self, factor: LifestyleFactor) -> f64 {
        match factor {
            LifestyleFactor::Smoking => self.smoking,
            LifestyleFactor::Alcohol => self.alcohol,
            LifestyleFactor::Obesity => self.obesity,
        }
    }
}

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub name: String,
    /// Age in years, 0–120.
    pub age: u8,
    /// A cancer-type label. Manual entry restricts this to `CancerType`;
    /// CSV imports store whatever the file carries.
    pub condition: String,
    /// Medication strings as selected, descriptive suffixes included.
    pub medications: Vec<String>,
    pub lifestyle: Lifestyle,
    pub genes: Vec<String>,
    /// Username of the account that registered this patient.
    pub owner: String,
}

impl Patient {
    /// Assemble a patient from an accepted manual-entry form.
    ///
    /// The caller is expected to have run the form through the intake
    /// validator first; this constructor does not re-check it.
    pub fn from_form(form: &PatientForm, owner: impl Into<String>) -> Self {
        Self {
            name: form.name.trim().to_string(),
            age: form.age,
            condition: form.condition.clone(),
            medications: form.medications.clone(),
            lifestyle: Lifestyle::from_percentages(
                form.smoking_pct,
                form.alcohol_pct,
                form.obesity_pct,
            ),
            genes: fixed_genes(),
            owner: owner.into(),
        }
    }

    /// Assemble a patient from one CSV row. Lifestyle ratios are all zero.
    pub fn from_import(record: ImportedRecord, owner: impl Into<String>) -> Self {
        Self {
            name: record.name,
            age: record.age,
            condition: record.condition,
            medications: record.medications,
            lifestyle: Lifestyle::default(),
            genes: fixed_genes(),
            owner: owner.into(),
        }
    }
}

fn fixed_genes() -> Vec<String> {
    GENE_MARKERS.iter().map(|g| g.to_string()).collect()
}

/// The manual-entry form as the front end collects it.
///
/// Lifestyle values are whole percentages; they become ratios when the
/// patient is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientForm {
    pub name: String,
    pub age: u8,
    pub condition: String,
    pub medications: Vec<String>,
    pub smoking_pct: u8,
    pub alcohol_pct: u8,
    pub obesity_pct: u8,
}

impl Default for PatientForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: 50,
            condition: CancerType::ALL[0].as_str().to_string(),
            medications: Vec::new(),
            smoking_pct: 10,
            alcohol_pct: 5,
            obesity_pct: 0,
        }
    }
}

/// One parsed row of a patient CSV upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedRecord {
    pub name: String,
    pub age: u8,
    pub condition: String,
    pub medications: Vec<String>,
}
