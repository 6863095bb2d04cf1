//! CSV patient import.
//!
//! The upload must have a header row naming the columns `name`, `age`,
//! `condition` and `meds`. Columns are located by header name; extra columns
//! are ignored. `meds` holds a comma-joined list that is split, trimmed and
//! stripped of empty pieces.
//!
//! Import is all-or-nothing: the first bad row rejects the whole file with
//! `MalformedRow`. Row numbers are 1-based and count data rows only.

use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use qubitry_contracts::{
    error::{QubitryError, QubitryResult},
    patient::ImportedRecord,
};

pub const MAX_AGE: u8 = 120;

const REQUIRED_COLUMNS: [&str; 4] = ["name", "age", "condition", "meds"];

/// Positions of the required columns in the header row.
struct Columns {
    name: usize,
    age: usize,
    condition: usize,
    meds: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> QubitryResult<Self> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| QubitryError::ImportFailed {
                    reason: format!(
                        "missing column '{column}' (expected {})",
                        REQUIRED_COLUMNS.join(", ")
                    ),
                })
        };

        Ok(Self {
            name: find("name")?,
            age: find("age")?,
            condition: find("condition")?,
            meds: find("meds")?,
        })
    }
}

/// Read every patient record from a CSV source.
pub fn read_records<R: Read>(reader: R) -> QubitryResult<Vec<ImportedRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(|e| QubitryError::ImportFailed {
        reason: format!("failed to read CSV header: {e}"),
    })?;
    let columns = Columns::locate(headers)?;

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let row = index + 1;
        let record = result.map_err(|e| QubitryError::MalformedRow {
            row,
            reason: e.to_string(),
        })?;
        records.push(parse_row(&record, &columns, row)?);
    }

    debug!(count = records.len(), "parsed patient CSV");
    Ok(records)
}

/// Open `path` and read every patient record from it.
pub fn read_records_from_path(path: &Path) -> QubitryResult<Vec<ImportedRecord>> {
    let file = File::open(path).map_err(|e| QubitryError::ImportFailed {
        reason: format!("failed to open '{}': {e}", path.display()),
    })?;
    read_records(file).inspect_err(|e| {
        warn!(path = %path.display(), error = %e, "patient CSV rejected");
    })
}

fn parse_row(record: &StringRecord, columns: &Columns, row: usize) -> QubitryResult<ImportedRecord> {
    let field = |column: &str, index: usize| {
        record.get(index).ok_or_else(|| QubitryError::MalformedRow {
            row,
            reason: format!("missing value for column '{column}'"),
        })
    };

    let name = field("name", columns.name)?;
    let raw_age = field("age", columns.age)?;
    let condition = field("condition", columns.condition)?;
    let meds = field("meds", columns.meds)?;

    let age = raw_age
        .parse::<u8>()
        .ok()
        .filter(|age| *age <= MAX_AGE)
        .ok_or_else(|| QubitryError::MalformedRow {
            row,
            reason: format!("age '{raw_age}' is not a whole number between 0 and {MAX_AGE}"),
        })?;

    let medications = split_medications(meds);
    if medications.is_empty() {
        return Err(QubitryError::MalformedRow {
            row,
            reason: "column 'meds' lists no medications".to_string(),
        });
    }

    Ok(ImportedRecord {
        name: name.to_string(),
        age,
        condition: condition.to_string(),
        medications,
    })
}

/// Split a comma-joined medication cell.
pub fn split_medications(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
