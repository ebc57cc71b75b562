use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Column, Dataset};

/// Field separator of the wine quality files.
pub const DELIMITER: u8 = b';';

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while turning a file into a [`Dataset`].
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("file has no header row")]
    MissingHeader,

    #[error("header column {index} has an empty name")]
    EmptyColumnName { index: usize },

    #[error("column '{name}' appears more than once in the header")]
    DuplicateColumn { name: String },

    #[error("line {line}: expected {expected} fields, found {found}")]
    RowLength {
        line: u64,
        expected: u64,
        found: u64,
    },

    #[error("line {line}, column '{column}': '{value}' is not a number")]
    NotANumber {
        line: u64,
        column: String,
        value: String,
    },

    #[error("dataset has no '{name}' column")]
    MissingColumn { name: String },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read and parse the semicolon-delimited file at `path`.
///
/// Nothing is cached: every call goes back to disk.
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_from_reader(file)?;
    log::info!(
        "Loaded {} rows × {} columns from {}",
        dataset.len(),
        dataset.width(),
        path.display()
    );
    Ok(dataset)
}

/// Parse a header row followed by numeric rows from any reader.
///
/// Header names are trimmed and stripped of stray quotes. Every data row
/// must have exactly as many fields as the header.
pub fn load_from_reader<R: Read>(source: R) -> Result<Dataset, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let names = read_header(&mut reader)?;
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); names.len()];

    for result in reader.records() {
        let record = result.map_err(row_error)?;
        let line = record.position().map_or(0, |p| p.line());

        for (col_idx, field) in record.iter().enumerate() {
            let value = field
                .parse::<f64>()
                .map_err(|_| DatasetError::NotANumber {
                    line,
                    column: names[col_idx].clone(),
                    value: field.to_string(),
                })?;
            values[col_idx].push(value);
        }
    }

    let columns = names
        .into_iter()
        .zip(values)
        .map(|(name, vals)| Column::new(name, vals))
        .collect();
    Ok(Dataset::new(columns))
}

fn read_header<R: Read>(reader: &mut csv::Reader<R>) -> Result<Vec<String>, DatasetError> {
    let header = reader.headers().map_err(row_error)?;
    if header.is_empty() {
        return Err(DatasetError::MissingHeader);
    }

    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(header.len());
    for (index, raw) in header.iter().enumerate() {
        let name = raw.trim().trim_matches('"').trim().to_string();
        if name.is_empty() {
            return Err(DatasetError::EmptyColumnName { index });
        }
        if !seen.insert(name.clone()) {
            return Err(DatasetError::DuplicateColumn { name });
        }
        names.push(name);
    }
    Ok(names)
}

/// Surface arity mismatches with their own variant; pass the rest through.
fn row_error(err: csv::Error) -> DatasetError {
    if let csv::ErrorKind::UnequalLengths {
        pos,
        expected_len,
        len,
    } = err.kind()
    {
        return DatasetError::RowLength {
            line: pos.as_ref().map_or(0, |p| p.line()),
            expected: *expected_len,
            found: *len,
        };
    }
    DatasetError::Csv(err)
}
