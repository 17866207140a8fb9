//! Dense CSV loader
//!
//! Supports loading training sets from CSV files where:
//! - The last column is the label
//! - All other columns are features
//! - First row can be headers (automatically detected)
//! - Blank lines and lines starting with `#` are skipped

use crate::core::{Dataset, Result, SVMError, TrainingSet};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load a training set from a CSV file, detecting a header row
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<TrainingSet> {
    let path = path.as_ref();
    let file = File::open(path).map_err(SVMError::IoError)?;
    let set = read_csv(BufReader::new(file), true)?;
    debug!("Loaded {} samples from {}", set.len(), path.display());
    Ok(set)
}

/// Load a training set from a reader with explicit header option
pub fn read_csv<R: BufRead>(reader: R, auto_detect_header: bool) -> Result<TrainingSet> {
    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut first_row = true;

    for line in reader.lines() {
        let line = line.map_err(SVMError::IoError)?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if first_row {
            first_row = false;
            if auto_detect_header && is_header_line(line) {
                continue;
            }
        }

        let (row, label) = parse_data_line(line)?;
        features.push(row);
        labels.push(label);
    }

    // Shape, finiteness and label checks happen in TrainingSet::new
    TrainingSet::new(features, labels)
}

/// Check if a line appears to be a header
fn is_header_line(line: &str) -> bool {
    let fields: Vec<&str> = line.split(',').collect();

    if fields.len() < 2 {
        return false;
    }

    // Most feature columns non-numeric
    let non_numeric_count = fields
        .iter()
        .take(fields.len() - 1)
        .filter(|field| field.trim().parse::<f64>().is_err())
        .count();

    non_numeric_count > fields.len() / 2
}

/// Parse a CSV data line into a feature row and a binary label
fn parse_data_line(line: &str) -> Result<(Vec<f64>, f64)> {
    let fields: Vec<&str> = line.split(',').map(|f| f.trim()).collect();

    if fields.len() < 2 {
        return Err(SVMError::ParseError(format!(
            "Line has too few fields: {line}"
        )));
    }

    let label_str = fields[fields.len() - 1];
    let label = label_str
        .parse::<f64>()
        .map_err(|_| SVMError::ParseError(format!("Invalid label: {label_str}")))?;

    // Convert to binary label if needed
    let label = if label == 1.0 || label == -1.0 {
        label
    } else if label > 0.0 {
        1.0
    } else {
        -1.0
    };

    let row = fields[..fields.len() - 1]
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            field.parse::<f64>().map_err(|_| {
                SVMError::ParseError(format!(
                    "Invalid feature value at column {}: {}",
                    idx + 1,
                    field
                ))
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok((row, label))
}
