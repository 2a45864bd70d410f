//! Delimited text reader producing a `TabularData`.
use std::collections::HashSet;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use csv::StringRecord;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::data_handling::TabularData;

/// Configuration for reading a labelled feature table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableReaderConfig {
    /// Column name holding the integer class label.
    pub label_column: String,
    /// Field delimiter.
    pub delimiter: u8,
    /// Optional list of feature columns to load (in order).
    /// When `None`, all non-label, non-ignored columns are features.
    pub feature_columns: Option<Vec<String>>,
    /// Columns to ignore when auto-selecting features.
    pub ignore_columns: Vec<String>,
}

impl Default for TableReaderConfig {
    fn default() -> Self {
        Self {
            label_column: "Cover_Type".to_string(),
            delimiter: b',',
            feature_columns: None,
            ignore_columns: vec!["Id".to_string()],
        }
    }
}

/// Read a comma separated table with the default configuration.
pub fn read_table_csv<P: AsRef<Path>>(path: P) -> Result<TabularData> {
    read_table_csv_with_config(path, &TableReaderConfig::default())
}

/// Read a delimited table using a custom configuration.
pub fn read_table_csv_with_config<P: AsRef<Path>>(
    path: P,
    config: &TableReaderConfig,
) -> Result<TabularData> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(&path)
        .with_context(|| format!("Failed to open data file: {}", path.as_ref().display()))?;

    let headers = reader
        .headers()
        .context("Failed to read header row")?
        .clone();

    let label_idx = find_column(&headers, &config.label_column)
        .ok_or_else(|| anyhow!("Missing label column '{}'", config.label_column))?;

    let feature_indices = resolve_feature_indices(&headers, config, label_idx)?;
    if feature_indices.is_empty() {
        bail!("No feature columns detected in header");
    }

    let mut features = Vec::new();
    let mut labels = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        let label = record
            .get(label_idx)
            .ok_or_else(|| anyhow!("Missing label value at row {}", row_idx + 1))?
            .parse::<usize>()
            .with_context(|| format!("Invalid label at row {}", row_idx + 1))?;
        labels.push(label);

        for &idx in &feature_indices {
            let value = record
                .get(idx)
                .ok_or_else(|| anyhow!("Missing feature value at row {}", row_idx + 1))?;
            let parsed = value.parse::<f64>().with_context(|| {
                format!(
                    "Invalid feature '{}' at row {}",
                    headers.get(idx).unwrap_or(""),
                    row_idx + 1
                )
            })?;
            features.push(parsed);
        }
    }

    if labels.is_empty() {
        bail!("No data rows in {}", path.as_ref().display());
    }

    let n_samples = labels.len();
    let n_features = feature_indices.len();
    let x = Array2::from_shape_vec((n_samples, n_features), features)
        .context("Failed to build feature matrix")?;
    let y = Array1::from_vec(labels);

    let feature_names = feature_indices
        .iter()
        .map(|&idx| headers.get(idx).unwrap_or("").to_string())
        .collect();

    log::debug!(
        "Read {} rows x {} features from {}",
        n_samples,
        n_features,
        path.as_ref().display()
    );

    TabularData::new(x, y, feature_names, headers.get(label_idx).unwrap_or(""))
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
}

fn resolve_feature_indices(
    headers: &StringRecord,
    config: &TableReaderConfig,
    label_idx: usize,
) -> Result<Vec<usize>> {
    if let Some(names) = &config.feature_columns {
        let mut indices = Vec::with_capacity(names.len());
        for name in names {
            let idx = find_column(headers, name)
                .ok_or_else(|| anyhow!("Missing feature column '{}'", name))?;
            if idx == label_idx {
                bail!("Label column '{}' cannot also be a feature", name);
            }
            indices.push(idx);
        }
        return Ok(indices);
    }

    let ignore: HashSet<String> = config
        .ignore_columns
        .iter()
        .map(|name| name.to_ascii_lowercase())
        .collect();

    let indices = headers
        .iter()
        .enumerate()
        .filter(|(idx, header)| *idx != label_idx && !ignore.contains(&header.to_ascii_lowercase()))
        .map(|(idx, _)| idx)
        .collect();

    Ok(indices)
}
