//! Data structures and helpers for holding a labelled table and splitting it.
//!
//! `TabularData` is the in-memory form of the CSV input. `train_test_split`
//! produces two disjoint partitions from a seeded permutation so a run can be
//! reproduced exactly.
use std::collections::BTreeMap;

use anyhow::{bail, ensure, Result};
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Default fraction of rows held out for testing.
pub const DEFAULT_TEST_RATIO: f64 = 0.2;

/// Default seed for the train/test permutation.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone)]
pub struct TabularData {
    /// Feature matrix, one row per sample
    pub x: Array2<f64>,
    /// Class label per sample
    pub y: Array1<usize>,
    /// Feature names in column order
    pub feature_names: Vec<String>,
    /// Name of the label column in the source table
    pub label_column: String,
}

impl TabularData {
    pub fn new(
        x: Array2<f64>,
        y: Array1<usize>,
        feature_names: Vec<String>,
        label_column: impl Into<String>,
    ) -> Result<Self> {
        ensure!(
            x.nrows() == y.len(),
            "Feature matrix has {} rows but {} labels were provided",
            x.nrows(),
            y.len()
        );
        ensure!(
            x.ncols() == feature_names.len(),
            "Feature matrix has {} columns but {} feature names were provided",
            x.ncols(),
            feature_names.len()
        );
        Ok(TabularData {
            x,
            y,
            feature_names,
            label_column: label_column.into(),
        })
    }

    pub fn nsamples(&self) -> usize {
        self.x.nrows()
    }

    pub fn nfeatures(&self) -> usize {
        self.x.ncols()
    }

    /// Sorted, de-duplicated class labels present in `y`.
    pub fn classes(&self) -> Vec<usize> {
        self.class_counts().into_keys().collect()
    }

    pub fn class_counts(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for &label in self.y.iter() {
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }

    /// Build a new table holding the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> TabularData {
        TabularData {
            x: self.x.select(Axis(0), indices),
            y: self.y.select(Axis(0), indices),
            feature_names: self.feature_names.clone(),
            label_column: self.label_column.clone(),
        }
    }

    pub fn log_input_data_summary(&self) {
        log::info!(
            "Input data: {} rows, {} feature columns, label column '{}'",
            self.nsamples(),
            self.nfeatures(),
            self.label_column
        );
        for (label, count) in self.class_counts() {
            log::info!("  class {}: {} rows", label, count);
        }
    }
}

/// Two disjoint partitions of a `TabularData` together with the source row
/// indices of each side.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train: TabularData,
    pub test: TabularData,
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

impl TrainTestSplit {
    /// Apply `f` to both feature matrices, keeping labels and indices.
    pub fn map_features<F>(&self, mut f: F) -> Result<TrainTestSplit>
    where
        F: FnMut(&Array2<f64>) -> Result<Array2<f64>>,
    {
        let train_x = f(&self.train.x)?;
        let test_x = f(&self.test.x)?;
        Ok(TrainTestSplit {
            train: TabularData::new(
                train_x,
                self.train.y.clone(),
                self.train.feature_names.clone(),
                self.train.label_column.clone(),
            )?,
            test: TabularData::new(
                test_x,
                self.test.y.clone(),
                self.test.feature_names.clone(),
                self.test.label_column.clone(),
            )?,
            train_indices: self.train_indices.clone(),
            test_indices: self.test_indices.clone(),
        })
    }
}

/// Split `data` into train and test partitions.
///
/// Rows are permuted with a `StdRng` seeded from `seed`; the first
/// `ceil(test_ratio * n)` permuted rows form the test side and the rest the
/// training side. The same seed always yields the same split.
///
/// # Errors
///
/// Fails when `test_ratio` is not strictly between 0 and 1, or when either
/// partition would be empty.
pub fn train_test_split(data: &TabularData, test_ratio: f64, seed: u64) -> Result<TrainTestSplit> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        bail!("test_ratio must be in (0, 1), got {}", test_ratio);
    }

    let n = data.nsamples();
    let n_test = (test_ratio * n as f64).ceil() as usize;
    let n_train = n.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        bail!(
            "Cannot split {} rows with test_ratio {}: train would have {} rows and test {} rows",
            n,
            test_ratio,
            n_train,
            n_test
        );
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_indices = indices[..n_test].to_vec();
    let train_indices = indices[n_test..].to_vec();

    log::debug!(
        "Split {} rows into {} train / {} test (seed {})",
        n,
        train_indices.len(),
        test_indices.len(),
        seed
    );

    Ok(TrainTestSplit {
        train: data.select_rows(&train_indices),
        test: data.select_rows(&test_indices),
        train_indices,
        test_indices,
    })
}
