//! Feature standardization.
//!
//! Provides a `Scaler` holding per-column mean/std fitted on one matrix and
//! applied to others. Statistics are population statistics (ddof = 0).
//! A column with zero variance keeps a scale of 1.0 so it is centered but not
//! divided.

use anyhow::{ensure, Context, Result};
use ndarray::{Array1, Array2, Axis};

use crate::data_handling::TrainTestSplit;

/// Simple standard scaler (per-column mean/std).
#[derive(Clone, Debug, PartialEq)]
pub struct Scaler {
    pub mean: Array1<f64>,
    pub std: Array1<f64>,
}

impl Scaler {
    /// Standard deviations below this are treated as zero.
    const MIN_STD: f64 = 1e-12;

    pub fn nfeatures(&self) -> usize {
        self.mean.len()
    }
}

/// Fit a `Scaler` from an `Array2<f64>` where rows are samples and
/// columns are features.
pub fn fit_scaler(x: &Array2<f64>) -> Result<Scaler> {
    let (nrows, ncols) = x.dim();
    ensure!(
        nrows > 0 && ncols > 0,
        "fit_scaler requires a non-empty matrix, got {}x{}",
        nrows,
        ncols
    );

    let mean = x
        .mean_axis(Axis(0))
        .context("Failed to compute column means")?;
    let mut std = x.std_axis(Axis(0), 0.0);

    let mut constant = 0;
    for s in std.iter_mut() {
        if *s < Scaler::MIN_STD {
            *s = 1.0;
            constant += 1;
        }
    }
    if constant > 0 {
        log::warn!(
            "{} of {} feature columns have zero variance in the fitting data",
            constant,
            ncols
        );
    }

    Ok(Scaler { mean, std })
}

/// Transform all rows using the provided `Scaler` and return a new matrix.
pub fn transform_all(x: &Array2<f64>, sc: &Scaler) -> Result<Array2<f64>> {
    ensure!(
        x.ncols() == sc.nfeatures(),
        "Scaler was fitted on {} features but the matrix has {}",
        sc.nfeatures(),
        x.ncols()
    );
    Ok((x - &sc.mean) / &sc.std)
}

/// Convenience: fit scaler and return transformed matrix in one call.
pub fn fit_transform(x: &Array2<f64>) -> Result<Array2<f64>> {
    let sc = fit_scaler(x)?;
    transform_all(x, &sc)
}

/// Fit a scaler on the training side of `split` and apply it to both sides.
///
/// The test rows never contribute to the fitted statistics.
pub fn scale_split(split: &TrainTestSplit) -> Result<(TrainTestSplit, Scaler)> {
    let sc = fit_scaler(&split.train.x)?;
    let scaled = split.map_features(|x| transform_all(x, &sc))?;
    Ok((scaled, sc))
}
