use anyhow::Result;
use ndarray::{Array1, Array2};

/// Contract shared by every estimator wrapper in this crate.
///
/// Labels are non-negative class ids as read from the label column. A model
/// is fitted once and can then predict any number of matrices with the same
/// column count.
pub trait ClassifierModel {
    /// Fit the model on rows of `x` labelled by `y`.
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<usize>) -> Result<()>;

    /// Predict one class label per row of `x`. Fails if the model has not
    /// been fitted.
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}
