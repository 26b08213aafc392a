use ndarray::Array2;

use crate::error::Result;

/// A small trait abstraction over the benchmarked classifiers.
///
/// Labels are contiguous class codes as produced by
/// [`LabelEncoder`](crate::preprocessing::LabelEncoder).
pub trait ClassifierModel {
    /// Fit the model on one row of `x` per entry of `y`.
    fn fit(&mut self, x: &Array2<f64>, y: &[usize]) -> Result<()>;

    /// Predict one class code per row of `x`.
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<usize>>;

    /// Human readable name used in reports.
    fn name(&self) -> &str {
        "classifier"
    }
}
