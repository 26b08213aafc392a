use ndarray::Array2;

use crate::error::{Error, Result};

/// Index of the highest vote count; ties go to the lowest index.
pub fn majority_vote(votes: &[usize]) -> usize {
    let mut best = 0;
    for (idx, &count) in votes.iter().enumerate() {
        if count > votes[best] {
            best = idx;
        }
    }
    best
}

/// Check that `x` and `y` describe the same, non-empty set of samples.
pub fn check_training_data(model: &str, x: &Array2<f64>, y: &[usize]) -> Result<()> {
    if x.nrows() != y.len() {
        return Err(Error::LengthMismatch {
            left: x.nrows(),
            right: y.len(),
        });
    }
    if y.is_empty() {
        return Err(Error::Model {
            model: model.to_string(),
            message: "cannot fit on an empty training set".to_string(),
        });
    }
    Ok(())
}

/// Check that prediction rows have the width the model was trained on.
pub fn check_feature_width(model: &str, expected: usize, x: &Array2<f64>) -> Result<()> {
    if x.ncols() != expected {
        return Err(Error::Model {
            model: model.to_string(),
            message: format!(
                "expected {} features per sample, got {}",
                expected,
                x.ncols()
            ),
        });
    }
    Ok(())
}

/// Sorted distinct class codes.
pub fn distinct_classes(y: &[usize]) -> Vec<usize> {
    let mut classes = y.to_vec();
    classes.sort_unstable();
    classes.dedup();
    classes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn majority_vote_breaks_ties_low() {
        assert_eq!(majority_vote(&[1, 3, 3]), 1);
        assert_eq!(majority_vote(&[2, 2]), 0);
        assert_eq!(majority_vote(&[0, 0, 1]), 2);
    }

    #[test]
    fn distinct_classes_are_sorted() {
        assert_eq!(distinct_classes(&[3, 1, 3, 0]), vec![0, 1, 3]);
    }
}
