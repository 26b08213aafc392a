//! Classification metrics over integer class codes.
//!
//! Per-class scores are computed over the labels present in either the truth
//! or the predictions. A class that is never predicted has precision 0 and a
//! class with no true samples has recall 0, so macro averages stay in [0, 1].
use std::collections::BTreeSet;

use ndarray::Array2;

use crate::error::{Error, Result};

/// Precision, recall, F1 and support of one class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassScores {
    pub label: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

fn check_targets(y_true: &[usize], y_pred: &[usize]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(Error::LengthMismatch {
            left: y_true.len(),
            right: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(Error::EmptyInput("classification metrics"));
    }
    Ok(())
}

/// Sorted distinct labels found in either input.
pub fn unique_labels(y_true: &[usize], y_pred: &[usize]) -> Vec<usize> {
    y_true
        .iter()
        .chain(y_pred.iter())
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Confusion matrix with truth along rows and predictions along columns.
pub fn confusion_matrix(y_true: &[usize], y_pred: &[usize], n_classes: usize) -> Result<Array2<usize>> {
    check_targets(y_true, y_pred)?;
    let mut cm = Array2::<usize>::zeros((n_classes, n_classes));
    for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
        if t >= n_classes {
            return Err(Error::UnknownClassCode(t));
        }
        if p >= n_classes {
            return Err(Error::UnknownClassCode(p));
        }
        cm[[t, p]] += 1;
    }
    Ok(cm)
}

pub fn accuracy_score(y_true: &[usize], y_pred: &[usize]) -> Result<f64> {
    check_targets(y_true, y_pred)?;
    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// Scores for every label in `unique_labels(y_true, y_pred)`.
pub fn per_class_scores(y_true: &[usize], y_pred: &[usize]) -> Result<Vec<ClassScores>> {
    check_targets(y_true, y_pred)?;
    let labels = unique_labels(y_true, y_pred);
    let n_classes = labels.last().map(|&l| l + 1).unwrap_or(0);
    let cm = confusion_matrix(y_true, y_pred, n_classes)?;

    let scores = labels
        .into_iter()
        .map(|label| {
            let tp = cm[[label, label]] as f64;
            let predicted = cm.column(label).sum() as f64;
            let support = cm.row(label).sum();
            let precision = if predicted > 0.0 { tp / predicted } else { 0.0 };
            let recall = if support > 0 { tp / support as f64 } else { 0.0 };
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            ClassScores {
                label,
                precision,
                recall,
                f1,
                support,
            }
        })
        .collect();

    Ok(scores)
}

fn macro_average(scores: &[ClassScores], metric: impl Fn(&ClassScores) -> f64) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().map(metric).sum::<f64>() / scores.len() as f64
}

/// Unweighted mean of per-class precision.
pub fn precision_score_macro(y_true: &[usize], y_pred: &[usize]) -> Result<f64> {
    Ok(macro_average(&per_class_scores(y_true, y_pred)?, |s| s.precision))
}

/// Unweighted mean of per-class recall.
pub fn recall_score_macro(y_true: &[usize], y_pred: &[usize]) -> Result<f64> {
    Ok(macro_average(&per_class_scores(y_true, y_pred)?, |s| s.recall))
}

pub fn f1_score_macro(y_true: &[usize], y_pred: &[usize]) -> Result<f64> {
    Ok(macro_average(&per_class_scores(y_true, y_pred)?, |s| s.f1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn perfect_predictions_score_one() {
        let y = [0, 1, 2, 1, 0];
        assert_eq!(accuracy_score(&y, &y).unwrap(), 1.0);
        assert_eq!(precision_score_macro(&y, &y).unwrap(), 1.0);
        assert_eq!(recall_score_macro(&y, &y).unwrap(), 1.0);
    }

    #[test]
    fn macro_scores_weight_classes_equally() {
        // class 0: 3 true, all predicted 0; class 1: 1 true, predicted 0
        let y_true = [0, 0, 0, 1];
        let y_pred = [0, 0, 0, 0];
        assert_abs_diff_eq!(accuracy_score(&y_true, &y_pred).unwrap(), 0.75);
        // precision: class 0 = 3/4, class 1 = 0 (never predicted)
        assert_abs_diff_eq!(precision_score_macro(&y_true, &y_pred).unwrap(), 0.375);
        // recall: class 0 = 1, class 1 = 0
        assert_abs_diff_eq!(recall_score_macro(&y_true, &y_pred).unwrap(), 0.5);
    }

    #[test]
    fn labels_only_in_predictions_are_scored() {
        let y_true = [0, 0];
        let y_pred = [0, 2];
        let scores = per_class_scores(&y_true, &y_pred).unwrap();
        let labels: Vec<usize> = scores.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec![0, 2]);
        assert_eq!(scores[1].support, 0);
        assert_eq!(scores[1].recall, 0.0);
        assert_abs_diff_eq!(recall_score_macro(&y_true, &y_pred).unwrap(), 0.25);
    }

    #[test]
    fn f1_is_harmonic_mean() {
        let y_true = [0, 0, 1, 1];
        let y_pred = [0, 1, 1, 1];
        let scores = per_class_scores(&y_true, &y_pred).unwrap();
        // class 1: precision 2/3, recall 1
        assert_abs_diff_eq!(scores[1].f1, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn confusion_matrix_counts_pairs() {
        let cm = confusion_matrix(&[0, 1, 1, 2], &[0, 1, 2, 2], 3).unwrap();
        assert_eq!(cm[[1, 1]], 1);
        assert_eq!(cm[[1, 2]], 1);
        assert_eq!(cm.sum(), 4);
        assert!(confusion_matrix(&[3], &[0], 3).is_err());
    }

    #[test]
    fn invalid_inputs_are_errors() {
        assert!(matches!(
            accuracy_score(&[0, 1], &[0]),
            Err(Error::LengthMismatch { left: 2, right: 1 })
        ));
        assert!(matches!(
            precision_score_macro(&[], &[]),
            Err(Error::EmptyInput(_))
        ));
    }
}
