use linfa_nn::distance::L2Dist;
use linfa_nn::{CommonNearestNeighbour, NearestNeighbour};
use ndarray::Array2;

use crate::config::ModelType;
use crate::error::{Error, Result};
use crate::models::classifier_trait::ClassifierModel;
use crate::models::utils::{check_feature_width, check_training_data, majority_vote};

/// k-nearest-neighbours classifier with Euclidean distance.
///
/// Fitting only stores the training set; the neighbour index is built per
/// `predict` call because it borrows the stored rows. Each sample takes the
/// majority label of its `k` nearest training rows, ties going to the lowest
/// class code.
pub struct KNNClassifier {
    params: ModelType,
    train_x: Option<Array2<f64>>,
    train_y: Vec<usize>,
}

impl KNNClassifier {
    pub fn new(params: ModelType) -> Self {
        KNNClassifier {
            params,
            train_x: None,
            train_y: Vec::new(),
        }
    }

    fn k(&self) -> Result<usize> {
        match &self.params {
            ModelType::KNN { k } if *k > 0 => Ok(*k),
            ModelType::KNN { .. } => Err(Error::InvalidConfig(
                "KNN requires k >= 1".to_string(),
            )),
            other => Err(Error::InvalidConfig(format!(
                "Expected ModelType::KNN params, got {:?}",
                other
            ))),
        }
    }
}

impl ClassifierModel for KNNClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[usize]) -> Result<()> {
        check_training_data(self.name(), x, y)?;
        self.k()?;
        self.train_x = Some(x.to_owned());
        self.train_y = y.to_vec();
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<usize>> {
        let train_x = self
            .train_x
            .as_ref()
            .ok_or_else(|| Error::NotFitted(self.name().to_string()))?;
        check_feature_width(self.name(), train_x.ncols(), x)?;

        let k = self.k()?.min(train_x.nrows());
        let n_codes = self.train_y.iter().max().map(|&c| c + 1).unwrap_or(0);
        let index = CommonNearestNeighbour::LinearSearch
            .from_batch(train_x, L2Dist)
            .map_err(|e| Error::model(self.name(), e))?;

        let mut predictions = Vec::with_capacity(x.nrows());
        for sample in x.rows() {
            let neighbours = index
                .k_nearest(sample, k)
                .map_err(|e| Error::model(self.name(), e))?;
            let mut votes = vec![0usize; n_codes];
            for (_, row) in neighbours {
                votes[self.train_y[row]] += 1;
            }
            predictions.push(majority_vote(&votes));
        }

        Ok(predictions)
    }

    fn name(&self) -> &str {
        "KNN"
    }
}
