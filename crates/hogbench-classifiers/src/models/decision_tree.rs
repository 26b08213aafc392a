use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_trees::{DecisionTree, SplitQuality};
use log::debug;
use ndarray::{Array1, Array2};

use crate::config::ModelType;
use crate::error::{Error, Result};
use crate::models::classifier_trait::ClassifierModel;
use crate::models::utils::{check_feature_width, check_training_data};

/// CART decision tree using Gini impurity.
pub struct DecisionTreeClassifier {
    params: ModelType,
    model: Option<DecisionTree<f64, usize>>,
    n_features: usize,
}

impl DecisionTreeClassifier {
    pub fn new(params: ModelType) -> Self {
        DecisionTreeClassifier {
            params,
            model: None,
            n_features: 0,
        }
    }
}

impl ClassifierModel for DecisionTreeClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[usize]) -> Result<()> {
        check_training_data(self.name(), x, y)?;

        let ModelType::DecisionTree {
            max_depth,
            min_weight_split,
            min_weight_leaf,
        } = &self.params
        else {
            return Err(Error::InvalidConfig(format!(
                "Expected ModelType::DecisionTree params, got {:?}",
                self.params
            )));
        };

        let dataset = Dataset::new(x.to_owned(), Array1::from_vec(y.to_vec()));
        let model = DecisionTree::<f64, usize>::params()
            .split_quality(SplitQuality::Gini)
            .max_depth(*max_depth)
            .min_weight_split(*min_weight_split)
            .min_weight_leaf(*min_weight_leaf)
            .fit(&dataset)
            .map_err(|e| Error::model("Decision Tree", e))?;

        debug!(
            "Decision tree fit with depth {} and {} leaves",
            model.max_depth(),
            model.num_leaves()
        );

        self.model = Some(model);
        self.n_features = x.ncols();
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<usize>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| Error::NotFitted(self.name().to_string()))?;
        check_feature_width(self.name(), self.n_features, x)?;

        let predictions: Array1<usize> = model.predict(x);
        Ok(predictions.to_vec())
    }

    fn name(&self) -> &str {
        "Decision Tree"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_tree_fits_training_data() {
        // label determined by the sign of the second feature
        let x = Array2::from_shape_vec(
            (8, 3),
            vec![
                0.1, 1.0, 5.0, //
                0.4, -1.0, 5.0, //
                0.6, 1.2, 5.0, //
                0.9, -0.8, 5.0, //
                1.2, 0.9, 5.0, //
                1.5, -1.1, 5.0, //
                1.8, 1.1, 5.0, //
                2.1, -0.9, 5.0, //
            ],
        )
        .unwrap();
        let y = vec![1, 0, 1, 0, 1, 0, 1, 0];

        let mut classifier = DecisionTreeClassifier::new("decision_tree".parse::<ModelType>().unwrap());
        classifier.fit(&x, &y).unwrap();
        assert_eq!(classifier.predict(&x).unwrap(), y);
    }

    #[test]
    fn predict_before_fit_is_an_error() {
        let classifier = DecisionTreeClassifier::new(ModelType::KNN { k: 3 });
        let x = Array2::<f64>::zeros((1, 2));
        assert!(matches!(classifier.predict(&x), Err(Error::NotFitted(_))));
    }

    #[test]
    fn mismatched_params_are_rejected() {
        let x = Array2::<f64>::zeros((2, 2));
        let mut classifier = DecisionTreeClassifier::new(ModelType::KNN { k: 3 });
        assert!(matches!(classifier.fit(&x, &[0, 1]), Err(Error::InvalidConfig(_))));
    }
}
