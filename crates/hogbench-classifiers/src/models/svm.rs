use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_svm::{Svm, SvmParams};
use log::debug;
use ndarray::{Array1, Array2, Axis};

use crate::config::ModelType;
use crate::error::{Error, Result};
use crate::models::classifier_trait::ClassifierModel;
use crate::models::utils::{check_feature_width, check_training_data, distinct_classes, majority_vote};

/// Binary machine separating `positive` (true) from `negative` (false).
struct PairMachine {
    positive: usize,
    negative: usize,
    model: Svm<f64, bool>,
}

/// C-support vector classifier.
///
/// `linfa-svm` only trains binary machines, so multi-class problems are solved
/// one-vs-one: one machine per pair of classes seen in training, and each test
/// sample goes to the class with the most pairwise wins.
pub struct SVMClassifier {
    params: ModelType,
    classes: Vec<usize>,
    machines: Vec<PairMachine>,
    n_features: Option<usize>,
}

impl SVMClassifier {
    pub fn new(params: ModelType) -> Self {
        SVMClassifier {
            params,
            classes: Vec::new(),
            machines: Vec::new(),
            n_features: None,
        }
    }

    fn svm_params(&self) -> Result<SvmParams<f64, bool>> {
        let ModelType::SVM {
            c,
            eps,
            kernel,
            gaussian_kernel_eps,
            polynomial_kernel_constant,
            polynomial_kernel_degree,
        } = &self.params
        else {
            return Err(Error::InvalidConfig(format!(
                "Expected ModelType::SVM params, got {:?}",
                self.params
            )));
        };

        let params = Svm::<f64, bool>::params().eps(*eps).pos_neg_weights(*c, *c);

        match kernel.as_str() {
            "linear" => Ok(params.linear_kernel()),
            "gauss" => Ok(params.gaussian_kernel(*gaussian_kernel_eps)),
            "poly" => Ok(params.polynomial_kernel(*polynomial_kernel_constant, *polynomial_kernel_degree)),
            _ => Err(Error::InvalidConfig(format!(
                "Unsupported kernel type: {}. Valid options are: linear, gauss, poly",
                kernel
            ))),
        }
    }
}

impl ClassifierModel for SVMClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[usize]) -> Result<()> {
        check_training_data(self.name(), x, y)?;
        let params = self.svm_params()?;
        let classes = distinct_classes(y);

        let mut machines = Vec::new();
        for (i, &positive) in classes.iter().enumerate() {
            for &negative in &classes[i + 1..] {
                let rows: Vec<usize> = y
                    .iter()
                    .enumerate()
                    .filter(|(_, &label)| label == positive || label == negative)
                    .map(|(row, _)| row)
                    .collect();
                let records = x.select(Axis(0), &rows);
                let targets = rows.iter().map(|&row| y[row] == positive).collect::<Array1<bool>>();
                let dataset = Dataset::new(records, targets);

                let model = params
                    .fit(&dataset)
                    .map_err(|e| Error::model("SVM", e))?;
                machines.push(PairMachine {
                    positive,
                    negative,
                    model,
                });
            }
        }

        debug!(
            "SVM trained {} one-vs-one machines for {} classes",
            machines.len(),
            classes.len()
        );

        self.classes = classes;
        self.machines = machines;
        self.n_features = Some(x.ncols());
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<usize>> {
        let n_features = self
            .n_features
            .ok_or_else(|| Error::NotFitted(self.name().to_string()))?;
        check_feature_width(self.name(), n_features, x)?;

        // A single training class needs no machine.
        if let [only] = self.classes[..] {
            return Ok(vec![only; x.nrows()]);
        }

        let n_codes = self.classes.last().map(|&c| c + 1).unwrap_or(0);
        let decisions: Vec<(usize, usize, Array1<bool>)> = self
            .machines
            .iter()
            .map(|machine| {
                let decided: Array1<bool> = machine.model.predict(x);
                (machine.positive, machine.negative, decided)
            })
            .collect();
        Ok(tally_votes(x.nrows(), n_codes, &decisions))
    }

    fn name(&self) -> &str {
        "SVM"
    }
}

/// One-vs-one vote count per sample from `(positive, negative, decisions)`
/// triples; each sample takes the class with most wins, ties going to the
/// lowest code.
fn tally_votes(
    n_samples: usize,
    n_codes: usize,
    decisions: &[(usize, usize, Array1<bool>)],
) -> Vec<usize> {
    let mut votes = Array2::<usize>::zeros((n_samples, n_codes));
    for (positive, negative, machine_decisions) in decisions {
        for (row, &is_positive) in machine_decisions.iter().enumerate() {
            let winner = if is_positive { *positive } else { *negative };
            votes[[row, winner]] += 1;
        }
    }
    votes
        .rows()
        .into_iter()
        .map(|row| majority_vote(&row.to_vec()))
        .collect()
}
