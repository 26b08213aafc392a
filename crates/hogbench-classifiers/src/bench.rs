//! The model bench: split, fit every model of the suite, score and report.
use std::time::Instant;

use log::info;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::config::{BenchConfig, ModelType};
use crate::data_handling::{load_dataset, train_test_split, ImageDataset, TrainTestSplit};
use crate::error::{Error, Result};
use crate::models::classifier_trait::ClassifierModel;
use crate::models::factory::build_model;
use crate::preprocessing::LabelEncoder;
use crate::report::{render_comparison_table, ClassificationReport};
use crate::stats::{accuracy_score, precision_score_macro, recall_score_macro};

/// Scores of one fitted model on the test partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Training Time (s)")]
    pub training_time_secs: f64,
    #[serde(rename = "Accuracy")]
    pub accuracy: f64,
    #[serde(rename = "Precision")]
    pub precision: f64,
    #[serde(rename = "Recall")]
    pub recall: f64,
}

#[derive(Debug, Clone)]
pub struct ModelEvaluation {
    pub result: ModelResult,
    pub report: ClassificationReport,
    /// Predicted class codes, aligned with `TrainTestSplit::y_test`.
    pub predictions: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct BenchOutcome {
    pub split: TrainTestSplit,
    pub evaluations: Vec<ModelEvaluation>,
}

impl BenchOutcome {
    pub fn results(&self) -> Vec<ModelResult> {
        self.evaluations.iter().map(|e| e.result.clone()).collect()
    }
}

/// Fit `model` on the training partition and score it on the test partition.
pub fn evaluate_model(
    model: &mut dyn ClassifierModel,
    split: &TrainTestSplit,
    encoder: &LabelEncoder,
) -> Result<ModelEvaluation> {
    let start = Instant::now();
    model.fit(&split.x_train, &split.y_train)?;
    let training_time_secs = start.elapsed().as_secs_f64();
    info!("Trained {} in {:.3}s", model.name(), training_time_secs);

    let predictions = model.predict(&split.x_test)?;
    let result = ModelResult {
        model: model.name().to_string(),
        training_time_secs,
        accuracy: accuracy_score(&split.y_test, &predictions)?,
        precision: precision_score_macro(&split.y_test, &predictions)?,
        recall: recall_score_macro(&split.y_test, &predictions)?,
    };
    let report = ClassificationReport::new(&split.y_test, &predictions, encoder)?;

    Ok(ModelEvaluation {
        result,
        report,
        predictions,
    })
}

/// Split `x` / `y`, run every model of `models` and print one report per model
/// followed by the comparison table.
pub fn run_models(
    x: &Array2<f64>,
    y: &[usize],
    encoder: &LabelEncoder,
    config: &BenchConfig,
    models: Vec<ModelType>,
) -> Result<BenchOutcome> {
    let split = train_test_split(x, y, config.test_fraction, config.seed)?;
    info!(
        "Training on {} samples, testing on {} samples",
        split.y_train.len(),
        split.y_test.len()
    );

    let mut evaluations = Vec::with_capacity(models.len());
    for model_type in models {
        let mut model = build_model(model_type);
        let evaluation = evaluate_model(model.as_mut(), &split, encoder)?;

        println!("\nClassification Report for {}:", evaluation.result.model);
        println!("{}", evaluation.report);
        evaluations.push(evaluation);
    }

    let outcome = BenchOutcome { split, evaluations };
    println!("\nComparison of Models:");
    print!("{}", render_comparison_table(&outcome.results()));
    Ok(outcome)
}

/// Run the fixed benchmark suite (SVM, KNN, Decision Tree).
pub fn run_bench(
    x: &Array2<f64>,
    y: &[usize],
    encoder: &LabelEncoder,
    config: &BenchConfig,
) -> Result<BenchOutcome> {
    run_models(x, y, encoder, config, ModelType::benchmark_suite())
}

/// Everything a run produced: the loaded dataset, its encoding and the bench.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub dataset: ImageDataset,
    pub encoder: LabelEncoder,
    pub bench: BenchOutcome,
}

/// Load the dataset at `config.dataset_path`, encode its labels and run the
/// benchmark suite.
pub fn run_pipeline(config: &BenchConfig) -> Result<PipelineOutcome> {
    config.validate()?;

    let dataset = load_dataset(&config.dataset_path, &config.features)?;
    dataset.log_summary();

    let (encoder, y) = LabelEncoder::fit_transform(&dataset.labels);
    if encoder.n_classes() == 0 {
        return Err(Error::EmptyDataset);
    }

    let bench = run_bench(&dataset.x, &y, &encoder, config)?;
    Ok(PipelineOutcome {
        dataset,
        encoder,
        bench,
    })
}
