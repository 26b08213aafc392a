//! End-to-end runs of the benchmark pipeline on synthetic image folders.

mod common;

use hogbench_classifiers::bench::run_pipeline;
use hogbench_classifiers::config::BenchConfig;
use hogbench_classifiers::data_handling::format_class_list;
use hogbench_classifiers::preprocessing::LabelEncoder;
use hogbench_classifiers::Error;

#[test]
fn cat_dog_scenario_reports_three_models() {
    let dir = tempfile::tempdir().unwrap();
    common::cat_dog_dataset(dir.path());

    let config = BenchConfig::new(dir.path());
    let outcome = run_pipeline(&config).unwrap();

    assert_eq!(format_class_list(&outcome.dataset.class_names()), "['cat', 'dog']");
    for count in &outcome.dataset.class_counts {
        assert_eq!(count.count, 5);
    }
    assert_eq!(outcome.dataset.n_samples(), 10);
    assert_eq!(outcome.dataset.labels.len(), 10);

    let results = outcome.bench.results();
    let names: Vec<&str> = results.iter().map(|r| r.model.as_str()).collect();
    assert_eq!(names, vec!["SVM", "KNN", "Decision Tree"]);
    for result in &results {
        assert!((0.0..=1.0).contains(&result.accuracy));
        assert!((0.0..=1.0).contains(&result.precision));
        assert!((0.0..=1.0).contains(&result.recall));
    }
    assert_eq!(outcome.bench.split.y_test.len(), 2);
    assert_eq!(outcome.bench.split.y_train.len(), 8);
}

#[test]
fn same_seed_gives_identical_runs() {
    let dir = tempfile::tempdir().unwrap();
    common::cat_dog_dataset(dir.path());
    let config = BenchConfig::new(dir.path());

    let first = run_pipeline(&config).unwrap();
    let second = run_pipeline(&config).unwrap();

    assert_eq!(first.bench.split.test_indices, second.bench.split.test_indices);
    assert_eq!(first.bench.split.train_indices, second.bench.split.train_indices);
    for (a, b) in first
        .bench
        .evaluations
        .iter()
        .zip(second.bench.evaluations.iter())
    {
        assert_eq!(a.predictions, b.predictions);
        assert_eq!(a.result.accuracy, b.result.accuracy);
        assert_eq!(a.report.rows, b.report.rows);
    }
}

#[test]
fn encoder_round_trips_loaded_labels() {
    let dir = tempfile::tempdir().unwrap();
    common::cat_dog_dataset(dir.path());
    let outcome = run_pipeline(&BenchConfig::new(dir.path())).unwrap();

    let (encoder, codes) = LabelEncoder::fit_transform(&outcome.dataset.labels);
    assert_eq!(encoder, outcome.encoder);
    assert_eq!(encoder.inverse_transform(&codes).unwrap(), outcome.dataset.labels);
    assert_eq!(encoder.classes(), &["cat", "dog"]);
}

#[test]
fn missing_dataset_fails_the_pipeline() {
    let err = run_pipeline(&BenchConfig::new("/nonexistent/hogbench/train")).unwrap_err();
    assert!(matches!(err, Error::MissingDataset(_)));
}
