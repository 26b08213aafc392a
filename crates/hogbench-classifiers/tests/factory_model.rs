use hogbench_classifiers::config::ModelType;
use hogbench_classifiers::models::factory;
use ndarray::Array2;

#[test]
fn test_factory_builds_and_predicts() {
    // tiny dataset with three classes
    let x = Array2::from_shape_vec(
        (9, 2),
        vec![
            1.0, 0.0, // class 0
            1.1, 0.1, // class 0
            0.9, 0.0, // class 0
            0.0, 1.0, // class 1
            0.1, 1.1, // class 1
            0.0, 0.9, // class 1
            -1.0, -1.0, // class 2
            -1.1, -0.9, // class 2
            -0.9, -1.1, // class 2
        ],
    )
    .expect("failed to create feature matrix");
    let y = vec![0, 0, 0, 1, 1, 1, 2, 2, 2];

    for model_type in ModelType::benchmark_suite() {
        let mut model = factory::build_model(model_type);
        model.fit(&x, &y).unwrap();
        let predictions = model.predict(&x).unwrap();
        assert_eq!(predictions.len(), x.nrows());
        assert_eq!(predictions, y, "{} should fit the training data", model.name());
    }
}

#[test]
fn model_type_round_trips_through_json() {
    for model_type in ModelType::benchmark_suite() {
        let json = serde_json::to_string(&model_type).unwrap();
        let back: ModelType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model_type);
    }
}

#[test]
fn model_type_from_str_unknown_errors() {
    let result: Result<ModelType, _> = "random_forest".parse();
    assert!(result.is_err());
    assert_eq!("KNN".parse::<ModelType>().unwrap(), ModelType::KNN { k: 3 });
}
