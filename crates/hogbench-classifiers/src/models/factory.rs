use crate::config::ModelType;
use crate::models::classifier_trait::ClassifierModel;
use crate::models::decision_tree::DecisionTreeClassifier;
use crate::models::knn::KNNClassifier;
use crate::models::svm::SVMClassifier;

/// Build a boxed classifier model from a `ModelType`.
pub fn build_model(model_type: ModelType) -> Box<dyn ClassifierModel> {
    match model_type {
        ModelType::SVM { .. } => Box::new(SVMClassifier::new(model_type)),
        ModelType::KNN { .. } => Box::new(KNNClassifier::new(model_type)),
        ModelType::DecisionTree { .. } => Box::new(DecisionTreeClassifier::new(model_type)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_names_match_model_types() {
        for model_type in ModelType::benchmark_suite() {
            let expected = model_type.name();
            let model = build_model(model_type);
            assert_eq!(model.name(), expected);
        }
    }
}
