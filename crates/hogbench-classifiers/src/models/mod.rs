pub mod decision_tree;
pub mod knn;
pub mod svm;
pub mod utils;

pub mod classifier_trait;
pub mod factory;
