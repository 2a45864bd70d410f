pub mod gbdt;
pub mod logistic;
pub mod svm;

pub mod classifier_trait;
pub mod factory;
