//! covertype-classifiers: train/test evaluation of off-the-shelf classifiers.
//!
//! This crate loads a labelled CSV table, splits it into seeded train/test
//! partitions, standardizes the features using training statistics only, and
//! fits logistic regression, gradient boosting and SVM wrappers behind a
//! common trait. Scoring (accuracy, confusion matrix, per-class report) and
//! Plotly/HTML reporting helpers are provided for the CLI front end.
//!
//! Model fitting is delegated to `linfa-logistic`, `gbdt` and `linfa-svm`.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod metrics;
pub mod models;
pub mod preprocessing;
pub mod report;
