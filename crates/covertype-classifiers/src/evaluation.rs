//! Fit, time and score models on a train/test split.
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::ModelConfig;
use crate::data_handling::TrainTestSplit;
use crate::metrics::{accuracy, ClassificationReport, ConfusionMatrix};
use crate::models::classifier_trait::ClassifierModel;
use crate::models::factory::build_model;

/// Outcome of fitting one model and scoring it on the test partition.
#[derive(Debug, Clone, Serialize)]
pub struct ModelResult {
    pub model_name: String,
    pub accuracy: f64,
    pub training_secs: f64,
    pub prediction_secs: f64,
    pub confusion_matrix: ConfusionMatrix,
    pub report: ClassificationReport,
}

/// Fit `model` on the training side of `split` and score it on the test side.
///
/// Only the call to `fit` is included in `training_secs`.
pub fn evaluate_model(model: &mut dyn ClassifierModel, split: &TrainTestSplit) -> Result<ModelResult> {
    let name = model.name().to_string();
    log::info!(
        "Training {} on {} rows x {} features",
        name,
        split.train.nsamples(),
        split.train.nfeatures()
    );

    let start_time = Instant::now();
    model
        .fit(&split.train.x, &split.train.y)
        .with_context(|| format!("Failed to train {}", name))?;
    let training_time = start_time.elapsed();
    log::info!("{} trained in {:?}", name, training_time);

    let start_time = Instant::now();
    let predictions = model
        .predict(&split.test.x)
        .with_context(|| format!("Failed to predict with {}", name))?;
    let prediction_time = start_time.elapsed();

    let actual = split.test.y.to_vec();
    let predicted = predictions.to_vec();
    let accuracy = accuracy(&actual, &predicted)?;
    let confusion_matrix = ConfusionMatrix::from_predictions(&actual, &predicted)?;
    let report = ClassificationReport::from_confusion_matrix(&confusion_matrix);

    Ok(ModelResult {
        model_name: name,
        accuracy,
        training_secs: training_time.as_secs_f64(),
        prediction_secs: prediction_time.as_secs_f64(),
        confusion_matrix,
        report,
    })
}

/// Build and evaluate each configured model in order.
pub fn evaluate_models(configs: &[ModelConfig], split: &TrainTestSplit) -> Result<Vec<ModelResult>> {
    let mut results = Vec::with_capacity(configs.len());
    for config in configs {
        let mut model = build_model(config.clone());
        results.push(evaluate_model(model.as_mut(), split)?);
    }
    Ok(results)
}
