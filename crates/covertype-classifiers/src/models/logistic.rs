use anyhow::{anyhow, bail, ensure, Result};
use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_logistic::{MultiFittedLogisticRegression, MultiLogisticRegression};
use ndarray::{Array1, Array2};

use crate::config::{ModelConfig, ModelType};
use crate::models::classifier_trait::ClassifierModel;

/// Multinomial logistic regression (L2 penalized, L-BFGS solver).
pub struct LogisticRegressionClassifier {
    model: Option<MultiFittedLogisticRegression<f64, usize>>,
    feature_size: usize,
    params: ModelConfig,
}

impl LogisticRegressionClassifier {
    pub fn new(params: ModelConfig) -> Self {
        LogisticRegressionClassifier {
            model: None,
            feature_size: 0,
            params,
        }
    }
}

impl ClassifierModel for LogisticRegressionClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<usize>) -> Result<()> {
        let ModelType::LogisticRegression {
            max_iterations,
            alpha,
            gradient_tolerance,
        } = &self.params.model_type
        else {
            bail!(
                "Expected ModelType::LogisticRegression params, got {:?}",
                self.params.model_type
            );
        };

        log::debug!(
            "Fitting logistic regression: max_iterations={}, alpha={}, gradient_tolerance={}",
            max_iterations,
            alpha,
            gradient_tolerance
        );

        let dataset = Dataset::new(x.to_owned(), y.to_owned());
        let model = MultiLogisticRegression::<f64>::default()
            .max_iterations(*max_iterations)
            .alpha(*alpha)
            .gradient_tolerance(*gradient_tolerance)
            .fit(&dataset)
            .map_err(|e| anyhow!("Logistic regression failed to fit: {}", e))?;

        self.model = Some(model);
        self.feature_size = x.ncols();
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| anyhow!("{} has not been fitted", self.name()))?;
        ensure!(
            x.ncols() == self.feature_size,
            "Model was fitted on {} features but the matrix has {}",
            self.feature_size,
            x.ncols()
        );
        Ok(model.predict(x))
    }

    fn name(&self) -> &str {
        self.params.model_type.display_name()
    }
}
