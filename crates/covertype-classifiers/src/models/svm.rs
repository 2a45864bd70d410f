use anyhow::{anyhow, bail, ensure, Result};
use linfa::composing::MultiClassModel;
use linfa::dataset::Pr;
use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_svm::{Svm, SvmParams};
use ndarray::{Array1, Array2};

use crate::config::{ModelConfig, ModelType};
use crate::models::classifier_trait::ClassifierModel;

enum FittedSvm {
    /// Training data held a single class.
    Constant(usize),
    OneVsAll(MultiClassModel<Array2<f64>, usize>),
}

/// Support vector classifier.
///
/// One probabilistic SVM is fitted per class against the rest and the class
/// with the highest probability is predicted.
pub struct SVMClassifier {
    model: Option<FittedSvm>,
    feature_size: usize,
    params: ModelConfig,
}

impl SVMClassifier {
    pub fn new(params: ModelConfig) -> Self {
        SVMClassifier {
            model: None,
            feature_size: 0,
            params,
        }
    }

    fn svm_params(&self, feature_size: usize) -> Result<SvmParams<f64, Pr>> {
        let ModelType::SVM {
            eps,
            c,
            kernel,
            gaussian_kernel_eps,
            polynomial_kernel_constant,
            polynomial_kernel_degree,
        } = &self.params.model_type
        else {
            bail!(
                "Expected ModelType::SVM params, got {:?}",
                self.params.model_type
            );
        };

        let (c1, c2) = *c;
        let params = Svm::<f64, Pr>::params().eps(*eps).pos_neg_weights(c1, c2);

        let params = match kernel.as_str() {
            "linear" => params.linear_kernel(),
            "gauss" => {
                let width = gaussian_kernel_eps.unwrap_or(feature_size as f64);
                log::debug!("SVM gaussian kernel width {}", width);
                params.gaussian_kernel(width)
            }
            "poly" => params.polynomial_kernel(*polynomial_kernel_constant, *polynomial_kernel_degree),
            other => bail!(
                "Unsupported kernel type: {}. Valid options are: linear, gauss, poly",
                other
            ),
        };
        Ok(params)
    }
}

impl ClassifierModel for SVMClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<usize>) -> Result<()> {
        ensure!(x.nrows() > 0, "Cannot fit SVM on an empty matrix");
        ensure!(
            x.nrows() == y.len(),
            "Feature matrix has {} rows but {} labels",
            x.nrows(),
            y.len()
        );

        let feature_size = x.ncols();
        let params = self.svm_params(feature_size)?;

        let first = y[0];
        if y.iter().all(|&label| label == first) {
            log::warn!("SVM training data holds only class {}", first);
            self.model = Some(FittedSvm::Constant(first));
            self.feature_size = feature_size;
            return Ok(());
        }

        let dataset = Dataset::new(x.to_owned(), y.to_owned());
        let binary_sets = dataset
            .one_vs_all()
            .map_err(|e| anyhow!("Failed to build one-vs-all datasets: {}", e))?;

        let mut models = Vec::with_capacity(binary_sets.len());
        for (label, binary) in binary_sets {
            log::debug!("Fitting SVM for class {} against the rest", label);
            let model = params
                .fit(&binary)
                .map_err(|e| anyhow!("SVM failed to fit class {}: {}", label, e))?;
            models.push((label, model));
        }

        self.model = Some(FittedSvm::OneVsAll(models.into_iter().collect()));
        self.feature_size = feature_size;
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

        match model {
            FittedSvm::Constant(label) => Ok(Array1::from_elem(x.nrows(), *label)),
            FittedSvm::OneVsAll(model) => Ok(model.predict(x)),
        }
    }

    fn name(&self) -> &str {
        self.params.model_type.display_name()
    }
}
