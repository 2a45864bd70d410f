use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Central configuration for models in the crate.
///
/// `learning_rate` is the boosting shrinkage; the logistic and SVM wrappers
/// ignore it.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub learning_rate: f32,

    #[serde(flatten)]
    pub model_type: ModelType,
}

/// Supported model types and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum ModelType {
    LogisticRegression {
        max_iterations: u64,
        alpha: f64,
        gradient_tolerance: f64,
    },
    GBDT {
        max_depth: u32,
        num_boost_round: u32,
        debug: bool,
        training_optimization_level: u8,
        min_leaf_size: usize,
    },
    SVM {
        eps: f64,
        c: (f64, f64),
        kernel: String,
        /// Gaussian kernel width. `None` uses the number of features.
        gaussian_kernel_eps: Option<f64>,
        polynomial_kernel_constant: f64,
        polynomial_kernel_degree: f64,
    },
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::default_logistic()
    }
}

impl ModelType {
    fn default_logistic() -> Self {
        ModelType::LogisticRegression {
            max_iterations: 1000,
            alpha: 1.0,
            gradient_tolerance: 1e-4,
        }
    }

    fn default_gbdt() -> Self {
        ModelType::GBDT {
            max_depth: 3,
            num_boost_round: 100,
            debug: false,
            training_optimization_level: 2,
            min_leaf_size: 1,
        }
    }

    fn default_svm() -> Self {
        ModelType::SVM {
            eps: 0.001,
            c: (1.0, 1.0),
            kernel: "gauss".to_string(),
            gaussian_kernel_eps: None,
            polynomial_kernel_constant: 1.0,
            polynomial_kernel_degree: 3.0,
        }
    }

    /// Short identifier used on the command line and in file names.
    pub fn short_name(&self) -> &'static str {
        match self {
            ModelType::LogisticRegression { .. } => "logistic",
            ModelType::GBDT { .. } => "gbdt",
            ModelType::SVM { .. } => "svm",
        }
    }

    /// Human readable model name used in reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelType::LogisticRegression { .. } => "Logistic Regression",
            ModelType::GBDT { .. } => "Gradient Boosting",
            ModelType::SVM { .. } => "Support Vector Machine",
        }
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "logistic" | "logreg" | "logistic_regression" => Ok(ModelType::default_logistic()),
            "gbdt" | "gradient_boosting" => Ok(ModelType::default_gbdt()),
            "svm" | "svc" => Ok(ModelType::default_svm()),
            _ => Err(format!(
                "Unknown model type: {}. Valid options are: logistic, gbdt, svm",
                s
            )),
        }
    }
}

impl ModelConfig {
    pub fn new(learning_rate: f32, model_type: ModelType) -> Self {
        Self {
            learning_rate,
            model_type,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            model_type: ModelType::default(),
        }
    }
}

impl From<ModelType> for ModelConfig {
    fn from(model_type: ModelType) -> Self {
        ModelConfig {
            model_type,
            ..ModelConfig::default()
        }
    }
}

/// The three models fitted by a default run, in reporting order.
pub fn default_models() -> Vec<ModelConfig> {
    vec![
        ModelType::default_logistic().into(),
        ModelType::default_gbdt().into(),
        ModelType::default_svm().into(),
    ]
}
