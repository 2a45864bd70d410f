use anyhow::{anyhow, bail, ensure, Result};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use ndarray::{Array1, Array2};

use crate::config::{ModelConfig, ModelType};
use crate::models::classifier_trait::ClassifierModel;

/// Gradient Boosting Decision Tree (GBDT) classifier.
///
/// `gbdt` only trains binary log-likelihood models, so one booster is fitted
/// per class (that class +1, every other class -1) and the class with the
/// highest score wins.
pub struct GBDTClassifier {
    classes: Vec<usize>,
    models: Vec<(usize, GBDT)>,
    feature_size: usize,
    params: ModelConfig,
}

impl GBDTClassifier {
    pub fn new(params: ModelConfig) -> Self {
        GBDTClassifier {
            classes: Vec::new(),
            models: Vec::new(),
            feature_size: 0,
            params,
        }
    }

    fn booster_config(&self, feature_size: usize) -> Result<Config> {
        let ModelType::GBDT {
            max_depth,
            num_boost_round,
            debug,
            training_optimization_level,
            min_leaf_size,
        } = &self.params.model_type
        else {
            bail!(
                "Expected ModelType::GBDT params, got {:?}",
                self.params.model_type
            );
        };

        let mut config = Config::new();
        config.set_feature_size(feature_size);
        config.set_shrinkage(self.params.learning_rate);
        config.set_max_depth(*max_depth);
        config.set_iterations(*num_boost_round as usize);
        config.set_debug(*debug);
        config.set_training_optimization_level(*training_optimization_level);
        config.set_min_leaf_size(*min_leaf_size);
        config.set_loss("LogLikelyhood");
        Ok(config)
    }
}

fn to_data_vec(x: &Array2<f64>, labels: Option<&[f32]>) -> DataVec {
    let mut data = DataVec::with_capacity(x.nrows());
    for (i, row) in x.outer_iter().enumerate() {
        let features = row.iter().map(|&v| v as f32).collect::<Vec<f32>>();
        match labels {
            Some(labels) => data.push(Data::new_training_data(features, 1.0, labels[i], None)),
            None => data.push(Data::new_test_data(features, None)),
        }
    }
    data
}

impl ClassifierModel for GBDTClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<usize>) -> Result<()> {
        ensure!(x.nrows() > 0, "Cannot fit GBDT on an empty matrix");
        ensure!(
            x.nrows() == y.len(),
            "Feature matrix has {} rows but {} labels",
            x.nrows(),
            y.len()
        );

        let feature_size = x.ncols();
        let config = self.booster_config(feature_size)?;

        let mut classes = y.to_vec();
        classes.sort_unstable();
        classes.dedup();

        self.models.clear();
        // A single class needs no booster at all.
        let boosted: &[usize] = if classes.len() > 1 { classes.as_slice() } else { &[] };
        for &class in boosted {
            let binary: Vec<f32> = y
                .iter()
                .map(|&label| if label == class { 1.0 } else { -1.0 })
                .collect();
            let mut train_x = to_data_vec(x, Some(&binary));

            log::debug!("Fitting GBDT booster for class {}", class);
            let mut booster = GBDT::new(&config);
            booster.fit(&mut train_x);
            self.models.push((class, booster));
        }

        self.classes = classes;
        self.feature_size = feature_size;
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>> {
        if self.classes.is_empty() {
            return Err(anyhow!("{} has not been fitted", self.name()));
        }
        ensure!(
            x.ncols() == self.feature_size,
            "Model was fitted on {} features but the matrix has {}",
            self.feature_size,
            x.ncols()
        );

        let test_x = to_data_vec(x, None);
        let mut best = vec![(self.classes[0], f32::NEG_INFINITY); x.nrows()];
        for (class, booster) in &self.models {
            let scores = booster.predict(&test_x);
            for (slot, &score) in best.iter_mut().zip(scores.iter()) {
                if score > slot.1 {
                    *slot = (*class, score);
                }
            }
        }

        Ok(best.into_iter().map(|(class, _)| class).collect())
    }

    fn name(&self) -> &str {
        self.params.model_type.display_name()
    }
}

#[cfg(test)]
mod tests {
    use super::GBDTClassifier;
    use crate::config::{ModelConfig, ModelType};
    use crate::models::classifier_trait::ClassifierModel;
    use ndarray::{array, Array1, Array2};

    fn params() -> ModelConfig {
        ModelConfig {
            learning_rate: 0.3,
            model_type: ModelType::GBDT {
                max_depth: 3,
                num_boost_round: 20,
                debug: false,
                training_optimization_level: 2,
                min_leaf_size: 1,
            },
        }
    }

    #[test]
    fn test_gbdt_classifier_three_classes() {
        // The class is determined by the first feature's band.
        let mut values = Vec::new();
        let mut labels = Vec::new();
        for i in 0..30 {
            let band = i % 3;
            values.push(band as f64 * 10.0 + (i as f64) * 0.01);
            values.push(((i * 7) % 5) as f64);
            labels.push(band + 1);
        }
        let x = Array2::from_shape_vec((30, 2), values).unwrap();
        let y = Array1::from_vec(labels);

        let mut classifier = GBDTClassifier::new(params());
        classifier.fit(&x, &y).unwrap();

        let predictions = classifier.predict(&x).unwrap();
        assert_eq!(predictions.len(), y.len());
        let correct = predictions.iter().zip(y.iter()).filter(|(p, t)| p == t).count();
        assert!(correct >= 27, "only {} of 30 correct", correct);
    }

    #[test]
    fn test_single_class_predicts_that_class() {
        let x = array![[0.0], [1.0], [2.0]];
        let y = array![4usize, 4, 4];

        let mut classifier = GBDTClassifier::new(params());
        classifier.fit(&x, &y).unwrap();
        assert_eq!(classifier.predict(&x).unwrap(), y);
    }

    #[test]
    fn test_wrong_params_errors() {
        let mut classifier = GBDTClassifier::new(ModelConfig::default());
        let x = array![[0.0], [1.0]];
        let y = array![1usize, 2];
        assert!(classifier.fit(&x, &y).is_err());
    }
}
