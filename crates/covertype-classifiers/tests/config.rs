//! Integration tests for ModelConfig / ModelType.

use covertype_classifiers::config::{default_models, ModelConfig, ModelType};

#[test]
fn model_type_default_is_logistic() {
    match ModelType::default() {
        ModelType::LogisticRegression { max_iterations, .. } => assert!(max_iterations > 0),
        other => panic!("default ModelType should be LogisticRegression, got {:?}", other),
    }
}

#[test]
fn model_type_from_str_known_names() {
    let gbdt: ModelType = "gbdt".parse().unwrap();
    match gbdt {
        ModelType::GBDT { max_depth, num_boost_round, .. } => {
            assert_eq!(max_depth, 3);
            assert_eq!(num_boost_round, 100);
        }
        other => panic!("expected GBDT, got {:?}", other),
    }

    let svm: ModelType = "SVM".parse().unwrap();
    match svm {
        ModelType::SVM { kernel, gaussian_kernel_eps, .. } => {
            assert_eq!(kernel, "gauss");
            assert!(gaussian_kernel_eps.is_none());
        }
        other => panic!("expected SVM, got {:?}", other),
    }

    assert!(matches!("logreg".parse::<ModelType>(), Ok(ModelType::LogisticRegression { .. })));
}

#[test]
fn model_type_from_str_unknown_errors() {
    let result: Result<ModelType, _> = "random_forest".parse();
    assert!(result.is_err());
}

#[test]
fn default_models_cover_three_estimators() {
    let models = default_models();
    let names: Vec<&str> = models.iter().map(|m| m.model_type.short_name()).collect();
    assert_eq!(names, vec!["logistic", "gbdt", "svm"]);
    assert!(models.iter().all(|m| m.learning_rate > 0.0));
}

#[test]
fn model_config_new() {
    let cfg = ModelConfig::new(0.05, "gbdt".parse().unwrap());
    assert!((cfg.learning_rate - 0.05).abs() < 1e-6);
    assert_eq!(cfg.model_type.display_name(), "Gradient Boosting");
}

#[test]
fn model_config_serializes_to_json() {
    let cfg = ModelConfig::new(0.1, "gbdt".parse().unwrap());
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("learning_rate"));
    assert!(json.contains("GBDT"));
}

#[test]
fn model_config_round_trips_json() {
    for cfg in default_models() {
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ModelConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}

#[test]
fn model_config_parses_hand_written_json() {
    let json = r#"{
        "learning_rate": 0.2,
        "SVM": {
            "eps": 0.01,
            "c": [2.0, 2.0],
            "kernel": "linear",
            "gaussian_kernel_eps": null,
            "polynomial_kernel_constant": 1.0,
            "polynomial_kernel_degree": 2.0
        }
    }"#;
    let cfg: ModelConfig = serde_json::from_str(json).unwrap();
    match cfg.model_type {
        ModelType::SVM { c, kernel, .. } => {
            assert_eq!(c, (2.0, 2.0));
            assert_eq!(kernel, "linear");
        }
        other => panic!("expected SVM, got {:?}", other),
    }
}
