//! End-to-end tests: factory-built models evaluated on a synthetic split.

use covertype_classifiers::config::{default_models, ModelConfig, ModelType};
use covertype_classifiers::data_handling::{train_test_split, TabularData};
use covertype_classifiers::evaluation::{evaluate_model, evaluate_models};
use covertype_classifiers::models::classifier_trait::ClassifierModel;
use covertype_classifiers::models::factory;
use covertype_classifiers::preprocessing::scale_split;
use ndarray::{Array1, Array2};

/// Three well separated clusters in a 4 feature space, with one feature on
/// a much larger scale than the others.
fn clusters(n_per_class: usize) -> TabularData {
    let centers = [[0.0, 0.0], [6.0, 6.0], [-6.0, 6.0]];
    let mut values = Vec::new();
    let mut labels = Vec::new();
    for (class, center) in centers.iter().enumerate() {
        for i in 0..n_per_class {
            let jitter = ((i * 37 + class * 11) % 17) as f64 / 17.0 - 0.5;
            let jitter2 = ((i * 53 + class * 7) % 13) as f64 / 13.0 - 0.5;
            values.extend_from_slice(&[
                center[0] + jitter,
                center[1] + jitter2,
                1000.0 + (i % 5) as f64,
                jitter * jitter2,
            ]);
            labels.push(class + 1);
        }
    }
    let x = Array2::from_shape_vec((labels.len(), 4), values).unwrap();
    let y = Array1::from_vec(labels);
    let names = ["f0", "f1", "f2", "f3"].iter().map(|s| s.to_string()).collect();
    TabularData::new(x, y, names, "Cover_Type").unwrap()
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn small_gbdt() -> ModelConfig {
    ModelConfig::new(
        0.3,
        ModelType::GBDT {
            max_depth: 3,
            num_boost_round: 10,
            debug: false,
            training_optimization_level: 2,
            min_leaf_size: 1,
        },
    )
}

#[test]
fn test_factory_builds_and_predicts() {
    let data = clusters(10);
    for config in [ModelConfig::default(), small_gbdt()] {
        let mut model = factory::build_model(config);
        model.fit(&data.x, &data.y).unwrap();
        let predictions = model.predict(&data.x).unwrap();
        assert_eq!(predictions.len(), data.nsamples());
    }
}

#[test]
fn test_factory_names_models() {
    let names: Vec<String> = default_models()
        .into_iter()
        .map(|config| factory::build_model(config).name().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["Logistic Regression", "Gradient Boosting", "Support Vector Machine"]
    );
}

#[test]
fn test_evaluate_model_scores_test_partition() {
    init_logger();
    let data = clusters(20);
    let split = train_test_split(&data, 0.2, 42).unwrap();
    let (scaled, _) = scale_split(&split).unwrap();

    let mut model = factory::build_model(small_gbdt());
    let result = evaluate_model(model.as_mut(), &scaled).unwrap();

    assert_eq!(result.model_name, "Gradient Boosting");
    assert!(result.accuracy >= 0.0 && result.accuracy <= 1.0);
    assert!(result.training_secs >= 0.0);
    assert_eq!(result.confusion_matrix.total(), scaled.test.nsamples());
    for (label, count) in scaled.test.class_counts() {
        assert_eq!(result.confusion_matrix.support(label), count);
    }
}

#[test]
fn test_all_default_models_separate_clusters() {
    init_logger();
    let data = clusters(20);
    let split = train_test_split(&data, 0.2, 42).unwrap();
    let (scaled, _) = scale_split(&split).unwrap();

    let results = evaluate_models(&default_models(), &scaled).unwrap();
    assert_eq!(results.len(), 3);
    for result in &results {
        assert!(
            result.accuracy >= 0.75,
            "{} accuracy {}",
            result.model_name,
            result.accuracy
        );
        assert!((result.report.accuracy - result.accuracy).abs() < 1e-12);
    }
}
