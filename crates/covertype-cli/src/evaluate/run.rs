use anyhow::{Context, Result};

use covertype_classifiers::data_handling::train_test_split;
use covertype_classifiers::evaluation::{evaluate_models, ModelResult};
use covertype_classifiers::io::read_table_csv_with_config;
use covertype_classifiers::preprocessing::scale_split;
use covertype_classifiers::report::plots::plot_confusion_matrix;

use super::input::EvaluateConfig;
use super::report::write_evaluation_report;
use crate::util::write_bytes_to_file;

/// Load, split, scale, fit every configured model and report the scores.
pub fn run_evaluation(config: &EvaluateConfig) -> Result<Vec<ModelResult>> {
    let data = read_table_csv_with_config(&config.data, &config.reader)
        .with_context(|| format!("Failed to load data: {}", config.data))?;
    data.log_input_data_summary();

    let split = train_test_split(&data, config.test_size, config.seed)?;
    log::info!(
        "Split into {} train / {} test rows (seed {})",
        split.train.nsamples(),
        split.test.nsamples(),
        config.seed
    );

    let split = if config.scale_features {
        let (scaled, _scaler) = scale_split(&split)?;
        scaled
    } else {
        log::warn!("Feature scaling disabled");
        split
    };

    let results = evaluate_models(&config.models, &split)?;

    for result in &results {
        print_model_result(result);
    }
    println!("{}", format_summary(&results));

    if let Some(path) = &config.output_file {
        let bytes = serde_json::to_vec_pretty(&results)?;
        write_bytes_to_file(path, &bytes)?;
        log::info!("Results written to {}", path);
    }

    if let Some(path) = &config.report_file {
        write_evaluation_report(&results, config, path)?;
    }

    if config.show_plots {
        for result in &results {
            plot_confusion_matrix(
                &result.confusion_matrix,
                &format!("{} confusion matrix", result.model_name),
            )
            .show();
        }
    }

    Ok(results)
}

/// One-line accuracy/time summary for a model.
pub fn format_result_line(result: &ModelResult) -> String {
    format!(
        "{}: accuracy={:.4} training_time={:.2}s",
        result.model_name, result.accuracy, result.training_secs
    )
}

fn print_model_result(result: &ModelResult) {
    println!("{}", format_result_line(result));
    println!("{}", result.report);
}

/// Fixed-width comparison table of all models.
pub fn format_summary(results: &[ModelResult]) -> String {
    let mut out = format!(
        "{:<24} {:>10} {:>14} {:>16}\n",
        "model", "accuracy", "training (s)", "prediction (s)"
    );
    for result in results {
        out.push_str(&format!(
            "{:<24} {:>10.4} {:>14.2} {:>16.3}\n",
            result.model_name, result.accuracy, result.training_secs, result.prediction_secs
        ));
    }
    out
}
