use anyhow::Result;
use maud::html;

use covertype_classifiers::evaluation::ModelResult;
use covertype_classifiers::report::plots::{plot_confusion_matrix, plot_model_comparison};
use covertype_classifiers::report::report::{Report, ReportSection};

use super::input::EvaluateConfig;

/// Assemble the HTML report: overview, one section per model, configuration.
pub fn build_evaluation_report(results: &[ModelResult], config: &EvaluateConfig) -> Result<Report> {
    let mut report = Report::new(
        "covertype",
        clap::crate_version!(),
        &format!("Classifier comparison on {}", config.data),
    );

    /* Section 1: Overview */
    {
        let mut overview_section = ReportSection::new("Overview");
        overview_section.add_content(html! {
            p {
                "Each model was trained on " (format!("{:.0}%", (1.0 - config.test_size) * 100.0))
                " of the rows (seed " (config.seed) ") and scored on the held out rows. "
                @if config.scale_features {
                    "Features were standardized with statistics from the training rows only."
                } @else {
                    "Features were used unscaled."
                }
            }
            table {
                tr { th { "Model" } th { "Accuracy" } th { "Training (s)" } th { "Prediction (s)" } }
                @for result in results {
                    tr {
                        td { (result.model_name) }
                        td { (format!("{:.4}", result.accuracy)) }
                        td { (format!("{:.2}", result.training_secs)) }
                        td { (format!("{:.3}", result.prediction_secs)) }
                    }
                }
            }
        });
        overview_section.add_plot(plot_model_comparison(results, "Test accuracy"));
        report.add_section(overview_section);
    }

    /* Section 2: one per model */
    for result in results {
        let mut model_section = ReportSection::new(&result.model_name);
        model_section.add_plot(plot_confusion_matrix(
            &result.confusion_matrix,
            &format!("{} confusion matrix", result.model_name),
        ));
        model_section.add_content(html! {
            pre { (result.report.to_string()) }
        });
        report.add_section(model_section);
    }

    /* Section 3: Configuration */
    {
        let mut config_section = ReportSection::new("Configuration");
        let config_json = serde_json::to_string_pretty(&config)?;
        config_section.add_content(html! {
            pre {
                code { (config_json) }
            }
        });
        report.add_section(config_section);
    }

    Ok(report)
}

pub fn write_evaluation_report(results: &[ModelResult], config: &EvaluateConfig, path: &str) -> Result<()> {
    build_evaluation_report(results, config)?.save_to_file(path)
}
