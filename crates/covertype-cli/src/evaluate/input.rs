use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use covertype_classifiers::config::{default_models, ModelConfig, ModelType};
use covertype_classifiers::data_handling::{DEFAULT_SEED, DEFAULT_TEST_RATIO};
use covertype_classifiers::io::TableReaderConfig;

use crate::util::{delimiter_for, validate_tsv_or_csv_file};

/// Parameters for one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluateConfig {
    /// Path to the input table.
    pub data: String,
    /// Label, delimiter and column selection, stored at the top level.
    #[serde(flatten)]
    pub reader: TableReaderConfig,
    /// Fraction of rows held out for testing.
    pub test_size: f64,
    pub seed: u64,
    pub scale_features: bool,
    pub models: Vec<ModelConfig>,
    /// Where to write the JSON results, if anywhere.
    pub output_file: Option<String>,
    /// Where to write the HTML report. Nothing is written when `None`.
    pub report_file: Option<String>,
    /// Open each model's confusion matrix heatmap in a browser window.
    pub show_plots: bool,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        EvaluateConfig {
            data: String::new(),
            reader: TableReaderConfig::default(),
            test_size: DEFAULT_TEST_RATIO,
            seed: DEFAULT_SEED,
            scale_features: true,
            models: default_models(),
            output_file: None,
            report_file: None,
            show_plots: false,
        }
    }
}

/// Load an evaluation configuration from a JSON file.
pub fn load_evaluate_config<P: AsRef<Path>>(path: P) -> Result<EvaluateConfig> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: EvaluateConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

impl EvaluateConfig {
    /// Build the run configuration from the optional JSON file and the
    /// `evaluate` subcommand flags. Flags take precedence over the file.
    pub fn from_arguments(matches: &ArgMatches) -> Result<Self> {
        let mut config = match matches.get_one::<PathBuf>("config") {
            Some(config_path) => {
                log::info!("Using config: {:?}", config_path);
                load_evaluate_config(config_path)?
            }
            None => {
                let config = EvaluateConfig::default();
                log::info!("No config provided; using defaults.");
                log::debug!(
                    "Default config:\n{}",
                    serde_json::to_string_pretty(&config)?
                );
                config
            }
        };

        if let Some(data) = matches.get_one::<String>("data") {
            config.data = data.clone();
        }
        validate_tsv_or_csv_file(&config.data)?;
        if delimiter_for(&config.data) == b'\t' {
            config.reader.delimiter = b'\t';
        }

        if let Some(label_column) = matches.get_one::<String>("label_column") {
            config.reader.label_column = label_column.clone();
        }

        if let Some(seed) = matches.get_one::<u64>("seed") {
            config.seed = *seed;
        }

        if let Some(test_size) = matches.get_one::<f64>("test_size") {
            config.test_size = *test_size;
        }

        if let Some(model_types) = matches.get_many::<String>("model_type") {
            config.models = model_types
                .map(|name| ModelType::from_str(name).map(ModelConfig::from))
                .collect::<Result<Vec<_>, _>>()
                .map_err(anyhow::Error::msg)?;
        }

        if matches.get_flag("no_scale") {
            config.scale_features = false;
        }

        if let Some(output_file) = matches.get_one::<PathBuf>("output_file") {
            config.output_file = Some(output_file.display().to_string());
        }

        if let Some(report_file) = matches.get_one::<PathBuf>("report_file") {
            config.report_file = Some(report_file.display().to_string());
        }

        if matches.get_flag("no_report") {
            config.report_file = None;
        }

        if matches.get_flag("show_plots") {
            config.show_plots = true;
        }

        Ok(config)
    }
}
