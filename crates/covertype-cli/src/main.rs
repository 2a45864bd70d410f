use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use covertype_classifiers::io::{read_table_csv_with_config, TableReaderConfig};
use covertype_cli::describe::describe;
use covertype_cli::evaluate::input::EvaluateConfig;
use covertype_cli::evaluate::run::run_evaluation;
use covertype_cli::util::{delimiter_for, validate_tsv_or_csv_file};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("COVERTYPE_LOG", "error,covertype=info"))
        .init();

    let matches = Command::new("covertype")
        .version(clap::crate_version!())
        .about("Forest cover type classification: logistic regression, gradient boosting and SVM")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("evaluate")
                .about("Split, scale, train every model and report test-set scores")
                .arg(
                    Arg::new("data")
                        .help("Path to the input table (*.csv or *.tsv)")
                        .required(true)
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("config")
                        .help("Path to an evaluation JSON configuration file")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output")
                        .help("Path to write the per-model results as JSON.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("report_file")
                        .long("report")
                        .help("Write an HTML report with the heatmaps to this path.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("no_report")
                        .long("no-report")
                        .help("Do not write the HTML report, even if the config names one.")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("show_plots")
                        .long("show-plots")
                        .help("Open each confusion matrix heatmap in the browser.")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Seed for the train/test shuffle.")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("test_size")
                        .long("test-size")
                        .help("Fraction of rows held out for testing, in (0, 1).")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("model_type")
                        .long("model-type")
                        .help("Only train the given model. Repeat to select several.")
                        .value_parser(["logistic", "gbdt", "svm"])
                        .action(ArgAction::Append)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("no_scale")
                        .long("no-scale")
                        .help("Skip feature standardization.")
                        .action(ArgAction::SetTrue),
                )
                .arg(label_column_arg()),
        )
        .subcommand(
            Command::new("describe")
                .about("Print row counts, class distribution and feature statistics")
                .arg(
                    Arg::new("data")
                        .help("Path to the input table (*.csv or *.tsv)")
                        .required(true)
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                )
                .arg(label_column_arg()),
        )
        .subcommand(
            Command::new("config").about("Print the default evaluation configuration as JSON"),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("evaluate", sub_m)) => handle_evaluate(sub_m),
        Some(("describe", sub_m)) => handle_describe(sub_m),
        Some(("config", _)) => handle_config(),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn label_column_arg() -> Arg {
    Arg::new("label_column")
        .long("label-column")
        .help("Name of the class label column. Defaults to Cover_Type.")
        .value_parser(clap::builder::NonEmptyStringValueParser::new())
        .value_hint(ValueHint::Other)
}

fn handle_evaluate(matches: &ArgMatches) -> Result<()> {
    let config = match EvaluateConfig::from_arguments(matches) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid arguments: {:#}", e);
            std::process::exit(1)
        }
    };
    log::info!("[covertype::evaluate] Evaluating {}", config.data);

    match run_evaluation(&config) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Evaluation failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_describe(matches: &ArgMatches) -> Result<()> {
    let data_path = matches
        .get_one::<String>("data")
        .cloned()
        .unwrap_or_default();

    let mut reader = TableReaderConfig {
        delimiter: delimiter_for(&data_path),
        ..TableReaderConfig::default()
    };
    if let Some(label_column) = matches.get_one::<String>("label_column") {
        reader.label_column = label_column.clone();
    }

    let loaded = validate_tsv_or_csv_file(&data_path)
        .and_then(|_| read_table_csv_with_config(&data_path, &reader));
    match loaded {
        Ok(data) => {
            print!("{}", describe(&data));
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to describe {}: {:#}", data_path, e);
            std::process::exit(1)
        }
    }
}

fn handle_config() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&EvaluateConfig::default())?);
    Ok(())
}
