use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use hogbench_classifiers::config::BenchConfig;
use hogbench_cli::bench::{describe_image, load_bench_config, run_bench, BenchOverrides};
use hogbench_cli::util::format_feature_vector;

fn main() -> Result<()> {
    let matches = Command::new("hogbench")
        .version(clap::crate_version!())
        .about("HOG features + classical classifiers benchmark for labeled image folders")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Extract features from a dataset and compare SVM, KNN and Decision Tree")
                .arg(
                    Arg::new("config")
                        .help("Path to bench JSON configuration file")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("dataset")
                        .short('d')
                        .long("dataset")
                        .help(
                            "Dataset root with one sub-directory per class. \
                             Overrides the dataset_path in the configuration file.",
                        )
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("test_fraction")
                        .long("test-fraction")
                        .help("Fraction of samples held out for testing, in (0, 1).")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Seed for the train/test shuffle.")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("image_size")
                        .long("image-size")
                        .help("Side length images are resized to before HOG extraction.")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output")
                        .help("Path to write the model comparison table (CSV).")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("verbose")
                        .short('v')
                        .long("verbose")
                        .help("Enable debug logging.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("features")
                .about("Print the HOG descriptor of a single image")
                .arg(
                    Arg::new("image")
                        .help("Path to a .jpg or .png image")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("image_size")
                        .long("image-size")
                        .help("Side length the image is resized to before HOG extraction.")
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
        .get_matches();

    let verbose = matches
        .subcommand_matches("run")
        .map(|m| m.get_flag("verbose"))
        .unwrap_or(false);
    // the `hogbench` directive also covers the hogbench_* crates
    let default_filter = if verbose {
        "error,hogbench=debug"
    } else {
        "error,hogbench=info"
    };
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("HOGBENCH_LOG", default_filter))
        .init();

    match matches.subcommand() {
        Some(("run", run_matches)) => handle_run(run_matches),
        Some(("features", feature_matches)) => handle_features(feature_matches),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_run(matches: &ArgMatches) -> Result<()> {
    let mut config = if let Some(config_path) = matches.get_one::<PathBuf>("config") {
        log::info!("[hogbench] Using config: {:?}", config_path);
        match load_bench_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Loading config failed: {:#}", e);
                std::process::exit(1)
            }
        }
    } else {
        eprintln!("[hogbench] No config provided; using defaults.");
        BenchConfig::default()
    };

    BenchOverrides::from_arguments(matches).apply(&mut config);

    if matches.get_one::<PathBuf>("config").is_none() {
        let default_json = serde_json::to_string_pretty(&config).unwrap_or_default();
        eprintln!("[hogbench] Effective config:\n{}", default_json);
    }

    let output: Option<&PathBuf> = matches.get_one("output_file");
    match run_bench(&config, output.map(|p| p.as_path())) {
        Ok(outcome) => {
            log::info!(
                "[hogbench] Compared {} models on {} images.",
                outcome.bench.evaluations.len(),
                outcome.dataset.n_samples()
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Benchmark failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_features(matches: &ArgMatches) -> Result<()> {
    let image_path = match matches.get_one::<PathBuf>("image") {
        Some(path) => path,
        None => unreachable!("image is a required argument"),
    };

    let mut config = BenchConfig::default();
    if let Some(image_size) = matches.get_one::<u32>("image_size") {
        config.features.image_size = *image_size;
    }

    match describe_image(image_path, &config) {
        Ok(features) => {
            println!("Feature vector length: {}", features.len());
            println!("{}", format_feature_vector(&features));
            Ok(())
        }
        Err(e) => {
            log::error!("Feature extraction failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
