//! CLI helpers for running the model bench.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;

use hogbench_classifiers::bench::{run_pipeline, PipelineOutcome};
use hogbench_classifiers::config::BenchConfig;
use hogbench_classifiers::features::extract_features;
use hogbench_classifiers::report::write_results_csv;

use crate::util::validate_csv_output;

/// Command line values that take precedence over the JSON configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchOverrides {
    pub dataset: Option<PathBuf>,
    pub test_fraction: Option<f64>,
    pub seed: Option<u64>,
    pub image_size: Option<u32>,
}

impl BenchOverrides {
    pub fn from_arguments(matches: &ArgMatches) -> Self {
        BenchOverrides {
            dataset: matches.get_one::<PathBuf>("dataset").cloned(),
            test_fraction: matches.get_one::<f64>("test_fraction").copied(),
            seed: matches.get_one::<u64>("seed").copied(),
            image_size: matches.get_one::<u32>("image_size").copied(),
        }
    }

    pub fn apply(&self, config: &mut BenchConfig) {
        if let Some(dataset) = &self.dataset {
            config.dataset_path = dataset.clone();
        }
        if let Some(test_fraction) = self.test_fraction {
            config.test_fraction = test_fraction;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(image_size) = self.image_size {
            config.features.image_size = image_size;
        }
    }
}

/// Load a bench configuration from a JSON file. Missing keys take defaults.
pub fn load_bench_config<P: AsRef<Path>>(path: P) -> Result<BenchConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: BenchConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Run the full pipeline and optionally write the comparison table as CSV.
pub fn run_bench(config: &BenchConfig, output: Option<&Path>) -> Result<PipelineOutcome> {
    if let Some(path) = output {
        validate_csv_output(path)?;
    }

    let outcome = run_pipeline(config).with_context(|| {
        format!(
            "Benchmark on dataset {} failed",
            config.dataset_path.display()
        )
    })?;

    if let Some(path) = output {
        write_results_csv(path, &outcome.bench.results())
            .with_context(|| format!("Failed to write results: {}", path.display()))?;
        log::info!("Wrote model comparison to {}", path.display());
    }
    Ok(outcome)
}

/// HOG descriptor of a single image, for inspecting the feature extractor.
pub fn describe_image(path: &Path, config: &BenchConfig) -> Result<Vec<f64>> {
    config.features.validate()?;
    let features = extract_features(path, &config.features)
        .with_context(|| format!("Failed to extract features from {}", path.display()))?;
    Ok(features)
}
