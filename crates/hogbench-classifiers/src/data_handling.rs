//! Loading labeled image folders and splitting them for training.
//!
//! A dataset root contains one sub-directory per class; every `.jpg` / `.png`
//! file inside a class directory is one sample. Entries are visited in file
//! name order so class codes and progress output do not depend on the
//! filesystem's listing order.
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use ndarray::{Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::HogConfig;
use crate::error::{Error, Result};
use crate::features::extract_features;

/// File name suffixes accepted as samples (case-sensitive).
pub const IMAGE_EXTENSIONS: [&str; 2] = [".jpg", ".png"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassCount {
    pub class_name: String,
    pub count: usize,
}

/// Feature matrix and parallel class names for every loaded sample.
#[derive(Debug, Clone)]
pub struct ImageDataset {
    /// One HOG descriptor per row.
    pub x: Array2<f64>,
    pub labels: Vec<String>,
    /// Samples per class, in discovery order.
    pub class_counts: Vec<ClassCount>,
}

impl ImageDataset {
    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    pub fn class_names(&self) -> Vec<&str> {
        self.class_counts
            .iter()
            .map(|c| c.class_name.as_str())
            .collect()
    }

    pub fn log_summary(&self) {
        info!("Total images loaded: {}", self.n_samples());
        info!("Total labels loaded: {}", self.labels.len());
        info!("Feature vector length: {}", self.n_features());
    }
}

/// Render class names the way they are reported, e.g. `['cat', 'dog']`.
pub fn format_class_list<S: AsRef<str>>(names: &[S]) -> String {
    let quoted: Vec<String> = names
        .iter()
        .map(|name| format!("'{}'", name.as_ref()))
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// Load every sample under `root` and extract its features.
///
/// # Errors
///
/// * `Error::MissingDataset` if `root` does not exist.
/// * `Error::ImageDecode` for the first file that cannot be decoded; loading
///   stops there.
/// * `Error::EmptyDataset` if no sample was found in any class directory.
pub fn load_dataset<P: AsRef<Path>>(root: P, config: &HogConfig) -> Result<ImageDataset> {
    let root = root.as_ref();
    if !root.exists() {
        return Err(Error::MissingDataset(root.to_path_buf()));
    }
    config.validate()?;

    let entries = sorted_entries(root)?;
    let class_dirs: Vec<&PathBuf> = entries.iter().filter(|p| p.is_dir()).collect();
    let class_names: Vec<String> = class_dirs.iter().map(|p| entry_name(p)).collect();
    info!("Found classes: {}", format_class_list(&class_names));

    let n_features = config.feature_len();
    let mut features: Vec<f64> = Vec::new();
    let mut labels: Vec<String> = Vec::new();
    let mut class_counts = Vec::with_capacity(class_dirs.len());

    for entry in &entries {
        if !entry.is_dir() {
            info!("Skipping {} as it is not a directory.", entry.display());
            continue;
        }
        let class_name = entry_name(entry);
        let mut count = 0usize;
        for file in sorted_entries(entry)? {
            if !is_image_file(&file) {
                continue;
            }
            debug!("Extracting features from {}", file.display());
            let row = extract_features(&file, config)?;
            features.extend_from_slice(&row);
            labels.push(class_name.clone());
            count += 1;
        }
        info!("Loaded {} images from class '{}'.", count, class_name);
        class_counts.push(ClassCount { class_name, count });
    }

    if labels.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let x = Array2::from_shape_vec((labels.len(), n_features), features)?;
    Ok(ImageDataset {
        x,
        labels,
        class_counts,
    })
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|p| entry_name(p));
    Ok(entries)
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_image_file(path: &Path) -> bool {
    let name = entry_name(path);
    path.is_file() && IMAGE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Train and test partitions of an encoded dataset.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Vec<usize>,
    pub y_test: Vec<usize>,
    /// Row indices of the original dataset in each partition.
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

/// Plain (non-stratified) random split.
///
/// `ceil(test_fraction * n)` rows are held out. The permutation comes from a
/// `StdRng` seeded with `seed`, so a given seed always yields the same split.
pub fn train_test_split(
    x: &Array2<f64>,
    y: &[usize],
    test_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit> {
    let n_samples = x.nrows();
    if n_samples != y.len() {
        return Err(Error::LengthMismatch {
            left: n_samples,
            right: y.len(),
        });
    }
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(Error::InvalidSplit(format!(
            "test_fraction must be in (0, 1), got {}",
            test_fraction
        )));
    }

    let n_test = (test_fraction * n_samples as f64).ceil() as usize;
    let n_train = n_samples.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(Error::InvalidSplit(format!(
            "with {} samples and test_fraction {} one of the partitions would be empty",
            n_samples, test_fraction
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..n_samples).collect();
    indices.shuffle(&mut rng);
    let (test_indices, train_indices) = indices.split_at(n_test);

    debug!(
        "Split {} samples into {} train / {} test (seed {})",
        n_samples, n_train, n_test, seed
    );

    Ok(TrainTestSplit {
        x_train: x.select(Axis(0), train_indices),
        x_test: x.select(Axis(0), test_indices),
        y_train: train_indices.iter().map(|&i| y[i]).collect(),
        y_test: test_indices.iter().map(|&i| y[i]).collect(),
        train_indices: train_indices.to_vec(),
        test_indices: test_indices.to_vec(),
    })
}
