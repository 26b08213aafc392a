use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Central configuration for a benchmark run.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BenchConfig {
    /// Root folder whose sub-directories are the classes.
    pub dataset_path: PathBuf,
    pub features: HogConfig,
    /// Fraction of samples held out for testing.
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("dataset/train"),
            features: HogConfig::default(),
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

impl BenchConfig {
    pub fn new<P: Into<PathBuf>>(dataset_path: P) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        self.features.validate()
    }
}

/// Block normalisation applied to each HOG block.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockNorm {
    L1,
    L1Sqrt,
    L2,
    #[default]
    L2Hys,
}

impl FromStr for BlockNorm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "l1" => Ok(BlockNorm::L1),
            "l1-sqrt" | "l1sqrt" => Ok(BlockNorm::L1Sqrt),
            "l2" => Ok(BlockNorm::L2),
            "l2-hys" | "l2hys" => Ok(BlockNorm::L2Hys),
            _ => Err(format!(
                "Unknown block norm: {}. Valid options are: L1, L1-sqrt, L2, L2-Hys",
                s
            )),
        }
    }
}

/// Image preparation and HOG descriptor parameters.
///
/// The descriptor length only depends on these values, so every image of a
/// dataset must be processed with the same `HogConfig`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HogConfig {
    /// Images are resized to `image_size x image_size` before extraction.
    pub image_size: u32,
    pub orientations: usize,
    /// (rows, cols)
    pub pixels_per_cell: (usize, usize),
    /// (rows, cols)
    pub cells_per_block: (usize, usize),
    pub block_norm: BlockNorm,
}

impl Default for HogConfig {
    fn default() -> Self {
        Self {
            image_size: 32,
            orientations: 9,
            pixels_per_cell: (8, 8),
            cells_per_block: (2, 2),
            block_norm: BlockNorm::L2Hys,
        }
    }
}

impl HogConfig {
    /// Number of whole cells along (rows, cols) for an image of the given shape.
    pub fn n_cells(&self, rows: usize, cols: usize) -> (usize, usize) {
        (rows / self.pixels_per_cell.0, cols / self.pixels_per_cell.1)
    }

    /// Number of block positions along (rows, cols), or `None` when not even
    /// one block fits.
    pub fn n_blocks(&self, rows: usize, cols: usize) -> Option<(usize, usize)> {
        let (cell_rows, cell_cols) = self.n_cells(rows, cols);
        let (block_rows, block_cols) = self.cells_per_block;
        if cell_rows < block_rows || cell_cols < block_cols {
            return None;
        }
        Some((cell_rows - block_rows + 1, cell_cols - block_cols + 1))
    }

    /// Descriptor length for an image of `rows x cols` pixels.
    pub fn feature_len_for(&self, rows: usize, cols: usize) -> usize {
        let (block_rows, block_cols) = self.cells_per_block;
        self.n_blocks(rows, cols)
            .map(|(n_r, n_c)| n_r * n_c * block_rows * block_cols * self.orientations)
            .unwrap_or(0)
    }

    /// Descriptor length for images resized to `image_size`.
    pub fn feature_len(&self) -> usize {
        let side = self.image_size as usize;
        self.feature_len_for(side, side)
    }

    pub fn validate(&self) -> Result<()> {
        if self.image_size == 0 || self.orientations == 0 {
            return Err(Error::InvalidConfig(
                "image_size and orientations must be non-zero".to_string(),
            ));
        }
        let (ppc_r, ppc_c) = self.pixels_per_cell;
        let (cpb_r, cpb_c) = self.cells_per_block;
        if ppc_r == 0 || ppc_c == 0 || cpb_r == 0 || cpb_c == 0 {
            return Err(Error::InvalidConfig(
                "pixels_per_cell and cells_per_block must be non-zero".to_string(),
            ));
        }
        let side = self.image_size as usize;
        if self.n_blocks(side, side).is_none() {
            return Err(Error::InvalidConfig(format!(
                "image_size {} is too small given pixels_per_cell {:?} and cells_per_block {:?}",
                self.image_size, self.pixels_per_cell, self.cells_per_block
            )));
        }
        Ok(())
    }
}

/// Supported classifiers and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum ModelType {
    SVM {
        c: f64,
        eps: f64,
        kernel: String,
        gaussian_kernel_eps: f64,
        polynomial_kernel_constant: f64,
        polynomial_kernel_degree: f64,
    },
    KNN {
        k: usize,
    },
    DecisionTree {
        max_depth: Option<usize>,
        min_weight_split: f32,
        min_weight_leaf: f32,
    },
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::SVM {
            c: 1.0,
            eps: 1e-3,
            kernel: "linear".to_string(),
            gaussian_kernel_eps: 0.1,
            polynomial_kernel_constant: 1.0,
            polynomial_kernel_degree: 3.0,
        }
    }
}

impl ModelType {
    /// The fixed set of models compared by a benchmark run, in run order.
    pub fn benchmark_suite() -> Vec<ModelType> {
        vec![
            ModelType::default(),
            ModelType::KNN { k: 3 },
            ModelType::DecisionTree {
                max_depth: None,
                min_weight_split: 2.0,
                min_weight_leaf: 1.0,
            },
        ]
    }

    /// Display name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            ModelType::SVM { .. } => "SVM",
            ModelType::KNN { .. } => "KNN",
            ModelType::DecisionTree { .. } => "Decision Tree",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svm" => Ok(ModelType::default()),
            "knn" => Ok(ModelType::KNN { k: 3 }),
            "decision_tree" | "decision-tree" | "tree" => Ok(ModelType::DecisionTree {
                max_depth: None,
                min_weight_split: 2.0,
                min_weight_leaf: 1.0,
            }),
            _ => Err(format!(
                "Unknown model type: {}. Valid options are: svm, knn, decision_tree",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_hog_feature_len_is_324() {
        assert_eq!(HogConfig::default().feature_len(), 324);
    }

    #[test]
    fn feature_len_grows_with_image_size() {
        let config = HogConfig {
            image_size: 64,
            ..HogConfig::default()
        };
        // 7 x 7 blocks of 2 x 2 cells with 9 bins
        assert_eq!(config.feature_len(), 7 * 7 * 4 * 9);
    }

    #[test]
    fn too_small_image_is_rejected() {
        let config = HogConfig {
            image_size: 8,
            ..HogConfig::default()
        };
        assert_eq!(config.feature_len(), 0);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn bench_config_rejects_bad_fraction() {
        let mut config = BenchConfig::default();
        config.test_fraction = 1.0;
        assert!(config.validate().is_err());
        config.test_fraction = 0.0;
        assert!(config.validate().is_err());
        config.test_fraction = 0.25;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn block_norm_parses_common_spellings() {
        assert_eq!("L2-Hys".parse::<BlockNorm>().unwrap(), BlockNorm::L2Hys);
        assert_eq!("l1_sqrt".parse::<BlockNorm>().unwrap(), BlockNorm::L1Sqrt);
        assert!("l3".parse::<BlockNorm>().is_err());
    }

    #[test]
    fn benchmark_suite_is_svm_knn_tree() {
        let names: Vec<&str> = ModelType::benchmark_suite()
            .iter()
            .map(|m| m.name())
            .collect();
        assert_eq!(names, vec!["SVM", "KNN", "Decision Tree"]);
    }
}
