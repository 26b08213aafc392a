//! Histogram of Oriented Gradients descriptor.
//!
//! Gradients are central differences on the raw 0..255 intensities, binned by
//! unsigned orientation (0..180 degrees) into per-cell histograms, which are
//! then grouped into overlapping blocks and normalised.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageError, ImageReader, Luma};
use ndarray::{Array2, Array3};

use crate::config::{BlockNorm, HogConfig};
use crate::error::{Error, Result};

const NORM_EPS: f64 = 1e-5;
const L2_HYS_CLIP: f64 = 0.2;

/// Decode `path` as grayscale, resize it to `config.image_size` and compute its
/// HOG descriptor.
///
/// The format is sniffed from the file contents, so a PNG saved as `.jpg`
/// still decodes.
pub fn extract_features<P: AsRef<Path>>(path: P, config: &HogConfig) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let img = decode_image(path).map_err(|source| Error::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    let gray = to_gray_bt601(&img);
    let resized = imageops::resize(
        &gray,
        config.image_size,
        config.image_size,
        FilterType::Triangle,
    );
    hog_descriptor(&resized, config)
}

fn decode_image(path: &Path) -> std::result::Result<DynamicImage, ImageError> {
    ImageReader::open(path)?.with_guessed_format()?.decode()
}

/// 8-bit luma with BT.601 weights (0.299, 0.587, 0.114) in 14-bit fixed point.
/// Alpha is dropped.
pub fn to_gray_bt601(img: &DynamicImage) -> GrayImage {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let luma = (r as u32 * 4899 + g as u32 * 9617 + b as u32 * 1868 + 8192) >> 14;
        Luma([luma as u8])
    })
}

/// HOG descriptor of an in-memory grayscale image, used as-is (no resize).
pub fn hog_descriptor(img: &GrayImage, config: &HogConfig) -> Result<Vec<f64>> {
    hog(&gray_to_array(img), config)
}

/// Pixel intensities as a (rows, cols) matrix.
pub fn gray_to_array(img: &GrayImage) -> Array2<f64> {
    let (width, height) = img.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(r, c)| {
        img.get_pixel(c as u32, r as u32)[0] as f64
    })
}

/// HOG descriptor of an intensity matrix.
pub fn hog(image: &Array2<f64>, config: &HogConfig) -> Result<Vec<f64>> {
    let (rows, cols) = image.dim();
    let Some((n_blocks_row, n_blocks_col)) = config.n_blocks(rows, cols) else {
        return Err(Error::InvalidConfig(format!(
            "The input image ({}x{}) is too small given pixels_per_cell {:?} and cells_per_block {:?}",
            rows, cols, config.pixels_per_cell, config.cells_per_block
        )));
    };
    if config.orientations == 0 {
        return Err(Error::InvalidConfig("orientations must be non-zero".to_string()));
    }

    let (g_row, g_col) = gradients(image);
    let histograms = cell_histograms(&g_row, &g_col, config);

    let (block_rows, block_cols) = config.cells_per_block;
    let block_len = block_rows * block_cols * config.orientations;
    let mut descriptor = Vec::with_capacity(n_blocks_row * n_blocks_col * block_len);
    let mut block = Vec::with_capacity(block_len);

    for r in 0..n_blocks_row {
        for c in 0..n_blocks_col {
            block.clear();
            for br in 0..block_rows {
                for bc in 0..block_cols {
                    for o in 0..config.orientations {
                        block.push(histograms[[r + br, c + bc, o]]);
                    }
                }
            }
            normalize_block(&mut block, config.block_norm);
            descriptor.extend_from_slice(&block);
        }
    }

    Ok(descriptor)
}

/// Central-difference gradients along rows and columns; border rows (resp.
/// columns) are zero.
pub fn gradients(image: &Array2<f64>) -> (Array2<f64>, Array2<f64>) {
    let (rows, cols) = image.dim();
    let mut g_row = Array2::<f64>::zeros((rows, cols));
    let mut g_col = Array2::<f64>::zeros((rows, cols));

    for r in 1..rows.saturating_sub(1) {
        for c in 0..cols {
            g_row[[r, c]] = image[[r + 1, c]] - image[[r - 1, c]];
        }
    }
    for r in 0..rows {
        for c in 1..cols.saturating_sub(1) {
            g_col[[r, c]] = image[[r, c + 1]] - image[[r, c - 1]];
        }
    }

    (g_row, g_col)
}

/// Orientation histograms of shape (cell rows, cell cols, orientations).
///
/// Each bin holds the summed magnitude of the pixels whose orientation falls in
/// `[i * w, (i + 1) * w)` with `w = 180 / orientations`, divided by the number
/// of pixels in a cell.
fn cell_histograms(g_row: &Array2<f64>, g_col: &Array2<f64>, config: &HogConfig) -> Array3<f64> {
    let (rows, cols) = g_row.dim();
    let (n_cells_row, n_cells_col) = config.n_cells(rows, cols);
    let (cell_rows, cell_cols) = config.pixels_per_cell;
    let n_bins = config.orientations;
    let bin_width = 180.0 / n_bins as f64;
    let cell_area = (cell_rows * cell_cols) as f64;

    let mut histograms = Array3::<f64>::zeros((n_cells_row, n_cells_col, n_bins));

    for r in 0..n_cells_row * cell_rows {
        for c in 0..n_cells_col * cell_cols {
            let magnitude = g_col[[r, c]].hypot(g_row[[r, c]]);
            let orientation = g_row[[r, c]].atan2(g_col[[r, c]]).to_degrees().rem_euclid(180.0);
            // rem_euclid can round up to exactly 180 for tiny negative angles,
            // which lands in no bin.
            let Some(bin) = (0..n_bins).find(|&i| {
                orientation >= bin_width * i as f64 && orientation < bin_width * (i + 1) as f64
            }) else {
                continue;
            };
            histograms[[r / cell_rows, c / cell_cols, bin]] += magnitude / cell_area;
        }
    }

    histograms
}

fn normalize_block(block: &mut [f64], norm: BlockNorm) {
    match norm {
        BlockNorm::L1 => {
            let denom = block.iter().map(|v| v.abs()).sum::<f64>() + NORM_EPS;
            block.iter_mut().for_each(|v| *v /= denom);
        }
        BlockNorm::L1Sqrt => {
            let denom = block.iter().map(|v| v.abs()).sum::<f64>() + NORM_EPS;
            block.iter_mut().for_each(|v| *v = (*v / denom).sqrt());
        }
        BlockNorm::L2 => l2_normalize(block),
        BlockNorm::L2Hys => {
            l2_normalize(block);
            block.iter_mut().for_each(|v| *v = v.min(L2_HYS_CLIP));
            l2_normalize(block);
        }
    }
}

fn l2_normalize(block: &mut [f64]) {
    let denom = (block.iter().map(|v| v * v).sum::<f64>() + NORM_EPS * NORM_EPS).sqrt();
    block.iter_mut().for_each(|v| *v /= denom);
}
