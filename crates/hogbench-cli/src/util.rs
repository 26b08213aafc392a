use std::path::Path;

use anyhow::{bail, Result};

/// The comparison table is only written as `.csv`, and its parent directory
/// has to exist already.
pub fn validate_csv_output(path: &Path) -> Result<()> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if !is_csv {
        bail!("Output file must have a .csv extension: {}", path.display());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            bail!("Output directory does not exist: {}", parent.display());
        }
    }
    Ok(())
}

/// Render a descriptor as one line of space separated values.
pub fn format_feature_vector(features: &[f64]) -> String {
    features
        .iter()
        .map(|v| format!("{:.6}", v))
        .collect::<Vec<_>>()
        .join(" ")
}
