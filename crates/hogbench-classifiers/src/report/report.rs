use std::fmt;
use std::path::Path;

use crate::bench::ModelResult;
use crate::error::Result;
use crate::preprocessing::LabelEncoder;
use crate::stats::{accuracy_score, per_class_scores};

/// One line of a classification report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub name: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class precision / recall / F1 / support with the usual summary rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub rows: Vec<ReportRow>,
    pub accuracy: f64,
    pub macro_avg: ReportRow,
    pub weighted_avg: ReportRow,
}

impl ClassificationReport {
    /// Build the report over the classes present in `y_true` or `y_pred`, with
    /// class names decoded through `encoder`.
    pub fn new(y_true: &[usize], y_pred: &[usize], encoder: &LabelEncoder) -> Result<Self> {
        let scores = per_class_scores(y_true, y_pred)?;
        let accuracy = accuracy_score(y_true, y_pred)?;

        let rows = scores
            .iter()
            .map(|s| {
                Ok(ReportRow {
                    name: encoder.class_name(s.label)?.to_string(),
                    precision: s.precision,
                    recall: s.recall,
                    f1: s.f1,
                    support: s.support,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let total_support: usize = rows.iter().map(|r| r.support).sum();
        let n_rows = rows.len().max(1) as f64;
        let macro_avg = ReportRow {
            name: "macro avg".to_string(),
            precision: rows.iter().map(|r| r.precision).sum::<f64>() / n_rows,
            recall: rows.iter().map(|r| r.recall).sum::<f64>() / n_rows,
            f1: rows.iter().map(|r| r.f1).sum::<f64>() / n_rows,
            support: total_support,
        };
        let weight = |metric: fn(&ReportRow) -> f64| -> f64 {
            if total_support == 0 {
                return 0.0;
            }
            rows.iter()
                .map(|r| metric(r) * r.support as f64)
                .sum::<f64>()
                / total_support as f64
        };
        let weighted_avg = ReportRow {
            name: "weighted avg".to_string(),
            precision: weight(|r| r.precision),
            recall: weight(|r| r.recall),
            f1: weight(|r| r.f1),
            support: total_support,
        };

        Ok(ClassificationReport {
            rows,
            accuracy,
            macro_avg,
            weighted_avg,
        })
    }

    fn name_width(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.name.len())
            .chain(std::iter::once(self.weighted_avg.name.len()))
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.name_width();
        let write_row = |f: &mut fmt::Formatter<'_>, row: &ReportRow| -> fmt::Result {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                row.name,
                row.precision,
                row.recall,
                row.f1,
                row.support,
                width = width
            )
        };

        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "",
            "precision",
            "recall",
            "f1-score",
            "support",
            width = width
        )?;
        writeln!(f)?;
        for row in &self.rows {
            write_row(f, row)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.macro_avg.support,
            width = width
        )?;
        write_row(f, &self.macro_avg)?;
        write_row(f, &self.weighted_avg)
    }
}

const COMPARISON_HEADERS: [&str; 5] = [
    "Model",
    "Training Time (s)",
    "Accuracy",
    "Precision",
    "Recall",
];

/// Render the side-by-side comparison of all model results, one row per model
/// prefixed with its position.
pub fn render_comparison_table(results: &[ModelResult]) -> String {
    let cells: Vec<[String; 5]> = results
        .iter()
        .map(|r| {
            [
                r.model.clone(),
                format!("{:.6}", r.training_time_secs),
                format!("{:.6}", r.accuracy),
                format!("{:.6}", r.precision),
                format!("{:.6}", r.recall),
            ]
        })
        .collect();

    let mut widths = COMPARISON_HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }
    let index_width = results.len().saturating_sub(1).to_string().len();

    let mut out = String::new();
    out.push_str(&" ".repeat(index_width));
    for (header, width) in COMPARISON_HEADERS.iter().zip(widths.iter()) {
        out.push_str(&format!("  {:>width$}", header, width = width));
    }
    out.push('\n');
    for (idx, row) in cells.iter().enumerate() {
        out.push_str(&format!("{:<width$}", idx, width = index_width));
        for (cell, width) in row.iter().zip(widths.iter()) {
            out.push_str(&format!("  {:>width$}", cell, width = width));
        }
        out.push('\n');
    }
    out
}

/// Write the comparison table as CSV, one record per model.
pub fn write_results_csv<P: AsRef<Path>>(path: P, results: &[ModelResult]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for result in results {
        writer.serialize(result)?;
    }
    writer.flush()?;
    Ok(())
}
