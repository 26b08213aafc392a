//! Console and CSV renderings of benchmark results.
pub mod report;

pub use report::{render_comparison_table, write_results_csv, ClassificationReport, ReportRow};
