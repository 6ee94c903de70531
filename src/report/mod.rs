//! Period reports: window computation, aggregation, plain-text rendering and
//! document export.

pub mod aggregator;
pub mod export;
pub mod pdf;
pub mod period;
pub mod render;

use thiserror::Error;

pub use aggregator::{build_report, Report, ReportLine, NOT_AVAILABLE};
pub use export::{export_file_name, export_report, write_csv, ExportFormat};
pub use pdf::write_pdf;
pub use period::{compute_period, time_unit, Period, ReportKind};
pub use render::render_text;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("unknown report kind `{input}`{}", suggestion_hint(.suggestion))]
    InvalidKind {
        input: String,
        suggestion: Option<&'static str>,
    },
    #[error("unknown export format `{0}` (expected `text`, `csv` or `pdf`)")]
    InvalidFormat(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("PDF error: {0}")]
    Pdf(String),
}

fn suggestion_hint(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(keyword) => format!("; did you mean `{keyword}`?"),
        None => " (expected daily, weekly or monthly)".to_string(),
    }
}
