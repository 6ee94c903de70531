use std::{
    fmt, fs,
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

use chrono::NaiveDate;

use crate::{core::utils::ensure_dir, domain::format_display_date};

use super::{aggregator::Report, pdf, render, ReportError};

/// Document kinds a report can be written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Csv,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Text, ExportFormat::Csv, ExportFormat::Pdf];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            ExportFormat::Text => "text",
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for ExportFormat {
    type Err = ReportError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(ReportError::InvalidFormat(input.trim().to_string())),
        }
    }
}

/// `Daily_Sales_Report_2024-03-15.csv` style name for an export made on `today`.
pub fn export_file_name(report: &Report, format: ExportFormat, today: NaiveDate) -> String {
    format!(
        "{}_{}.{}",
        report.title.replace(' ', "_"),
        today.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Writes the report into `dir` and returns the created file. An export made
/// earlier the same day is overwritten.
pub fn export_report(
    report: &Report,
    format: ExportFormat,
    dir: &Path,
    today: NaiveDate,
) -> Result<PathBuf, ReportError> {
    ensure_dir(dir)?;
    let path = dir.join(export_file_name(report, format, today));
    match format {
        ExportFormat::Text => fs::write(&path, render::render_text(report))?,
        ExportFormat::Csv => {
            let file = fs::File::create(&path)?;
            write_csv(report, file)?;
        }
        ExportFormat::Pdf => pdf::write_pdf(report, &path)?,
    }
    tracing::info!(path = %path.display(), format = %format, "report exported");
    Ok(path)
}

/// One row per sale line, then the summary as label/value rows.
pub fn write_csv<W: Write>(report: &Report, sink: W) -> Result<(), ReportError> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(sink);
    writer.write_record([
        "ID", "Date", "Client", "Product", "Quantity", "Price", "Total", "Status",
    ])?;
    for line in &report.lines {
        writer.write_record([
            line.id.to_string(),
            format_display_date(line.date),
            line.client.clone(),
            line.product_name.clone(),
            line.quantity.to_string(),
            format!("{:.2}", line.price),
            format!("{:.2}", line.total),
            line.status.to_string(),
        ])?;
    }
    let period = render::period_line(report);
    writer.write_record(["Period", period.as_str()])?;
    for (label, value) in render::summary_rows(report) {
        writer.write_record([label, value.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{build_report, ReportKind};
    use chrono::NaiveDate;

    fn empty_report() -> Report {
        let now = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        build_report(ReportKind::Weekly, now, &[], &[], |_| None)
    }

    #[test]
    fn file_name_uses_title_and_export_date() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
        assert_eq!(
            export_file_name(&empty_report(), ExportFormat::Csv, today),
            "Weekly_Sales_Report_2024-03-16.csv"
        );
        assert_eq!(
            export_file_name(&empty_report(), ExportFormat::Text, today),
            "Weekly_Sales_Report_2024-03-16.txt"
        );
    }

    #[test]
    fn format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert!(matches!(
            "docx".parse::<ExportFormat>(),
            Err(ReportError::InvalidFormat(value)) if value == "docx"
        ));
    }

    #[test]
    fn text_export_writes_rendered_report() {
        let temp = tempfile::tempdir().expect("temp dir");
        let today = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
        let report = empty_report();
        let path = export_report(&report, ExportFormat::Text, &temp.path().join("out"), today)
            .expect("export");
        let written = fs::read_to_string(&path).expect("read export");
        assert_eq!(written, render::render_text(&report));
    }
}
