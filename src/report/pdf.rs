//! A4 PDF rendition of a report: title, period line, sales table and summary.

use std::{fs::File, io::BufWriter, path::Path};

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::domain::format_display_date;

use super::{aggregator::Report, render, ReportError};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;
const ROW_HEIGHT: f32 = 7.0;
const LAYER: &str = "Report";

/// Column header, width in mm and the characters that fit at table size.
const SALES_COLUMNS: [(&str, f32, usize); 7] = [
    ("ID", 15.0, 7),
    ("Date", 25.0, 12),
    ("Client", 40.0, 20),
    ("Product", 30.0, 15),
    ("Quantity", 20.0, 10),
    ("Total", 20.0, 10),
    ("Status", 20.0, 10),
];

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Writes pages top-down and opens a new page when the cursor reaches the
/// bottom margin.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    y: f32,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, ReportError> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(pdf_error)?,
        };
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            fonts,
            y: PAGE_HEIGHT - MARGIN - ROW_HEIGHT,
        })
    }

    fn ensure_room(&mut self) {
        if self.y < MARGIN + ROW_HEIGHT {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN - ROW_HEIGHT;
        }
    }

    fn text_at(&self, text: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.fonts.bold } else { &self.fonts.regular };
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        self.ensure_room();
        self.text_at(text, size, MARGIN, bold);
        self.y -= ROW_HEIGHT;
    }

    fn row(&mut self, cells: &[String], bold: bool) {
        self.ensure_room();
        let mut x = MARGIN;
        for (cell, (_, width, fits)) in cells.iter().zip(SALES_COLUMNS) {
            self.text_at(&clip(cell, fits), 10.0, x, bold);
            x += width;
        }
        self.y -= ROW_HEIGHT;
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn save(self, path: &Path) -> Result<(), ReportError> {
        let mut sink = BufWriter::new(File::create(path)?);
        self.doc.save(&mut sink).map_err(pdf_error)
    }
}

pub fn write_pdf(report: &Report, path: &Path) -> Result<(), ReportError> {
    let mut page = PageWriter::new(&report.title)?;
    page.line(&report.title, 16.0, true);
    page.line(&render::period_line(report), 12.0, false);
    page.gap(5.0);

    let header: Vec<String> = SALES_COLUMNS
        .iter()
        .map(|(title, _, _)| title.to_string())
        .collect();
    page.row(&header, true);
    if report.lines.is_empty() {
        page.line("No sales in this period.", 10.0, false);
    }
    for line in &report.lines {
        page.row(
            &[
                line.id.to_string(),
                format_display_date(line.date),
                line.client.clone(),
                line.product_name.clone(),
                line.quantity.to_string(),
                format!("{:.2}", line.total),
                line.status.to_string(),
            ],
            false,
        );
    }

    page.gap(10.0);
    page.line("Summary", 12.0, true);
    for (label, value) in render::summary_rows(report) {
        page.line(&format!("{label}: {value}"), 12.0, false);
    }
    page.save(path)
}

fn clip(text: &str, fits: usize) -> String {
    if text.chars().count() <= fits {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(fits.saturating_sub(3)).collect();
        clipped.push_str("...");
        clipped
    }
}

fn pdf_error(err: printpdf::Error) -> ReportError {
    ReportError::Pdf(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_cells_are_clipped_to_their_column() {
        assert_eq!(clip("Tea", 15), "Tea");
        assert_eq!(clip("Extraordinarily long product", 15), "Extraordinar...");
    }
}
