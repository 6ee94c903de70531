use std::fmt::Write;

use crate::{
    domain::format_display_date,
    utils::table::{Table, TableColumn},
};

use super::aggregator::Report;

const CLIENT_WIDTH: usize = 24;
const PRODUCT_WIDTH: usize = 24;
const DESCRIPTION_WIDTH: usize = 32;

pub fn sales_table(report: &Report) -> Table {
    let mut table = Table::new(vec![
        TableColumn::right("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Client").max_width(CLIENT_WIDTH),
        TableColumn::left("Product").max_width(PRODUCT_WIDTH),
        TableColumn::right("Quantity"),
        TableColumn::right("Total"),
        TableColumn::left("Status"),
    ]);
    for line in &report.lines {
        table.push_row(vec![
            line.id.to_string(),
            format_display_date(line.date),
            line.client.clone(),
            line.product_name.clone(),
            line.quantity.to_string(),
            format!("{:.2}", line.total),
            line.status.to_string(),
        ]);
    }
    table
}

pub fn deliveries_table(report: &Report) -> Table {
    let mut table = Table::new(vec![
        TableColumn::right("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Name").max_width(CLIENT_WIDTH),
        TableColumn::left("Description").max_width(DESCRIPTION_WIDTH),
        TableColumn::right("Amount"),
    ]);
    for delivery in &report.deliveries {
        table.push_row(vec![
            delivery.id.to_string(),
            format_display_date(delivery.date),
            delivery.name.clone(),
            delivery.description.clone(),
            format!("{:.2}", delivery.amount),
        ]);
    }
    table
}

/// Label/value pairs of the summary block, amounts at two decimals.
pub fn summary_rows(report: &Report) -> Vec<(&'static str, String)> {
    vec![
        ("Total sales", format!("{:.2}", report.total_sales_amount)),
        ("Products sold", report.total_products_sold.to_string()),
        ("Cash delivered", format!("{:.2}", report.total_cash_delivered)),
        ("Net (sales - deliveries)", format!("{:.2}", report.net)),
    ]
}

pub fn period_line(report: &Report) -> String {
    format!(
        "Period: {} to {}",
        format_display_date(report.period_start),
        format_display_date(report.period_end)
    )
}

/// Full plain-text rendition used both on screen and for text exports.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.title);
    let _ = writeln!(out, "{}", period_line(report));

    let _ = writeln!(out, "\nSales");
    let sales = sales_table(report);
    if sales.is_empty() {
        let _ = writeln!(out, "No sales in this period.");
    } else {
        let _ = writeln!(out, "{}", sales.render());
    }

    let _ = writeln!(out, "\nCash deliveries");
    let deliveries = deliveries_table(report);
    if deliveries.is_empty() {
        let _ = writeln!(out, "No cash deliveries in this period.");
    } else {
        let _ = writeln!(out, "{}", deliveries.render());
    }

    let _ = writeln!(out, "\nSummary");
    for (label, value) in summary_rows(report) {
        let _ = writeln!(out, "{label}: {value}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{NewSale, Sale, SaleStatus},
        report::{build_report, ReportKind},
    };
    use chrono::NaiveDate;

    #[test]
    fn renders_period_tables_and_summary() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let sale = Sale::from_new(
            4,
            NewSale {
                date: now,
                client: "Ana".into(),
                product_id: 1,
                quantity: 3,
                price: 2.5,
                status: SaleStatus::Pending,
            },
        );
        let report = build_report(ReportKind::Monthly, now, &[sale], &[], |_| {
            Some("Tea".into())
        });
        let text = render_text(&report);

        assert!(text.starts_with("Monthly Sales Report\nPeriod: 01/03/2024 to 31/03/2024\n"));
        assert!(text.contains(" 4   15/03/2024   Ana      Tea"));
        assert!(text.contains("No cash deliveries in this period."));
        assert!(text.contains("Total sales: 7.50\n"));
        assert!(text.contains("Products sold: 3\n"));
        assert!(text.ends_with("Net (sales - deliveries): 7.50\n"));
    }
}
