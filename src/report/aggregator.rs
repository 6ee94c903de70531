use chrono::NaiveDateTime;

use crate::domain::{CashDelivery, RecordId, Sale, SaleStatus};

use super::period::{compute_period, ReportKind};

/// Product name shown when a sale points at a product that no longer exists.
pub const NOT_AVAILABLE: &str = "N/A";

/// One sale as it appears in a report, with the product name resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub id: RecordId,
    pub date: NaiveDateTime,
    pub client: String,
    pub product_id: RecordId,
    pub product_name: String,
    pub quantity: i64,
    pub price: f64,
    pub total: f64,
    pub status: SaleStatus,
}

impl ReportLine {
    fn resolve(sale: &Sale, product_name: Option<String>) -> Self {
        Self {
            id: sale.id,
            date: sale.date,
            client: sale.client.clone(),
            product_id: sale.product_id,
            product_name: product_name.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            quantity: sale.quantity,
            price: sale.price,
            total: sale.total,
            status: sale.status,
        }
    }
}

/// Derived view of one period; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub kind: ReportKind,
    pub title: String,
    pub period_start: NaiveDateTime,
    pub period_end: NaiveDateTime,
    pub lines: Vec<ReportLine>,
    pub deliveries: Vec<CashDelivery>,
    pub total_sales_amount: f64,
    pub total_products_sold: i64,
    pub total_cash_delivered: f64,
    pub net: f64,
}

/// Joins already range-filtered sales to product names and sums the period.
///
/// `resolve_product_name` returning `None` degrades to [`NOT_AVAILABLE`];
/// lines keep the order the sales were given in.
pub fn build_report<F>(
    kind: ReportKind,
    now: NaiveDateTime,
    sales: &[Sale],
    deliveries: &[CashDelivery],
    resolve_product_name: F,
) -> Report
where
    F: Fn(RecordId) -> Option<String>,
{
    let period = compute_period(kind, now);
    let lines: Vec<ReportLine> = sales
        .iter()
        .map(|sale| ReportLine::resolve(sale, resolve_product_name(sale.product_id)))
        .collect();

    let total_sales_amount: f64 = sales.iter().map(|sale| sale.total).sum();
    let total_products_sold = sales
        .iter()
        .fold(0i64, |sum, sale| sum.saturating_add(sale.quantity));
    let total_cash_delivered: f64 = deliveries.iter().map(|delivery| delivery.amount).sum();

    Report {
        kind,
        title: kind.title(),
        period_start: period.start,
        period_end: period.end,
        lines,
        deliveries: deliveries.to_vec(),
        total_sales_amount,
        total_products_sold,
        total_cash_delivered,
        net: total_sales_amount - total_cash_delivered,
    }
}
