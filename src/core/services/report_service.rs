use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::{
    report::{build_report, compute_period, export_report, ExportFormat, Report, ReportKind},
    storage::Store,
};

use super::{ProductService, ServiceResult};

pub struct ReportService;

impl ReportService {
    /// Builds the report for the period of `kind` containing `now`.
    pub fn generate(store: &Store, kind: ReportKind, now: NaiveDateTime) -> Report {
        let period = compute_period(kind, now);
        let sales = store.sales_in_range(period.start, period.end);
        let deliveries = store.cash_deliveries_in_range(period.start, period.end);
        let report = build_report(kind, now, &sales, &deliveries, |id| {
            ProductService::name_of(store, id)
        });
        tracing::info!(
            kind = %kind,
            sales = report.lines.len(),
            deliveries = report.deliveries.len(),
            net = report.net,
            "report generated"
        );
        report
    }

    pub fn export(
        report: &Report,
        format: ExportFormat,
        dir: &Path,
        now: NaiveDateTime,
    ) -> ServiceResult<PathBuf> {
        Ok(export_report(report, format, dir, now.date())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewCashDelivery, NewProduct, NewSale, SaleStatus};
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn seed(store: &mut Store) {
        let tea = store
            .create_product(NewProduct {
                date: at(1, 0, 0, 0),
                name: "Tea".into(),
                quantity: 50,
                price: 10.0,
            })
            .unwrap();
        for (date, quantity, price) in [
            (at(15, 8, 0, 0), 2, 10.0),
            (at(15, 23, 59, 59), 3, 5.0),
            (at(15, 12, 0, 0), 1, 5.0),
            (at(16, 0, 0, 0), 7, 1.0),
        ] {
            store
                .create_sale(NewSale {
                    date,
                    client: "Walk-in".into(),
                    product_id: tea.id,
                    quantity,
                    price,
                    status: SaleStatus::Paid,
                })
                .unwrap();
        }
        store
            .create_sale(NewSale {
                date: at(15, 9, 0, 0),
                client: "Ghost".into(),
                product_id: 77,
                quantity: 0,
                price: 0.0,
                status: SaleStatus::Pending,
            })
            .unwrap();
        store
            .create_cash_delivery(NewCashDelivery {
                date: at(15, 18, 0, 0),
                name: "Owner".into(),
                description: "Deposit".into(),
                amount: 15.0,
            })
            .unwrap();
    }

    #[test]
    fn daily_report_filters_by_period_and_sums() {
        let mut store = Store::in_memory();
        seed(&mut store);
        let report = ReportService::generate(&store, ReportKind::Daily, at(15, 20, 0, 0));

        let ids: Vec<_> = report.lines.iter().map(|line| line.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 5]);
        assert_eq!(report.total_sales_amount, 40.0);
        assert_eq!(report.total_products_sold, 6);
        assert_eq!(report.total_cash_delivered, 15.0);
        assert_eq!(report.net, 25.0);
        assert_eq!(report.lines[3].product_name, "N/A");
    }

    #[test]
    fn weekly_report_reaches_saturday() {
        let mut store = Store::in_memory();
        seed(&mut store);
        let report = ReportService::generate(&store, ReportKind::Weekly, at(15, 20, 0, 0));
        assert_eq!(report.total_products_sold, 13);
    }

    #[test]
    fn export_writes_into_the_directory() {
        let mut store = Store::in_memory();
        seed(&mut store);
        let temp = tempfile::tempdir().expect("temp dir");
        let now = at(15, 20, 0, 0);
        let report = ReportService::generate(&store, ReportKind::Daily, now);
        let path = ReportService::export(&report, ExportFormat::Csv, temp.path(), now).unwrap();
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("Daily_Sales_Report_2024-03-15.csv")
        );
        assert!(path.exists());
    }
}
