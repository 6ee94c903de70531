pub mod cash_delivery_service;
pub mod product_service;
pub mod report_service;
pub mod sale_service;

pub use cash_delivery_service::CashDeliveryService;
pub use product_service::ProductService;
pub use report_service::ReportService;
pub use sale_service::{SaleDraft, SaleService};

use crate::{errors::StoreError, report::ReportError};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("{0}")]
    Invalid(String),
}
