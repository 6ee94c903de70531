pub mod cash_delivery;
pub mod common;
pub mod product;
pub mod sale;

pub use cash_delivery::{CashDelivery, NewCashDelivery};
pub use common::{
    format_display_date, parse_display_date, truncate_to_second, Dated, Identifiable, RecordId,
    DISPLAY_DATE_FORMAT, TIMESTAMP_FORMAT,
};
pub use product::{NewProduct, Product, ProductUpdate};
pub use sale::{line_total, NewSale, Sale, SaleStatus, SaleUpdate};
