use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::common::{timestamp, Dated, Identifiable, RecordId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleStatus {
    Paid,
    #[default]
    Pending,
}

impl SaleStatus {
    pub const ALL: [SaleStatus; 2] = [SaleStatus::Paid, SaleStatus::Pending];

    pub fn label(self) -> &'static str {
        match self {
            SaleStatus::Paid => "Paid",
            SaleStatus::Pending => "Pending",
        }
    }

    /// Maps the numbered menu choice (`1` paid, `2` pending).
    pub fn from_choice(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(SaleStatus::Paid),
            "2" => Some(SaleStatus::Pending),
            _ => None,
        }
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recorded sale. `price` is the unit price captured when the sale was
/// registered and does not follow later product price changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: RecordId,
    #[serde(with = "timestamp")]
    pub date: NaiveDateTime,
    pub client: String,
    pub product_id: RecordId,
    pub quantity: i64,
    pub price: f64,
    pub total: f64,
    pub status: SaleStatus,
}

/// Field values for a sale that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub date: NaiveDateTime,
    pub client: String,
    pub product_id: RecordId,
    pub quantity: i64,
    pub price: f64,
    pub status: SaleStatus,
}

/// Partial edit of a sale; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleUpdate {
    pub date: Option<NaiveDateTime>,
    pub client: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
    pub status: Option<SaleStatus>,
}

pub fn line_total(quantity: i64, price: f64) -> f64 {
    quantity as f64 * price
}

impl Sale {
    pub fn from_new(id: RecordId, new: NewSale) -> Self {
        Self {
            id,
            date: new.date,
            client: new.client,
            product_id: new.product_id,
            quantity: new.quantity,
            price: new.price,
            total: line_total(new.quantity, new.price),
            status: new.status,
        }
    }

    pub fn recompute_total(&mut self) {
        self.total = line_total(self.quantity, self.price);
    }
}

impl SaleUpdate {
    /// Applies present fields and always re-derives the total, even when
    /// neither quantity nor price changed.
    pub fn apply_to(&self, sale: &mut Sale) {
        if let Some(date) = self.date {
            sale.date = date;
        }
        if let Some(client) = &self.client {
            sale.client = client.clone();
        }
        if let Some(quantity) = self.quantity {
            sale.quantity = quantity;
        }
        if let Some(price) = self.price {
            sale.price = price;
        }
        if let Some(status) = self.status {
            sale.status = status;
        }
        sale.recompute_total();
    }
}

impl Identifiable for Sale {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Dated for Sale {
    fn date(&self) -> NaiveDateTime {
        self.date
    }
}
