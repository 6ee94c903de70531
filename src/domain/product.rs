use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::common::{timestamp, Dated, Identifiable, RecordId};

/// An item the shop sells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: RecordId,
    #[serde(with = "timestamp")]
    pub date: NaiveDateTime,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

/// Field values for a product that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub date: NaiveDateTime,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

/// Partial edit of a product. The name is fixed once registered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub date: Option<NaiveDateTime>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
}

impl Product {
    pub fn from_new(id: RecordId, new: NewProduct) -> Self {
        Self {
            id,
            date: new.date,
            name: new.name,
            quantity: new.quantity,
            price: new.price,
        }
    }
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.quantity.is_none() && self.price.is_none()
    }

    pub fn apply_to(&self, product: &mut Product) {
        if let Some(date) = self.date {
            product.date = date;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
    }
}

impl Identifiable for Product {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Dated for Product {
    fn date(&self) -> NaiveDateTime {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn coffee() -> Product {
        Product::from_new(
            7,
            NewProduct {
                date: NaiveDate::from_ymd_opt(2024, 1, 2)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                name: "Coffee".into(),
                quantity: 12,
                price: 2.5,
            },
        )
    }

    #[test]
    fn update_only_touches_present_fields() {
        let mut product = coffee();
        ProductUpdate {
            price: Some(3.0),
            ..ProductUpdate::default()
        }
        .apply_to(&mut product);

        assert_eq!(product.price, 3.0);
        assert_eq!(product.quantity, 12);
        assert_eq!(product.name, "Coffee");
    }

    #[test]
    fn empty_update_is_a_no_op() {
        let mut product = coffee();
        let update = ProductUpdate::default();
        assert!(update.is_empty());
        update.apply_to(&mut product);
        assert_eq!(product, coffee());
    }
}
