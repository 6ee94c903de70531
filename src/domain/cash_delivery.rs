use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::common::{timestamp, Dated, Identifiable, RecordId};

/// Money taken out of the till and handed to someone. Never edited once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashDelivery {
    pub id: RecordId,
    #[serde(with = "timestamp")]
    pub date: NaiveDateTime,
    pub name: String,
    pub description: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCashDelivery {
    pub date: NaiveDateTime,
    pub name: String,
    pub description: String,
    pub amount: f64,
}

impl CashDelivery {
    pub fn from_new(id: RecordId, new: NewCashDelivery) -> Self {
        Self {
            id,
            date: new.date,
            name: new.name,
            description: new.description,
            amount: new.amount,
        }
    }
}

impl Identifiable for CashDelivery {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Dated for CashDelivery {
    fn date(&self) -> NaiveDateTime {
        self.date
    }
}
