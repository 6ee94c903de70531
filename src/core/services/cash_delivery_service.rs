use crate::{
    domain::{CashDelivery, NewCashDelivery},
    storage::Store,
};

use super::{ServiceError, ServiceResult};

pub struct CashDeliveryService;

impl CashDeliveryService {
    pub fn register(store: &mut Store, delivery: NewCashDelivery) -> ServiceResult<CashDelivery> {
        if !delivery.amount.is_finite() {
            return Err(ServiceError::Invalid("Amount must be a number".into()));
        }
        Ok(store.create_cash_delivery(delivery)?)
    }

    pub fn list(store: &Store) -> Vec<CashDelivery> {
        store.cash_deliveries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn delivery(amount: f64) -> NewCashDelivery {
        NewCashDelivery {
            date: NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(17, 0, 0)
                .unwrap(),
            name: "Owner".into(),
            description: "Evening pickup".into(),
            amount,
        }
    }

    #[test]
    fn registered_deliveries_are_listed_newest_first() {
        let mut store = Store::in_memory();
        CashDeliveryService::register(&mut store, delivery(10.0)).unwrap();
        CashDeliveryService::register(&mut store, delivery(25.0)).unwrap();
        let amounts: Vec<_> = CashDeliveryService::list(&store)
            .iter()
            .map(|d| d.amount)
            .collect();
        assert_eq!(amounts, vec![25.0, 10.0]);
    }

    #[test]
    fn non_finite_amounts_are_rejected() {
        let mut store = Store::in_memory();
        assert!(CashDeliveryService::register(&mut store, delivery(f64::NAN)).is_err());
        assert!(CashDeliveryService::list(&store).is_empty());
    }
}
