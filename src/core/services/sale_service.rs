use chrono::NaiveDateTime;

use crate::{
    domain::{NewSale, Product, RecordId, Sale, SaleStatus, SaleUpdate},
    report::NOT_AVAILABLE,
    storage::Store,
};

use super::{ProductService, ServiceError, ServiceResult};

/// Operator input for a new sale. The unit price is taken from the product.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleDraft {
    pub date: NaiveDateTime,
    pub client: String,
    pub product_id: RecordId,
    pub quantity: i64,
    pub status: SaleStatus,
}

pub struct SaleService;

impl SaleService {
    /// Records a sale against an existing product, snapshotting its price.
    pub fn register(store: &mut Store, draft: SaleDraft) -> ServiceResult<Sale> {
        let product: Product = store.product(draft.product_id).map_err(|_| {
            ServiceError::Invalid(format!("Product {} not found", draft.product_id))
        })?;
        let sale = store.create_sale(NewSale {
            date: draft.date,
            client: draft.client.trim().to_string(),
            product_id: product.id,
            quantity: draft.quantity,
            price: product.price,
            status: draft.status,
        })?;
        Ok(sale)
    }

    pub fn get(store: &Store, id: RecordId) -> ServiceResult<Sale> {
        Ok(store.sale(id)?)
    }

    pub fn list(store: &Store) -> Vec<Sale> {
        store.sales()
    }

    pub fn edit(store: &mut Store, id: RecordId, update: &SaleUpdate) -> ServiceResult<Sale> {
        Ok(store.update_sale(id, update)?)
    }

    pub fn remove(store: &mut Store, id: RecordId) -> ServiceResult<()> {
        Ok(store.delete_sale(id)?)
    }

    /// The sale with its product name, falling back to `N/A`.
    pub fn details(store: &Store, id: RecordId) -> ServiceResult<(Sale, String)> {
        let sale = store.sale(id)?;
        let name = ProductService::name_of(store, sale.product_id)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        Ok((sale, name))
    }
}
