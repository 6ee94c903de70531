use crate::{
    domain::{NewProduct, Product, ProductUpdate, RecordId},
    storage::Store,
};

use super::{ServiceError, ServiceResult};

pub struct ProductService;

impl ProductService {
    pub fn register(store: &mut Store, mut product: NewProduct) -> ServiceResult<Product> {
        product.name = product.name.trim().to_string();
        if product.name.is_empty() {
            return Err(ServiceError::Invalid("Product name cannot be empty".into()));
        }
        Ok(store.create_product(product)?)
    }

    pub fn get(store: &Store, id: RecordId) -> ServiceResult<Product> {
        Ok(store.product(id)?)
    }

    pub fn list(store: &Store) -> Vec<Product> {
        store.products()
    }

    pub fn edit(store: &mut Store, id: RecordId, update: &ProductUpdate) -> ServiceResult<Product> {
        Ok(store.update_product(id, update)?)
    }

    pub fn remove(store: &mut Store, id: RecordId) -> ServiceResult<()> {
        Ok(store.delete_product(id)?)
    }

    /// Display name for a product id, `None` when the product is gone.
    pub fn name_of(store: &Store, id: RecordId) -> Option<String> {
        store.product(id).ok().map(|product| product.name)
    }
}
