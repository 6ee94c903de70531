pub mod json_backend;
pub mod memory;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        CashDelivery, Dated, Identifiable, NewCashDelivery, NewProduct, NewSale, Product,
        ProductUpdate, RecordId, Sale, SaleUpdate,
    },
    errors::StoreError,
};

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;

pub type Result<T> = std::result::Result<T, StoreError>;

pub const SCHEMA_VERSION: u32 = 1;

/// Last identity handed out per table. Counters only grow, so ids of deleted
/// rows are never reused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequences {
    pub product: RecordId,
    pub sale: RecordId,
    pub cash_delivery: RecordId,
}

/// Everything the shop keeps, as one persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tables {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub sales: Vec<Sale>,
    #[serde(default)]
    pub cash_deliveries: Vec<CashDelivery>,
    #[serde(default)]
    pub sequences: Sequences,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            products: Vec::new(),
            sales: Vec::new(),
            cash_deliveries: Vec::new(),
            sequences: Sequences::default(),
        }
    }
}

impl Tables {
    /// Lifts counters that lag behind stored ids, e.g. after a hand-edited file.
    pub fn reconcile_sequences(&mut self) {
        self.sequences.product = self.sequences.product.max(max_id(&self.products));
        self.sequences.sale = self.sequences.sale.max(max_id(&self.sales));
        self.sequences.cash_delivery = self
            .sequences
            .cash_delivery
            .max(max_id(&self.cash_deliveries));
    }
}

fn max_id<T: Identifiable>(rows: &[T]) -> RecordId {
    rows.iter().map(Identifiable::id).max().unwrap_or(0)
}

/// Abstraction over persistence backends able to hold the shop tables and
/// snapshots of them.
pub trait StorageBackend: Send {
    fn load(&self) -> Result<Tables>;
    fn save(&mut self, tables: &Tables) -> Result<()>;
    /// Writes a snapshot and returns its name.
    fn backup(&mut self, tables: &Tables, note: Option<&str>) -> Result<String>;
    /// Snapshot names, newest first.
    fn list_backups(&self) -> Result<Vec<String>>;
    /// Replaces the live tables with the named snapshot and returns them.
    fn restore(&mut self, backup_name: &str) -> Result<Tables>;
    fn describe(&self) -> String;
}

/// Record store backed by a [`StorageBackend`]. Every mutation is written
/// through before it becomes visible.
pub struct Store {
    tables: Tables,
    backend: Box<dyn StorageBackend>,
}

impl Store {
    pub fn open(backend: Box<dyn StorageBackend>) -> Result<Self> {
        let mut tables = backend.load()?;
        tables.reconcile_sequences();
        tracing::info!(
            location = %backend.describe(),
            products = tables.products.len(),
            sales = tables.sales.len(),
            cash_deliveries = tables.cash_deliveries.len(),
            "store opened"
        );
        Ok(Self { tables, backend })
    }

    pub fn in_memory() -> Self {
        Self {
            tables: Tables::default(),
            backend: Box::new(MemoryStorage::default()),
        }
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn describe(&self) -> String {
        self.backend.describe()
    }

    /// Applies `change` to a copy of the tables, persists it, then swaps it
    /// in. A failed change or save leaves the store untouched.
    fn commit<T>(&mut self, change: impl FnOnce(&mut Tables) -> Result<T>) -> Result<T> {
        let mut staged = self.tables.clone();
        let outcome = change(&mut staged)?;
        self.backend.save(&staged)?;
        self.tables = staged;
        Ok(outcome)
    }

    pub fn create_product(&mut self, new: NewProduct) -> Result<Product> {
        let product = self.commit(|tables| {
            tables.sequences.product += 1;
            let product = Product::from_new(tables.sequences.product, new);
            tables.products.push(product.clone());
            Ok(product)
        })?;
        tracing::info!(id = product.id, name = %product.name, "product registered");
        Ok(product)
    }

    pub fn product(&self, id: RecordId) -> Result<Product> {
        find(&self.tables.products, id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("product", id))
    }

    /// All products, newest id first.
    pub fn products(&self) -> Vec<Product> {
        newest_first(&self.tables.products)
    }

    pub fn update_product(&mut self, id: RecordId, update: &ProductUpdate) -> Result<Product> {
        let product = self.commit(|tables| {
            let product = find_mut(&mut tables.products, id)
                .ok_or_else(|| StoreError::not_found("product", id))?;
            update.apply_to(product);
            Ok(product.clone())
        })?;
        tracing::info!(id, "product updated");
        Ok(product)
    }

    /// Sales referencing the product are left in place.
    pub fn delete_product(&mut self, id: RecordId) -> Result<()> {
        self.commit(|tables| remove(&mut tables.products, id, "product"))?;
        tracing::info!(id, "product deleted");
        Ok(())
    }

    pub fn create_sale(&mut self, new: NewSale) -> Result<Sale> {
        let sale = self.commit(|tables| {
            tables.sequences.sale += 1;
            let sale = Sale::from_new(tables.sequences.sale, new);
            tables.sales.push(sale.clone());
            Ok(sale)
        })?;
        tracing::info!(id = sale.id, total = sale.total, "sale registered");
        Ok(sale)
    }

    pub fn sale(&self, id: RecordId) -> Result<Sale> {
        find(&self.tables.sales, id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("sale", id))
    }

    /// All sales, newest id first.
    pub fn sales(&self) -> Vec<Sale> {
        newest_first(&self.tables.sales)
    }

    pub fn update_sale(&mut self, id: RecordId, update: &SaleUpdate) -> Result<Sale> {
        let sale = self.commit(|tables| {
            let sale = find_mut(&mut tables.sales, id)
                .ok_or_else(|| StoreError::not_found("sale", id))?;
            update.apply_to(sale);
            Ok(sale.clone())
        })?;
        tracing::info!(id, total = sale.total, "sale updated");
        Ok(sale)
    }

    pub fn delete_sale(&mut self, id: RecordId) -> Result<()> {
        self.commit(|tables| remove(&mut tables.sales, id, "sale"))?;
        tracing::info!(id, "sale deleted");
        Ok(())
    }

    /// Sales dated within `[start, end]`, in insertion order.
    pub fn sales_in_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<Sale> {
        in_range(&self.tables.sales, start, end)
    }

    pub fn create_cash_delivery(&mut self, new: NewCashDelivery) -> Result<CashDelivery> {
        let delivery = self.commit(|tables| {
            tables.sequences.cash_delivery += 1;
            let delivery = CashDelivery::from_new(tables.sequences.cash_delivery, new);
            tables.cash_deliveries.push(delivery.clone());
            Ok(delivery)
        })?;
        tracing::info!(id = delivery.id, amount = delivery.amount, "cash delivery registered");
        Ok(delivery)
    }

    /// All cash deliveries, newest id first.
    pub fn cash_deliveries(&self) -> Vec<CashDelivery> {
        newest_first(&self.tables.cash_deliveries)
    }

    /// Cash deliveries dated within `[start, end]`, in insertion order.
    pub fn cash_deliveries_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Vec<CashDelivery> {
        in_range(&self.tables.cash_deliveries, start, end)
    }

    pub fn backup(&mut self, note: Option<&str>) -> Result<String> {
        let name = self.backend.backup(&self.tables, note)?;
        tracing::info!(backup = %name, "store backup created");
        Ok(name)
    }

    pub fn list_backups(&self) -> Result<Vec<String>> {
        self.backend.list_backups()
    }

    pub fn restore(&mut self, backup_name: &str) -> Result<()> {
        let mut tables = self.backend.restore(backup_name)?;
        tables.reconcile_sequences();
        self.tables = tables;
        tracing::warn!(backup = %backup_name, "store restored from backup");
        Ok(())
    }
}

fn find<T: Identifiable>(rows: &[T], id: RecordId) -> Option<&T> {
    rows.iter().find(|row| row.id() == id)
}

fn find_mut<T: Identifiable>(rows: &mut [T], id: RecordId) -> Option<&mut T> {
    rows.iter_mut().find(|row| row.id() == id)
}

fn remove<T: Identifiable>(rows: &mut Vec<T>, id: RecordId, entity: &'static str) -> Result<()> {
    let index = rows
        .iter()
        .position(|row| row.id() == id)
        .ok_or_else(|| StoreError::not_found(entity, id))?;
    rows.remove(index);
    Ok(())
}

fn newest_first<T: Identifiable + Clone>(rows: &[T]) -> Vec<T> {
    let mut listed = rows.to_vec();
    listed.sort_by_key(|row| std::cmp::Reverse(row.id()));
    listed
}

fn in_range<T: Identifiable + Dated + Clone>(
    rows: &[T],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<T> {
    let mut matched: Vec<T> = rows
        .iter()
        .filter(|row| row.date() >= start && row.date() <= end)
        .cloned()
        .collect();
    matched.sort_by_key(Identifiable::id);
    matched
}
