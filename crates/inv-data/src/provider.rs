//! Data provider interface

use inv_core::{Category, Order, Product, StockTransaction, Stocktaking, Supplier};

/// Where the presentation layer gets its collections from
///
/// Every call returns an owned snapshot; later changes to the source do not
/// show up in a vector that was already handed out.
pub trait InventoryProvider: Send + Sync {
    fn products(&self) -> anyhow::Result<Vec<Product>>;

    fn transactions(&self) -> anyhow::Result<Vec<StockTransaction>>;

    fn orders(&self) -> anyhow::Result<Vec<Order>>;

    fn stocktakings(&self) -> anyhow::Result<Vec<Stocktaking>>;

    fn categories(&self) -> anyhow::Result<Vec<Category>>;

    fn suppliers(&self) -> anyhow::Result<Vec<Supplier>>;

    /// Get the source name/path
    fn source_name(&self) -> &str;
}
