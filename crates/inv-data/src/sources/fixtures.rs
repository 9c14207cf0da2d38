//! JSON fixture bundles

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use inv_core::{Category, Order, Product, StockTransaction, Stocktaking, Supplier};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::DataError;

/// Every collection the dashboard reads, in one file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FixtureSet {
    pub categories: Vec<Category>,
    pub suppliers: Vec<Supplier>,
    pub products: Vec<Product>,
    pub transactions: Vec<StockTransaction>,
    pub orders: Vec<Order>,
    pub stocktakings: Vec<Stocktaking>,
}

impl FixtureSet {
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let file = File::open(path)?;
        let set = Self::from_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            products = set.products.len(),
            transactions = set.transactions.len(),
            orders = set.orders.len(),
            "fixtures loaded"
        );
        Ok(set)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), DataError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Products that break `0 ≤ min ≤ max` or have negative stock
    pub fn inconsistent_products(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| !product.is_consistent())
            .collect()
    }
}
