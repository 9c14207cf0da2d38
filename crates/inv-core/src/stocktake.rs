//! Stocktake session
//!
//! A session snapshots every product's theoretical stock when it starts. Counts
//! are entered line by line; completing the session freezes it.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::model::{Product, Stocktaking, StocktakingItem, StocktakingStatus};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StocktakeError {
    #[error("stocktake {0} is already completed")]
    Completed(String),

    #[error("product {0} is not part of this stocktake")]
    UnknownProduct(String),

    #[error("invalid count {count} for product {product_id}")]
    InvalidCount { product_id: String, count: f64 },
}

/// An in-progress stocktake
#[derive(Debug, Clone)]
pub struct StocktakeSession {
    stocktaking: Stocktaking,
    /// Unit cost per line, same order as `stocktaking.items`
    unit_costs: Vec<f64>,
}

impl StocktakeSession {
    /// Start a stocktake over `products`, one unconfirmed line each
    pub fn start(products: &[Product], user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        let items: Vec<StocktakingItem> = products.iter().map(StocktakingItem::unconfirmed).collect();
        let unit_costs = products.iter().map(|product| product.cost).collect();
        let stocktaking = Stocktaking {
            id: format!("st-{}", Uuid::new_v4()),
            date: now,
            items,
            total_difference: 0.0,
            status: StocktakingStatus::InProgress,
            user_id: user_id.into(),
        };

        info!(id = %stocktaking.id, lines = stocktaking.items.len(), "stocktake started");
        Self {
            stocktaking,
            unit_costs,
        }
    }

    pub fn id(&self) -> &str {
        &self.stocktaking.id
    }

    pub fn items(&self) -> &[StocktakingItem] {
        &self.stocktaking.items
    }

    pub fn item(&self, product_id: &str) -> Option<&StocktakingItem> {
        self.stocktaking
            .items
            .iter()
            .find(|item| item.product_id == product_id)
    }

    pub fn is_completed(&self) -> bool {
        self.stocktaking.status == StocktakingStatus::Completed
    }

    /// Enter the counted quantity for one product
    pub fn record_count(
        &mut self,
        product_id: &str,
        actual_stock: f64,
    ) -> Result<&StocktakingItem, StocktakeError> {
        if self.is_completed() {
            return Err(StocktakeError::Completed(self.stocktaking.id.clone()));
        }
        if !actual_stock.is_finite() || actual_stock < 0.0 {
            return Err(StocktakeError::InvalidCount {
                product_id: product_id.to_string(),
                count: actual_stock,
            });
        }

        let idx = self
            .stocktaking
            .items
            .iter()
            .position(|item| item.product_id == product_id)
            .ok_or_else(|| StocktakeError::UnknownProduct(product_id.to_string()))?;

        let item = &mut self.stocktaking.items[idx];
        item.recount(actual_stock, self.unit_costs[idx]);
        Ok(item)
    }

    /// `(counted lines, total lines)`
    pub fn progress(&self) -> (usize, usize) {
        let counted = self.stocktaking.items.iter().filter(|item| item.is_counted()).count();
        (counted, self.stocktaking.items.len())
    }

    /// Sum of all monetary differences so far
    pub fn total_difference(&self) -> f64 {
        self.stocktaking
            .items
            .iter()
            .map(|item| item.difference_amount)
            .sum()
    }

    /// Freeze the session and return the finished stocktake
    pub fn complete(&mut self) -> Result<&Stocktaking, StocktakeError> {
        if self.is_completed() {
            return Err(StocktakeError::Completed(self.stocktaking.id.clone()));
        }
        self.stocktaking.total_difference = self.total_difference();
        self.stocktaking.status = StocktakingStatus::Completed;

        info!(
            id = %self.stocktaking.id,
            total_difference = self.stocktaking.total_difference,
            "stocktake completed"
        );
        Ok(&self.stocktaking)
    }

    /// Abandon the session; nothing is kept
    pub fn cancel(self) {
        info!(id = %self.stocktaking.id, "stocktake cancelled");
    }

    pub fn stocktaking(&self) -> &Stocktaking {
        &self.stocktaking
    }

    pub fn into_stocktaking(self) -> Stocktaking {
        self.stocktaking
    }
}
