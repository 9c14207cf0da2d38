//! Turnover and transaction roll-ups

use indexmap::IndexMap;
use inv_core::{StockTransaction, TransactionType};
use serde::Serialize;

/// `sales_amount / average_inventory`; 0 when there is no inventory
pub fn turnover_rate(sales_amount: f64, average_inventory: f64) -> f64 {
    if average_inventory == 0.0 {
        return 0.0;
    }
    sales_amount / average_inventory
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSummary {
    pub count: usize,
    pub total_quantity: f64,
    pub total_amount: f64,
}

/// Count, quantity and amount per transaction type
///
/// Types appear in first-seen order; types with no transactions are absent.
pub fn group_transactions_by_type(transactions: &[StockTransaction]) -> IndexMap<TransactionType, TypeSummary> {
    let mut groups: IndexMap<TransactionType, TypeSummary> = IndexMap::new();
    for transaction in transactions {
        let summary = groups.entry(transaction.kind).or_default();
        summary.count += 1;
        summary.total_quantity += transaction.quantity;
        summary.total_amount += transaction.total_amount;
    }
    groups
}
