//! Stocktake variance and loss

use inv_core::StocktakingItem;
use serde::Serialize;

/// Counted minus theoretical stock
pub fn stock_difference(item: &StocktakingItem) -> f64 {
    item.actual_stock - item.theoretical_stock
}

pub fn stock_difference_amount(item: &StocktakingItem, unit_cost: f64) -> f64 {
    stock_difference(item) * unit_cost
}

/// Share of theoretical stock that went missing, in percent
///
/// Returns 0 when `theoretical_stock` is 0. Surpluses give negative rates.
pub fn loss_rate(theoretical_stock: f64, actual_stock: f64) -> f64 {
    if theoretical_stock == 0.0 {
        return 0.0;
    }
    (theoretical_stock - actual_stock) / theoretical_stock * 100.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StocktakeSummary {
    pub lines: usize,
    pub counted: usize,
    pub shortage_lines: usize,
    pub surplus_lines: usize,
    pub total_difference_amount: f64,
    pub loss_rate: f64,
}

/// Roll up a stocktake's lines
pub fn stocktake_summary(items: &[StocktakingItem]) -> StocktakeSummary {
    let mut summary = StocktakeSummary {
        lines: items.len(),
        ..StocktakeSummary::default()
    };
    let mut theoretical = 0.0;
    let mut actual = 0.0;

    for item in items {
        if item.is_counted() {
            summary.counted += 1;
        }
        if item.difference < 0.0 {
            summary.shortage_lines += 1;
        } else if item.difference > 0.0 {
            summary.surplus_lines += 1;
        }
        summary.total_difference_amount += item.difference_amount;
        theoretical += item.theoretical_stock;
        actual += item.actual_stock;
    }

    summary.loss_rate = loss_rate(theoretical, actual);
    summary
}
