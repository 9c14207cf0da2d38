//! Inventory analytics
//!
//! Pure functions deriving the numbers shown on the dashboard and in the
//! reports: stock levels, reorder quantities, stocktake variance, ABC
//! classes, turnover and expiry windows. Nothing here mutates its inputs or
//! keeps state between calls. Division by zero is the only guarded case;
//! other malformed numbers flow through as IEEE `NaN`/`inf`.

pub mod abc;
pub mod dashboard;
pub mod expiry;
pub mod orders;
pub mod policy;
pub mod stock;
pub mod turnover;
pub mod variance;

// Re-exports
pub use abc::{abc_classification, abc_classification_with, AbcClass, AbcEntry};
pub use dashboard::{dashboard_stats, generate_alerts, AlertToggles, DashboardStats};
pub use expiry::{days_until_expiry, days_until_expiry_at, expiring_products, is_expiring_soon, is_expiring_soon_at};
pub use orders::draft_orders;
pub use policy::{AnalyticsPolicy, PolicyError};
pub use stock::{
    inventory_value, inventory_value_by_category, low_stock_products, order_total, product_status,
    reorder_quantity, stock_level,
};
pub use turnover::{group_transactions_by_type, turnover_rate, TypeSummary};
pub use variance::{loss_rate, stock_difference, stock_difference_amount, stocktake_summary, StocktakeSummary};
