//! Dashboard summary and alert generation

use chrono::{DateTime, Utc};
use inv_core::{Alert, AlertKind, Order, Product, Severity, StockLevel, StockTransaction, TransactionType};
use inv_core::format::format_quantity;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::expiry::{days_until_expiry_at, expiring_products};
use crate::policy::AnalyticsPolicy;
use crate::stock::{inventory_value, stock_level};
use crate::turnover::turnover_rate;

/// Headline numbers for the dashboard cards
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_inventory_value: f64,
    pub product_count: usize,
    pub low_stock_count: usize,
    pub expiring_count: usize,
    pub pending_orders: usize,
    pub sales_amount: f64,
    pub turnover_rate: f64,
}

pub fn dashboard_stats(
    products: &[Product],
    transactions: &[StockTransaction],
    orders: &[Order],
    now: DateTime<Utc>,
    policy: &AnalyticsPolicy,
) -> DashboardStats {
    let total_inventory_value = inventory_value(products);
    let sales_amount: f64 = transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionType::Out)
        .map(|transaction| transaction.total_amount)
        .sum();

    DashboardStats {
        total_inventory_value,
        product_count: products.len(),
        low_stock_count: products
            .iter()
            .filter(|product| stock_level(product) == StockLevel::Low)
            .count(),
        expiring_count: expiring_products(products, now, policy.expiry_warning_days).len(),
        pending_orders: orders.iter().filter(|order| order.is_pending()).count(),
        sales_amount,
        turnover_rate: turnover_rate(sales_amount, total_inventory_value),
    }
}

/// Which alert kinds to raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertToggles {
    pub low_stock: bool,
    pub excess_stock: bool,
    pub expiry: bool,
}

impl Default for AlertToggles {
    fn default() -> Self {
        Self {
            low_stock: true,
            excess_stock: true,
            expiry: true,
        }
    }
}

/// One alert per low stock, excess stock and expiring product
///
/// Most severe first; alerts of equal severity follow product order.
pub fn generate_alerts(
    products: &[Product],
    now: DateTime<Utc>,
    policy: &AnalyticsPolicy,
    toggles: &AlertToggles,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if toggles.expiry {
        for product in expiring_products(products, now, policy.expiry_warning_days) {
            let Some(expiry) = product.expiry_date else {
                continue;
            };
            let days = days_until_expiry_at(expiry, now);
            let message = if days > 0 {
                format!("{}の賞味期限まであと{}日です", product.name, days)
            } else {
                format!("{}の賞味期限が切れています", product.name)
            };
            alerts.push(alert(AlertKind::Expiry, Severity::Error, product, message, now));
        }
    }

    for product in products {
        match stock_level(product) {
            StockLevel::Low if toggles.low_stock => {
                let message = format!(
                    "{}の在庫が最低在庫数を下回っています（現在: {}）",
                    product.name,
                    format_quantity(product.current_stock, &product.unit)
                );
                alerts.push(alert(AlertKind::LowStock, Severity::Warning, product, message, now));
            }
            StockLevel::Excess if toggles.excess_stock => {
                let message = format!(
                    "{}の在庫が最大在庫数を超えています（現在: {}）",
                    product.name,
                    format_quantity(product.current_stock, &product.unit)
                );
                alerts.push(alert(AlertKind::ExcessStock, Severity::Info, product, message, now));
            }
            _ => {}
        }
    }

    alerts.sort_by(|a, b| b.severity.cmp(&a.severity));
    debug!(alerts = alerts.len(), "generated alerts");
    alerts
}

fn alert(kind: AlertKind, severity: Severity, product: &Product, message: String, now: DateTime<Utc>) -> Alert {
    Alert {
        id: format!("alert-{}-{}", kind_slug(kind), product.id),
        kind,
        severity,
        title: kind.label().to_string(),
        message,
        product_id: Some(product.id.clone()),
        date: now,
        is_read: false,
    }
}

fn kind_slug(kind: AlertKind) -> &'static str {
    match kind {
        AlertKind::LowStock => "low",
        AlertKind::ExcessStock => "excess",
        AlertKind::Expiry => "expiry",
        AlertKind::OrderRequired => "order",
    }
}
