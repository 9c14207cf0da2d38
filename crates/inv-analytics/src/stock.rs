//! Stock level and value calculations

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use inv_core::{OrderItem, Product, ProductStatus, StockLevel};

/// Position of `current_stock` inside the min/max band
///
/// Both boundaries are inclusive and `Low` wins when they coincide.
pub fn stock_level(product: &Product) -> StockLevel {
    if product.current_stock <= product.min_stock {
        StockLevel::Low
    } else if product.current_stock >= product.max_stock {
        StockLevel::Excess
    } else {
        StockLevel::Normal
    }
}

/// Quantity needed to refill up to `max_stock`, never negative
pub fn reorder_quantity(product: &Product) -> f64 {
    (product.max_stock - product.current_stock).max(0.0)
}

/// Σ current stock × cost
pub fn inventory_value(products: &[Product]) -> f64 {
    products.iter().map(Product::stock_value).sum()
}

/// `Expired` once the expiry date has passed, otherwise the stock level
pub fn product_status(product: &Product, now: DateTime<Utc>) -> ProductStatus {
    match product.expiry_date {
        Some(expiry) if expiry < now => ProductStatus::Expired,
        _ => stock_level(product).into(),
    }
}

/// Σ quantity × unit price over order lines
pub fn order_total(items: &[OrderItem]) -> f64 {
    items.iter().map(|item| item.quantity * item.unit_price).sum()
}

pub fn low_stock_products(products: &[Product]) -> Vec<&Product> {
    products
        .iter()
        .filter(|product| stock_level(product) == StockLevel::Low)
        .collect()
}

/// Inventory value per category id, in first-seen category order
pub fn inventory_value_by_category(products: &[Product]) -> IndexMap<String, f64> {
    let mut values: IndexMap<String, f64> = IndexMap::new();
    for product in products {
        *values.entry(product.category_id.clone()).or_insert(0.0) += product.stock_value();
    }
    values
}
