//! Inventory entities
//!
//! All entities are plain owned values. Field names serialize in camelCase so
//! fixture files line up with the dashboard's JSON shapes.

use chrono::{DateTime, Utc};
use inv_query::Record;
use serde::{Deserialize, Serialize};

/// A stocked item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    pub category_id: String,
    pub unit: String,
    pub cost: f64,
    pub price: f64,
    pub min_stock: f64,
    pub max_stock: f64,
    pub current_stock: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergens: Vec<String>,
}

impl Product {
    /// `currentStock × cost`
    pub fn stock_value(&self) -> f64 {
        self.current_stock * self.cost
    }

    /// `0 ≤ minStock ≤ maxStock` and `currentStock ≥ 0`
    pub fn is_consistent(&self) -> bool {
        self.min_stock >= 0.0 && self.min_stock <= self.max_stock && self.current_stock >= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub contact_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub store_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// Kind of stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    In,
    Out,
    Disposal,
    Adjustment,
}

impl TransactionType {
    pub const ALL: [TransactionType; 4] = [
        TransactionType::In,
        TransactionType::Out,
        TransactionType::Disposal,
        TransactionType::Adjustment,
    ];

    /// On-hand stock after a movement of `quantity` is applied to `stock`
    ///
    /// An adjustment's quantity is the counted level the stock is set to.
    pub fn apply(self, stock: f64, quantity: f64) -> f64 {
        match self {
            TransactionType::In => stock + quantity,
            TransactionType::Out | TransactionType::Disposal => stock - quantity,
            TransactionType::Adjustment => quantity,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionType::In => "入庫",
            TransactionType::Out => "出庫",
            TransactionType::Disposal => "廃棄",
            TransactionType::Adjustment => "調整",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            TransactionType::In => "green",
            TransactionType::Out => "blue",
            TransactionType::Disposal => "red",
            TransactionType::Adjustment => "orange",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::In => "in",
            TransactionType::Out => "out",
            TransactionType::Disposal => "disposal",
            TransactionType::Adjustment => "adjustment",
        }
    }
}

/// A single stock movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTransaction {
    pub id: String,
    pub product_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub date: DateTime<Utc>,
    pub user_id: String,
}

impl StockTransaction {
    /// Build a movement with `totalAmount = quantity × unitPrice`
    pub fn new(
        id: impl Into<String>,
        product_id: impl Into<String>,
        kind: TransactionType,
        quantity: f64,
        unit_price: f64,
        date: DateTime<Utc>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            product_id: product_id.into(),
            kind,
            quantity,
            unit_price,
            total_amount: quantity * unit_price,
            reason: None,
            date,
            user_id: user_id.into(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Draft,
    Ordered,
    Received,
    Cancelled,
}

impl OrderStatus {
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Draft => "下書き",
            OrderStatus::Ordered => "発注済み",
            OrderStatus::Received => "受領済み",
            OrderStatus::Cancelled => "キャンセル",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            OrderStatus::Draft => "gray",
            OrderStatus::Ordered => "blue",
            OrderStatus::Received => "green",
            OrderStatus::Cancelled => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_price: f64,
}

impl OrderItem {
    /// Build a line with `totalPrice = quantity × unitPrice`
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        quantity: f64,
        unit_price: f64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            quantity,
            unit_price,
            total_price: quantity * unit_price,
        }
    }
}

/// A purchase order sent to one supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub supplier_id: String,
    #[serde(default)]
    pub supplier_name: String,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_date: Option<DateTime<Utc>>,
}

impl Order {
    /// `Σ item.totalPrice`
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(|item| item.total_price).sum()
    }
}

/// One product line of a stocktake
///
/// Created unconfirmed with `actualStock = 0`, updated as counts are entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StocktakingItem {
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    pub theoretical_stock: f64,
    pub actual_stock: f64,
    pub difference: f64,
    pub difference_amount: f64,
}

impl StocktakingItem {
    /// Unconfirmed line for `product`; differences stay 0 until a count is entered
    pub fn unconfirmed(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            theoretical_stock: product.current_stock,
            actual_stock: 0.0,
            difference: 0.0,
            difference_amount: 0.0,
        }
    }

    /// Enter a counted quantity and refresh the derived differences
    pub fn recount(&mut self, actual_stock: f64, unit_cost: f64) {
        self.actual_stock = actual_stock;
        self.difference = actual_stock - self.theoretical_stock;
        self.difference_amount = self.difference * unit_cost;
    }

    /// A line counts as entered once a non-zero count was recorded
    pub fn is_counted(&self) -> bool {
        self.actual_stock > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StocktakingStatus {
    InProgress,
    Completed,
}

/// A stocktake, in progress or completed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stocktaking {
    pub id: String,
    pub date: DateTime<Utc>,
    pub items: Vec<StocktakingItem>,
    pub total_difference: f64,
    pub status: StocktakingStatus,
    pub user_id: String,
}

/// Stock position relative to a product's min/max band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    Low,
    Normal,
    Excess,
}

/// Badge shown in the inventory list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Normal,
    Low,
    Excess,
    Expired,
}

impl ProductStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProductStatus::Normal => "適正",
            ProductStatus::Low => "不足",
            ProductStatus::Excess => "過剰",
            ProductStatus::Expired => "期限切れ",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ProductStatus::Normal => "green",
            ProductStatus::Low => "orange",
            ProductStatus::Excess => "yellow",
            ProductStatus::Expired => "red",
        }
    }
}

impl From<StockLevel> for ProductStatus {
    fn from(level: StockLevel) -> Self {
        match level {
            StockLevel::Low => ProductStatus::Low,
            StockLevel::Normal => ProductStatus::Normal,
            StockLevel::Excess => ProductStatus::Excess,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    LowStock,
    ExcessStock,
    Expiry,
    OrderRequired,
}

impl AlertKind {
    pub fn label(self) -> &'static str {
        match self {
            AlertKind::LowStock => "在庫不足",
            AlertKind::ExcessStock => "在庫過剰",
            AlertKind::Expiry => "賞味期限",
            AlertKind::OrderRequired => "発注必要",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A dashboard notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
}

macro_rules! impl_record {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl Record for $ty {
                type Id = String;

                fn id(&self) -> String {
                    self.$field.clone()
                }
            }
        )*
    };
}

impl_record! {
    Product => id,
    Category => id,
    Supplier => id,
    User => id,
    StockTransaction => id,
    Order => id,
    Stocktaking => id,
    StocktakingItem => product_id,
    Alert => id,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_apply_movements() {
        assert_eq!(TransactionType::In.apply(10.0, 5.0), 15.0);
        assert_eq!(TransactionType::Out.apply(10.0, 5.0), 5.0);
        assert_eq!(TransactionType::Disposal.apply(10.0, 2.0), 8.0);
        assert_eq!(TransactionType::Adjustment.apply(10.0, 7.0), 7.0);
        assert_eq!(TransactionType::Adjustment.apply(7.0, 7.0), 7.0);
    }

    #[test]
    fn test_recount_updates_differences() {
        let mut item = StocktakingItem {
            product_id: "p1".into(),
            product_name: "トマト".into(),
            theoretical_stock: 100.0,
            actual_stock: 0.0,
            difference: 0.0,
            difference_amount: 0.0,
        };
        item.recount(95.0, 10.0);
        assert_eq!(item.difference, -5.0);
        assert_eq!(item.difference_amount, -50.0);
        assert!(item.is_counted());
    }

    #[test]
    fn test_transaction_json_shape() {
        let date = Utc.with_ymd_and_hms(2024, 12, 1, 9, 0, 0).unwrap();
        let tx = StockTransaction::new("t1", "p1", TransactionType::Disposal, 2.0, 150.0, date, "u1");
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "disposal");
        assert_eq!(json["totalAmount"], 300.0);
        assert_eq!(json["productId"], "p1");
    }

    #[test]
    fn test_stocktaking_status_serializes_snake_case() {
        let json = serde_json::to_string(&StocktakingStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn test_record_ids() {
        let item = StocktakingItem {
            product_id: "p9".into(),
            product_name: String::new(),
            theoretical_stock: 1.0,
            actual_stock: 0.0,
            difference: -1.0,
            difference_amount: 0.0,
        };
        assert_eq!(item.id(), "p9");
    }
}
