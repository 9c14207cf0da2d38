//! Domain types for the restaurant inventory dashboard
//!
//! This crate holds the entities every page works with (products, stock
//! movements, orders, stocktakes, alerts), the ja-JP display formatting used
//! throughout the dashboard, and the two small state machines the pages
//! drive: a stocktake session and an order's status.

pub mod format;
pub mod model;
pub mod order;
pub mod stocktake;

// Re-export commonly used types
pub use model::{
    Alert, AlertKind, Category, Order, OrderItem, OrderStatus, Product, ProductStatus, Role,
    Severity, StockLevel, StockTransaction, Stocktaking, StocktakingItem, StocktakingStatus,
    Store, Supplier, TransactionType, User,
};
pub use order::{OrderDraft, OrderError};
pub use stocktake::{StocktakeError, StocktakeSession};
