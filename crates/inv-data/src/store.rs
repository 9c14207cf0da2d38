//! Thread-safe in-memory inventory store

use std::sync::Arc;

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use inv_core::format::order_number;
use inv_core::{
    Category, Order, OrderDraft, OrderStatus, Product, StockTransaction, Stocktaking,
    StocktakingStatus, Supplier, TransactionType,
};
use parking_lot::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::index::ProductIndex;
use crate::provider::InventoryProvider;
use crate::sources::FixtureSet;
use crate::DataError;

#[derive(Debug, Default)]
struct Tables {
    products: Vec<Product>,
    /// Product id → position in `products`
    positions: AHashMap<String, usize>,
    transactions: Vec<StockTransaction>,
    orders: Vec<Order>,
    stocktakings: Vec<Stocktaking>,
    categories: Vec<Category>,
    suppliers: Vec<Supplier>,
    version: u64,
}

impl Tables {
    fn reindex(&mut self) {
        self.positions = self
            .products
            .iter()
            .enumerate()
            .map(|(idx, product)| (product.id.clone(), idx))
            .collect();
    }

    fn product_mut(&mut self, id: &str) -> Result<&mut Product, DataError> {
        let idx = *self
            .positions
            .get(id)
            .ok_or_else(|| DataError::UnknownProduct(id.to_string()))?;
        Ok(&mut self.products[idx])
    }

    fn order_mut(&mut self, id: &str) -> Result<&mut Order, DataError> {
        self.orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or_else(|| DataError::UnknownOrder(id.to_string()))
    }

    /// Apply a movement to its product and keep it; returns the new stock
    fn book(&mut self, transaction: StockTransaction) -> Result<f64, DataError> {
        let product = self.product_mut(&transaction.product_id)?;
        let target = transaction.kind.apply(product.current_stock, transaction.quantity);
        if target < 0.0 {
            warn!(
                product = %product.id,
                stock = product.current_stock,
                quantity = transaction.quantity,
                "movement would make stock negative, clamping to 0"
            );
        }
        product.current_stock = target.max(0.0);
        let stock = product.current_stock;
        self.transactions.push(transaction);
        Ok(stock)
    }
}

/// In-memory inventory shared between views
///
/// Every mutation bumps [`version`](Self::version), which callers use to key
/// cached query results.
#[derive(Debug, Clone)]
pub struct InventoryStore {
    name: String,
    tables: Arc<RwLock<Tables>>,
}

impl InventoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Arc::new(RwLock::new(Tables::default())),
        }
    }

    pub fn from_fixtures(name: impl Into<String>, fixtures: FixtureSet) -> Self {
        let mut tables = Tables {
            products: fixtures.products,
            transactions: fixtures.transactions,
            orders: fixtures.orders,
            stocktakings: fixtures.stocktakings,
            categories: fixtures.categories,
            suppliers: fixtures.suppliers,
            ..Tables::default()
        };
        tables.reindex();
        if tables.positions.len() != tables.products.len() {
            warn!("duplicate product ids in fixtures, lookups use the last one");
        }

        let store = Self {
            name: name.into(),
            tables: Arc::new(RwLock::new(tables)),
        };
        info!(source = %store.name, products = store.product_count(), "store loaded");
        store
    }

    /// Monotonic change counter
    pub fn version(&self) -> u64 {
        self.tables.read().version
    }

    pub fn product(&self, id: &str) -> Option<Product> {
        let tables = self.tables.read();
        tables.positions.get(id).map(|&idx| tables.products[idx].clone())
    }

    pub fn product_count(&self) -> usize {
        self.tables.read().products.len()
    }

    pub fn order(&self, id: &str) -> Option<Order> {
        self.tables.read().orders.iter().find(|order| order.id == id).cloned()
    }

    pub fn product_index(&self) -> ProductIndex {
        ProductIndex::build(&self.tables.read().products)
    }

    /// Insert or replace by id; returns true for a new product
    pub fn upsert_product(&self, product: Product) -> bool {
        let mut tables = self.tables.write();
        let inserted = match tables.positions.get(&product.id).copied() {
            Some(idx) => {
                tables.products[idx] = product;
                false
            }
            None => {
                let idx = tables.products.len();
                tables.positions.insert(product.id.clone(), idx);
                tables.products.push(product);
                true
            }
        };
        tables.version += 1;
        info!(inserted, version = tables.version, "product saved");
        inserted
    }

    pub fn remove_product(&self, id: &str) -> Result<Product, DataError> {
        let mut tables = self.tables.write();
        let idx = tables
            .positions
            .get(id)
            .copied()
            .ok_or_else(|| DataError::UnknownProduct(id.to_string()))?;
        let product = tables.products.remove(idx);
        tables.reindex();
        tables.version += 1;
        info!(product = %id, version = tables.version, "product removed");
        Ok(product)
    }

    pub fn upsert_supplier(&self, supplier: Supplier) {
        let mut tables = self.tables.write();
        match tables.suppliers.iter_mut().find(|existing| existing.id == supplier.id) {
            Some(existing) => *existing = supplier,
            None => tables.suppliers.push(supplier),
        }
        tables.version += 1;
    }

    /// Book a stock movement; returns the product's new stock
    ///
    /// Stock never drops below 0.
    pub fn record_transaction(&self, transaction: StockTransaction) -> Result<f64, DataError> {
        let mut tables = self.tables.write();
        let (id, kind) = (transaction.id.clone(), transaction.kind);
        let stock = tables.book(transaction)?;
        tables.version += 1;
        info!(transaction = %id, kind = kind.as_str(), stock, "transaction recorded");
        Ok(stock)
    }

    /// Send a draft to its supplier
    pub fn place_order(&self, draft: OrderDraft, now: DateTime<Utc>) -> Result<Order, DataError> {
        let mut tables = self.tables.write();
        let supplier_name = tables
            .suppliers
            .iter()
            .find(|supplier| supplier.id == draft.supplier_id)
            .map(|supplier| supplier.name.clone())
            .unwrap_or_default();
        let sequence = tables.orders.len() as u32 + 1;

        let order = Order::from_draft(draft, order_number(&now, sequence), supplier_name, now)?;
        tables.orders.push(order.clone());
        tables.version += 1;
        info!(order = %order.order_number, total = order.total_amount, "order placed");
        Ok(order)
    }

    /// Mark an order received and book one `in` movement per line
    pub fn receive_order(
        &self,
        order_id: &str,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<StockTransaction>, DataError> {
        let mut tables = self.tables.write();
        let order = tables.order_mut(order_id)?;
        if order.status != OrderStatus::Ordered {
            return Err(inv_core::OrderError::InvalidTransition {
                id: order.id.clone(),
                from: order.status,
                to: OrderStatus::Received,
            }
            .into());
        }
        let order = order.clone();

        let transactions: Vec<StockTransaction> = order
            .items
            .iter()
            .map(|item| {
                StockTransaction::new(
                    format!("tx-{}", Uuid::new_v4()),
                    &item.product_id,
                    TransactionType::In,
                    item.quantity,
                    item.unit_price,
                    now,
                    user_id,
                )
                .with_reason(format!("発注入荷 {}", order.order_number))
            })
            .collect();

        // Check every product before touching stock
        if let Some(missing) = transactions
            .iter()
            .find(|transaction| !tables.positions.contains_key(&transaction.product_id))
        {
            return Err(DataError::UnknownProduct(missing.product_id.clone()));
        }
        for transaction in &transactions {
            tables.book(transaction.clone())?;
        }
        tables.order_mut(order_id)?.transition(OrderStatus::Received, now)?;
        tables.version += 1;

        info!(order = %order.order_number, lines = transactions.len(), "order received");
        Ok(transactions)
    }

    pub fn cancel_order(&self, order_id: &str, now: DateTime<Utc>) -> Result<(), DataError> {
        let mut tables = self.tables.write();
        tables.order_mut(order_id)?.transition(OrderStatus::Cancelled, now)?;
        tables.version += 1;
        info!(order = %order_id, "order cancelled");
        Ok(())
    }

    /// Store a stocktake, replacing an in-progress one with the same id
    ///
    /// A completed stocktake books an `adjustment` to the counted level for
    /// every line with a difference. Once stored as completed it is closed:
    /// saving it again fails with [`DataError::StocktakingCompleted`].
    pub fn save_stocktaking(&self, stocktaking: Stocktaking) -> Result<Vec<StockTransaction>, DataError> {
        let mut tables = self.tables.write();
        if tables
            .stocktakings
            .iter()
            .any(|existing| existing.id == stocktaking.id && existing.status == StocktakingStatus::Completed)
        {
            return Err(DataError::StocktakingCompleted(stocktaking.id));
        }
        let mut adjustments = Vec::new();

        if stocktaking.status == StocktakingStatus::Completed {
            for item in stocktaking.items.iter().filter(|item| item.difference != 0.0) {
                let cost = tables.product_mut(&item.product_id)?.cost;
                adjustments.push(
                    StockTransaction::new(
                        format!("tx-{}", Uuid::new_v4()),
                        &item.product_id,
                        TransactionType::Adjustment,
                        item.actual_stock,
                        cost,
                        stocktaking.date,
                        &stocktaking.user_id,
                    )
                    .with_reason(format!("棚卸調整 {}", stocktaking.id)),
                );
            }
            for adjustment in &adjustments {
                tables.book(adjustment.clone())?;
            }
        }

        let id = stocktaking.id.clone();
        match tables.stocktakings.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => *existing = stocktaking,
            None => tables.stocktakings.push(stocktaking),
        }
        tables.version += 1;
        info!(stocktaking = %id, adjustments = adjustments.len(), "stocktaking saved");
        Ok(adjustments)
    }

    pub fn snapshot(&self) -> FixtureSet {
        let tables = self.tables.read();
        FixtureSet {
            categories: tables.categories.clone(),
            suppliers: tables.suppliers.clone(),
            products: tables.products.clone(),
            transactions: tables.transactions.clone(),
            orders: tables.orders.clone(),
            stocktakings: tables.stocktakings.clone(),
        }
    }
}

impl InventoryProvider for InventoryStore {
    fn products(&self) -> anyhow::Result<Vec<Product>> {
        Ok(self.tables.read().products.clone())
    }

    fn transactions(&self) -> anyhow::Result<Vec<StockTransaction>> {
        Ok(self.tables.read().transactions.clone())
    }

    fn orders(&self) -> anyhow::Result<Vec<Order>> {
        Ok(self.tables.read().orders.clone())
    }

    fn stocktakings(&self) -> anyhow::Result<Vec<Stocktaking>> {
        Ok(self.tables.read().stocktakings.clone())
    }

    fn categories(&self) -> anyhow::Result<Vec<Category>> {
        Ok(self.tables.read().categories.clone())
    }

    fn suppliers(&self) -> anyhow::Result<Vec<Supplier>> {
        Ok(self.tables.read().suppliers.clone())
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use inv_core::{OrderItem, StocktakeSession};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 5, 10, 0, 0).unwrap()
    }

    fn product(id: &str, stock: f64, cost: f64) -> Product {
        Product {
            id: id.into(),
            name: format!("商品{id}"),
            code: id.to_uppercase(),
            barcode: None,
            category_id: "1".into(),
            unit: "kg".into(),
            cost,
            price: cost * 2.0,
            min_stock: 5.0,
            max_stock: 50.0,
            current_stock: stock,
            supplier_id: Some("supplier1".into()),
            expiry_date: None,
            allergens: Vec::new(),
        }
    }

    fn store() -> InventoryStore {
        let fixtures = FixtureSet {
            products: vec![product("p1", 10.0, 200.0), product("p2", 3.0, 80.0)],
            suppliers: vec![Supplier {
                id: "supplier1".into(),
                name: "山田青果店".into(),
                contact_name: "山田太郎".into(),
                phone: "03-1234-5678".into(),
                email: "yamada@example.com".into(),
                address: "東京都".into(),
            }],
            ..FixtureSet::default()
        };
        InventoryStore::from_fixtures("test", fixtures)
    }

    #[test]
    fn test_record_transaction_updates_stock() {
        let store = store();
        let v0 = store.version();
        let tx = StockTransaction::new("t1", "p1", TransactionType::Out, 4.0, 200.0, now(), "u1");
        assert_eq!(store.record_transaction(tx).unwrap(), 6.0);
        assert_eq!(store.product("p1").unwrap().current_stock, 6.0);
        assert_eq!(store.transactions().unwrap().len(), 1);
        assert!(store.version() > v0);
    }

    #[test]
    fn test_stock_clamped_at_zero() {
        let store = store();
        let tx = StockTransaction::new("t1", "p2", TransactionType::Disposal, 9.0, 80.0, now(), "u1");
        assert_eq!(store.record_transaction(tx).unwrap(), 0.0);
    }

    #[test]
    fn test_unknown_product_rejected() {
        let store = store();
        let v0 = store.version();
        let tx = StockTransaction::new("t1", "ghost", TransactionType::In, 1.0, 1.0, now(), "u1");
        assert!(matches!(store.record_transaction(tx), Err(DataError::UnknownProduct(_))));
        assert_eq!(store.version(), v0);
        assert!(store.transactions().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_and_remove() {
        let store = store();
        assert!(store.upsert_product(product("p3", 1.0, 1.0)));
        assert!(!store.upsert_product(product("p3", 2.0, 1.0)));
        assert_eq!(store.product("p3").unwrap().current_stock, 2.0);

        store.remove_product("p1").unwrap();
        assert!(store.product("p1").is_none());
        assert_eq!(store.product("p3").unwrap().current_stock, 2.0);
        assert!(matches!(store.remove_product("p1"), Err(DataError::UnknownProduct(_))));
    }

    #[test]
    fn test_order_lifecycle() {
        let store = store();
        let draft = OrderDraft::new("supplier1", vec![OrderItem::new("p2", "商品p2", 47.0, 80.0)]);
        let order = store.place_order(draft, now()).unwrap();
        assert_eq!(order.order_number, "ORD-20241205-0001");
        assert_eq!(order.supplier_name, "山田青果店");

        let booked = store.receive_order(&order.id, "u1", now()).unwrap();
        assert_eq!(booked.len(), 1);
        assert_eq!(store.product("p2").unwrap().current_stock, 50.0);
        assert_eq!(store.order(&order.id).unwrap().status, OrderStatus::Received);

        assert!(matches!(
            store.receive_order(&order.id, "u1", now()),
            Err(DataError::Order(_))
        ));
        assert!(store.cancel_order(&order.id, now()).is_err());
        assert!(matches!(store.cancel_order("nope", now()), Err(DataError::UnknownOrder(_))));
    }

    #[test]
    fn test_completed_stocktake_adjusts_stock() {
        let store = store();
        let mut session = StocktakeSession::start(&store.products().unwrap(), "u1", now());
        session.record_count("p1", 8.0).unwrap();
        session.complete().unwrap();

        let adjustments = store.save_stocktaking(session.into_stocktaking()).unwrap();
        assert_eq!(adjustments.len(), 1);
        assert_eq!(adjustments[0].kind, TransactionType::Adjustment);
        assert_eq!(adjustments[0].quantity, 8.0);
        assert_eq!(adjustments[0].total_amount, 1600.0);
        assert_eq!(store.product("p1").unwrap().current_stock, 8.0);
        // uncounted line left alone
        assert_eq!(store.product("p2").unwrap().current_stock, 3.0);
        assert_eq!(store.stocktakings().unwrap().len(), 1);
    }

    #[test]
    fn test_completed_stocktake_is_booked_once() {
        let store = store();
        let mut session = StocktakeSession::start(&store.products().unwrap(), "u1", now());
        session.record_count("p1", 8.0).unwrap();
        session.complete().unwrap();
        let stocktaking = session.into_stocktaking();

        store.save_stocktaking(stocktaking.clone()).unwrap();
        let version = store.version();
        assert!(matches!(
            store.save_stocktaking(stocktaking),
            Err(DataError::StocktakingCompleted(_))
        ));
        assert_eq!(store.product("p1").unwrap().current_stock, 8.0);
        assert_eq!(store.transactions().unwrap().len(), 1);
        assert_eq!(store.version(), version);
    }

    #[test]
    fn test_adjustment_quantities_are_not_negative() {
        let store = store();
        let mut session = StocktakeSession::start(&store.products().unwrap(), "u1", now());
        session.record_count("p1", 7.0).unwrap();
        session.record_count("p2", 5.0).unwrap();
        session.complete().unwrap();

        let adjustments = store.save_stocktaking(session.into_stocktaking()).unwrap();
        assert_eq!(adjustments.len(), 2);
        assert!(adjustments.iter().all(|tx| tx.quantity >= 0.0 && tx.total_amount >= 0.0));
        assert_eq!(store.product("p1").unwrap().current_stock, 7.0);
        assert_eq!(store.product("p2").unwrap().current_stock, 5.0);
    }

    #[test]
    fn test_in_progress_stocktake_can_be_replaced() {
        let store = store();
        let mut session = StocktakeSession::start(&store.products().unwrap(), "u1", now());
        session.record_count("p1", 9.0).unwrap();
        store.save_stocktaking(session.stocktaking().clone()).unwrap();

        session.record_count("p1", 8.0).unwrap();
        session.complete().unwrap();
        store.save_stocktaking(session.into_stocktaking()).unwrap();
        assert_eq!(store.stocktakings().unwrap().len(), 1);
        assert_eq!(store.product("p1").unwrap().current_stock, 8.0);
    }

    #[test]
    fn test_in_progress_stocktake_does_not_touch_stock() {
        let store = store();
        let mut session = StocktakeSession::start(&store.products().unwrap(), "u1", now());
        session.record_count("p1", 1.0).unwrap();

        assert!(store.save_stocktaking(session.stocktaking().clone()).unwrap().is_empty());
        assert_eq!(store.product("p1").unwrap().current_stock, 10.0);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = store();
        let products = store.products().unwrap();
        store.upsert_product(product("p9", 1.0, 1.0));
        assert_eq!(products.len(), 2);
        assert_eq!(store.snapshot().products.len(), 3);
        assert_eq!(store.source_name(), "test");
    }
}
