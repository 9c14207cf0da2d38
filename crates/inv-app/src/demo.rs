//! Built-in demo data: a small restaurant's stockroom
//! Dates are relative to `now` so expiry alerts always have something to show

use chrono::{DateTime, Duration, Utc};
use inv_core::{
    Category, Order, OrderItem, OrderStatus, Product, StockTransaction, Supplier, TransactionType,
};
use inv_data::FixtureSet;

pub fn fixtures(now: DateTime<Utc>) -> FixtureSet {
    FixtureSet {
        categories: categories(),
        suppliers: suppliers(),
        products: products(now),
        transactions: transactions(now),
        orders: orders(now),
        stocktakings: Vec::new(),
    }
}

fn categories() -> Vec<Category> {
    [
        ("1", "野菜", "🥬", "green"),
        ("2", "肉類", "🥩", "red"),
        ("3", "魚介類", "🐟", "blue"),
        ("4", "乳製品", "🧀", "yellow"),
        ("5", "調味料", "🧂", "orange"),
    ]
    .into_iter()
    .map(|(id, name, icon, color)| Category {
        id: id.into(),
        name: name.into(),
        icon: icon.into(),
        color: color.into(),
    })
    .collect()
}

fn suppliers() -> Vec<Supplier> {
    [
        ("supplier1", "山田青果店", "山田太郎", "03-1234-5678", "yamada@example.com", "東京都中央区築地1-1-1"),
        ("supplier2", "佐藤精肉店", "佐藤花子", "03-2345-6789", "sato@example.com", "東京都港区芝浦2-2-2"),
        ("supplier3", "鈴木水産", "鈴木一郎", "03-3456-7890", "suzuki@example.com", "東京都江東区豊洲3-3-3"),
    ]
    .into_iter()
    .map(|(id, name, contact, phone, email, address)| Supplier {
        id: id.into(),
        name: name.into(),
        contact_name: contact.into(),
        phone: phone.into(),
        email: email.into(),
        address: address.into(),
    })
    .collect()
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    code: &str,
    category_id: &str,
    unit: &str,
    cost: f64,
    price: f64,
    (min_stock, max_stock, current_stock): (f64, f64, f64),
    supplier_id: &str,
    expiry_date: Option<DateTime<Utc>>,
) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        code: code.into(),
        barcode: None,
        category_id: category_id.into(),
        unit: unit.into(),
        cost,
        price,
        min_stock,
        max_stock,
        current_stock,
        supplier_id: Some(supplier_id.into()),
        expiry_date,
        allergens: Vec::new(),
    }
}

fn products(now: DateTime<Utc>) -> Vec<Product> {
    let days = Duration::days;
    let mut cream = product(
        "p7", "生クリーム", "DAIRY001", "4", "L", 600.0, 1200.0, (3.0, 15.0, 2.0), "supplier1",
        Some(now + days(2)),
    );
    cream.allergens = vec!["乳".into()];

    vec![
        product("p1", "トマト", "VEG001", "1", "kg", 200.0, 400.0, (10.0, 50.0, 5.0), "supplier1", Some(now + days(3))),
        product("p2", "玉ねぎ", "VEG002", "1", "kg", 80.0, 160.0, (20.0, 100.0, 45.0), "supplier1", None),
        product("p3", "キャベツ", "VEG003", "1", "個", 150.0, 300.0, (5.0, 30.0, 30.0), "supplier1", Some(now + days(6))),
        product("p4", "和牛サーロイン", "MEAT001", "2", "kg", 8000.0, 15000.0, (2.0, 10.0, 3.0), "supplier2", Some(now + days(5))),
        product("p5", "鶏もも肉", "MEAT002", "2", "kg", 900.0, 1800.0, (5.0, 25.0, 12.0), "supplier2", Some(now + days(1))),
        product("p6", "真鯛", "FISH001", "3", "尾", 1200.0, 2500.0, (3.0, 12.0, 4.0), "supplier3", Some(now - days(1))),
        cream,
        product("p8", "醤油", "SEAS001", "5", "L", 400.0, 800.0, (5.0, 20.0, 8.0), "supplier1", None),
    ]
}

fn transactions(now: DateTime<Utc>) -> Vec<StockTransaction> {
    let at = |hours: i64| now - Duration::hours(hours);
    vec![
        StockTransaction::new("t1", "p1", TransactionType::In, 20.0, 200.0, at(72), "user1"),
        StockTransaction::new("t2", "p1", TransactionType::Out, 15.0, 400.0, at(48), "user1"),
        StockTransaction::new("t3", "p4", TransactionType::Out, 2.0, 15000.0, at(30), "user2"),
        StockTransaction::new("t4", "p5", TransactionType::Out, 6.0, 1800.0, at(26), "user2"),
        StockTransaction::new("t5", "p6", TransactionType::Disposal, 1.0, 1200.0, at(20), "user1")
            .with_reason("鮮度劣化"),
        StockTransaction::new("t6", "p2", TransactionType::In, 30.0, 80.0, at(12), "user1"),
        StockTransaction::new("t7", "p7", TransactionType::Out, 3.0, 1200.0, at(6), "user2"),
        StockTransaction::new("t8", "p8", TransactionType::Adjustment, 8.0, 400.0, at(2), "user1")
            .with_reason("棚卸差異"),
    ]
}

fn orders(now: DateTime<Utc>) -> Vec<Order> {
    let order = |id: &str, number: &str, supplier: (&str, &str), items: Vec<OrderItem>, status: OrderStatus, days_ago: i64| {
        let order_date = now - Duration::days(days_ago);
        Order {
            id: id.into(),
            order_number: number.into(),
            supplier_id: supplier.0.into(),
            supplier_name: supplier.1.into(),
            total_amount: items.iter().map(|item| item.total_price).sum(),
            items,
            status,
            order_date,
            expected_date: Some(order_date + Duration::days(2)),
            received_date: (status == OrderStatus::Received).then(|| order_date + Duration::days(2)),
        }
    };

    vec![
        order(
            "order1",
            "ORD-DEMO-0001",
            ("supplier1", "山田青果店"),
            vec![OrderItem::new("p1", "トマト", 20.0, 200.0), OrderItem::new("p2", "玉ねぎ", 30.0, 80.0)],
            OrderStatus::Received,
            4,
        ),
        order(
            "order2",
            "ORD-DEMO-0002",
            ("supplier2", "佐藤精肉店"),
            vec![OrderItem::new("p4", "和牛サーロイン", 5.0, 8000.0)],
            OrderStatus::Ordered,
            1,
        ),
        order(
            "order3",
            "ORD-DEMO-0003",
            ("supplier3", "鈴木水産"),
            vec![OrderItem::new("p6", "真鯛", 6.0, 1200.0)],
            OrderStatus::Draft,
            0,
        ),
    ]
}
