use std::fs;

use chrono::{TimeZone, Utc};
use inv_analytics::{
    abc_classification, draft_orders, low_stock_products, reorder_quantity, stock_level, AbcClass,
};
use inv_core::{Product, StockLevel, StockTransaction, TransactionType};
use inv_data::{
    CachedPage, CsvImport, FixtureSet, InventoryProvider, InventoryStore, QueryCache, Settings,
};
use inv_query::{query, Align, Column, QueryOptions, SortDirection};

const PRODUCTS: &str = "\
id,name,code,categoryId,unit,cost,price,minStock,maxStock,currentStock,supplierId,expiryDate
p1,トマト,VEG001,1,kg,200,400,10,50,5,supplier1,2024-12-08
p2,玉ねぎ,VEG002,1,kg,80,160,20,100,45,supplier1,
p3,和牛サーロイン,MEAT001,2,kg,8000,15000,2,10,3,supplier2,2024-12-07
p4,生クリーム,DAIRY001,3,L,600,1200,3,15,2,supplier3,2024-12-06
";

fn columns() -> Vec<Column<Product>> {
    vec![
        Column::new("code", "商品コード", |p: &Product| p.code.clone()).sortable(),
        Column::new("name", "商品名", |p: &Product| p.name.clone()).sortable(),
        Column::new("stock", "在庫数", |p: &Product| p.current_stock)
            .sortable()
            .align(Align::Right),
    ]
}

fn load_store() -> InventoryStore {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.csv");
    fs::write(&path, PRODUCTS).unwrap();

    let settings = Settings::load(&dir.path().join("missing.json")).unwrap();
    let products = CsvImport::new(settings.blank_values)
        .products_from_path(&path)
        .unwrap();
    InventoryStore::from_fixtures(
        "products.csv",
        FixtureSet {
            products,
            ..FixtureSet::default()
        },
    )
}

#[test]
fn csv_products_flow_through_query_and_analytics() {
    let store = load_store();
    let products = store.products().unwrap();
    assert_eq!(products.len(), 4);

    let options = QueryOptions::default()
        .with_sort("stock", SortDirection::Desc)
        .with_page_size(2);
    let result = query(&products, &columns(), &options);
    assert_eq!(result.total_count, 4);
    assert_eq!(result.total_pages, 2);
    assert_eq!(result.ids(), vec!["p2".to_string(), "p1".to_string()]);

    let low: Vec<&str> = low_stock_products(&products).iter().map(|p| p.id.as_str()).collect();
    assert_eq!(low, vec!["p1", "p4"]);

    let abc = abc_classification(&products);
    assert_eq!(abc[0].product.id, "p3");
    // 24,000 of 29,800 is past the A boundary on its own
    assert_eq!(abc[0].class, AbcClass::B);
    assert_eq!(abc[3].class, AbcClass::C);

    let drafts = draft_orders(&products, low.as_slice());
    assert_eq!(drafts.len(), 2);
    assert_eq!(drafts[0].supplier_id, "supplier1");
}

#[test]
fn cache_is_keyed_by_store_version() {
    let store = load_store();
    let cache = QueryCache::new(16);
    let options = QueryOptions::default().with_search("VEG");

    let compute = |store: &InventoryStore| {
        let products = store.products().unwrap();
        CachedPage::from_result(&query(&products, &columns(), &options))
    };

    let first = cache.get_or_insert_with("products", store.version(), &columns(), &options, || compute(&store));
    assert_eq!(first.ids, vec!["p1".to_string(), "p2".to_string()]);

    let now = Utc.with_ymd_and_hms(2024, 12, 5, 9, 0, 0).unwrap();
    store
        .record_transaction(StockTransaction::new("t1", "p2", TransactionType::Out, 5.0, 80.0, now, "u1"))
        .unwrap();
    assert!(cache.get("products", store.version(), &columns(), &options).is_none());

    let mut renamed = store.product("p3").unwrap();
    renamed.code = "VEG900".into();
    store.upsert_product(renamed);
    let second = cache.get_or_insert_with("products", store.version(), &columns(), &options, || compute(&store));
    assert_eq!(second.total_count, 3);
}

#[test]
fn fixtures_round_trip_through_disk() {
    let store = load_store();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixtures.json");
    store.snapshot().save(&path).unwrap();

    let reloaded = InventoryStore::from_fixtures("fixtures.json", FixtureSet::load(&path).unwrap());
    assert_eq!(reloaded.products().unwrap(), store.products().unwrap());
    assert_eq!(reloaded.source_name(), "fixtures.json");
}

#[test]
fn two_product_page_and_levels() {
    let product = |id: &str, current_stock: f64, cost: f64| Product {
        id: id.into(),
        name: format!("商品{id}"),
        code: id.to_uppercase(),
        barcode: None,
        category_id: "1".into(),
        unit: "kg".into(),
        cost,
        price: cost * 2.0,
        min_stock: 5.0,
        max_stock: 20.0,
        current_stock,
        supplier_id: None,
        expiry_date: None,
        allergens: Vec::new(),
    };
    let products = vec![product("p1", 2.0, 100.0), product("p2", 18.0, 50.0)];

    let options = QueryOptions::default().with_search("").with_page_size(1).with_page(1);
    let result = query(&products, &columns(), &options);
    assert_eq!(result.ids(), vec!["p1".to_string()]);
    assert_eq!(result.total_count, 2);
    assert_eq!(result.total_pages, 2);

    assert_eq!(reorder_quantity(&products[0]), 18.0);
    assert_eq!(stock_level(&products[0]), StockLevel::Low);
    // 18 of 20 is still inside the band; excess starts at max_stock
    assert_eq!(stock_level(&products[1]), StockLevel::Normal);
    assert_eq!(stock_level(&product("p2", 20.0, 50.0)), StockLevel::Excess);
}
