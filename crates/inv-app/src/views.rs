//! Column sets and row types for each list the CLI prints

use std::sync::Arc;

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use inv_analytics::{product_status, stock_level, AbcClass, AbcEntry, TypeSummary};
use inv_core::format::{format_currency, format_date, format_date_time, format_number, format_percent, format_quantity, format_short_date};
use inv_core::{
    Alert, Category, Order, OrderDraft, OrderStatus, Product, Severity, StockLevel,
    StockTransaction, Supplier, TransactionType,
};
use inv_query::{Action, Align, Column, Record};
use tracing::debug;

pub fn product_columns(categories: &[Category], now: DateTime<Utc>) -> Vec<Column<Product>> {
    let category_names: Arc<AHashMap<String, String>> = Arc::new(
        categories
            .iter()
            .map(|category| (category.id.clone(), category.name.clone()))
            .collect(),
    );

    vec![
        Column::new("code", "商品コード", |p: &Product| p.code.clone()).sortable(),
        Column::new("name", "商品名", |p: &Product| p.name.clone()).sortable(),
        Column::new("category", "カテゴリ", move |p: &Product| {
            category_names
                .get(&p.category_id)
                .cloned()
                .unwrap_or_else(|| p.category_id.clone())
        })
        .sortable(),
        Column::new("stock", "在庫数", |p: &Product| format_quantity(p.current_stock, &p.unit))
            .sortable()
            .align(Align::Right),
        Column::new("min", "最低在庫", |p: &Product| format_number(p.min_stock, 0)).align(Align::Right),
        Column::new("status", "状態", move |p: &Product| product_status(p, now).label())
            .sortable()
            .align(Align::Center),
        Column::new("value", "在庫金額", |p: &Product| format_currency(p.stock_value()))
            .sortable()
            .align(Align::Right),
        Column::new("expiry", "賞味期限", |p: &Product| {
            p.expiry_date
                .map(|date| format_short_date(&date))
                .unwrap_or_else(|| "-".to_string())
        })
        .sortable(),
    ]
}

pub fn product_actions() -> Vec<Action<Product>> {
    vec![
        Action::new("発注", |p: &Product| debug!(product = %p.id, "reorder requested"))
            .enabled_when(|p: &Product| stock_level(p) == StockLevel::Low),
        Action::new("入庫", |p: &Product| debug!(product = %p.id, "receipt requested")),
        Action::new("廃棄", |p: &Product| debug!(product = %p.id, "disposal requested"))
            .enabled_when(|p: &Product| p.current_stock > 0.0)
            .color("red"),
    ]
}

pub fn transaction_columns(products: &[Product]) -> Vec<Column<StockTransaction>> {
    let names: Arc<AHashMap<String, (String, String)>> = Arc::new(
        products
            .iter()
            .map(|product| (product.id.clone(), (product.name.clone(), product.unit.clone())))
            .collect(),
    );
    let units = Arc::clone(&names);

    vec![
        Column::new("date", "日時", |t: &StockTransaction| format_date_time(&t.date)).sortable(),
        Column::new("type", "区分", |t: &StockTransaction| t.kind.label())
            .sortable()
            .align(Align::Center),
        Column::new("product", "商品", move |t: &StockTransaction| {
            names
                .get(&t.product_id)
                .map(|(name, _)| name.clone())
                .unwrap_or_else(|| t.product_id.clone())
        })
        .sortable(),
        Column::new("quantity", "数量", move |t: &StockTransaction| {
            let unit = units.get(&t.product_id).map(|(_, unit)| unit.as_str()).unwrap_or("");
            format_quantity(t.quantity, unit).trim_end().to_string()
        })
        .sortable()
        .align(Align::Right),
        Column::new("amount", "金額", |t: &StockTransaction| format_currency(t.total_amount))
            .sortable()
            .align(Align::Right),
        Column::new("reason", "理由", |t: &StockTransaction| t.reason.clone().unwrap_or_default()),
    ]
}

pub fn order_columns() -> Vec<Column<Order>> {
    vec![
        Column::new("number", "発注番号", |o: &Order| o.order_number.clone()).sortable(),
        Column::new("supplier", "仕入先", |o: &Order| o.supplier_name.clone()).sortable(),
        Column::new("status", "状態", |o: &Order| o.status.label())
            .sortable()
            .align(Align::Center),
        Column::new("date", "発注日", |o: &Order| format_date(&o.order_date)).sortable(),
        Column::new("expected", "納品予定", |o: &Order| {
            o.expected_date
                .map(|date| format_date(&date))
                .unwrap_or_else(|| "-".to_string())
        }),
        Column::new("items", "品目数", |o: &Order| o.items.len()).align(Align::Right),
        Column::new("total", "合計", |o: &Order| format_currency(o.total_amount))
            .sortable()
            .align(Align::Right),
    ]
}

pub fn order_actions() -> Vec<Action<Order>> {
    vec![
        Action::new("入荷", |o: &Order| debug!(order = %o.id, "receipt requested"))
            .enabled_when(|o: &Order| o.status == OrderStatus::Ordered),
        Action::new("キャンセル", |o: &Order| debug!(order = %o.id, "cancel requested"))
            .enabled_when(|o: &Order| matches!(o.status, OrderStatus::Draft | OrderStatus::Ordered))
            .color("red"),
    ]
}

/// Owned copy of an [`AbcEntry`] for printing
#[derive(Debug, Clone)]
pub struct AbcRow {
    pub rank: usize,
    pub id: String,
    pub code: String,
    pub name: String,
    pub value: f64,
    pub cumulative_percentage: f64,
    pub class: AbcClass,
}

impl Record for AbcRow {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }
}

pub fn abc_rows(entries: &[AbcEntry<'_>]) -> Vec<AbcRow> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| AbcRow {
            rank: idx + 1,
            id: entry.product.id.clone(),
            code: entry.product.code.clone(),
            name: entry.product.name.clone(),
            value: entry.value,
            cumulative_percentage: entry.cumulative_percentage,
            class: entry.class,
        })
        .collect()
}

pub fn abc_columns() -> Vec<Column<AbcRow>> {
    vec![
        Column::new("rank", "順位", |r: &AbcRow| r.rank).sortable().align(Align::Right),
        Column::new("code", "商品コード", |r: &AbcRow| r.code.clone()).sortable(),
        Column::new("name", "商品名", |r: &AbcRow| r.name.clone()).sortable(),
        Column::new("value", "在庫金額", |r: &AbcRow| format_currency(r.value))
            .sortable()
            .align(Align::Right),
        Column::new("cumulative", "累積構成比", |r: &AbcRow| format_percent(r.cumulative_percentage, 1))
            .align(Align::Right),
        Column::new("class", "ランク", |r: &AbcRow| r.class)
            .sortable()
            .align(Align::Center),
    ]
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "情報",
        Severity::Warning => "警告",
        Severity::Error => "エラー",
    }
}

pub fn alert_columns() -> Vec<Column<Alert>> {
    vec![
        Column::new("severity", "重要度", |a: &Alert| severity_label(a.severity)).align(Align::Center),
        Column::new("title", "種別", |a: &Alert| a.title.clone()).sortable(),
        Column::new("message", "内容", |a: &Alert| a.message.clone()),
    ]
}

/// One row of the per-type movement summary
#[derive(Debug, Clone)]
pub struct TypeRow {
    pub kind: TransactionType,
    pub summary: TypeSummary,
}

impl Record for TypeRow {
    type Id = &'static str;

    fn id(&self) -> &'static str {
        self.kind.as_str()
    }
}

pub fn type_columns() -> Vec<Column<TypeRow>> {
    vec![
        Column::new("type", "区分", |r: &TypeRow| r.kind.label()),
        Column::new("count", "件数", |r: &TypeRow| r.summary.count).align(Align::Right),
        Column::new("quantity", "数量合計", |r: &TypeRow| format_number(r.summary.total_quantity, 1))
            .align(Align::Right),
        Column::new("amount", "金額合計", |r: &TypeRow| format_currency(r.summary.total_amount))
            .align(Align::Right),
    ]
}

/// One line of a proposed order
#[derive(Debug, Clone)]
pub struct DraftLine {
    pub id: String,
    pub supplier: String,
    pub product: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
}

impl Record for DraftLine {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }
}

pub fn draft_lines(drafts: &[OrderDraft], suppliers: &[Supplier]) -> Vec<DraftLine> {
    drafts
        .iter()
        .flat_map(|draft| {
            let supplier = suppliers
                .iter()
                .find(|supplier| supplier.id == draft.supplier_id)
                .map(|supplier| supplier.name.clone())
                .unwrap_or_else(|| draft.supplier_id.clone());
            draft.items.iter().map(move |item| DraftLine {
                id: format!("{}/{}", draft.supplier_id, item.product_id),
                supplier: supplier.clone(),
                product: item.product_name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                total: item.total_price,
            })
        })
        .collect()
}

pub fn draft_columns() -> Vec<Column<DraftLine>> {
    vec![
        Column::new("supplier", "仕入先", |l: &DraftLine| l.supplier.clone()).sortable(),
        Column::new("product", "商品", |l: &DraftLine| l.product.clone()).sortable(),
        Column::new("quantity", "発注数", |l: &DraftLine| format_number(l.quantity, 0)).align(Align::Right),
        Column::new("price", "単価", |l: &DraftLine| format_currency(l.unit_price)).align(Align::Right),
        Column::new("total", "小計", |l: &DraftLine| format_currency(l.total))
            .sortable()
            .align(Align::Right),
    ]
}
