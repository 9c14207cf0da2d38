//! `stockroom`: inventory dashboard reports in the terminal

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use inv_analytics::{
    abc_classification_with, dashboard_stats, draft_orders, expiring_products, generate_alerts,
    group_transactions_by_type, low_stock_products,
};
use inv_core::format::{format_currency, format_number, format_short_date};
use inv_data::{CsvImport, FixtureSet, InventoryProvider, InventoryStore, Settings};
use inv_query::{query, Action, Column, QueryOptions, SortDirection, TableConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod demo;
mod report;
mod views;

use report::{render_summary, render_table};
use views::TypeRow;

#[derive(Debug, Parser)]
#[command(name = "stockroom", version, about = "Restaurant inventory reports")]
struct Cli {
    /// JSON bundle with every collection
    #[arg(long, value_name = "FILE.json", conflicts_with_all = ["products", "transactions"])]
    fixtures: Option<PathBuf>,

    /// Product catalogue as CSV
    #[arg(long, value_name = "FILE.csv")]
    products: Option<PathBuf>,

    /// Stock movements as CSV
    #[arg(long, value_name = "FILE.csv", requires = "products")]
    transactions: Option<PathBuf>,

    /// Settings file; missing means defaults
    #[arg(long, value_name = "FILE.json")]
    settings: Option<PathBuf>,

    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page, 0 for all; defaults to the settings value
    #[arg(long)]
    page_size: Option<usize>,

    #[arg(long)]
    search: Option<String>,

    /// Column key to sort by
    #[arg(long)]
    sort: Option<String>,

    #[arg(long)]
    desc: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Headline numbers, movement summary and what needs attention
    Dashboard,
    /// Product list with stock status
    Inventory,
    /// Stock movements
    Transactions,
    /// Purchase orders
    Orders,
    /// Products ranked by stock value
    Abc,
    /// Low stock, excess stock and expiry alerts
    Alerts,
    /// Proposed orders for every low-stock product
    Reorder,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_store(cli: &Cli, settings: &Settings, now: DateTime<Utc>) -> Result<InventoryStore> {
    if let Some(path) = &cli.fixtures {
        let fixtures = FixtureSet::load(path).with_context(|| format!("loading fixtures from {}", path.display()))?;
        let inconsistent = fixtures.inconsistent_products().len();
        if inconsistent > 0 {
            warn!(inconsistent, "some products have inconsistent stock bounds");
        }
        return Ok(InventoryStore::from_fixtures(path.display().to_string(), fixtures));
    }

    if let Some(path) = &cli.products {
        let import = CsvImport::new(settings.blank_values.clone());
        let products = import
            .products_from_path(path)
            .with_context(|| format!("importing products from {}", path.display()))?;
        let transactions = match &cli.transactions {
            Some(path) => import
                .transactions_from_path(path)
                .with_context(|| format!("importing transactions from {}", path.display()))?,
            None => Vec::new(),
        };
        let fixtures = FixtureSet {
            products,
            transactions,
            ..FixtureSet::default()
        };
        return Ok(InventoryStore::from_fixtures(path.display().to_string(), fixtures));
    }

    info!("no data given, using demo data");
    Ok(InventoryStore::from_fixtures("demo", demo::fixtures(now)))
}

fn query_options(cli: &Cli, settings: &Settings) -> QueryOptions {
    let mut options = settings.query_options().with_page(cli.page);
    if let Some(page_size) = cli.page_size {
        options = options.with_page_size(page_size);
    }
    if let Some(term) = &cli.search {
        options = options.with_search(term.clone()).with_page(cli.page);
    }
    if let Some(key) = &cli.sort {
        let direction = if cli.desc { SortDirection::Desc } else { SortDirection::Asc };
        options = options.with_sort(key.clone(), direction);
    }
    options
}

/// Query `records` and render the page
fn print_table<R>(
    records: &[R],
    columns: &[Column<R>],
    actions: &[Action<R>],
    options: &QueryOptions,
    config: &TableConfig,
) {
    if let Some(key) = options.sort_key.as_deref() {
        if !columns.iter().any(|column| column.key == key && column.sortable) {
            warn!(key, "not a sortable column here, rows keep their input order");
        }
    }
    let options = config.restrict(options.clone());
    let result = query(records, columns, &options);
    print!("{}", render_table(columns, actions, &result, &options, config));
}

fn dashboard(store: &InventoryStore, settings: &Settings, now: DateTime<Utc>) -> Result<()> {
    let products = store.products()?;
    let transactions = store.transactions()?;
    let orders = store.orders()?;
    let stats = dashboard_stats(&products, &transactions, &orders, now, &settings.policy);

    let title = if settings.store.name.is_empty() {
        store.source_name().to_string()
    } else {
        settings.store.name.clone()
    };
    println!("{title}\n");
    print!(
        "{}",
        render_summary(&[
            ("在庫金額", format_currency(stats.total_inventory_value)),
            ("商品数", stats.product_count.to_string()),
            ("在庫不足", stats.low_stock_count.to_string()),
            ("期限間近", stats.expiring_count.to_string()),
            ("発注中", stats.pending_orders.to_string()),
            ("出庫金額", format_currency(stats.sales_amount)),
            ("回転率", format_number(stats.turnover_rate, 2)),
        ])
    );

    let summary_rows: Vec<TypeRow> = group_transactions_by_type(&transactions)
        .into_iter()
        .map(|(kind, summary)| TypeRow { kind, summary })
        .collect();
    println!("\n入出庫サマリー");
    print_table(
        &summary_rows,
        &views::type_columns(),
        &[],
        &QueryOptions::unpaginated(),
        &TableConfig::default(),
    );

    let low = low_stock_products(&products);
    if !low.is_empty() {
        println!("\n在庫不足");
        for product in low {
            println!(
                "  {} ({} / 最低 {})",
                product.name,
                format_number(product.current_stock, 0),
                format_number(product.min_stock, 0)
            );
        }
    }

    let expiring = expiring_products(&products, now, settings.policy.expiry_warning_days);
    if !expiring.is_empty() {
        println!("\n賞味期限間近");
        for product in expiring {
            if let Some(expiry) = product.expiry_date {
                println!("  {} ({})", product.name, format_short_date(&expiry));
            }
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let now = Utc::now();
    let settings = match &cli.settings {
        Some(path) => Settings::load(path).with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let store = load_store(cli, &settings, now)?;
    let options = query_options(cli, &settings);
    let table = TableConfig {
        page_size: settings.page_size,
        ..TableConfig::interactive()
    };

    match cli.command {
        Command::Dashboard => dashboard(&store, &settings, now)?,
        Command::Inventory => {
            let products = store.products()?;
            let categories = store.categories()?;
            print_table(
                &products,
                &views::product_columns(&categories, now),
                &views::product_actions(),
                &options,
                &table,
            );
        }
        Command::Transactions => {
            let mut transactions = store.transactions()?;
            // newest first unless a sort was asked for
            if options.sort_key.is_none() {
                transactions.sort_by(|a, b| b.date.cmp(&a.date));
            }
            let products = store.products()?;
            print_table(&transactions, &views::transaction_columns(&products), &[], &options, &table);
        }
        Command::Orders => {
            let orders = store.orders()?;
            print_table(&orders, &views::order_columns(), &views::order_actions(), &options, &table);
        }
        Command::Abc => {
            let products = store.products()?;
            let rows = views::abc_rows(&abc_classification_with(&products, &settings.policy));
            print_table(&rows, &views::abc_columns(), &[], &options, &table);
        }
        Command::Alerts => {
            let products = store.products()?;
            let alerts = generate_alerts(&products, now, &settings.policy, &settings.alerts);
            print_table(&alerts, &views::alert_columns(), &[], &options, &table);
        }
        Command::Reorder => {
            let products = store.products()?;
            let low: Vec<&str> = low_stock_products(&products)
                .iter()
                .map(|product| product.id.as_str())
                .collect();
            let drafts = draft_orders(&products, low.as_slice());
            let lines = views::draft_lines(&drafts, &store.suppliers()?);
            print_table(&lines, &views::draft_columns(), &[], &options, &table);
            let total: f64 = drafts.iter().map(|draft| draft.total_amount).sum();
            println!("\n発注予定 {}件 合計 {}", drafts.len(), format_currency(total));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!(command = ?cli.command, "starting stockroom");
    run(&cli)
}
