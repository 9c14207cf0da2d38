//! CSV import of products and stock movements
//!
//! Headers use the same camelCase names as the JSON fixtures. Optional
//! columns (`barcode`, `supplierId`, `expiryDate`, `allergens`) may be
//! missing entirely or hold a blank value.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use inv_core::{Product, StockTransaction, TransactionType};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::BlankValues;
use crate::DataError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRow {
    id: String,
    name: String,
    code: String,
    #[serde(default)]
    barcode: String,
    category_id: String,
    unit: String,
    cost: f64,
    price: f64,
    min_stock: f64,
    max_stock: f64,
    current_stock: f64,
    #[serde(default)]
    supplier_id: String,
    #[serde(default)]
    expiry_date: String,
    /// `;`-separated
    #[serde(default)]
    allergens: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRow {
    id: String,
    product_id: String,
    #[serde(rename = "type")]
    kind: TransactionType,
    quantity: f64,
    unit_price: f64,
    date: String,
    user_id: String,
    #[serde(default)]
    reason: String,
}

/// CSV importer for inventory files
#[derive(Debug, Clone, Default)]
pub struct CsvImport {
    blank_values: BlankValues,
}

impl CsvImport {
    pub fn new(blank_values: BlankValues) -> Self {
        Self { blank_values }
    }

    pub fn products_from_path(&self, path: &Path) -> Result<Vec<Product>, DataError> {
        let products = self.products_from_reader(BufReader::new(File::open(path)?))?;
        info!(path = %path.display(), rows = products.len(), "products imported");
        Ok(products)
    }

    pub fn products_from_reader<R: Read>(&self, reader: R) -> Result<Vec<Product>, DataError> {
        read_rows(reader, |line, row: ProductRow| {
            let expiry_date = match self.blank_values.optional(&row.expiry_date) {
                Some(value) => Some(parse_date(&value).ok_or_else(|| DataError::InvalidRow {
                    line,
                    message: format!("invalid expiryDate '{value}'"),
                })?),
                None => None,
            };
            let allergens = self
                .blank_values
                .optional(&row.allergens)
                .map(|value| {
                    value
                        .split(';')
                        .map(str::trim)
                        .filter(|allergen| !allergen.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();

            let product = Product {
                id: row.id,
                name: row.name,
                code: row.code,
                barcode: self.blank_values.optional(&row.barcode),
                category_id: row.category_id,
                unit: row.unit,
                cost: row.cost,
                price: row.price,
                min_stock: row.min_stock,
                max_stock: row.max_stock,
                current_stock: row.current_stock,
                supplier_id: self.blank_values.optional(&row.supplier_id),
                expiry_date,
                allergens,
            };
            if !product.is_consistent() {
                warn!(line, product = %product.id, "product stock bounds are inconsistent");
            }
            Ok(product)
        })
    }

    pub fn transactions_from_path(&self, path: &Path) -> Result<Vec<StockTransaction>, DataError> {
        let transactions = self.transactions_from_reader(BufReader::new(File::open(path)?))?;
        info!(path = %path.display(), rows = transactions.len(), "transactions imported");
        Ok(transactions)
    }

    pub fn transactions_from_reader<R: Read>(&self, reader: R) -> Result<Vec<StockTransaction>, DataError> {
        read_rows(reader, |line, row: TransactionRow| {
            let date = parse_date(&row.date).ok_or_else(|| DataError::InvalidRow {
                line,
                message: format!("invalid date '{}'", row.date),
            })?;
            if row.quantity < 0.0 || row.unit_price < 0.0 {
                return Err(DataError::InvalidRow {
                    line,
                    message: "quantity and unitPrice must not be negative".to_string(),
                });
            }
            let transaction = StockTransaction::new(
                row.id,
                row.product_id,
                row.kind,
                row.quantity,
                row.unit_price,
                date,
                row.user_id,
            );
            Ok(match self.blank_values.optional(&row.reason) {
                Some(reason) => transaction.with_reason(reason),
                None => transaction,
            })
        })
    }
}

fn read_rows<R, Row, T, F>(reader: R, mut convert: F) -> Result<Vec<T>, DataError>
where
    R: Read,
    Row: DeserializeOwned,
    F: FnMut(u64, Row) -> Result<T, DataError>,
{
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while csv_reader.read_record(&mut record)? {
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let row: Row = record.deserialize(Some(&headers)).map_err(|err| DataError::InvalidRow {
            line,
            message: err.to_string(),
        })?;
        rows.push(convert(line, row)?);
    }
    Ok(rows)
}

/// RFC 3339, or a bare `YYYY-MM-DD` / `YYYY/MM/DD` taken as UTC midnight
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}
