//! Lookup of products by category and supplier

use ahash::AHashMap;
use inv_core::Product;

/// Product ids grouped by category and by supplier, in catalogue order
#[derive(Debug, Clone, Default)]
pub struct ProductIndex {
    by_category: AHashMap<String, Vec<String>>,
    by_supplier: AHashMap<String, Vec<String>>,
}

impl ProductIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(products: &[Product]) -> Self {
        let mut index = Self::new();
        for product in products {
            index.add(product);
        }
        index
    }

    pub fn add(&mut self, product: &Product) {
        self.by_category
            .entry(product.category_id.clone())
            .or_default()
            .push(product.id.clone());
        if let Some(supplier_id) = &product.supplier_id {
            self.by_supplier
                .entry(supplier_id.clone())
                .or_default()
                .push(product.id.clone());
        }
    }

    pub fn category(&self, category_id: &str) -> &[String] {
        self.by_category
            .get(category_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn supplier(&self, supplier_id: &str) -> &[String] {
        self.by_supplier
            .get(supplier_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn category_count(&self) -> usize {
        self.by_category.len()
    }

    pub fn clear(&mut self) {
        self.by_category.clear();
        self.by_supplier.clear();
    }
}
