//! Order drafts built from low-stock products

use indexmap::IndexMap;
use inv_core::{OrderDraft, OrderItem, Product};
use tracing::debug;

use crate::stock::reorder_quantity;

/// Group the selected products into one draft per supplier
///
/// Each line orders the reorder quantity at the product's cost. Products
/// without a supplier, or already at `max_stock`, are left out. Drafts come
/// back in the order their supplier first appears in `products`.
pub fn draft_orders<S: AsRef<str>>(products: &[Product], selected_ids: &[S]) -> Vec<OrderDraft> {
    let mut by_supplier: IndexMap<&str, Vec<OrderItem>> = IndexMap::new();

    for product in products {
        if !selected_ids.iter().any(|id| id.as_ref() == product.id) {
            continue;
        }
        let Some(supplier_id) = product.supplier_id.as_deref() else {
            debug!(product = %product.id, "skipping product without supplier");
            continue;
        };
        let quantity = reorder_quantity(product);
        if quantity <= 0.0 {
            continue;
        }
        by_supplier
            .entry(supplier_id)
            .or_default()
            .push(OrderItem::new(&product.id, &product.name, quantity, product.cost));
    }

    by_supplier
        .into_iter()
        .map(|(supplier_id, items)| OrderDraft::new(supplier_id, items))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stock::tests::product;

    #[test]
    fn test_drafts_grouped_by_supplier() {
        let mut meat = product("m1", 1.0, 2.0, 10.0, 1500.0);
        meat.supplier_id = Some("supplier2".into());
        let mut loose = product("x", 0.0, 1.0, 5.0, 10.0);
        loose.supplier_id = None;

        let products = vec![
            product("p1", 5.0, 10.0, 25.0, 200.0),
            meat,
            product("p3", 2.0, 5.0, 12.0, 80.0),
            loose,
            product("p4", 1.0, 5.0, 12.0, 80.0),
        ];
        let drafts = draft_orders(&products, &["p1", "m1", "p3", "x"]);

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].supplier_id, "supplier1");
        assert_eq!(drafts[0].items.len(), 2);
        assert_eq!(drafts[0].items[0].quantity, 20.0);
        assert_eq!(drafts[0].total_amount, 20.0 * 200.0 + 10.0 * 80.0);
        assert_eq!(drafts[1].supplier_id, "supplier2");
        assert_eq!(drafts[1].items[0].unit_price, 1500.0);
    }

    #[test]
    fn test_nothing_selected() {
        let products = vec![product("p1", 5.0, 10.0, 25.0, 200.0)];
        assert!(draft_orders::<&str>(&products, &[]).is_empty());
    }
}
