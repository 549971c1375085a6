//! Use case: validate order items against the catalog.

use std::collections::HashMap;

use crate::error::{DomainError, Result};
use crate::gateway::{CatalogLookup, CatalogSnapshot};
use crate::order::OrderItem;

/// Reconciles the order's items against catalog snapshots.
///
/// Fetches snapshots for the distinct referenced product ids in one
/// batched lookup, then checks each item in order. Validation is
/// fail-fast: the first violated rule aborts the pass, so the caller
/// sees exactly one violation per call. A purely read-only gate; it is
/// invoked once, at order creation.
pub async fn ensure_valid_order_items(
    items: &[OrderItem],
    catalog: &impl CatalogLookup,
) -> Result<()> {
    let mut product_ids: Vec<i64> = Vec::new();
    for item in items {
        if !product_ids.contains(&item.product_id) {
            product_ids.push(item.product_id);
        }
    }

    let snapshots = catalog.find_by_product_ids(&product_ids).await?;
    let by_id: HashMap<i64, &CatalogSnapshot> =
        snapshots.iter().map(|s| (s.product_id, s)).collect();

    for item in items {
        let product = by_id.get(&item.product_id).ok_or_else(|| {
            DomainError::validation("order item product does not exist")
        })?;

        if product.name != item.name {
            return Err(DomainError::validation(
                "order item name diverges from the registered product name",
            ));
        }
        if product.unit_price != item.unit_price {
            return Err(DomainError::validation(
                "order item unit price diverges from the product price",
            ));
        }
        if !product.active {
            return Err(DomainError::validation(
                "order cannot contain inactive products",
            ));
        }
        if !product.category_active {
            return Err(DomainError::validation(
                "product category cannot be inactive",
            ));
        }
        if product.stock_quantity < item.quantity {
            return Err(DomainError::validation(format!(
                "insufficient stock for product: {}",
                item.name
            )));
        }
    }

    Ok(())
}
