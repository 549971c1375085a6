//! Use case: apply the customer's discount to a freshly created
//! order.

use crate::error::Result;
use crate::gateway::CustomerLookup;
use crate::order::Order;

/// Applies the customer's discount, if any, to the order's line
/// amounts. Invoked once during creation, after item validation and
/// before the first save; idempotent and side-effect-free beyond the
/// order's own amounts.
pub async fn apply_discount(order: &mut Order, customers: &impl CustomerLookup) -> Result<()> {
    if let Some(bps) = customers.discount_bps(order.customer_id()).await? {
        tracing::info!(
            customer_id = %order.customer_id(),
            discount_bps = bps,
            "applying customer discount"
        );
        order.apply_discount(bps);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::memory::InMemoryCustomers;
    use crate::order::{Money, OrderItem};

    fn order() -> Order {
        let items = vec![OrderItem::new(1, "Big Mac", 2, Money::from_cents(2590), None).unwrap()];
        Order::new("vip", items).unwrap()
    }

    #[tokio::test]
    async fn discount_reduces_line_amounts() {
        let customers = InMemoryCustomers::new();
        customers.set_discount("vip", 1000);

        let mut order = order();
        apply_discount(&mut order, &customers).await.unwrap();

        assert_eq!(order.total().cents(), 2 * 2331);
        assert!(order.discount_applied());
    }

    #[tokio::test]
    async fn customer_without_discount_is_untouched() {
        let customers = InMemoryCustomers::new();
        let mut order = order();
        apply_discount(&mut order, &customers).await.unwrap();

        assert_eq!(order.total().cents(), 5180);
        assert!(!order.discount_applied());
    }

    #[tokio::test]
    async fn reapplication_is_a_no_op() {
        let customers = InMemoryCustomers::new();
        customers.set_discount("vip", 1000);

        let mut order = order();
        apply_discount(&mut order, &customers).await.unwrap();
        let total = order.total();
        apply_discount(&mut order, &customers).await.unwrap();

        assert_eq!(order.total(), total);
    }
}
