//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use common::OrderId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, Result};

use super::{OrderItem, OrderStatus, value_objects::Money};

/// Order aggregate root.
///
/// Holds the full state of one customer order. The monetary total is
/// always derived from the line items, and the status only changes
/// through [`Order::transition_to`]; there is no way to set either
/// directly from outside the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Store-assigned identifier, absent until the first save.
    id: Option<OrderId>,

    /// Customer who placed the order.
    customer_id: String,

    /// Human-facing identifier, assigned at creation, immutable.
    order_number: String,

    /// Current lifecycle status.
    status: OrderStatus,

    /// Line items in insertion order.
    items: Vec<OrderItem>,

    /// Set once a discount has been applied, so re-application is a
    /// no-op.
    discount_applied: bool,

    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new order for a customer.
    ///
    /// Fails immediately when the customer id is blank or the item
    /// list is empty; item-level rules were already enforced by
    /// [`OrderItem::new`].
    pub fn new(customer_id: impl Into<String>, items: Vec<OrderItem>) -> Result<Self> {
        let customer_id = customer_id.into();
        if customer_id.trim().is_empty() {
            return Err(DomainError::validation("order customer id is required"));
        }
        if items.is_empty() {
            return Err(DomainError::validation(
                "order must contain at least one item",
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: None,
            customer_id,
            order_number: generate_order_number(),
            status: OrderStatus::Received,
            items,
            discount_applied: false,
            created_at: now,
            updated_at: now,
        })
    }
}

// Query methods
impl Order {
    /// Returns the store-assigned identifier, if saved.
    pub fn id(&self) -> Option<OrderId> {
        self.id
    }

    /// Returns the owning customer id.
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Returns the human-facing order number.
    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the line items in insertion order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the order total: the sum of all line subtotals.
    ///
    /// This is a derived read; the total is never stored
    /// independently.
    pub fn total(&self) -> Money {
        self.items.iter().map(OrderItem::subtotal).sum()
    }

    /// Returns true if a discount has already been applied.
    pub fn discount_applied(&self) -> bool {
        self.discount_applied
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// Mutators
impl Order {
    /// Moves the order to the target status.
    ///
    /// `current == target` yields the idempotent-conflict outcome so
    /// duplicate event deliveries can be absorbed by the caller, and
    /// terminal statuses admit no further transition. Anything else is
    /// applied as-is; which targets are sensible is the payment gate's
    /// concern, not this engine's.
    pub fn transition_to(&mut self, target: OrderStatus) -> Result<()> {
        let id = self.id.ok_or_else(|| {
            DomainError::validation("order must be persisted before a status transition")
        })?;

        if self.status == target {
            return Err(DomainError::AlreadyInStatus {
                order_id: id,
                status: target,
            });
        }
        if self.status.is_terminal() {
            return Err(DomainError::validation(format!(
                "order {id} is in terminal status {} and cannot transition to {target}",
                self.status
            )));
        }

        self.status = target;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Reduces every line's unit price by the given discount in basis
    /// points. Applying a discount twice is a no-op, which keeps the
    /// operation idempotent from the order's perspective.
    pub fn apply_discount(&mut self, bps: u32) {
        if self.discount_applied || bps == 0 {
            return;
        }
        for item in &mut self.items {
            item.unit_price = item.unit_price.less_basis_points(bps);
        }
        self.discount_applied = true;
        self.updated_at = Utc::now();
    }

    /// Assigns the store identifier. Called by the order store on
    /// first save.
    pub fn set_id(&mut self, id: OrderId) {
        self.id = Some(id);
    }

    /// Mutable access to the line items, for store-side id
    /// assignment.
    pub(crate) fn items_mut(&mut self) -> &mut Vec<OrderItem> {
        &mut self.items
    }

    /// Refreshes the update timestamp. Called by the store on save.
    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn generate_order_number() -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("ORD-{}", raw[..8].to_uppercase())
}
