//! Value objects for the order domain.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

/// Money amount represented in cents to avoid floating point issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in cents (e.g., 2590 = 25.90)
    cents: i64,
}

impl Money {
    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.cents > 0
    }

    /// Multiplies by a quantity.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            cents: self.cents * quantity as i64,
        }
    }

    /// Returns the amount reduced by a discount in basis points
    /// (100 bps = 1%). Rounds down to whole cents.
    pub fn less_basis_points(&self, bps: u32) -> Money {
        let bps = bps.min(10_000) as i64;
        Money {
            cents: self.cents * (10_000 - bps) / 10_000,
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        write!(f, "{sign}{}.{:02}", (self.cents / 100).abs(), self.cents.abs() % 100)
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents + rhs.cents,
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.cents += rhs.cents;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// A line item in an order.
///
/// Name and unit price are snapshots taken at order time, not live
/// references into the catalog; the item validation engine checks them
/// against the catalog exactly once, at creation. The item carries no
/// back-reference to its parent order; callers pass the parent id
/// where it is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Line identifier, assigned by the store on first save.
    pub id: Option<i64>,

    /// The catalog product this line refers to.
    pub product_id: i64,

    /// Product name snapshot.
    pub name: String,

    /// Quantity ordered, at least 1.
    pub quantity: u32,

    /// Price per unit in cents.
    pub unit_price: Money,

    /// Free-text note from the customer ("no ice", "no onions").
    pub observation: Option<String>,
}

impl OrderItem {
    /// Creates a new order item, validating its fields immediately.
    pub fn new(
        product_id: i64,
        name: impl Into<String>,
        quantity: u32,
        unit_price: Money,
        observation: Option<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation(
                "order item name cannot be blank",
            ));
        }
        if quantity == 0 {
            return Err(DomainError::validation(
                "order item quantity must be at least 1",
            ));
        }
        if !unit_price.is_positive() {
            return Err(DomainError::validation(
                "order item unit price must be positive",
            ));
        }

        Ok(Self {
            id: None,
            product_id,
            name,
            quantity,
            unit_price,
            observation,
        })
    }

    /// Returns the line subtotal (quantity × unit price).
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_display() {
        assert_eq!(Money::from_cents(2590).to_string(), "25.90");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-1234).to_string(), "-12.34");
    }

    #[test]
    fn money_multiply_and_sum() {
        let total: Money = [Money::from_cents(2590).multiply(2), Money::from_cents(850)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 6030);
    }

    #[test]
    fn money_discount_rounds_down() {
        // 10% off 25.90 = 23.31
        assert_eq!(Money::from_cents(2590).less_basis_points(1000).cents(), 2331);
        // 15% off 0.99 = 0.8415, rounds down to 0.84
        assert_eq!(Money::from_cents(99).less_basis_points(1500).cents(), 84);
        // discount clamped to 100%
        assert_eq!(Money::from_cents(100).less_basis_points(20_000).cents(), 0);
    }

    #[test]
    fn valid_item_computes_subtotal() {
        let item = OrderItem::new(1, "Big Mac", 2, Money::from_cents(2590), None).unwrap();
        assert_eq!(item.subtotal().cents(), 5180);
        assert!(item.id.is_none());
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = OrderItem::new(1, "  ", 1, Money::from_cents(100), None).unwrap_err();
        assert_eq!(err.to_string(), "order item name cannot be blank");
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let err = OrderItem::new(1, "Fries", 0, Money::from_cents(100), None).unwrap_err();
        assert_eq!(err.to_string(), "order item quantity must be at least 1");
    }

    #[test]
    fn non_positive_price_is_rejected() {
        let err = OrderItem::new(1, "Fries", 1, Money::zero(), None).unwrap_err();
        assert_eq!(err.to_string(), "order item unit price must be positive");
    }

    #[test]
    fn observation_is_kept_verbatim() {
        let item = OrderItem::new(
            2,
            "Coke",
            1,
            Money::from_cents(850),
            Some("no ice".to_string()),
        )
        .unwrap();
        assert_eq!(item.observation.as_deref(), Some("no ice"));
    }
}
