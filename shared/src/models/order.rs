//! Order Model
//!
//! Cafe orders move through a strictly forward status graph:
//! `paid -> preparing -> ready -> delivered`, where intermediate steps may
//! be skipped and `delivered` is terminal.

use serde::{Deserialize, Serialize};

/// Order status, persisted as a lowercase string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum OrderStatus {
    Paid,
    Preparing,
    Ready,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Paid => "paid",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// Whether moving from `self` to `next` is allowed.
    ///
    /// Backward moves and self-transitions are rejected; `Delivered`
    /// accepts nothing.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Paid, Preparing)
                | (Paid, Ready)
                | (Paid, Delivered)
                | (Preparing, Ready)
                | (Preparing, Delivered)
                | (Ready, Delivered)
        )
    }

    /// Terminal statuses accept no further transitions.
    pub fn is_terminal(self) -> bool {
        self == OrderStatus::Delivered
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub status: OrderStatus,
}

/// Line item input for order creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub item_id: i64,
    pub quantity: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub items: Vec<OrderItemInput>,
}

/// Order line joined with its menu row at read time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItemDetail {
    pub item_id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

/// Order with joined line details and derived total.
///
/// `total_price` is computed from the menu's current prices when the
/// order is read, not captured at order creation; a later price change
/// shifts the reported total of past orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: i64,
    pub user_id: i64,
    pub status: OrderStatus,
    pub items: Vec<OrderItemDetail>,
    pub total_price: f64,
}

impl OrderDetail {
    /// Sum of `price * quantity` over the joined lines.
    pub fn total_of(items: &[OrderItemDetail]) -> f64 {
        items.iter().map(|i| i.price * i.quantity as f64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions_allowed() {
        use OrderStatus::*;
        assert!(Paid.can_transition_to(Preparing));
        assert!(Paid.can_transition_to(Ready));
        assert!(Paid.can_transition_to(Delivered));
        assert!(Preparing.can_transition_to(Ready));
        assert!(Preparing.can_transition_to(Delivered));
        assert!(Ready.can_transition_to(Delivered));
    }

    #[test]
    fn backward_and_self_transitions_rejected() {
        use OrderStatus::*;
        for status in [Paid, Preparing, Ready, Delivered] {
            assert!(!status.can_transition_to(status));
        }
        assert!(!Preparing.can_transition_to(Paid));
        assert!(!Ready.can_transition_to(Preparing));
        assert!(!Delivered.can_transition_to(Ready));
        assert!(!Delivered.can_transition_to(Paid));
    }

    #[test]
    fn delivered_is_terminal() {
        use OrderStatus::*;
        assert!(Delivered.is_terminal());
        for next in [Paid, Preparing, Ready, Delivered] {
            assert!(!Delivered.can_transition_to(next));
        }
    }

    #[test]
    fn total_sums_price_times_quantity() {
        let items = vec![
            OrderItemDetail {
                item_id: 1,
                name: "Cappuccino".into(),
                price: 400.0,
                quantity: 2,
            },
            OrderItemDetail {
                item_id: 2,
                name: "Tea".into(),
                price: 200.0,
                quantity: 1,
            },
        ];
        assert_eq!(OrderDetail::total_of(&items), 1000.0);
    }
}
