//! Order types as seen by the operator console.

use chrono::{DateTime, Utc};
use orderdesk_core::{Money, MenuItemId, OrderId, OrderItemId, OrderStatus, Resolved, UserId};
use serde::{Deserialize, Serialize};

// =============================================================================
// Order Types
// =============================================================================

/// An order with its customer, store, and line items resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Backend ID.
    pub id: OrderId,
    /// Customer account that placed the order, if known.
    pub user_id: Option<UserId>,
    /// Current lifecycle status; unavailable if the backend sent an unknown value.
    pub status: Resolved<OrderStatus>,
    /// Order total.
    pub total_amount: Resolved<Money>,
    /// When the order was placed.
    pub created_at: Option<DateTime<Utc>>,
    /// Customer snapshot.
    pub customer: CustomerSnapshot,
    /// Store snapshot.
    pub store: StoreSnapshot,
    /// Line items.
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Total number of units across all line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Status label for display, or `N/A`.
    #[must_use]
    pub fn status_label(&self) -> String {
        self.status.display_with(|status| status.label().to_string())
    }
}

/// Customer and total of one order record.
///
/// Read from every record of a listing, including those without a usable
/// id, so aggregate counts cover the whole order set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFigures {
    pub user_id: Option<UserId>,
    pub total_amount: Resolved<Money>,
}

impl From<&Order> for OrderFigures {
    fn from(order: &Order) -> Self {
        Self {
            user_id: order.user_id.clone(),
            total_amount: order.total_amount,
        }
    }
}

/// A full order listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderList {
    /// Orders with a usable id.
    pub orders: Vec<Order>,
    /// Figures for every record in the response, id or not.
    pub figures: Vec<OrderFigures>,
}

impl From<Vec<Order>> for OrderList {
    fn from(orders: Vec<Order>) -> Self {
        let figures = orders.iter().map(OrderFigures::from).collect();
        Self { orders, figures }
    }
}

/// Customer details embedded in an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSnapshot {
    /// Full name.
    pub name: Resolved<String>,
    /// Email address.
    pub email: Resolved<String>,
    /// Phone number.
    pub phone: Resolved<String>,
}

/// Store details embedded in an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Store name.
    pub name: Resolved<String>,
    /// Store address.
    pub address: Resolved<String>,
}

// =============================================================================
// Order Item Types
// =============================================================================

/// A line item in an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Backend ID, if the backend sent one.
    pub id: Option<OrderItemId>,
    /// Menu item this line refers to.
    pub menu_item: MenuItemSnapshot,
    /// Units ordered.
    pub quantity: u32,
    /// Unit price at the time of ordering.
    pub price: Resolved<Money>,
}

impl OrderItem {
    /// Line subtotal (`quantity * price`).
    ///
    /// Unavailable if the price is unavailable or the product overflows.
    #[must_use]
    pub fn subtotal(&self) -> Resolved<Money> {
        match self.price {
            Resolved::Available(price) => price.checked_mul(self.quantity).into(),
            Resolved::NotAvailable => Resolved::NotAvailable,
        }
    }
}

/// Menu item details embedded in an order item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemSnapshot {
    /// Menu item ID, if present.
    pub id: Option<MenuItemId>,
    /// Menu item name.
    pub name: Resolved<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: u32, price: Resolved<Money>) -> OrderItem {
        OrderItem {
            id: None,
            menu_item: MenuItemSnapshot::default(),
            quantity,
            price,
        }
    }

    #[test]
    fn test_subtotal() {
        let line = item(3, Resolved::Available(Money::from_minor_units(1250)));
        assert_eq!(
            line.subtotal(),
            Resolved::Available(Money::from_minor_units(3750))
        );
        assert_eq!(item(2, Resolved::NotAvailable).subtotal(), Resolved::NotAvailable);
    }

    #[test]
    fn test_item_count_and_status_label() {
        let order = Order {
            id: OrderId::from(1),
            user_id: None,
            status: Resolved::Available(OrderStatus::Preparing),
            total_amount: Resolved::NotAvailable,
            created_at: None,
            customer: CustomerSnapshot::default(),
            store: StoreSnapshot::default(),
            items: vec![item(2, Resolved::NotAvailable), item(1, Resolved::NotAvailable)],
        };
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.status_label(), "Preparing");

        let unknown = Order {
            status: Resolved::NotAvailable,
            ..order
        };
        assert_eq!(unknown.status_label(), "N/A");
    }
}
