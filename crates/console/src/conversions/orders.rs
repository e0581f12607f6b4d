//! Order type conversion functions.

use orderdesk_core::{MenuItemId, OrderId, OrderItemId, OrderStatus, Resolved, UserId};
use serde_json::Value;
use tracing::debug;

use crate::normalize::{
    CUSTOMER, MENU_ITEM, STORE, id_field, list_items, money_field, timestamp_field, unwrap_data,
};
use crate::types::{
    CustomerSnapshot, MenuItemSnapshot, Order, OrderFigures, OrderItem, OrderList, StoreSnapshot,
};

use super::{convert_items, convert_list};

/// Keys carrying the customer's display name, in lookup order.
const CUSTOMER_NAME_KEYS: &[&str] = &["full_name", "name"];

// =============================================================================
// Orders
// =============================================================================

pub fn convert_orders(value: &Value) -> Vec<Order> {
    convert_list(value, "orders", convert_order)
}

/// Convert a listing, keeping figures for records that have no id.
pub fn convert_order_list(value: &Value) -> OrderList {
    let records = list_items(value, "orders");
    OrderList {
        orders: convert_items(records, "orders", convert_order),
        figures: records.iter().map(convert_order_figures).collect(),
    }
}

fn convert_order_figures(value: &Value) -> OrderFigures {
    let record = unwrap_data(value);
    OrderFigures {
        user_id: id_field(record, "user_id", UserId::from_json),
        total_amount: money_field(record, "total_amount"),
    }
}

pub fn convert_order(value: &Value) -> Option<Order> {
    let record = unwrap_data(value);
    Some(Order {
        id: id_field(record, "id", OrderId::from_json)?,
        user_id: id_field(record, "user_id", UserId::from_json),
        status: convert_status(record),
        total_amount: money_field(record, "total_amount"),
        created_at: timestamp_field(record, "created_at"),
        customer: convert_customer(record),
        store: convert_store_snapshot(record),
        items: record
            .get("order_items")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(convert_order_item).collect())
            .unwrap_or_default(),
    })
}

fn convert_status(record: &Value) -> Resolved<OrderStatus> {
    let Some(raw) = record.get("status").and_then(Value::as_str) else {
        return Resolved::NotAvailable;
    };
    match raw.parse::<OrderStatus>() {
        Ok(status) => Resolved::Available(status),
        Err(e) => {
            debug!(error = %e, "Unknown order status from backend");
            Resolved::NotAvailable
        }
    }
}

fn convert_customer(record: &Value) -> CustomerSnapshot {
    CustomerSnapshot {
        name: CUSTOMER.text(record, CUSTOMER_NAME_KEYS),
        email: CUSTOMER.text(record, &["email"]),
        phone: CUSTOMER.text(record, &["phone"]),
    }
}

fn convert_store_snapshot(record: &Value) -> StoreSnapshot {
    StoreSnapshot {
        name: STORE.text(record, &["name"]),
        address: STORE.text(record, &["address"]),
    }
}

// =============================================================================
// Order items
// =============================================================================

fn convert_order_item(item: &Value) -> OrderItem {
    let menu_item_id = id_field(item, "menu_item_id", MenuItemId::from_json).or_else(|| {
        MENU_ITEM
            .resolve(item)
            .object()
            .and_then(|obj| obj.get("id"))
            .and_then(|id| MenuItemId::from_json(id).ok())
    });
    OrderItem {
        id: id_field(item, "id", OrderItemId::from_json),
        menu_item: MenuItemSnapshot {
            id: menu_item_id,
            name: MENU_ITEM.text(item, &["name"]),
        },
        quantity: convert_quantity(item.get("quantity")),
        price: money_field(item, "price"),
    }
}

/// Units ordered; missing, negative, or malformed quantities count as zero.
fn convert_quantity(value: Option<&Value>) -> u32 {
    let quantity = match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    quantity
        .and_then(|q| u32::try_from(q).ok())
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use orderdesk_core::Money;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_list_and_detail_resolve_customer_identically() {
        let record = json!({"id": 7, "users": {"full_name": "A"}, "status": "pending"});
        let from_list = convert_orders(&json!({"data": [record.clone()]}));
        let from_detail = convert_order(&json!({"data": record})).unwrap();
        assert_eq!(from_list[0], from_detail);
        assert_eq!(from_detail.customer.name.to_string(), "A");
    }

    #[test]
    fn test_customer_shapes() {
        let plural = convert_order(&json!({"id": 1, "users": {"full_name": "A"}})).unwrap();
        let singular = convert_order(&json!({"id": 2, "user": {"name": "A"}})).unwrap();
        let absent = convert_order(&json!({"id": 3})).unwrap();
        assert_eq!(plural.customer.name, Resolved::Available("A".to_string()));
        assert_eq!(singular.customer.name, Resolved::Available("A".to_string()));
        assert_eq!(absent.customer.name, Resolved::NotAvailable);
    }

    #[test]
    fn test_order_detail() {
        let order = convert_order(&json!({
            "id": 12,
            "user_id": 5,
            "status": "Preparing",
            "total_amount": "45.00",
            "created_at": "2024-03-01T10:00:00Z",
            "user": {"full_name": "Mona", "email": "mona@example.com", "phone": "+971500000"},
            "stores": [{"name": "Falafel House", "address": "Al Wasl Rd"}],
            "order_items": [
                {"id": 1, "menu_item_id": 30, "quantity": 2, "price": "15.00",
                 "menu_items": {"name": "Falafel plate"}},
                {"id": 2, "quantity": "1", "price": 15, "menu_item": {"id": 31, "name": "Hummus"}}
            ]
        }))
        .unwrap();

        assert_eq!(order.user_id, Some(UserId::from(5)));
        assert_eq!(order.status, Resolved::Available(OrderStatus::Preparing));
        assert_eq!(order.total_amount, Resolved::Available(Money::from_minor_units(4500)));
        assert!(order.created_at.is_some());
        assert_eq!(order.customer.email.to_string(), "mona@example.com");
        assert_eq!(order.store.name.to_string(), "Falafel House");
        assert_eq!(order.store.address.to_string(), "Al Wasl Rd");

        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].menu_item.id, Some(MenuItemId::from(30)));
        assert_eq!(order.items[0].menu_item.name.to_string(), "Falafel plate");
        assert_eq!(
            order.items[0].subtotal(),
            Resolved::Available(Money::from_minor_units(3000))
        );
        assert_eq!(order.items[1].menu_item.id, Some(MenuItemId::from(31)));
        assert_eq!(order.items[1].quantity, 1);
    }

    #[test]
    fn test_unknown_status_and_missing_total() {
        let order = convert_order(&json!({"id": 1, "status": "shipped"})).unwrap();
        assert_eq!(order.status, Resolved::NotAvailable);
        assert_eq!(order.total_amount, Resolved::NotAvailable);
        assert!(order.items.is_empty());
    }

    #[test]
    fn test_quantity_tolerance() {
        assert_eq!(convert_quantity(Some(&json!(3))), 3);
        assert_eq!(convert_quantity(Some(&json!("4"))), 4);
        assert_eq!(convert_quantity(Some(&json!(-1))), 0);
        assert_eq!(convert_quantity(Some(&json!("two"))), 0);
        assert_eq!(convert_quantity(None), 0);
    }

    #[test]
    fn test_order_list_keeps_figures_of_id_less_records() {
        let list = convert_order_list(&json!({"data": [
            {"id": 1, "user_id": 1, "total_amount": "10.00"},
            {"user_id": 2, "total_amount": "5.00"}
        ]}));
        assert_eq!(list.orders.len(), 1);
        assert_eq!(list.figures.len(), 2);
        assert_eq!(list.figures[1].user_id, Some(UserId::from(2)));
        assert_eq!(
            list.figures[1].total_amount,
            Resolved::Available(Money::from_minor_units(500))
        );
    }

    #[test]
    fn test_orders_without_id_are_dropped() {
        let orders = convert_orders(&json!([{"status": "pending"}, {"id": 2}]));
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, OrderId::from(2));
    }
}
