//! Order commands.

use orderdesk_console::Console;
use orderdesk_console::types::Order;
use orderdesk_core::{CurrencyCode, OrderId};
use tracing::info;

use super::CliError;
use crate::output::{self, Format};

pub async fn list(console: &Console, format: Format) -> Result<(), CliError> {
    let orders = console.orders().list().await?;
    match format {
        Format::Json => output::json(&orders),
        Format::Table => {
            let currency = console.config().currency;
            let rows: Vec<Vec<String>> = orders.iter().map(|o| summary_row(o, currency)).collect();
            output::table(
                &["ORDER", "STATUS", "CUSTOMER", "STORE", "TOTAL", "PLACED"],
                &rows,
            );
            Ok(())
        }
    }
}

pub async fn show(console: &Console, id: &OrderId, format: Format) -> Result<(), CliError> {
    let order = console
        .orders()
        .get(id)
        .await?
        .ok_or_else(|| CliError::NotFound {
            kind: "Order",
            id: id.to_string(),
        })?;
    print_order(&order, console.config().currency, format)
}

pub async fn change_status(
    console: &Console,
    id: &OrderId,
    status: &str,
    format: Format,
) -> Result<(), CliError> {
    let order = console.lifecycle().change_status_str(id, status).await?;
    info!(order_id = %id, status = %order.status_label(), "Status changed");
    print_order(&order, console.config().currency, format)
}

fn summary_row(order: &Order, currency: CurrencyCode) -> Vec<String> {
    vec![
        format!("#{}", order.id),
        order.status_label(),
        order.customer.name.to_string(),
        order.store.name.to_string(),
        order.total_amount.display_with(|m| m.display(currency)),
        placed_at(order),
    ]
}

fn placed_at(order: &Order) -> String {
    order.created_at.map_or_else(
        || orderdesk_core::NOT_AVAILABLE.to_string(),
        |at| at.format("%Y-%m-%d %H:%M").to_string(),
    )
}

fn print_order(order: &Order, currency: CurrencyCode, format: Format) -> Result<(), CliError> {
    if format == Format::Json {
        return output::json(order);
    }

    output::fields(&[
        ("Order", format!("#{}", order.id)),
        ("Status", order.status_label()),
        ("Total", order.total_amount.display_with(|m| m.display(currency))),
        ("Placed", placed_at(order)),
        ("Customer", order.customer.name.to_string()),
        ("Email", order.customer.email.to_string()),
        ("Phone", order.customer.phone.to_string()),
        ("Store", order.store.name.to_string()),
        ("Address", order.store.address.to_string()),
    ]);
    output::line("");

    let rows: Vec<Vec<String>> = order
        .items
        .iter()
        .map(|item| {
            vec![
                item.menu_item.name.to_string(),
                item.quantity.to_string(),
                item.price.display_with(|m| m.display(currency)),
                item.subtotal().display_with(|m| m.display(currency)),
            ]
        })
        .collect();
    output::table(&["ITEM", "QTY", "PRICE", "SUBTOTAL"], &rows);
    Ok(())
}
