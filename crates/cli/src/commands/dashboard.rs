//! Dashboard command.

use orderdesk_console::Console;
use orderdesk_console::dashboard::{DashboardLoad, DashboardMetrics, RecentOrderView};
use serde_json::{Value, json};

use super::CliError;
use crate::output::{self, Format};

pub async fn show(console: &Console, format: Format) -> Result<(), CliError> {
    let load = console.dashboard().load().await;
    if matches!(load, DashboardLoad::Unavailable { .. }) {
        tracing::warn!(
            reauth_required = load.requires_reauth(),
            "Dashboard data unavailable; showing empty metrics"
        );
    }

    let currency = console.config().currency;
    let metrics = load.metrics();
    let recent = metrics.recent_views(currency);

    match format {
        Format::Json => output::json(&summary_json(&metrics, &recent)),
        Format::Table => {
            output::fields(&[
                ("Orders", metrics.total_orders.to_string()),
                ("Revenue", metrics.total_revenue.display(currency)),
                ("Customers", metrics.total_customers.to_string()),
                ("Stores", metrics.total_stores.to_string()),
            ]);
            output::line("");
            output::line("Recent orders");
            let rows: Vec<Vec<String>> = recent
                .into_iter()
                .map(|view| {
                    vec![
                        format!("#{}", view.id),
                        view.customer_name,
                        view.store_name,
                        view.total,
                        view.status,
                        view.created_at,
                    ]
                })
                .collect();
            output::table(
                &["ORDER", "CUSTOMER", "STORE", "TOTAL", "STATUS", "PLACED"],
                &rows,
            );
            Ok(())
        }
    }
}

/// Dashboard summary for `--json`. Amounts are decimal strings.
fn summary_json(metrics: &DashboardMetrics, recent: &[RecentOrderView]) -> Value {
    json!({
        "total_orders": metrics.total_orders,
        "total_revenue": metrics.total_revenue,
        "total_customers": metrics.total_customers,
        "total_stores": metrics.total_stores,
        "recent_orders": recent,
    })
}

#[cfg(test)]
mod tests {
    use orderdesk_core::Money;

    use super::*;

    #[test]
    fn test_summary_json_uses_decimal_revenue() {
        let metrics = DashboardMetrics {
            total_orders: 3,
            total_revenue: Money::from_minor_units(3530),
            total_customers: 2,
            total_stores: 1,
            recent_orders: Vec::new(),
        };
        assert_eq!(
            summary_json(&metrics, &[]),
            json!({
                "total_orders": 3,
                "total_revenue": "35.30",
                "total_customers": 2,
                "total_stores": 1,
                "recent_orders": [],
            })
        );
    }
}
