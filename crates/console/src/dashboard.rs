//! Dashboard metrics derived from the full order and store sets.

use std::collections::HashSet;

use orderdesk_core::{CurrencyCode, Money, NOT_AVAILABLE};
use serde::Serialize;
use tracing::{error, instrument};

use crate::error::ApiError;
use crate::repositories::{OrderRepository, StoreRepository};
use crate::types::{Order, OrderList, Store};

/// Number of orders shown in the recent-activity view.
pub const RECENT_ORDERS_LIMIT: usize = 5;

/// Summary metrics for the dashboard.
///
/// The default value is the all-zero snapshot shown when data could not be
/// loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    /// Every order record, including those without a usable id.
    pub total_orders: usize,
    /// Exact sum of order totals; unavailable totals count as zero.
    pub total_revenue: Money,
    /// Distinct customers. Orders without a `user_id` share one bucket.
    pub total_customers: usize,
    pub total_stores: usize,
    /// Most recent orders first, at most [`RECENT_ORDERS_LIMIT`].
    pub recent_orders: Vec<Order>,
}

/// Outcome of loading the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardLoad {
    /// Both fetches succeeded.
    Ready(DashboardMetrics),
    /// A fetch failed; the dashboard shows the zeroed snapshot.
    Unavailable {
        /// The failure was an expired or missing session.
        reauth_required: bool,
    },
}

impl DashboardLoad {
    /// The metrics to display; the all-zero snapshot when unavailable.
    #[must_use]
    pub fn metrics(self) -> DashboardMetrics {
        match self {
            Self::Ready(metrics) => metrics,
            Self::Unavailable { .. } => DashboardMetrics::default(),
        }
    }

    /// Returns `true` if the operator must log in again.
    #[must_use]
    pub const fn requires_reauth(&self) -> bool {
        matches!(
            self,
            Self::Unavailable {
                reauth_required: true
            }
        )
    }
}

/// Loads orders and stores and reduces them to [`DashboardMetrics`].
#[derive(Debug, Clone)]
pub struct DashboardAggregator {
    orders: OrderRepository,
    stores: StoreRepository,
}

impl DashboardAggregator {
    #[must_use]
    pub const fn new(orders: OrderRepository, stores: StoreRepository) -> Self {
        Self { orders, stores }
    }

    /// Fetch orders and stores concurrently and compute the metrics.
    ///
    /// Any failure collapses to [`DashboardLoad::Unavailable`]; partial
    /// results are never mixed in.
    #[instrument(skip(self))]
    pub async fn load(&self) -> DashboardLoad {
        match self.fetch().await {
            Ok((orders, stores)) => DashboardLoad::Ready(compute_metrics(&orders, &stores)),
            Err(e) => {
                error!(error = %e, "Failed to load dashboard data");
                DashboardLoad::Unavailable {
                    reauth_required: e.requires_reauth(),
                }
            }
        }
    }

    async fn fetch(&self) -> Result<(OrderList, Vec<Store>), ApiError> {
        tokio::try_join!(self.orders.list_with_figures(), self.stores.list())
    }
}

/// Reduce an order listing and a store set to dashboard metrics.
///
/// Totals come from the figures of every record; only orders with an id
/// are eligible for `recent_orders`.
#[must_use]
pub fn compute_metrics(orders: &OrderList, stores: &[Store]) -> DashboardMetrics {
    let total_revenue = orders
        .figures
        .iter()
        .map(|figures| figures.total_amount.value_or(Money::ZERO))
        .sum();

    let total_customers = orders
        .figures
        .iter()
        .map(|figures| figures.user_id.as_ref())
        .collect::<HashSet<_>>()
        .len();

    DashboardMetrics {
        total_orders: orders.figures.len(),
        total_revenue,
        total_customers,
        total_stores: stores.len(),
        recent_orders: recent_orders(&orders.orders),
    }
}

/// Newest orders first (ties by descending id), undated orders last.
fn recent_orders(orders: &[Order]) -> Vec<Order> {
    let mut sorted: Vec<&Order> = orders.iter().collect();
    // None < Some, so descending order puts undated orders last.
    sorted.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    sorted
        .into_iter()
        .take(RECENT_ORDERS_LIMIT)
        .cloned()
        .collect()
}

/// One row of the recent-activity table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentOrderView {
    pub id: String,
    pub customer_name: String,
    pub store_name: String,
    pub total: String,
    pub status: String,
    pub status_color: Option<&'static str>,
    pub created_at: String,
}

impl RecentOrderView {
    /// Build a display row, formatting amounts in `currency`.
    #[must_use]
    pub fn new(order: &Order, currency: CurrencyCode) -> Self {
        Self {
            id: order.id.to_string(),
            customer_name: order.customer.name.to_string(),
            store_name: order.store.name.to_string(),
            total: order.total_amount.display_with(|m| m.display(currency)),
            status: order.status_label(),
            status_color: order.status.map(|s| s.color()).into_option(),
            created_at: order.created_at.map_or_else(
                || NOT_AVAILABLE.to_string(),
                |at| at.format("%Y-%m-%d %H:%M").to_string(),
            ),
        }
    }
}

impl DashboardMetrics {
    /// Recent orders as display rows.
    #[must_use]
    pub fn recent_views(&self, currency: CurrencyCode) -> Vec<RecentOrderView> {
        self.recent_orders
            .iter()
            .map(|order| RecentOrderView::new(order, currency))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use orderdesk_core::{OrderId, OrderStatus, Resolved, StoreId, UserId};

    use super::*;
    use crate::types::{CustomerSnapshot, StoreSnapshot};

    fn order(id: i64, user: Option<i64>, total: Option<&str>, at: Option<DateTime<Utc>>) -> Order {
        Order {
            id: OrderId::from(id),
            user_id: user.map(UserId::from),
            status: Resolved::Available(OrderStatus::Pending),
            total_amount: total.and_then(|t| Money::parse(t).ok()).into(),
            created_at: at,
            customer: CustomerSnapshot::default(),
            store: StoreSnapshot::default(),
            items: Vec::new(),
        }
    }

    fn store(id: i64) -> Store {
        Store {
            id: StoreId::from(id),
            name: format!("Store {id}"),
            description: String::new(),
            image_url: None,
            category_id: None,
            opening_time: None,
            closing_time: None,
        }
    }

    fn at(hour: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap())
    }

    #[test]
    fn test_revenue_is_exact() {
        let orders = vec![
            order(1, Some(1), Some("10.10"), None),
            order(2, Some(1), Some("20.20"), None),
            order(3, Some(2), Some("5.00"), None),
        ];
        let metrics = compute_metrics(&orders.into(), &[]);
        assert_eq!(metrics.total_revenue.minor_units(), 3530);
    }

    #[test]
    fn test_missing_totals_count_as_zero() {
        let orders = vec![
            order(1, Some(1), Some("12.00"), None),
            order(2, Some(1), None, None),
            order(3, Some(1), Some("abc"), None),
        ];
        assert_eq!(
            compute_metrics(&orders.into(), &[]).total_revenue,
            Money::from_minor_units(1200)
        );
    }

    #[test]
    fn test_customers_share_unknown_bucket() {
        let orders = vec![
            order(1, Some(1), None, None),
            order(2, Some(1), None, None),
            order(3, Some(2), None, None),
            order(4, None, None, None),
            order(5, None, None, None),
        ];
        assert_eq!(compute_metrics(&orders.into(), &[]).total_customers, 3);
    }

    #[test]
    fn test_counts() {
        let orders = vec![order(1, None, None, None), order(2, None, None, None)];
        let metrics = compute_metrics(&orders.into(), &[store(1), store(2), store(3)]);
        assert_eq!(metrics.total_orders, 2);
        assert_eq!(metrics.total_stores, 3);
    }

    #[test]
    fn test_recent_orders_order_and_limit() {
        let orders = vec![
            order(1, None, None, at(8)),
            order(2, None, None, None),
            order(3, None, None, at(12)),
            order(4, None, None, at(12)),
            order(5, None, None, at(9)),
            order(6, None, None, at(10)),
            order(7, None, None, at(7)),
        ];
        let recent = compute_metrics(&orders.into(), &[]).recent_orders;
        let ids: Vec<String> = recent.iter().map(|o| o.id.to_string()).collect();
        assert_eq!(ids, vec!["4", "3", "6", "5", "1"]);
        assert!(recent.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn test_undated_orders_sort_last() {
        let orders = vec![order(9, None, None, None), order(1, None, None, at(1))];
        let recent = compute_metrics(&orders.into(), &[]).recent_orders;
        assert_eq!(recent[0].id, OrderId::from(1));
        assert_eq!(recent[1].id, OrderId::from(9));
    }

    #[test]
    fn test_orders_without_id_count_toward_totals() {
        let listing = crate::conversions::convert_order_list(&serde_json::json!({"data": [
            {"id": 1, "user_id": 1, "total_amount": "10.00"},
            {"user_id": 2, "total_amount": "5.00"}
        ]}));
        let metrics = compute_metrics(&listing, &[]);
        assert_eq!(metrics.total_orders, 2);
        assert_eq!(metrics.total_revenue.minor_units(), 1500);
        assert_eq!(metrics.total_customers, 2);
        assert_eq!(metrics.recent_orders.len(), 1);
        assert_eq!(metrics.recent_orders[0].id, OrderId::from(1));
    }

    #[test]
    fn test_empty_input_is_zero_snapshot() {
        assert_eq!(
            compute_metrics(&OrderList::default(), &[]),
            DashboardMetrics::default()
        );
    }

    #[test]
    fn test_unavailable_load_yields_zeroes() {
        let load = DashboardLoad::Unavailable {
            reauth_required: true,
        };
        assert!(load.requires_reauth());
        assert_eq!(load.metrics(), DashboardMetrics::default());
    }

    #[test]
    fn test_recent_order_view() {
        let mut o = order(42, Some(1), Some("1234.5"), at(14));
        o.customer.name = Resolved::Available("Mona".to_string());
        let view = RecentOrderView::new(&o, CurrencyCode::AED);
        assert_eq!(view.id, "42");
        assert_eq!(view.customer_name, "Mona");
        assert_eq!(view.store_name, "N/A");
        assert_eq!(view.total, "AED 1,234.50");
        assert_eq!(view.status, "Pending");
        assert_eq!(view.status_color, Some("#ffc107"));
        assert_eq!(view.created_at, "2024-03-01 14:00");
    }
}
