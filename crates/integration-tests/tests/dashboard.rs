//! Integration tests for dashboard aggregation.

#![allow(clippy::unwrap_used)]

use orderdesk_console::dashboard::{DashboardLoad, DashboardMetrics};
use orderdesk_core::{CurrencyCode, Money};
use orderdesk_integration_tests::FakeBackend;
use serde_json::json;

fn seed(backend: &FakeBackend) {
    backend.seed_orders(vec![
        json!({"id": 1, "user_id": 1, "total_amount": "10.10", "created_at": "2024-03-01T09:00:00Z",
               "users": {"full_name": "Ana"}, "store": {"name": "Falafel House"}, "status": "delivered"}),
        json!({"id": 2, "user_id": 1, "total_amount": 20.2, "created_at": "2024-03-02T09:00:00Z",
               "user": {"name": "Ana"}, "stores": [{"name": "Falafel House"}], "status": "ready"}),
        json!({"id": 3, "user_id": 2, "total_amount": "5.00", "created_at": "2024-03-02T09:00:00Z",
               "status": "pending"}),
        json!({"id": 4, "user_id": null, "total_amount": "not a number", "created_at": null,
               "status": "cancelled"}),
    ]);
    backend.seed_stores(vec![
        json!({"id": 1, "name": "Falafel House"}),
        json!({"id": 2, "name": "Shawarma Corner"}),
    ]);
}

#[tokio::test]
async fn test_dashboard_metrics() {
    let backend = FakeBackend::start().await;
    seed(&backend);
    let console = backend.logged_in_console().await;

    let DashboardLoad::Ready(metrics) = console.dashboard().load().await else {
        panic!("dashboard should load");
    };

    assert_eq!(metrics.total_orders, 4);
    assert_eq!(metrics.total_revenue, Money::from_minor_units(3530));
    assert_eq!(metrics.total_customers, 3);
    assert_eq!(metrics.total_stores, 2);

    let ids: Vec<String> = metrics
        .recent_orders
        .iter()
        .map(|o| o.id.to_string())
        .collect();
    assert_eq!(ids, vec!["3", "2", "1", "4"]);
}

#[tokio::test]
async fn test_orders_without_id_still_count() {
    let backend = FakeBackend::start().await;
    backend.seed_orders(vec![
        json!({"id": 1, "user_id": 1, "total_amount": "10.00", "status": "pending"}),
        json!({"user_id": 2, "total_amount": "5.00", "status": "delivered"}),
    ]);
    backend.seed_stores(vec![]);
    let console = backend.logged_in_console().await;

    let metrics = console.dashboard().load().await.metrics();

    assert_eq!(metrics.total_orders, 2);
    assert_eq!(metrics.total_revenue, Money::from_minor_units(1500));
    assert_eq!(metrics.total_customers, 2);
    assert_eq!(metrics.recent_orders.len(), 1);
    assert_eq!(console.orders().list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_recent_views_resolve_every_shape() {
    let backend = FakeBackend::start().await;
    seed(&backend);
    let console = backend.logged_in_console().await;

    let views = console
        .dashboard()
        .load()
        .await
        .metrics()
        .recent_views(CurrencyCode::AED);

    let by_id = |id: &str| views.iter().find(|v| v.id == id).unwrap();
    assert_eq!(by_id("1").customer_name, "Ana");
    assert_eq!(by_id("2").customer_name, "Ana");
    assert_eq!(by_id("2").store_name, "Falafel House");
    assert_eq!(by_id("3").customer_name, "N/A");
    assert_eq!(by_id("4").total, "N/A");
    assert_eq!(by_id("4").created_at, "N/A");
    assert_eq!(by_id("1").total, "AED 10.10");
}

#[tokio::test]
async fn test_recent_orders_bounded_to_five() {
    let backend = FakeBackend::start().await;
    let orders = (1..=8)
        .map(|i| json!({"id": i, "created_at": format!("2024-03-0{i}T12:00:00Z")}))
        .collect();
    backend.seed_orders(orders);
    let console = backend.logged_in_console().await;

    let metrics = console.dashboard().load().await.metrics();
    assert_eq!(metrics.total_orders, 8);
    assert_eq!(metrics.recent_orders.len(), 5);
    assert!(metrics
        .recent_orders
        .windows(2)
        .all(|w| w[0].created_at >= w[1].created_at));
    assert_eq!(metrics.recent_orders[0].id.to_string(), "8");
}

#[tokio::test]
async fn test_store_failure_yields_zero_snapshot() {
    let backend = FakeBackend::start().await;
    seed(&backend);
    let console = backend.logged_in_console().await;
    backend.fail("/stores", 500);

    let load = console.dashboard().load().await;
    assert_eq!(
        load,
        DashboardLoad::Unavailable {
            reauth_required: false
        }
    );
    assert_eq!(load.metrics(), DashboardMetrics::default());
}

#[tokio::test]
async fn test_order_failure_yields_zero_snapshot() {
    let backend = FakeBackend::start().await;
    seed(&backend);
    let console = backend.logged_in_console().await;
    backend.fail("/orders", 502);

    let metrics = console.dashboard().load().await.metrics();
    assert_eq!(metrics.total_orders, 0);
    assert_eq!(metrics.total_stores, 0);
    assert!(metrics.recent_orders.is_empty());
}

#[tokio::test]
async fn test_expired_session_reports_reauth() {
    let backend = FakeBackend::start().await;
    seed(&backend);
    let console = backend.logged_in_console().await;
    backend.expire_token();

    let load = console.dashboard().load().await;
    assert!(load.requires_reauth());
    assert!(!console.session().is_authenticated().await);
}
