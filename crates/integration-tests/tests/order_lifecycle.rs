//! Integration tests for order status changes and per-order exclusivity.

#![allow(clippy::unwrap_used)]

use axum::http::Method;
use orderdesk_console::ApiError;
use orderdesk_core::{OrderId, OrderStatus, Resolved};
use orderdesk_integration_tests::FakeBackend;
use serde_json::json;

fn seed(backend: &FakeBackend) {
    backend.seed_orders(vec![
        json!({"id": 1, "user_id": 10, "status": "pending", "total_amount": "42.00"}),
        json!({"id": 2, "user_id": 11, "status": "pending", "total_amount": "18.50"}),
    ]);
}

#[tokio::test]
async fn test_change_status_returns_refetched_order() {
    let backend = FakeBackend::start().await;
    seed(&backend);
    let console = backend.logged_in_console().await;

    let order = console
        .lifecycle()
        .change_status(&OrderId::from(1), OrderStatus::Confirmed)
        .await
        .unwrap();

    assert_eq!(order.status, Resolved::Available(OrderStatus::Confirmed));
    assert_eq!(backend.order("1").unwrap()["status"], "confirmed");
    assert_eq!(backend.requests_to(&Method::PUT, "/orders/1/status"), 1);
    assert_eq!(backend.requests_to(&Method::GET, "/orders/1"), 1);
}

#[tokio::test]
async fn test_concurrent_change_for_same_order_is_busy() {
    let backend = FakeBackend::start().await;
    seed(&backend);
    let console = backend.logged_in_console().await;
    let gate = backend.hold_status_updates();

    let first = tokio::spawn({
        let console = console.clone();
        async move {
            console
                .lifecycle()
                .change_status(&OrderId::from(1), OrderStatus::Confirmed)
                .await
        }
    });
    gate.entered().await;
    assert!(console.lifecycle().is_busy(&OrderId::from(1)));

    let err = console
        .lifecycle()
        .change_status(&OrderId::from(1), OrderStatus::Preparing)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Busy(ref id) if *id == OrderId::from(1)));
    assert_eq!(backend.requests_to(&Method::PUT, "/orders/1/status"), 1);

    // Other orders are not blocked.
    let other = console
        .lifecycle()
        .change_status(&OrderId::from(2), OrderStatus::Ready)
        .await
        .unwrap();
    assert_eq!(other.status, Resolved::Available(OrderStatus::Ready));

    gate.release();
    let order = first.await.unwrap().unwrap();
    assert_eq!(order.status, Resolved::Available(OrderStatus::Confirmed));
    assert!(!console.lifecycle().is_busy(&OrderId::from(1)));

    let order = console
        .lifecycle()
        .change_status(&OrderId::from(1), OrderStatus::Preparing)
        .await
        .unwrap();
    assert_eq!(order.status, Resolved::Available(OrderStatus::Preparing));
}

#[tokio::test]
async fn test_failed_change_releases_order() {
    let backend = FakeBackend::start().await;
    seed(&backend);
    let console = backend.logged_in_console().await;
    backend.fail("/orders/1/status", 500);

    let err = console
        .lifecycle()
        .change_status(&OrderId::from(1), OrderStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 500, .. }));
    assert_eq!(backend.order("1").unwrap()["status"], "pending");

    backend.clear_failures();
    let order = console
        .lifecycle()
        .change_status(&OrderId::from(1), OrderStatus::Cancelled)
        .await
        .unwrap();
    assert_eq!(order.status_label(), "Cancelled");
}

#[tokio::test]
async fn test_abandoned_change_releases_order() {
    let backend = FakeBackend::start().await;
    seed(&backend);
    let console = backend.logged_in_console().await;
    let gate = backend.hold_status_updates();

    let abandoned = tokio::spawn({
        let console = console.clone();
        async move {
            console
                .lifecycle()
                .change_status(&OrderId::from(1), OrderStatus::Confirmed)
                .await
        }
    });
    gate.entered().await;
    abandoned.abort();
    assert!(abandoned.await.unwrap_err().is_cancelled());
    assert!(!console.lifecycle().is_busy(&OrderId::from(1)));

    let order = console
        .lifecycle()
        .change_status(&OrderId::from(1), OrderStatus::Delivered)
        .await
        .unwrap();
    assert_eq!(order.status, Resolved::Available(OrderStatus::Delivered));
    gate.release();
}

#[tokio::test]
async fn test_unknown_target_is_rejected_before_dispatch() {
    let backend = FakeBackend::start().await;
    seed(&backend);
    let console = backend.logged_in_console().await;

    let err = console
        .lifecycle()
        .change_status_str(&OrderId::from(1), "shipped")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidStatus(_)));
    assert_eq!(backend.requests_to(&Method::PUT, "/orders/1/status"), 0);

    let order = console
        .lifecycle()
        .change_status_str(&OrderId::from(1), "Ready")
        .await
        .unwrap();
    assert_eq!(order.status, Resolved::Available(OrderStatus::Ready));
}

#[tokio::test]
async fn test_unauthorized_change_surfaces_reauth() {
    let backend = FakeBackend::start().await;
    seed(&backend);
    let console = backend.logged_in_console().await;
    backend.expire_token();

    let err = console
        .lifecycle()
        .change_status(&OrderId::from(1), OrderStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(err.requires_reauth());
    assert!(!console.lifecycle().is_busy(&OrderId::from(1)));
}
