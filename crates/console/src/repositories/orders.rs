//! Order repository.
//!
//! Orders are read-only apart from their status; the backend exposes no
//! create or delete endpoint.

use orderdesk_core::{OrderId, OrderStatus};
use serde::Serialize;
use tracing::{info, instrument};

use crate::conversions::{convert_order, convert_order_list, convert_orders};
use crate::error::ApiError;
use crate::gateway::ApiGateway;
use crate::types::{Order, OrderList};

use super::item_path;

const COLLECTION: &str = "orders";

#[derive(Serialize)]
struct StatusUpdate {
    status: OrderStatus,
}

/// Read access to orders plus status updates.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    gateway: ApiGateway,
}

impl OrderRepository {
    #[must_use]
    pub const fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// List all orders.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Order>, ApiError> {
        let response = self.gateway.get(COLLECTION).await?;
        Ok(convert_orders(&response))
    }

    /// List all orders, with figures for every record including those
    /// without a usable id.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error.
    #[instrument(skip(self))]
    pub async fn list_with_figures(&self) -> Result<OrderList, ApiError> {
        let response = self.gateway.get(COLLECTION).await?;
        Ok(convert_order_list(&response))
    }

    /// Fetch an order with its items. `None` if the response carries no
    /// usable record.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get(&self, id: &OrderId) -> Result<Option<Order>, ApiError> {
        let response = self.gateway.get(&item_path(COLLECTION, id)?).await?;
        Ok(convert_order(&response))
    }

    /// Send a status change. Prefer
    /// [`OrderLifecycleController::change_status`](crate::lifecycle::OrderLifecycleController::change_status),
    /// which guards against concurrent changes and refetches the order.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error.
    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    pub async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<(), ApiError> {
        let path = format!("{}/status", item_path(COLLECTION, id)?);
        self.gateway.put(&path, &StatusUpdate { status }).await?;
        info!("Order status updated");
        Ok(())
    }
}
