//! Order status state machine with per-order mutation exclusivity.
//!
//! The backend is the authority on which transitions are legal; the
//! controller accepts any of the six states as a target. What it enforces
//! locally is that at most one status change per order is in flight. A
//! second request for the same order is rejected with [`ApiError::Busy`]
//! and never dispatched.
//!
//! The in-flight marker is held by an [`InFlightGuard`] from before the
//! status request until the refetch completes, and released on drop, so
//! success, failure, and a cancelled future all clear it.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use orderdesk_core::{OrderId, OrderStatus};
use tracing::{info, instrument, warn};

use crate::error::ApiError;
use crate::repositories::OrderRepository;
use crate::types::Order;

type InFlight = Arc<Mutex<HashSet<OrderId>>>;

/// Drives order status changes.
#[derive(Debug, Clone)]
pub struct OrderLifecycleController {
    orders: OrderRepository,
    in_flight: InFlight,
}

impl OrderLifecycleController {
    #[must_use]
    pub fn new(orders: OrderRepository) -> Self {
        Self {
            orders,
            in_flight: InFlight::default(),
        }
    }

    /// Change an order's status, then refetch and return the fresh order.
    ///
    /// # Errors
    ///
    /// - `ApiError::Busy` if a change for this order is already in flight
    /// - `ApiError::Decode` if the refetch returns no usable order
    /// - any gateway error from the update or the refetch, verbatim
    #[instrument(skip(self), fields(order_id = %id, target = %target))]
    pub async fn change_status(
        &self,
        id: &OrderId,
        target: OrderStatus,
    ) -> Result<Order, ApiError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight, id) else {
            warn!("Status change already in flight");
            return Err(ApiError::Busy(id.clone()));
        };

        self.orders.update_status(id, target).await?;
        let order = self.orders.get(id).await?.ok_or_else(|| {
            ApiError::Decode(format!("order {id} missing from refetch after status change"))
        })?;

        info!(status = %order.status_label(), "Order refreshed after status change");
        Ok(order)
    }

    /// Like [`change_status`](Self::change_status), with the target given as
    /// text (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidStatus` before dispatch if `target` is not
    /// one of the six states; otherwise as `change_status`.
    pub async fn change_status_str(&self, id: &OrderId, target: &str) -> Result<Order, ApiError> {
        let target = target.parse::<OrderStatus>()?;
        self.change_status(id, target).await
    }

    /// Returns `true` if a status change for the order is in flight.
    #[must_use]
    pub fn is_busy(&self, id: &OrderId) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(id)
    }
}

/// Marks an order as having a status change in flight until dropped.
struct InFlightGuard {
    in_flight: InFlight,
    id: OrderId,
}

impl InFlightGuard {
    /// Atomically check-and-set the marker. `None` if already set.
    fn acquire(in_flight: &InFlight, id: &OrderId) -> Option<Self> {
        let inserted = in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone());
        inserted.then(|| Self {
            in_flight: Arc::clone(in_flight),
            id: id.clone(),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}
