//! Wiring of the session, gateway, repositories, and services.

use std::sync::Arc;

use crate::config::ConsoleConfig;
use crate::dashboard::DashboardAggregator;
use crate::error::ApiError;
use crate::gateway::ApiGateway;
use crate::lifecycle::OrderLifecycleController;
use crate::repositories::{
    CategoryRepository, MenuItemRepository, OrderRepository, StoreRepository,
};
use crate::session::Session;

/// Everything an operator front end needs, sharing one session.
#[derive(Debug, Clone)]
pub struct Console {
    inner: Arc<ConsoleInner>,
}

#[derive(Debug)]
struct ConsoleInner {
    config: ConsoleConfig,
    gateway: ApiGateway,
    categories: CategoryRepository,
    stores: StoreRepository,
    menu_items: MenuItemRepository,
    orders: OrderRepository,
    lifecycle: OrderLifecycleController,
    dashboard: DashboardAggregator,
}

impl Console {
    /// Build the console with a fresh, logged-out session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the HTTP client fails to build.
    pub fn new(config: ConsoleConfig) -> Result<Self, ApiError> {
        Self::with_session(config, Session::new())
    }

    /// Build the console around an existing session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the HTTP client fails to build.
    pub fn with_session(config: ConsoleConfig, session: Session) -> Result<Self, ApiError> {
        let gateway = ApiGateway::new(&config, session)?;
        let orders = OrderRepository::new(gateway.clone());
        let stores = StoreRepository::new(gateway.clone());

        Ok(Self {
            inner: Arc::new(ConsoleInner {
                categories: CategoryRepository::new(gateway.clone()),
                menu_items: MenuItemRepository::new(gateway.clone()),
                lifecycle: OrderLifecycleController::new(orders.clone()),
                dashboard: DashboardAggregator::new(orders.clone(), stores.clone()),
                orders,
                stores,
                gateway,
                config,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn gateway(&self) -> &ApiGateway {
        &self.inner.gateway
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        self.inner.gateway.session()
    }

    #[must_use]
    pub fn categories(&self) -> &CategoryRepository {
        &self.inner.categories
    }

    #[must_use]
    pub fn stores(&self) -> &StoreRepository {
        &self.inner.stores
    }

    #[must_use]
    pub fn menu_items(&self) -> &MenuItemRepository {
        &self.inner.menu_items
    }

    #[must_use]
    pub fn orders(&self) -> &OrderRepository {
        &self.inner.orders
    }

    #[must_use]
    pub fn lifecycle(&self) -> &OrderLifecycleController {
        &self.inner.lifecycle
    }

    #[must_use]
    pub fn dashboard(&self) -> &DashboardAggregator {
        &self.inner.dashboard
    }
}
