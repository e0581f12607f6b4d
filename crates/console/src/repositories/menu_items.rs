//! Menu item repository.
//!
//! Menu items are listed and created under their store
//! (`stores/{id}/menu`) but updated and deleted through `menu/{id}`.

use orderdesk_core::{MenuItemId, StoreId};
use tracing::{info, instrument};

use crate::conversions::{convert_menu_item, convert_menu_items};
use crate::error::ApiError;
use crate::gateway::ApiGateway;
use crate::types::{MenuItem, MenuItemInput};

use super::item_path;

/// CRUD access to menu items.
#[derive(Debug, Clone)]
pub struct MenuItemRepository {
    gateway: ApiGateway,
}

impl MenuItemRepository {
    #[must_use]
    pub const fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// List the menu of one store.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error.
    #[instrument(skip(self), fields(store_id = %store_id))]
    pub async fn list(&self, store_id: &StoreId) -> Result<Vec<MenuItem>, ApiError> {
        let response = self.gateway.get(&store_menu_path(store_id)?).await?;
        Ok(convert_menu_items(&response))
    }

    /// List every menu item across all stores.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<MenuItem>, ApiError> {
        let response = self.gateway.get("menus").await?;
        Ok(convert_menu_items(&response))
    }

    /// Fetch a menu item. `None` if the response carries no usable record.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error.
    #[instrument(skip(self), fields(menu_item_id = %id))]
    pub async fn get(&self, id: &MenuItemId) -> Result<Option<MenuItem>, ApiError> {
        let response = self.gateway.get(&item_path("menus", id)?).await?;
        Ok(convert_menu_item(&response))
    }

    /// Add a menu item to a store.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error.
    #[instrument(skip(self, input), fields(store_id = %store_id, name = %input.name))]
    pub async fn create(
        &self,
        store_id: &StoreId,
        input: &MenuItemInput,
    ) -> Result<Option<MenuItem>, ApiError> {
        let response = self.gateway.post(&store_menu_path(store_id)?, input).await?;
        info!("Menu item created");
        Ok(convert_menu_item(&response))
    }

    /// Update a menu item.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error.
    #[instrument(skip(self, input), fields(menu_item_id = %id))]
    pub async fn update(
        &self,
        id: &MenuItemId,
        input: &MenuItemInput,
    ) -> Result<Option<MenuItem>, ApiError> {
        let response = self.gateway.put(&item_path("menu", id)?, input).await?;
        info!("Menu item updated");
        Ok(convert_menu_item(&response))
    }

    /// Delete a menu item.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error.
    #[instrument(skip(self), fields(menu_item_id = %id))]
    pub async fn delete(&self, id: &MenuItemId) -> Result<(), ApiError> {
        self.gateway.delete(&item_path("menu", id)?).await?;
        info!("Menu item deleted");
        Ok(())
    }
}

fn store_menu_path(store_id: &StoreId) -> Result<String, ApiError> {
    Ok(format!("{}/menu", item_path("stores", store_id)?))
}
