//! Store repository.

use orderdesk_core::StoreId;
use tracing::{info, instrument};

use crate::conversions::{convert_store, convert_stores};
use crate::error::ApiError;
use crate::gateway::ApiGateway;
use crate::types::{Store, StoreInput};

use super::item_path;

const COLLECTION: &str = "stores";

/// CRUD access to stores.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    gateway: ApiGateway,
}

impl StoreRepository {
    #[must_use]
    pub const fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// List all stores.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Store>, ApiError> {
        let response = self.gateway.get(COLLECTION).await?;
        Ok(convert_stores(&response))
    }

    /// Fetch a store. `None` if the response carries no usable record.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error, including `Http { status: 404, .. }`.
    #[instrument(skip(self), fields(store_id = %id))]
    pub async fn get(&self, id: &StoreId) -> Result<Option<Store>, ApiError> {
        let response = self.gateway.get(&item_path(COLLECTION, id)?).await?;
        Ok(convert_store(&response))
    }

    /// Create a store.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &StoreInput) -> Result<Option<Store>, ApiError> {
        let response = self.gateway.post(COLLECTION, input).await?;
        info!("Store created");
        Ok(convert_store(&response))
    }

    /// Update a store.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error.
    #[instrument(skip(self, input), fields(store_id = %id))]
    pub async fn update(
        &self,
        id: &StoreId,
        input: &StoreInput,
    ) -> Result<Option<Store>, ApiError> {
        let response = self.gateway.put(&item_path(COLLECTION, id)?, input).await?;
        info!("Store updated");
        Ok(convert_store(&response))
    }

    /// Delete a store. Its menu items are not deleted by this call.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error.
    #[instrument(skip(self), fields(store_id = %id))]
    pub async fn delete(&self, id: &StoreId) -> Result<(), ApiError> {
        self.gateway.delete(&item_path(COLLECTION, id)?).await?;
        info!("Store deleted");
        Ok(())
    }
}
