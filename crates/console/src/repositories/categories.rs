//! Category repository.

use orderdesk_core::CategoryId;
use tracing::{info, instrument};

use crate::conversions::{convert_categories, convert_category};
use crate::error::ApiError;
use crate::gateway::ApiGateway;
use crate::types::{Category, CategoryInput};

use super::item_path;

const COLLECTION: &str = "categories";

/// CRUD access to store categories.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    gateway: ApiGateway,
}

impl CategoryRepository {
    #[must_use]
    pub const fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Category>, ApiError> {
        let response = self.gateway.get(COLLECTION).await?;
        Ok(convert_categories(&response))
    }

    /// Find a category by id.
    ///
    /// The backend has no category detail endpoint, so this lists and
    /// selects. Returns `None` if no category has the id.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn get(&self, id: &CategoryId) -> Result<Option<Category>, ApiError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|category| &category.id == id))
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &CategoryInput) -> Result<Option<Category>, ApiError> {
        let response = self.gateway.post(COLLECTION, input).await?;
        info!("Category created");
        Ok(convert_category(&response))
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error.
    #[instrument(skip(self, input), fields(category_id = %id))]
    pub async fn update(
        &self,
        id: &CategoryId,
        input: &CategoryInput,
    ) -> Result<Option<Category>, ApiError> {
        let response = self.gateway.put(&item_path(COLLECTION, id)?, input).await?;
        info!("Category updated");
        Ok(convert_category(&response))
    }

    /// Delete a category. Stores referencing it are left as they are.
    ///
    /// # Errors
    ///
    /// Propagates any gateway error.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete(&self, id: &CategoryId) -> Result<(), ApiError> {
        self.gateway.delete(&item_path(COLLECTION, id)?).await?;
        info!("Category deleted");
        Ok(())
    }
}
