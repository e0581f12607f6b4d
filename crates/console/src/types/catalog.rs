//! Catalog types: categories, stores, and menu items.

use orderdesk_core::{CategoryId, Money, MenuItemId, Resolved, StoreId};
use serde::{Deserialize, Serialize};

// =============================================================================
// Category Types
// =============================================================================

/// A store category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Backend ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

/// Input for creating or updating a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryInput {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

// =============================================================================
// Store Types
// =============================================================================

/// A store (restaurant) on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Backend ID.
    pub id: StoreId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Cover image URL.
    pub image_url: Option<String>,
    /// Category this store is listed under (weak reference).
    pub category_id: Option<CategoryId>,
    /// Opening time as entered by staff (e.g. `09:00`).
    pub opening_time: Option<String>,
    /// Closing time as entered by staff (e.g. `23:00`).
    pub closing_time: Option<String>,
}

/// Input for creating or updating a store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreInput {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Cover image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Category to list the store under.
    pub category_id: Option<CategoryId>,
    /// Opening time (e.g. `09:00`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_time: Option<String>,
    /// Closing time (e.g. `23:00`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_time: Option<String>,
}

// =============================================================================
// Menu Item Types
// =============================================================================

/// A menu item offered by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Backend ID.
    pub id: MenuItemId,
    /// Owning store (weak reference).
    pub store_id: Option<StoreId>,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Unit price; unavailable if missing or unparseable.
    pub price: Resolved<Money>,
    /// Photo URL.
    pub image_url: Option<String>,
}

/// Input for creating or updating a menu item.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MenuItemInput {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Unit price, sent as a decimal string (`"12.50"`).
    pub price: Money,
    /// Photo URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
