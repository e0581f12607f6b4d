//! Category, store, and menu item conversion functions.

use orderdesk_core::{CategoryId, MenuItemId, StoreId};
use serde_json::Value;

use crate::normalize::{id_field, money_field, text_field, unwrap_data};
use crate::types::{Category, MenuItem, Store};

use super::convert_list;

// =============================================================================
// Categories
// =============================================================================

pub fn convert_categories(value: &Value) -> Vec<Category> {
    convert_list(value, "categories", convert_category)
}

pub fn convert_category(value: &Value) -> Option<Category> {
    let record = unwrap_data(value);
    Some(Category {
        id: id_field(record, "id", CategoryId::from_json)?,
        name: text_field(record, "name").unwrap_or_default(),
        description: text_field(record, "description").unwrap_or_default(),
    })
}

// =============================================================================
// Stores
// =============================================================================

pub fn convert_stores(value: &Value) -> Vec<Store> {
    convert_list(value, "stores", convert_store)
}

pub fn convert_store(value: &Value) -> Option<Store> {
    let record = unwrap_data(value);
    Some(Store {
        id: id_field(record, "id", StoreId::from_json)?,
        name: text_field(record, "name").unwrap_or_default(),
        description: text_field(record, "description").unwrap_or_default(),
        image_url: text_field(record, "image_url"),
        category_id: id_field(record, "category_id", CategoryId::from_json),
        opening_time: text_field(record, "opening_time"),
        closing_time: text_field(record, "closing_time"),
    })
}

// =============================================================================
// Menu items
// =============================================================================

pub fn convert_menu_items(value: &Value) -> Vec<MenuItem> {
    convert_list(value, "menu items", convert_menu_item)
}

pub fn convert_menu_item(value: &Value) -> Option<MenuItem> {
    let record = unwrap_data(value);
    Some(MenuItem {
        id: id_field(record, "id", MenuItemId::from_json)?,
        store_id: id_field(record, "store_id", StoreId::from_json),
        name: text_field(record, "name").unwrap_or_default(),
        description: text_field(record, "description").unwrap_or_default(),
        price: money_field(record, "price"),
        image_url: text_field(record, "image_url"),
    })
}
