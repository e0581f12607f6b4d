//! Conversions from raw backend JSON to domain types.
//!
//! Every function here reads through [`crate::normalize`], so relation and
//! envelope handling is identical for list and detail responses. Records
//! without an id are dropped from entity lists, never assigned one; order
//! listings still keep their figures for aggregation.

mod catalog;
mod orders;

pub use catalog::{
    convert_categories, convert_category, convert_menu_item, convert_menu_items, convert_store,
    convert_stores,
};
pub use orders::{convert_order, convert_order_list, convert_orders};

use serde_json::Value;
use tracing::warn;

use crate::normalize::list_items;

/// Convert every record of a list response, dropping those that fail.
fn convert_list<T>(
    value: &Value,
    resource: &str,
    convert: impl Fn(&Value) -> Option<T>,
) -> Vec<T> {
    convert_items(list_items(value, resource), resource, convert)
}

fn convert_items<T>(
    items: &[Value],
    resource: &str,
    convert: impl Fn(&Value) -> Option<T>,
) -> Vec<T> {
    let converted: Vec<T> = items.iter().filter_map(convert).collect();
    if converted.len() < items.len() {
        warn!(
            resource,
            dropped = items.len() - converted.len(),
            "Dropped records without a usable id"
        );
    }
    converted
}
