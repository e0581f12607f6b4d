//! Category, store, and menu item commands.
//!
//! Mutations print the record the backend echoed back when it sent one,
//! and fall back to a one-line confirmation otherwise.

use orderdesk_console::Console;
use orderdesk_console::types::{
    Category, CategoryInput, MenuItem, MenuItemInput, Store, StoreInput,
};
use orderdesk_core::{CategoryId, CurrencyCode, MenuItemId, NOT_AVAILABLE, StoreId};
use serde::Serialize;

use super::CliError;
use crate::output::{self, Format};

// =============================================================================
// Categories
// =============================================================================

pub async fn list_categories(console: &Console, format: Format) -> Result<(), CliError> {
    let categories = console.categories().list().await?;
    if format == Format::Json {
        return output::json(&categories);
    }
    let rows: Vec<Vec<String>> = categories.iter().map(category_row).collect();
    output::table(&["ID", "NAME", "DESCRIPTION"], &rows);
    Ok(())
}

pub async fn create_category(
    console: &Console,
    input: &CategoryInput,
    format: Format,
) -> Result<(), CliError> {
    let created = console.categories().create(input).await?;
    print_saved("Category created", created.as_ref(), format, |c| {
        output::table(&["ID", "NAME", "DESCRIPTION"], &[category_row(c)]);
    })
}

pub async fn update_category(
    console: &Console,
    id: &CategoryId,
    input: &CategoryInput,
    format: Format,
) -> Result<(), CliError> {
    let updated = console.categories().update(id, input).await?;
    print_saved("Category updated", updated.as_ref(), format, |c| {
        output::table(&["ID", "NAME", "DESCRIPTION"], &[category_row(c)]);
    })
}

pub async fn delete_category(console: &Console, id: &CategoryId) -> Result<(), CliError> {
    console.categories().delete(id).await?;
    output::line(&format!("Category {id} deleted"));
    Ok(())
}

fn category_row(category: &Category) -> Vec<String> {
    vec![
        category.id.to_string(),
        category.name.clone(),
        category.description.clone(),
    ]
}

// =============================================================================
// Stores
// =============================================================================

const STORE_HEADERS: &[&str] = &["ID", "NAME", "CATEGORY", "HOURS"];

pub async fn list_stores(console: &Console, format: Format) -> Result<(), CliError> {
    let stores = console.stores().list().await?;
    if format == Format::Json {
        return output::json(&stores);
    }
    let rows: Vec<Vec<String>> = stores.iter().map(store_row).collect();
    output::table(STORE_HEADERS, &rows);
    Ok(())
}

pub async fn show_store(console: &Console, id: &StoreId, format: Format) -> Result<(), CliError> {
    let store = console
        .stores()
        .get(id)
        .await?
        .ok_or_else(|| CliError::NotFound {
            kind: "Store",
            id: id.to_string(),
        })?;
    if format == Format::Json {
        return output::json(&store);
    }
    output::fields(&[
        ("Store", store.id.to_string()),
        ("Name", store.name.clone()),
        ("Description", store.description.clone()),
        ("Category", optional(store.category_id.as_ref())),
        ("Hours", hours(&store)),
        ("Image", optional(store.image_url.as_ref())),
    ]);
    Ok(())
}

pub async fn create_store(
    console: &Console,
    input: &StoreInput,
    format: Format,
) -> Result<(), CliError> {
    let created = console.stores().create(input).await?;
    print_saved("Store created", created.as_ref(), format, |s| {
        output::table(STORE_HEADERS, &[store_row(s)]);
    })
}

pub async fn update_store(
    console: &Console,
    id: &StoreId,
    input: &StoreInput,
    format: Format,
) -> Result<(), CliError> {
    let updated = console.stores().update(id, input).await?;
    print_saved("Store updated", updated.as_ref(), format, |s| {
        output::table(STORE_HEADERS, &[store_row(s)]);
    })
}

pub async fn delete_store(console: &Console, id: &StoreId) -> Result<(), CliError> {
    console.stores().delete(id).await?;
    output::line(&format!("Store {id} deleted"));
    Ok(())
}

fn store_row(store: &Store) -> Vec<String> {
    vec![
        store.id.to_string(),
        store.name.clone(),
        optional(store.category_id.as_ref()),
        hours(store),
    ]
}

fn hours(store: &Store) -> String {
    match (&store.opening_time, &store.closing_time) {
        (Some(open), Some(close)) => format!("{open}-{close}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

// =============================================================================
// Menu items
// =============================================================================

const MENU_HEADERS: &[&str] = &["ID", "STORE", "NAME", "PRICE"];

pub async fn list_menu(
    console: &Console,
    store: Option<&StoreId>,
    format: Format,
) -> Result<(), CliError> {
    let items = match store {
        Some(store_id) => console.menu_items().list(store_id).await?,
        None => console.menu_items().list_all().await?,
    };
    if format == Format::Json {
        return output::json(&items);
    }
    let currency = console.config().currency;
    let rows: Vec<Vec<String>> = items.iter().map(|i| menu_row(i, currency)).collect();
    output::table(MENU_HEADERS, &rows);
    Ok(())
}

pub async fn show_menu_item(
    console: &Console,
    id: &MenuItemId,
    format: Format,
) -> Result<(), CliError> {
    let item = console
        .menu_items()
        .get(id)
        .await?
        .ok_or_else(|| CliError::NotFound {
            kind: "Menu item",
            id: id.to_string(),
        })?;
    if format == Format::Json {
        return output::json(&item);
    }
    let currency = console.config().currency;
    output::fields(&[
        ("Menu item", item.id.to_string()),
        ("Store", optional(item.store_id.as_ref())),
        ("Name", item.name.clone()),
        ("Description", item.description.clone()),
        ("Price", item.price.display_with(|m| m.display(currency))),
        ("Image", optional(item.image_url.as_ref())),
    ]);
    Ok(())
}

pub async fn create_menu_item(
    console: &Console,
    store: &StoreId,
    input: &MenuItemInput,
    format: Format,
) -> Result<(), CliError> {
    let created = console.menu_items().create(store, input).await?;
    let currency = console.config().currency;
    print_saved("Menu item created", created.as_ref(), format, |i| {
        output::table(MENU_HEADERS, &[menu_row(i, currency)]);
    })
}

pub async fn update_menu_item(
    console: &Console,
    id: &MenuItemId,
    input: &MenuItemInput,
    format: Format,
) -> Result<(), CliError> {
    let updated = console.menu_items().update(id, input).await?;
    let currency = console.config().currency;
    print_saved("Menu item updated", updated.as_ref(), format, |i| {
        output::table(MENU_HEADERS, &[menu_row(i, currency)]);
    })
}

pub async fn delete_menu_item(console: &Console, id: &MenuItemId) -> Result<(), CliError> {
    console.menu_items().delete(id).await?;
    output::line(&format!("Menu item {id} deleted"));
    Ok(())
}

fn menu_row(item: &MenuItem, currency: CurrencyCode) -> Vec<String> {
    vec![
        item.id.to_string(),
        optional(item.store_id.as_ref()),
        item.name.clone(),
        item.price.display_with(|m| m.display(currency)),
    ]
}

// =============================================================================
// Helpers
// =============================================================================

fn optional<T: ToString>(value: Option<&T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string)
}

fn print_saved<T: Serialize>(
    message: &str,
    record: Option<&T>,
    format: Format,
    render: impl FnOnce(&T),
) -> Result<(), CliError> {
    match (record, format) {
        (Some(record), Format::Json) => output::json(record),
        (Some(record), Format::Table) => {
            output::line(message);
            render(record);
            Ok(())
        }
        (None, _) => {
            output::line(message);
            Ok(())
        }
    }
}
