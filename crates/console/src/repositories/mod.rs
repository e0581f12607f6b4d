//! Entity repositories over the [`ApiGateway`](crate::gateway::ApiGateway).
//!
//! Each repository is a thin CRUD facade for one backend resource. Responses
//! are normalized through [`crate::conversions`]; errors propagate verbatim.
//!
//! Mutations return the record the backend echoed back, if it sent a usable
//! one. Callers that need the authoritative state re-list afterwards.

mod categories;
mod menu_items;
mod orders;
mod stores;

pub use categories::CategoryRepository;
pub use menu_items::MenuItemRepository;
pub use orders::OrderRepository;
pub use stores::StoreRepository;

use std::fmt::Display;

use orderdesk_core::{IdError, is_dot_segment};

use crate::error::ApiError;

/// Build `{collection}/{id}` with the id percent-encoded as one segment.
///
/// Dot-segment ids are refused: URL resolution would turn them into the
/// collection or its parent.
fn item_path(collection: &str, id: &impl Display) -> Result<String, ApiError> {
    let id = id.to_string();
    if is_dot_segment(&id) {
        return Err(IdError::DotSegment(id).into());
    }
    Ok(format!("{collection}/{}", urlencoding::encode(&id)))
}
