//! Locations, units and items, and the in-memory store that holds them.

mod entity;
mod error;
mod snapshot;
mod store;
mod summary;

pub use entity::*;
pub use error::*;
pub use snapshot::Snapshot;
pub use store::{Inventory, new_id};
pub use summary::{InventorySummary, LocationSummary, RECENT_ITEMS, RecentItem, UnitSummary};
