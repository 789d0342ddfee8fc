//! Inventory domain module (ephemeral, per-interaction).
//!
//! This crate contains the inventory rules and the render cycle, implemented
//! purely as deterministic in-memory logic (no IO, no HTTP, no storage).
//! State never outlives a single interaction pass.

pub mod cycle;
pub mod record;
pub mod snapshot;
pub mod store;
pub mod view;

pub use cycle::{render_cycle, Interaction, RawInteraction, Variant};
pub use record::{CatalogItem, NamedItem, Record, StockedItem};
pub use store::{AddItem, ItemAdded, ItemRemoved, RemoveItem, Store, StoreCommand, StoreEvent};
pub use view::{InventoryView, Metric, SelectOption, Table, RESET_NOTICE};
