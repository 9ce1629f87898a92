//! SQLite persistence layer for the stamp collection.
//!
//! Provides schema creation, inserts, query APIs, and owned store handles
//! backed by SQLite (via rusqlite with bundled feature).

pub mod credential;
pub mod error;
pub mod operations;
pub mod queries;
pub mod schema;
pub mod settings;
pub mod store;

pub use credential::{CredentialGate, Sha256Gate};
pub use error::{ErrorKind, StoreError};
pub use operations::{insert_catalog_entry, insert_inventory_entry, insert_item};
pub use queries::{
    catalog_stats, find_catalog_entry, get_item, item_stats, joined_inventory, list_catalog,
    list_inventory, list_items, search_catalog, search_inventory, search_items,
};
pub use schema::{open_database, open_memory, Layout};
pub use settings::{clear_setting, get_setting, set_setting, Setting};
pub use store::{CatalogStore, ItemStore, SecretStore};
