//! Owned store handles.
//!
//! [`ItemStore`] and [`CatalogStore`] each own one connection for the
//! lifetime of the handle. After [`close`](ItemStore::close) every operation
//! returns [`StoreError::Closed`]; closing twice is a no-op. Dropping a
//! handle releases the connection as well.

use std::path::{Path, PathBuf};

use collector_catalog::types::*;
use rusqlite::Connection;

use crate::credential::{CredentialGate, Sha256Gate};
use crate::error::StoreError;
use crate::operations::{insert_catalog_entry, insert_inventory_entry, insert_item};
use crate::queries;
use crate::schema::{open_database, open_memory, Layout};

/// A connection that can be closed once.
struct Database {
    conn: Option<Connection>,
    path: Option<PathBuf>,
}

impl Database {
    fn open(path: &Path, layout: Layout) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = open_database(path, layout)?;
        log::debug!("Opened {} store at {}", layout, path.display());
        Ok(Self {
            conn: Some(conn),
            path: Some(path.to_path_buf()),
        })
    }

    fn memory(layout: Layout) -> Result<Self, StoreError> {
        Ok(Self {
            conn: Some(open_memory(layout)?),
            path: None,
        })
    }

    fn conn(&self) -> Result<&Connection, StoreError> {
        self.conn.as_ref().ok_or(StoreError::Closed)
    }

    fn close(&mut self) -> Result<(), StoreError> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };
        match conn.close() {
            Ok(()) => Ok(()),
            Err((conn, e)) => {
                log::warn!("Failed to close store: {}", e);
                // Keep the handle so a later close or drop can release it.
                self.conn = Some(conn);
                Err(e.into())
            }
        }
    }
}

/// Secret operations shared by both store handles.
pub trait SecretStore {
    /// The open connection and the gate that guards it.
    fn credential_context(&self) -> Result<(&Connection, &dyn CredentialGate), StoreError>;

    fn is_secret_set(&self) -> Result<bool, StoreError> {
        let (conn, gate) = self.credential_context()?;
        gate.is_set(conn)
    }

    fn set_secret(&self, secret: &str) -> Result<(), StoreError> {
        let (conn, gate) = self.credential_context()?;
        gate.set(conn, secret)
    }

    fn verify_secret(&self, secret: &str) -> Result<bool, StoreError> {
        let (conn, gate) = self.credential_context()?;
        gate.verify(conn, secret)
    }
}

// ── Stamps ──────────────────────────────────────────────────────────────────

/// Handle to a single-table stamp store.
pub struct ItemStore {
    db: Database,
    gate: Box<dyn CredentialGate>,
}

impl ItemStore {
    /// Open or create the store file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self {
            db: Database::open(path.as_ref(), Layout::Stamps)?,
            gate: Box::new(Sha256Gate),
        })
    }

    pub fn open_memory() -> Result<Self, StoreError> {
        Ok(Self {
            db: Database::memory(Layout::Stamps)?,
            gate: Box::new(Sha256Gate),
        })
    }

    /// Replace the default credential gate.
    pub fn with_gate(mut self, gate: impl CredentialGate + 'static) -> Self {
        self.gate = Box::new(gate);
        self
    }

    /// File backing this store, or `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.db.path.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.db.conn.is_none()
    }

    /// Raw connection, for tooling and tests.
    pub fn connection(&self) -> Result<&Connection, StoreError> {
        self.db.conn()
    }

    pub fn insert(&self, item: &NewItem) -> Result<i64, StoreError> {
        insert_item(self.db.conn()?, item)
    }

    pub fn list_all(&self) -> Result<Vec<Item>, StoreError> {
        queries::list_items(self.db.conn()?)
    }

    pub fn search(&self, query: &ItemQuery) -> Result<Vec<Item>, StoreError> {
        queries::search_items(self.db.conn()?, query)
    }

    /// Look up a stamp; a missing id is `Ok(None)`.
    pub fn get_by_id(&self, id: i64) -> Result<Option<Item>, StoreError> {
        queries::get_item(self.db.conn()?, id)
    }

    /// Like [`get_by_id`](Self::get_by_id), but a missing id is
    /// [`StoreError::NotFound`].
    pub fn require(&self, id: i64) -> Result<Item, StoreError> {
        self.get_by_id(id)?
            .ok_or_else(|| StoreError::not_found("stamp", id))
    }

    pub fn statistics(&self) -> Result<ItemStats, StoreError> {
        queries::item_stats(self.db.conn()?)
    }

    pub fn close(&mut self) -> Result<(), StoreError> {
        self.db.close()
    }
}

impl SecretStore for ItemStore {
    fn credential_context(&self) -> Result<(&Connection, &dyn CredentialGate), StoreError> {
        Ok((self.db.conn()?, self.gate.as_ref()))
    }
}

// ── Catalog / Inventory ─────────────────────────────────────────────────────

/// Handle to a two-table catalog/inventory store.
pub struct CatalogStore {
    db: Database,
    gate: Box<dyn CredentialGate>,
}

impl CatalogStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self {
            db: Database::open(path.as_ref(), Layout::CatalogInventory)?,
            gate: Box::new(Sha256Gate),
        })
    }

    pub fn open_memory() -> Result<Self, StoreError> {
        Ok(Self {
            db: Database::memory(Layout::CatalogInventory)?,
            gate: Box::new(Sha256Gate),
        })
    }

    pub fn with_gate(mut self, gate: impl CredentialGate + 'static) -> Self {
        self.gate = Box::new(gate);
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.db.path.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.db.conn.is_none()
    }

    pub fn connection(&self) -> Result<&Connection, StoreError> {
        self.db.conn()
    }

    pub fn add_catalog_entry(&self, entry: &NewCatalogEntry) -> Result<i64, StoreError> {
        insert_catalog_entry(self.db.conn()?, entry)
    }

    pub fn add_inventory_entry(&self, entry: &NewInventoryEntry) -> Result<i64, StoreError> {
        insert_inventory_entry(self.db.conn()?, entry)
    }

    pub fn list_catalog(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        queries::list_catalog(self.db.conn()?)
    }

    pub fn list_inventory(&self) -> Result<Vec<InventoryEntry>, StoreError> {
        queries::list_inventory(self.db.conn()?)
    }

    pub fn search_catalog(&self, query: &CatalogQuery) -> Result<Vec<CatalogEntry>, StoreError> {
        queries::search_catalog(self.db.conn()?, query)
    }

    pub fn search_inventory(
        &self,
        query: &InventoryQuery,
    ) -> Result<Vec<InventoryEntry>, StoreError> {
        queries::search_inventory(self.db.conn()?, query)
    }

    pub fn get_catalog_entry(&self, catalog_number: &str) -> Result<Option<CatalogEntry>, StoreError> {
        queries::find_catalog_entry(self.db.conn()?, catalog_number)
    }

    pub fn joined_view(&self) -> Result<Vec<JoinedEntry>, StoreError> {
        queries::joined_inventory(self.db.conn()?)
    }

    pub fn statistics(&self) -> Result<CatalogStats, StoreError> {
        queries::catalog_stats(self.db.conn()?)
    }

    pub fn close(&mut self) -> Result<(), StoreError> {
        self.db.close()
    }
}

impl SecretStore for CatalogStore {
    fn credential_context(&self) -> Result<(&Connection, &dyn CredentialGate), StoreError> {
        Ok((self.db.conn()?, self.gate.as_ref()))
    }
}
