//! SQLite schema creation and migration.

use std::fmt;
use std::path::Path;

use rusqlite::Connection;

use crate::error::StoreError;
use crate::settings::{get_setting, set_setting, Setting};

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 2;

/// Which set of tables a store file holds.
///
/// A file is created with exactly one layout and must always be reopened
/// with the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// A single `stamps` table.
    Stamps,
    /// A `catalog` reference table plus an `inventory` of holdings.
    CatalogInventory,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Stamps => "stamps",
            Layout::CatalogInventory => "catalog",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stamps" | "stamp" => Some(Layout::Stamps),
            "catalog" | "catalog_inventory" | "inventory" => Some(Layout::CatalogInventory),
            _ => None,
        }
    }

    fn tables_sql(self) -> &'static str {
        match self {
            Layout::Stamps => STAMPS_SQL,
            Layout::CatalogInventory => CATALOG_SQL,
        }
    }

    fn indexes_sql(self) -> &'static str {
        match self {
            Layout::Stamps => STAMPS_INDEXES_SQL,
            Layout::CatalogInventory => CATALOG_INDEXES_SQL,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Create all tables and indexes for `layout` if they don't exist.
///
/// Idempotent: existing rows and id sequences are left untouched.
pub fn create_schema(conn: &Connection, layout: Layout) -> Result<(), StoreError> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(COMMON_SQL)?;
    check_layout(&tx, layout)?;
    tx.execute_batch(layout.tables_sql())?;
    tx.execute_batch(layout.indexes_sql())?;
    set_schema_version(&tx, CURRENT_VERSION)?;
    tx.commit()?;
    Ok(())
}

/// Open or create a store file at the given path.
pub fn open_database(path: &Path, layout: Layout) -> Result<Connection, StoreError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    prepare(&conn, layout)?;
    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory(layout: Layout) -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory()?;
    prepare(&conn, layout)?;
    Ok(conn)
}

/// Bring a freshly opened connection up to `CURRENT_VERSION`.
fn prepare(conn: &Connection, layout: Layout) -> Result<(), StoreError> {
    // Inventory rows may name catalog numbers that have no catalog entry yet.
    conn.execute_batch("PRAGMA foreign_keys=OFF;")?;

    let version = schema_version(conn)?;
    if version == 0 {
        log::debug!("Creating {} schema (version {})", layout, CURRENT_VERSION);
        return create_schema(conn, layout);
    }
    if version > CURRENT_VERSION {
        return Err(StoreError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: version,
        });
    }

    check_layout(conn, layout)?;
    if version < CURRENT_VERSION {
        migrate(conn, layout, version)?;
    }
    Ok(())
}

/// Get the current schema version, or 0 if no schema exists.
pub fn schema_version(conn: &Connection) -> Result<i32, StoreError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Record a schema version.
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Record the layout on first use, or reject a file holding the other one.
fn check_layout(conn: &Connection, layout: Layout) -> Result<(), StoreError> {
    match get_setting(conn, Setting::Layout)? {
        None => set_setting(conn, Setting::Layout, layout.as_str()),
        Some(found) if Layout::from_str_loose(&found) == Some(layout) => Ok(()),
        Some(found) => Err(StoreError::LayoutMismatch {
            expected: layout,
            found,
        }),
    }
}

/// Run migrations from `from_version` up to `CURRENT_VERSION`.
fn migrate(conn: &Connection, layout: Layout, from_version: i32) -> Result<(), StoreError> {
    let tx = conn.unchecked_transaction()?;
    let mut version = from_version;
    while version < CURRENT_VERSION {
        log::debug!("Migrating {} schema from version {}", layout, version);
        match version {
            // Version 2 added the lookup indexes used by search.
            1 => tx.execute_batch(layout.indexes_sql())?,
            _ => {}
        }
        version += 1;
        set_schema_version(&tx, version)?;
    }
    tx.commit()?;
    Ok(())
}

const COMMON_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Store-level settings (layout, credential hash)
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

const STAMPS_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS stamps (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    country TEXT NOT NULL,
    year INTEGER NOT NULL,
    denomination TEXT NOT NULL,
    condition TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    acquisition_date TEXT NOT NULL DEFAULT (date('now', 'localtime')),
    price_cents INTEGER CHECK (price_cents IS NULL OR price_cents >= 0),
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
);
"#;

const STAMPS_INDEXES_SQL: &str = r#"
CREATE INDEX IF NOT EXISTS idx_stamps_country ON stamps(country);
CREATE INDEX IF NOT EXISTS idx_stamps_year ON stamps(year);
"#;

const CATALOG_SQL: &str = r#"
-- Catalog reference data
CREATE TABLE IF NOT EXISTS catalog (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    catalog_number TEXT NOT NULL UNIQUE,
    region TEXT NOT NULL,
    year INTEGER,
    set_name TEXT,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
);

-- Physical holdings
CREATE TABLE IF NOT EXISTS inventory (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    catalog_number TEXT NOT NULL REFERENCES catalog(catalog_number),
    condition TEXT NOT NULL,
    variant TEXT,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
);
"#;

const CATALOG_INDEXES_SQL: &str = r#"
CREATE INDEX IF NOT EXISTS idx_catalog_region ON catalog(region);
CREATE INDEX IF NOT EXISTS idx_inventory_catalog_number ON inventory(catalog_number);
"#;
