//! Insert operations for every record type.
//!
//! Each insert validates first and then writes a single row, so a rejected
//! record never leaves anything behind.

use chrono::Local;
use collector_catalog::types::*;
use collector_catalog::Price;
use rusqlite::{params, Connection};

use crate::error::StoreError;

// ── Stamp Operations ────────────────────────────────────────────────────────

/// Insert a stamp. Returns the id assigned by the table's sequence.
///
/// A missing description is stored as an empty string and a missing
/// acquisition date as today's local date.
pub fn insert_item(conn: &Connection, item: &NewItem) -> Result<i64, StoreError> {
    item.validate()?;
    let acquired = item
        .acquisition_date
        .unwrap_or_else(|| Local::now().date_naive());

    conn.execute(
        "INSERT INTO stamps (country, year, denomination, condition, description,
             acquisition_date, price_cents)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            item.country,
            item.year,
            item.denomination,
            item.condition,
            item.description.as_deref().unwrap_or(""),
            acquired,
            item.price.map(Price::cents),
        ],
    )?;

    let id = conn.last_insert_rowid();
    log::debug!("Inserted stamp {} ({} {})", id, item.country, item.year);
    Ok(id)
}

// ── Catalog Operations ──────────────────────────────────────────────────────

/// Insert a catalog entry. A catalog number that is already present is
/// reported as [`StoreError::Constraint`].
pub fn insert_catalog_entry(
    conn: &Connection,
    entry: &NewCatalogEntry,
) -> Result<i64, StoreError> {
    entry.validate()?;
    conn.execute(
        "INSERT INTO catalog (catalog_number, region, year, set_name)
         VALUES (?1, ?2, ?3, ?4)",
        params![entry.catalog_number, entry.region, entry.year, entry.set_name],
    )?;

    let id = conn.last_insert_rowid();
    log::debug!("Inserted catalog entry {} ({})", id, entry.catalog_number);
    Ok(id)
}

// ── Inventory Operations ────────────────────────────────────────────────────

/// Insert a holding. The catalog number is not required to exist yet.
pub fn insert_inventory_entry(
    conn: &Connection,
    entry: &NewInventoryEntry,
) -> Result<i64, StoreError> {
    entry.validate()?;
    conn.execute(
        "INSERT INTO inventory (catalog_number, condition, variant)
         VALUES (?1, ?2, ?3)",
        params![entry.catalog_number, entry.condition, entry.variant],
    )?;

    let id = conn.last_insert_rowid();
    log::debug!("Inserted inventory entry {} ({})", id, entry.catalog_number);
    Ok(id)
}
