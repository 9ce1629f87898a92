//! Read queries for the collector store.
//!
//! Provides full listings, filtered search, id lookups, the inventory/catalog
//! join, and statistics. Listings come back newest first.

use collector_catalog::types::*;
use collector_catalog::Price;
use rusqlite::types::ToSql;
use rusqlite::{params, Connection};

use crate::error::StoreError;

const ITEM_COLUMNS: &str = "id, country, year, denomination, condition, description,
    acquisition_date, price_cents, created_at";

const CATALOG_COLUMNS: &str = "id, catalog_number, region, year, set_name, created_at";

const INVENTORY_COLUMNS: &str = "id, catalog_number, condition, variant, created_at";

/// Ids come from an AUTOINCREMENT sequence, so they follow insertion order.
const NEWEST_FIRST: &str = " ORDER BY id DESC";

const YEAR_THEN_NEWEST: &str = " ORDER BY year DESC, id DESC";

// ── Stamp Queries ───────────────────────────────────────────────────────────

/// All stamps, newest first.
pub fn list_items(conn: &Connection) -> Result<Vec<Item>, StoreError> {
    let mut stmt = conn.prepare(&format!("SELECT {ITEM_COLUMNS} FROM stamps{NEWEST_FIRST}"))?;
    let rows = stmt.query_map([], row_to_item)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Stamps matching every supplied criterion.
///
/// Results are ordered by year (descending) when any exact-match field is
/// given, otherwise newest first. An empty query returns every stamp.
pub fn search_items(conn: &Connection, query: &ItemQuery) -> Result<Vec<Item>, StoreError> {
    let mut filter = Filter::new(&format!("SELECT {ITEM_COLUMNS} FROM stamps"));
    if let Some(term) = non_blank(&query.text) {
        filter.contains_any(&["country", "description"], term);
    }
    if let Some(country) = non_blank(&query.country) {
        filter.eq("country", country.to_string());
    }
    if let Some(year) = query.year {
        filter.eq("year", year);
    }
    if let Some(condition) = non_blank(&query.condition) {
        filter.eq("condition", condition.to_string());
    }

    let order = if query.has_structured() {
        YEAR_THEN_NEWEST
    } else {
        NEWEST_FIRST
    };
    filter.fetch(conn, order, row_to_item)
}

/// Find a stamp by id.
pub fn get_item(conn: &Connection, id: i64) -> Result<Option<Item>, StoreError> {
    let result = conn.query_row(
        &format!("SELECT {ITEM_COLUMNS} FROM stamps WHERE id = ?1"),
        params![id],
        row_to_item,
    );
    match result {
        Ok(item) => Ok(Some(item)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Count, value, and per-country totals over the stamp table.
pub fn item_stats(conn: &Connection) -> Result<ItemStats, StoreError> {
    let (total_items, priced, total_cents): (i64, i64, i64) = conn.query_row(
        "SELECT COUNT(*), COUNT(price_cents), COALESCE(SUM(price_cents), 0) FROM stamps",
        [],
        |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
    )?;
    let total_value = Price::from_cents(total_cents);

    Ok(ItemStats {
        total_items,
        total_value,
        average_value: total_value.average_over(priced),
        by_country: group_counts(conn, "stamps", "country")?,
    })
}

// ── Catalog Queries ─────────────────────────────────────────────────────────

/// All catalog entries, newest first.
pub fn list_catalog(conn: &Connection) -> Result<Vec<CatalogEntry>, StoreError> {
    let mut stmt =
        conn.prepare(&format!("SELECT {CATALOG_COLUMNS} FROM catalog{NEWEST_FIRST}"))?;
    let rows = stmt.query_map([], row_to_catalog_entry)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Catalog entries matching every supplied field, ordered by year descending.
pub fn search_catalog(
    conn: &Connection,
    query: &CatalogQuery,
) -> Result<Vec<CatalogEntry>, StoreError> {
    let mut filter = Filter::new(&format!("SELECT {CATALOG_COLUMNS} FROM catalog"));
    if let Some(region) = non_blank(&query.region) {
        filter.eq("region", region.to_string());
    }
    if let Some(year) = query.year {
        filter.eq("year", year);
    }
    if let Some(number) = non_blank(&query.catalog_number) {
        filter.eq("catalog_number", number.to_string());
    }
    filter.fetch(conn, YEAR_THEN_NEWEST, row_to_catalog_entry)
}

/// Find a catalog entry by its catalog number.
pub fn find_catalog_entry(
    conn: &Connection,
    catalog_number: &str,
) -> Result<Option<CatalogEntry>, StoreError> {
    let result = conn.query_row(
        &format!("SELECT {CATALOG_COLUMNS} FROM catalog WHERE catalog_number = ?1"),
        params![catalog_number],
        row_to_catalog_entry,
    );
    match result {
        Ok(entry) => Ok(Some(entry)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Inventory Queries ───────────────────────────────────────────────────────

/// All holdings, newest first.
pub fn list_inventory(conn: &Connection) -> Result<Vec<InventoryEntry>, StoreError> {
    let mut stmt =
        conn.prepare(&format!("SELECT {INVENTORY_COLUMNS} FROM inventory{NEWEST_FIRST}"))?;
    let rows = stmt.query_map([], row_to_inventory_entry)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Holdings matching every supplied field, newest first.
pub fn search_inventory(
    conn: &Connection,
    query: &InventoryQuery,
) -> Result<Vec<InventoryEntry>, StoreError> {
    let mut filter = Filter::new(&format!("SELECT {INVENTORY_COLUMNS} FROM inventory"));
    if let Some(number) = non_blank(&query.catalog_number) {
        filter.eq("catalog_number", number.to_string());
    }
    if let Some(condition) = non_blank(&query.condition) {
        filter.eq("condition", condition.to_string());
    }
    filter.fetch(conn, NEWEST_FIRST, row_to_inventory_entry)
}

/// Every holding with its catalog data, newest holding first.
///
/// Holdings whose catalog number has no catalog entry are kept, with the
/// catalog fields left empty.
pub fn joined_inventory(conn: &Connection) -> Result<Vec<JoinedEntry>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT i.id, i.catalog_number, i.condition, i.variant,
                c.region, c.year, c.set_name
         FROM inventory i
         LEFT JOIN catalog c ON i.catalog_number = c.catalog_number
         ORDER BY i.id DESC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(JoinedEntry {
            inventory_id: row.get(0)?,
            catalog_number: row.get(1)?,
            condition: row.get(2)?,
            variant: row.get(3)?,
            region: row.get(4)?,
            year: row.get(5)?,
            set_name: row.get(6)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Counts over both tables, grouped by region and by condition.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, StoreError> {
    let total_catalog: i64 = conn.query_row("SELECT COUNT(*) FROM catalog", [], |r| r.get(0))?;
    let total_inventory: i64 =
        conn.query_row("SELECT COUNT(*) FROM inventory", [], |r| r.get(0))?;

    Ok(CatalogStats {
        total_catalog,
        total_inventory,
        by_region: group_counts(conn, "catalog", "region")?,
        by_condition: group_counts(conn, "inventory", "condition")?,
    })
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Row counts per distinct `column` value, largest first, ties by value.
///
/// `table` and `column` are always crate-internal identifiers.
fn group_counts(
    conn: &Connection,
    table: &str,
    column: &str,
) -> Result<Vec<GroupCount>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {column}, COUNT(*) AS n FROM {table}
         GROUP BY {column} ORDER BY n DESC, {column} ASC"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(GroupCount {
            key: row.get(0)?,
            count: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// A `WHERE` clause built from optional criteria.
struct Filter {
    sql: String,
    values: Vec<Box<dyn ToSql>>,
}

impl Filter {
    fn new(select: &str) -> Self {
        Self {
            sql: format!("{select} WHERE 1=1"),
            values: Vec::new(),
        }
    }

    fn eq(&mut self, column: &str, value: impl ToSql + 'static) {
        self.values.push(Box::new(value));
        self.sql
            .push_str(&format!(" AND {} = ?{}", column, self.values.len()));
    }

    /// Match rows where any of `columns` contains `term` (ASCII case-insensitive).
    fn contains_any(&mut self, columns: &[&str], term: &str) {
        self.values
            .push(Box::new(format!("%{}%", escape_like(term))));
        let n = self.values.len();
        let clauses: Vec<String> = columns
            .iter()
            .map(|c| format!("{c} LIKE ?{n} ESCAPE '\\'"))
            .collect();
        self.sql.push_str(&format!(" AND ({})", clauses.join(" OR ")));
    }

    fn fetch<T>(
        self,
        conn: &Connection,
        order_by: &str,
        map: fn(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>, StoreError> {
        let mut stmt = conn.prepare(&format!("{}{}", self.sql, order_by))?;
        let params: Vec<&dyn ToSql> = self.values.iter().map(|v| v.as_ref()).collect();
        let rows = stmt.query_map(params.as_slice(), map)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

/// Make `%`, `_` and `\` match literally inside a LIKE pattern.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        country: row.get(1)?,
        year: row.get(2)?,
        denomination: row.get(3)?,
        condition: row.get(4)?,
        description: row.get(5)?,
        acquisition_date: row.get(6)?,
        price: row.get::<_, Option<i64>>(7)?.map(Price::from_cents),
        created_at: row.get(8)?,
    })
}

fn row_to_catalog_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<CatalogEntry> {
    Ok(CatalogEntry {
        id: row.get(0)?,
        catalog_number: row.get(1)?,
        region: row.get(2)?,
        year: row.get(3)?,
        set_name: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn row_to_inventory_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<InventoryEntry> {
    Ok(InventoryEntry {
        id: row.get(0)?,
        catalog_number: row.get(1)?,
        condition: row.get(2)?,
        variant: row.get(3)?,
        created_at: row.get(4)?,
    })
}
