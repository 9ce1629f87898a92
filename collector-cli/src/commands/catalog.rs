//! Commands for the two-table catalog/inventory store.

use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use collector_catalog::{
    CatalogEntry, CatalogQuery, GroupCount, InventoryEntry, InventoryQuery, NewCatalogEntry,
    NewInventoryEntry,
};

use super::{authorize, finish, open_catalog_store, or_dash, print_json, truncate_str};
use crate::cli_types::{CatalogAddArgs, InventoryAddArgs};
use crate::CliError;

// ── Catalog ─────────────────────────────────────────────────────────────────

pub(crate) fn run_catalog_add(db: Option<PathBuf>, args: CatalogAddArgs) -> Result<(), CliError> {
    let mut store = open_catalog_store(db)?;
    authorize(&store, args.secret.as_deref())?;

    let entry = NewCatalogEntry {
        catalog_number: args.number,
        region: args.region,
        year: args.year,
        set_name: args.set_name,
    };
    let id = store
        .add_catalog_entry(&entry)
        .map_err(|e| CliError::from_store("Failed to add catalog entry", e))?;

    log::info!(
        "{} Catalog entry {} added (id {})",
        "\u{2713}".if_supports_color(Stdout, |t| t.green()),
        entry.catalog_number,
        id,
    );
    finish(store.close())
}

pub(crate) fn run_catalog_list(db: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let mut store = open_catalog_store(db)?;
    let entries = store
        .list_catalog()
        .map_err(|e| CliError::from_store("Failed to list catalog", e))?;
    show_catalog(&entries, json)?;
    finish(store.close())
}

pub(crate) fn run_catalog_search(
    db: Option<PathBuf>,
    query: &CatalogQuery,
    json: bool,
) -> Result<(), CliError> {
    let mut store = open_catalog_store(db)?;
    let entries = store
        .search_catalog(query)
        .map_err(|e| CliError::from_store("Failed to search catalog", e))?;
    show_catalog(&entries, json)?;
    finish(store.close())
}

pub(crate) fn run_catalog_stats(db: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let mut store = open_catalog_store(db)?;
    let stats = store
        .statistics()
        .map_err(|e| CliError::from_store("Failed to compute statistics", e))?;

    if json {
        print_json(&stats)?;
        return finish(store.close());
    }

    log::info!(
        "{}",
        "Collection Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    log::info!("  Catalog entries:   {:>8}", stats.total_catalog);
    log::info!("  Inventory entries: {:>8}", stats.total_inventory);
    print_groups("By region", &stats.by_region);
    print_groups("By condition", &stats.by_condition);
    finish(store.close())
}

fn show_catalog(entries: &[CatalogEntry], json: bool) -> Result<(), CliError> {
    if json {
        return print_json(&entries);
    }
    if entries.is_empty() {
        log::info!("No catalog entries found.");
        return Ok(());
    }

    log::info!(
        "{}",
        format!(
            "{:<5} {:<14} {:<18} {:<6} {}",
            "ID", "Number", "Region", "Year", "Set"
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );
    for entry in entries {
        log::info!(
            "{:<5} {:<14} {:<18} {:<6} {}",
            entry.id,
            truncate_str(&entry.catalog_number, 14),
            truncate_str(&entry.region, 18),
            or_dash(entry.year),
            entry.set_name.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

// ── Inventory ───────────────────────────────────────────────────────────────

pub(crate) fn run_inventory_add(
    db: Option<PathBuf>,
    args: InventoryAddArgs,
) -> Result<(), CliError> {
    let mut store = open_catalog_store(db)?;
    authorize(&store, args.secret.as_deref())?;

    let entry = NewInventoryEntry {
        catalog_number: args.number,
        condition: args.condition,
        variant: args.variant,
    };
    let id = store
        .add_inventory_entry(&entry)
        .map_err(|e| CliError::from_store("Failed to add inventory entry", e))?;

    let known = store
        .get_catalog_entry(&entry.catalog_number)
        .map_err(|e| CliError::from_store("Failed to look up catalog entry", e))?
        .is_some();
    log::info!(
        "{} Inventory entry added (id {})",
        "\u{2713}".if_supports_color(Stdout, |t| t.green()),
        id,
    );
    if !known {
        log::warn!(
            "No catalog entry exists for {} yet; add one with 'collector catalog add'",
            entry.catalog_number,
        );
    }
    finish(store.close())
}

pub(crate) fn run_inventory_list(db: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let mut store = open_catalog_store(db)?;
    let entries = store
        .list_inventory()
        .map_err(|e| CliError::from_store("Failed to list inventory", e))?;
    show_inventory(&entries, json)?;
    finish(store.close())
}

pub(crate) fn run_inventory_search(
    db: Option<PathBuf>,
    query: &InventoryQuery,
    json: bool,
) -> Result<(), CliError> {
    let mut store = open_catalog_store(db)?;
    let entries = store
        .search_inventory(query)
        .map_err(|e| CliError::from_store("Failed to search inventory", e))?;
    show_inventory(&entries, json)?;
    finish(store.close())
}

pub(crate) fn run_inventory_joined(db: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let mut store = open_catalog_store(db)?;
    let rows = store
        .joined_view()
        .map_err(|e| CliError::from_store("Failed to read inventory", e))?;

    if json {
        print_json(&rows)?;
        return finish(store.close());
    }
    if rows.is_empty() {
        log::info!("No inventory entries yet.");
        return finish(store.close());
    }

    log::info!(
        "{}",
        "Inventory with Catalog Info".if_supports_color(Stdout, |t| t.bold()),
    );
    for row in &rows {
        log::info!(
            "ID {}: {} - {} {} - Condition: {}, Variant: {}",
            row.inventory_id,
            row.catalog_number,
            row.region.as_deref().unwrap_or("?"),
            or_dash(row.year),
            row.condition,
            row.variant.as_deref().unwrap_or("-"),
        );
    }
    finish(store.close())
}

fn show_inventory(entries: &[InventoryEntry], json: bool) -> Result<(), CliError> {
    if json {
        return print_json(&entries);
    }
    if entries.is_empty() {
        log::info!("No inventory entries found.");
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{:<5} {:<14} {:<14} {}", "ID", "Number", "Condition", "Variant")
            .if_supports_color(Stdout, |t| t.bold()),
    );
    for entry in entries {
        log::info!(
            "{:<5} {:<14} {:<14} {}",
            entry.id,
            truncate_str(&entry.catalog_number, 14),
            truncate_str(&entry.condition, 14),
            entry.variant.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

fn print_groups(title: &str, groups: &[GroupCount]) {
    if groups.is_empty() {
        return;
    }
    crate::log_blank();
    log::info!("  {}:", title);
    for group in groups {
        log::info!("    {:<24} {:>6}", truncate_str(&group.key, 24), group.count);
    }
}
