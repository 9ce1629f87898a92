use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use collector_catalog::{Item, ItemQuery, NewItem};
use collector_db::ItemStore;

use super::{authorize, finish, open_item_store, or_dash, print_json, truncate_str};
use crate::cli_types::AddArgs;
use crate::CliError;

pub(crate) fn run_add(db: Option<PathBuf>, args: AddArgs) -> Result<(), CliError> {
    let mut store = open_item_store(db)?;
    let item = NewItem {
        country: args.country,
        year: args.year,
        denomination: args.denomination,
        condition: args.condition,
        description: args.description,
        acquisition_date: args.date,
        price: args.price,
    };
    let id = add_stamp(&store, &item, args.secret.as_deref())?;

    log::info!(
        "{} Stamp record added (id {})",
        "\u{2713}".if_supports_color(Stdout, |t| t.green()),
        id,
    );
    finish(store.close())
}

/// Insert a stamp once the secret, if any, has been checked.
pub(crate) fn add_stamp(
    store: &ItemStore,
    item: &NewItem,
    secret: Option<&str>,
) -> Result<i64, CliError> {
    authorize(store, secret)?;
    store
        .insert(item)
        .map_err(|e| CliError::from_store("Failed to add stamp", e))
}

pub(crate) fn run_list(db: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let mut store = open_item_store(db)?;
    let items = store
        .list_all()
        .map_err(|e| CliError::from_store("Failed to list stamps", e))?;

    if json {
        print_json(&items)?;
        return finish(store.close());
    }

    if items.is_empty() {
        log::info!("No stamps in the collection yet.");
        return finish(store.close());
    }

    print_items(&items);

    let stats = store
        .statistics()
        .map_err(|e| CliError::from_store("Failed to compute statistics", e))?;
    crate::log_blank();
    log::info!(
        "Total Stamps: {} | Total Value: ${} | Average Value: ${}",
        stats.total_items,
        stats.total_value,
        stats.average_value,
    );
    finish(store.close())
}

pub(crate) fn run_search(db: Option<PathBuf>, query: &ItemQuery, json: bool) -> Result<(), CliError> {
    let mut store = open_item_store(db)?;
    let items = store
        .search(query)
        .map_err(|e| CliError::from_store("Failed to search stamps", e))?;

    if json {
        print_json(&items)?;
    } else if items.is_empty() {
        log::info!("No stamps found matching the given criteria.");
    } else {
        print_items(&items);
        log::info!("{} match(es)", items.len());
    }
    finish(store.close())
}

pub(crate) fn run_show(db: Option<PathBuf>, id: i64, json: bool) -> Result<(), CliError> {
    let mut store = open_item_store(db)?;
    let item = store
        .require(id)
        .map_err(|e| CliError::from_store("Failed to look up stamp", e))?;

    if json {
        print_json(&item)?;
        return finish(store.close());
    }

    log::info!(
        "{}",
        format!("Stamp #{}", item.id).if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Country:      {}", item.country);
    log::info!("  Year:         {}", item.year);
    log::info!("  Denomination: {}", item.denomination);
    log::info!("  Condition:    {}", item.condition);
    if !item.description.is_empty() {
        log::info!("  Description:  {}", item.description);
    }
    log::info!("  Acquired:     {}", item.acquisition_date);
    log::info!("  Price:        {}", or_dash(item.price.map(|p| format!("${}", p))));
    log::info!("  Recorded:     {}", item.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    finish(store.close())
}

pub(crate) fn run_stats(db: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let mut store = open_item_store(db)?;
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
    if let Some(path) = store.path() {
        log::info!("  Store: {}", path.display());
    }
    crate::log_blank();
    log::info!("  Stamps:        {:>10}", stats.total_items);
    log::info!("  Total value:   {:>10}", format!("${}", stats.total_value));
    log::info!("  Average value: {:>10}", format!("${}", stats.average_value));
    if !stats.by_country.is_empty() {
        crate::log_blank();
        log::info!("  By country:");
        for group in &stats.by_country {
            log::info!("    {:<24} {:>6}", truncate_str(&group.key, 24), group.count);
        }
    }
    finish(store.close())
}

fn print_items(items: &[Item]) {
    let rule = "=".repeat(84);
    log::info!("{}", rule);
    log::info!(
        "{}",
        format!(
            "{:<5} {:<16} {:<6} {:<12} {:<10} {:>10}  {:<10}",
            "ID", "Country", "Year", "Denom.", "Cond.", "Price", "Acquired"
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("{}", "-".repeat(84));
    for item in items {
        log::info!(
            "{:<5} {:<16} {:<6} {:<12} {:<10} {:>10}  {}",
            item.id,
            truncate_str(&item.country, 16),
            item.year,
            truncate_str(&item.denomination, 12),
            truncate_str(&item.condition, 10),
            or_dash(item.price.map(|p| format!("${}", p))),
            item.acquisition_date,
        );
        if !item.description.is_empty() {
            log::info!(
                "      {}",
                item.description.if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
    log::info!("{}", rule);
}
