//! collector CLI
//!
//! Command-line front end for recording and querying a stamp collection.

mod cli_types;
mod commands;
mod error;
mod settings;

use std::io::Write;

use clap::Parser;

use cli_types::{
    CatalogAction, Cli, Commands, ConfigAction, InventoryAction, SecretAction,
};
use collector_catalog::{CatalogQuery, InventoryQuery, ItemQuery};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let db = cli.db;
    let json = cli.json;

    match cli.command {
        Commands::Add(args) => commands::stamps::run_add(db, args),
        Commands::List => commands::stamps::run_list(db, json),
        Commands::Search {
            term,
            country,
            year,
            condition,
        } => {
            let query = ItemQuery {
                text: term,
                country,
                year,
                condition,
            };
            commands::stamps::run_search(db, &query, json)
        }
        Commands::Show { id } => commands::stamps::run_show(db, id, json),
        Commands::Stats => commands::stamps::run_stats(db, json),
        Commands::Catalog { action } => match action {
            CatalogAction::Add(args) => commands::catalog::run_catalog_add(db, args),
            CatalogAction::List => commands::catalog::run_catalog_list(db, json),
            CatalogAction::Search {
                region,
                year,
                number,
            } => {
                let query = CatalogQuery {
                    region,
                    year,
                    catalog_number: number,
                };
                commands::catalog::run_catalog_search(db, &query, json)
            }
            CatalogAction::Stats => commands::catalog::run_catalog_stats(db, json),
        },
        Commands::Inventory { action } => match action {
            InventoryAction::Add(args) => commands::catalog::run_inventory_add(db, args),
            InventoryAction::List => commands::catalog::run_inventory_list(db, json),
            InventoryAction::Search { number, condition } => {
                let query = InventoryQuery {
                    catalog_number: number,
                    condition,
                };
                commands::catalog::run_inventory_search(db, &query, json)
            }
            InventoryAction::Joined => commands::catalog::run_inventory_joined(db, json),
        },
        Commands::Secret { catalog, action } => {
            let layout = commands::layout_for(catalog);
            match action {
                SecretAction::Status => commands::secret::run_secret_status(db, layout),
                SecretAction::Set { new, current } => {
                    commands::secret::run_secret_set(db, layout, &new, current.as_deref())
                }
                SecretAction::Verify { secret } => {
                    commands::secret::run_secret_verify(db, layout, &secret)
                }
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::SetDb { path, layout } => {
                commands::config::run_config_set_db(layout.into(), &path)
            }
            ConfigAction::ClearDb { layout } => commands::config::run_config_clear_db(layout.into()),
        },
    }
}

/// Route user-facing output through `log`.
///
/// Normal runs print bare `info!` messages to stdout; `--verbose` adds
/// timestamps and debug records, `--quiet` keeps warnings and errors only.
/// `RUST_LOG` still takes precedence.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        log::LevelFilter::Warn
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout);

    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| match record.level() {
            log::Level::Error | log::Level::Warn => {
                writeln!(buf, "{}: {}", record.level(), record.args())
            }
            _ => writeln!(buf, "{}", record.args()),
        });
    }

    builder.init();
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
