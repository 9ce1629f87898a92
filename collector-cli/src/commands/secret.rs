use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use collector_db::{Layout, SecretStore, StoreError};

use super::{authorize, finish, open_catalog_store, open_item_store};
use crate::CliError;

/// Run `f` against whichever store `layout` names, then close it.
fn with_store<T>(
    db: Option<PathBuf>,
    layout: Layout,
    f: impl FnOnce(&dyn SecretStore) -> Result<T, CliError>,
) -> Result<T, CliError> {
    match layout {
        Layout::Stamps => {
            let mut store = open_item_store(db)?;
            let value = f(&store)?;
            finish(store.close())?;
            Ok(value)
        }
        Layout::CatalogInventory => {
            let mut store = open_catalog_store(db)?;
            let value = f(&store)?;
            finish(store.close())?;
            Ok(value)
        }
    }
}

fn read_err(e: StoreError) -> CliError {
    CliError::from_store("Failed to read secret", e)
}

pub(crate) fn run_secret_status(db: Option<PathBuf>, layout: Layout) -> Result<(), CliError> {
    let is_set = with_store(db, layout, |store| store.is_secret_set().map_err(read_err))?;
    if is_set {
        log::info!(
            "Secret: {}",
            "set".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "Secret: {}",
            "not set".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

pub(crate) fn run_secret_set(
    db: Option<PathBuf>,
    layout: Layout,
    new: &str,
    current: Option<&str>,
) -> Result<(), CliError> {
    with_store(db, layout, |store| {
        authorize(store, current)?;
        store
            .set_secret(new)
            .map_err(|e| CliError::from_store("Failed to save secret", e))
    })?;
    log::info!(
        "{} Secret saved",
        "\u{2713}".if_supports_color(Stdout, |t| t.green()),
    );
    Ok(())
}

pub(crate) fn run_secret_verify(
    db: Option<PathBuf>,
    layout: Layout,
    secret: &str,
) -> Result<(), CliError> {
    let ok = with_store(db, layout, |store| {
        store.verify_secret(secret).map_err(read_err)
    })?;
    if ok {
        log::info!(
            "{} Secret matches",
            "\u{2713}".if_supports_color(Stdout, |t| t.green()),
        );
        Ok(())
    } else {
        Err(CliError::auth("secret does not match"))
    }
}
