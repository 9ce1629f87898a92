pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod secret;
pub(crate) mod stamps;

use std::path::PathBuf;

use collector_db::{CatalogStore, ItemStore, Layout, SecretStore, StoreError};
use serde::Serialize;

use crate::settings::resolve_store_path;
use crate::CliError;

pub(crate) fn layout_for(catalog: bool) -> Layout {
    if catalog {
        Layout::CatalogInventory
    } else {
        Layout::Stamps
    }
}

pub(crate) fn open_item_store(db: Option<PathBuf>) -> Result<ItemStore, CliError> {
    let path = resolve_store_path(db, Layout::Stamps);
    log::debug!("Using stamp store {}", path.display());
    ItemStore::open(&path).map_err(|e| {
        CliError::from_store(&format!("Failed to open {}", path.display()), e)
    })
}

pub(crate) fn open_catalog_store(db: Option<PathBuf>) -> Result<CatalogStore, CliError> {
    let path = resolve_store_path(db, Layout::CatalogInventory);
    log::debug!("Using catalog store {}", path.display());
    CatalogStore::open(&path).map_err(|e| {
        CliError::from_store(&format!("Failed to open {}", path.display()), e)
    })
}

/// Release the store, reporting a failed close as an error.
pub(crate) fn finish(result: Result<(), StoreError>) -> Result<(), CliError> {
    result.map_err(|e| CliError::database(format!("Failed to close store: {}", e)))
}

/// Require the store secret when one has been set.
pub(crate) fn authorize<S: SecretStore + ?Sized>(
    store: &S,
    secret: Option<&str>,
) -> Result<(), CliError> {
    let is_set = store
        .is_secret_set()
        .map_err(|e| CliError::from_store("Failed to read secret", e))?;
    if !is_set {
        return Ok(());
    }

    let Some(secret) = secret else {
        return Err(CliError::auth("this store is protected; pass --secret"));
    };
    let ok = store
        .verify_secret(secret)
        .map_err(|e| CliError::from_store("Failed to check secret", e))?;
    if ok {
        Ok(())
    } else {
        Err(CliError::auth("secret does not match"))
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    println!("{}", text);
    Ok(())
}

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

/// Render an optional value, or "-" when absent.
pub(crate) fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_strings_untouched() {
        assert_eq!(truncate_str("Mint", 10), "Mint");
        assert_eq!(truncate_str("", 3), "");
    }

    #[test]
    fn truncate_long_strings() {
        assert_eq!(truncate_str("United Kingdom", 10), "United ...");
        assert_eq!(truncate_str("Großbritannien", 8), "Großb...");
        assert_eq!(truncate_str("abcdef", 2), "ab");
    }

    #[test]
    fn dash_for_missing() {
        assert_eq!(or_dash(Some(1849)), "1849");
        assert_eq!(or_dash::<i32>(None), "-");
    }

    #[test]
    fn authorize_open_store() {
        let store = ItemStore::open_memory().unwrap();
        assert!(authorize(&store, None).is_ok());
        assert!(authorize(&store, Some("anything")).is_ok());
    }

    #[test]
    fn authorize_protected_store() {
        let store = ItemStore::open_memory().unwrap();
        store.set_secret("abc123").unwrap();

        assert!(matches!(authorize(&store, None), Err(CliError::Auth(_))));
        assert!(matches!(authorize(&store, Some("wrong")), Err(CliError::Auth(_))));
        assert!(authorize(&store, Some("abc123")).is_ok());
    }

    #[test]
    fn authorize_through_trait_object() {
        let store = CatalogStore::open_memory().unwrap();
        store.set_secret("abc123").unwrap();
        let dyn_store: &dyn SecretStore = &store;
        assert!(matches!(authorize(dyn_store, Some("nope")), Err(CliError::Auth(_))));
        assert!(authorize(dyn_store, Some("abc123")).is_ok());
    }

    #[test]
    fn layout_selection() {
        assert_eq!(layout_for(true), Layout::CatalogInventory);
        assert_eq!(layout_for(false), Layout::Stamps);
    }
}
