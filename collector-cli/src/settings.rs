//! Saved CLI settings (default store paths).
//!
//! The settings file is `~/.config/collector/settings.toml`:
//!
//! ```toml
//! [store]
//! stamps = "/home/me/stamps.db"
//! catalog = "/home/me/collector.db"
//! ```

use std::io;
use std::path::{Path, PathBuf};

use collector_db::Layout;

/// Canonical path to the settings file: `~/.config/collector/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("collector").join("settings.toml")
}

/// File name used when nothing else is configured.
pub(crate) fn default_store_file(layout: Layout) -> &'static str {
    match layout {
        Layout::Stamps => "stamps.db",
        Layout::CatalogInventory => "collector.db",
    }
}

/// Resolve the store path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `store.<layout>` in `settings.toml`
/// 3. Default file name in the current directory
pub(crate) fn resolve_store_path(cli_override: Option<PathBuf>, layout: Layout) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = load_store_path(&settings_path(), layout) {
        return p;
    }
    PathBuf::from(default_store_file(layout))
}

/// Read `store.<layout>` from a settings file, if set.
pub(crate) fn load_store_path(settings: &Path, layout: Layout) -> Option<PathBuf> {
    let contents = std::fs::read_to_string(settings).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    let path = doc.get("store")?.get(layout.as_str())?.as_str()?;
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Save (or clear) the store path for one layout.
///
/// Only `store.<layout>` changes; every other key in the file is kept.
pub(crate) fn save_store_path(
    settings: &Path,
    layout: Layout,
    path: Option<&Path>,
) -> io::Result<()> {
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(settings) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let store = table
        .entry("store")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let store_table = store
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[store] is not a table"))?;

    match path {
        Some(p) => {
            store_table.insert(
                layout.as_str().to_string(),
                toml::Value::String(p.to_string_lossy().into_owned()),
            );
        }
        None => {
            store_table.remove(layout.as_str());
        }
    }

    // Write atomically
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, settings)?;

    Ok(())
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub(crate) fn load_settings_string(settings: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(settings).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}
