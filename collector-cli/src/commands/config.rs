use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use collector_db::Layout;

use crate::settings::{load_settings_string, resolve_store_path, save_store_path, settings_path};
use crate::CliError;

pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = settings_path();
    log::info!(
        "{}",
        "Collector Settings".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!(
        "  Settings file: {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    for layout in [Layout::Stamps, Layout::CatalogInventory] {
        log::info!(
            "  {:<7} store: {}",
            layout.as_str(),
            resolve_store_path(None, layout).display(),
        );
    }

    match load_settings_string(&path) {
        Some(contents) => {
            crate::log_blank();
            for line in contents.lines() {
                log::info!("  {}", line);
            }
        }
        None => {
            log::info!(
                "  {}",
                "(no settings saved; using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
    Ok(())
}

pub(crate) fn run_config_path() -> Result<(), CliError> {
    println!("{}", settings_path().display());
    Ok(())
}

pub(crate) fn run_config_set_db(layout: Layout, path: &Path) -> Result<(), CliError> {
    let absolute = std::path::absolute(path)
        .map_err(|e| CliError::config(format!("Invalid path {}: {}", path.display(), e)))?;
    save_store_path(&settings_path(), layout, Some(&absolute))
        .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
    log::info!("Default {} store set to {}", layout, absolute.display());
    Ok(())
}

pub(crate) fn run_config_clear_db(layout: Layout) -> Result<(), CliError> {
    save_store_path(&settings_path(), layout, None)
        .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
    log::info!("Cleared saved {} store path", layout);
    Ok(())
}
