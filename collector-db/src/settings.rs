//! Typed access to the `settings` key/value table.

use rusqlite::{params, Connection};

use crate::error::StoreError;

/// A value the store keeps about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    /// Which table layout this file was created with.
    Layout,
    /// Hex digest written by the credential gate.
    SecretHash,
}

impl Setting {
    pub fn key(self) -> &'static str {
        match self {
            Setting::Layout => "layout",
            Setting::SecretHash => "password_hash",
        }
    }
}

pub fn get_setting(conn: &Connection, setting: Setting) -> Result<Option<String>, StoreError> {
    let result = conn.query_row(
        "SELECT value FROM settings WHERE key = ?1",
        params![setting.key()],
        |row| row.get::<_, String>(0),
    );
    match result {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Insert or replace a setting.
pub fn set_setting(conn: &Connection, setting: Setting, value: &str) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![setting.key(), value],
    )?;
    Ok(())
}

/// Remove a setting. Returns whether a row was deleted.
pub fn clear_setting(conn: &Connection, setting: Setting) -> Result<bool, StoreError> {
    let changed = conn.execute(
        "DELETE FROM settings WHERE key = ?1",
        params![setting.key()],
    )?;
    Ok(changed > 0)
}
