//! Access gate for protected mutations.
//!
//! The store only needs to know whether a secret is configured and whether a
//! presented secret matches it. [`CredentialGate`] keeps that contract narrow
//! so a different backend can replace [`Sha256Gate`] without touching the
//! record tables.

use collector_catalog::ValidationError;
use rusqlite::Connection;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::StoreError;
use crate::settings::{get_setting, set_setting, Setting};

pub trait CredentialGate: Send {
    fn is_set(&self, conn: &Connection) -> Result<bool, StoreError>;

    /// Store (or replace) the secret.
    fn set(&self, conn: &Connection, secret: &str) -> Result<(), StoreError>;

    /// Compare `secret` against the stored one. False when none is stored.
    fn verify(&self, conn: &Connection, secret: &str) -> Result<bool, StoreError>;
}

/// Unsalted SHA-256 digest kept in the settings table.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Gate;

impl CredentialGate for Sha256Gate {
    fn is_set(&self, conn: &Connection) -> Result<bool, StoreError> {
        Ok(get_setting(conn, Setting::SecretHash)?.is_some())
    }

    fn set(&self, conn: &Connection, secret: &str) -> Result<(), StoreError> {
        if secret.is_empty() {
            return Err(ValidationError::EmptyField("secret").into());
        }
        set_setting(conn, Setting::SecretHash, &digest_hex(secret))
    }

    fn verify(&self, conn: &Connection, secret: &str) -> Result<bool, StoreError> {
        let Some(stored) = get_setting(conn, Setting::SecretHash)? else {
            return Ok(false);
        };
        let presented = digest_hex(secret);
        Ok(bool::from(presented.as_bytes().ct_eq(stored.as_bytes())))
    }
}

/// Lowercase hex SHA-256 of `secret`.
pub fn digest_hex(secret: &str) -> String {
    Sha256::digest(secret.as_bytes())
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
