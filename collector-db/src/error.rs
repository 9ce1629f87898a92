use collector_catalog::ValidationError;
use thiserror::Error;

use crate::schema::Layout;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid record: {0}")]
    Validation(#[from] ValidationError),
    #[error("Entity not found: {entity} with id '{id}'")]
    NotFound { entity: &'static str, id: String },
    /// A uniqueness or other schema constraint rejected the write.
    #[error("Constraint violated: {0}")]
    Constraint(String),
    #[error("Migration error: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
    #[error("Store layout mismatch: opened as '{expected}', file holds '{found}'")]
    LayoutMismatch { expected: Layout, found: String },
    #[error("Store is closed")]
    Closed,
}

/// Broad failure category, for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
    Constraint,
}

impl StoreError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Constraint(_) => ErrorKind::Constraint,
            Self::Sqlite(_)
            | Self::Io(_)
            | Self::VersionMismatch { .. }
            | Self::LayoutMismatch { .. }
            | Self::Closed => ErrorKind::Storage,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::SqliteFailure(err, msg)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::Constraint(msg.unwrap_or_else(|| err.to_string()))
            }
            other => Self::Sqlite(other),
        }
    }
}
