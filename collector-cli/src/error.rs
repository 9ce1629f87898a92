use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Store operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Record rejected before it was written
    #[error("Invalid input: {0}")]
    Invalid(String),

    /// Lookup found nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or wrong store secret
    #[error("Not authorized: {0}")]
    Auth(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Map a store error to the CLI variant for its kind.
    pub(crate) fn from_store(context: &str, e: collector_db::StoreError) -> Self {
        use collector_db::ErrorKind;
        match e.kind() {
            ErrorKind::Validation => Self::Invalid(e.to_string()),
            ErrorKind::NotFound => Self::NotFound(e.to_string()),
            ErrorKind::Constraint | ErrorKind::Storage => {
                Self::Database(format!("{}: {}", context, e))
            }
        }
    }
}
