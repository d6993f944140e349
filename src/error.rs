use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Settings write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Unknown status '{0}' (expected PAID, UNPAID or OVERDUE)")]
    UnknownStatus(String),

    #[error("No item with id '{0}'")]
    ItemNotFound(String),

    #[error("Prompt cancelled: {0}")]
    Prompt(#[from] inquire::InquireError),
}

impl InvoiceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InvoiceError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, InvoiceError>;
