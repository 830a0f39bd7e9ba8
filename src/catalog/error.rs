//! Catalog loading errors. All of them are fatal at startup.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate catalog identifier '{id}'")]
    DuplicateId { id: String },

    #[error("generated identifier '{id}' for entry at index {index} is already declared explicitly")]
    GeneratedIdCollision { id: String, index: usize },

    #[error("catalog entry at index {index} has an empty {field}")]
    MissingField { index: usize, field: &'static str },
}

pub type CatalogResult<T> = Result<T, CatalogError>;
