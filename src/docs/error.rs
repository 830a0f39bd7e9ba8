use std::path::PathBuf;
use thiserror::Error;

/// Documentation access errors. Recovered per candidate by the validator and
/// swallowed by the enricher.
#[derive(Debug, Error)]
pub enum DocsError {
    #[error("document not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("rejected document key '{key}' (path traversal?)")]
    InvalidKey { key: String },

    #[error("malformed location map for source '{source_tag}': {reason}")]
    MalformedMap { source_tag: String, reason: String },

    #[error("endpoint '{name}' has no location in source '{source_tag}'")]
    LocationNotFound { name: String, source_tag: String },

    #[error("line span {start}..={end} is outside a document of {total} lines")]
    SpanOutOfRange {
        start: usize,
        end: usize,
        total: usize,
    },
}

pub type DocsResult<T> = Result<T, DocsError>;
