use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Startup failures. Per-query failures are [`ResolveResponse::Failure`](super::ResolveResponse) values.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("catalog load failed: {0}")]
    Catalog(#[from] CatalogError),
}

pub type ResolverResult<T> = Result<T, ResolverError>;
