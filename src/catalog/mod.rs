//! Endpoint/webhook catalog and per-source location maps.
//!
//! The catalog is loaded once at startup and shared read-only by every ranking
//! component. Entries are ordered endpoints first, then webhooks; that order is the
//! row index the oracle sees.

pub mod error;
pub mod loader;
pub mod types;


pub use error::{CatalogError, CatalogResult};
pub use loader::{Catalog, SourceMap};
pub use types::{CatalogEntry, CatalogMetadata, LineRange, Location, ResponseRange};
