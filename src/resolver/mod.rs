//! Query resolution pipeline: cache, hybrid ranking, validation, enrichment.

pub mod error;
pub mod pipeline;
pub mod types;


pub use error::{ResolverError, ResolverResult};
pub use pipeline::{Resolver, ResolverConfig};
pub use types::{NO_CANDIDATES_MESSAGE, NO_DETAILED_RESULT_MESSAGE, ResolveResponse, ResolvedDocument};
