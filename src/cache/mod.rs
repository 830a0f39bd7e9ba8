//! Response memoization keyed by raw query text.

pub mod config;
pub mod result;


pub use config::CacheConfig;
pub use result::{CachedResponse, ResultCache};
