//! Hybrid ranking: accept the textual ranking when it is confident, otherwise ask the
//! oracle and keep whichever ranking is convincingly better.

pub mod hybrid;
pub mod types;


pub use hybrid::HybridRanker;
pub use types::{HybridConfig, RankingOutcome, RankingPath};
