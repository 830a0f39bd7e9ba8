//! Deterministic lexical scoring of catalog entries.
//!
//! [`similarity`] compares a query against one text field with accent- and
//! case-insensitive matching; [`TextualRanker`] combines the name, summary and
//! keyword scores with [`RankingWeights`] and keeps the best candidates.

pub mod ranker;
pub mod similarity;
pub mod types;

#[cfg(test)]
mod tests;

pub use ranker::TextualRanker;
pub use similarity::{normalize_text, similarity};
pub use types::{RankingWeights, ScoredCandidate, ScoringConfig};
