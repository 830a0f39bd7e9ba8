//! Post-selection enrichment with literal supplementary documentation.

pub mod enricher;
pub mod types;

#[cfg(test)]
mod tests;

pub use enricher::ContextEnricher;
pub use types::{
    CategoryRule, ContextCategory, DetectionStrategy, Enrichment, EnrichmentConfig,
};
