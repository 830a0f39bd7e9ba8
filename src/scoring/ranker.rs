use std::cmp::Ordering;
use tracing::debug;

use crate::catalog::CatalogEntry;

use super::similarity::similarity;
use super::types::{ScoredCandidate, ScoringConfig};

/// Weighted lexical ranker over catalog entries.
#[derive(Debug, Clone, Default)]
pub struct TextualRanker {
    config: ScoringConfig,
}

impl TextualRanker {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Weighted score of one entry; always within `[0, 1]` for weights summing to 1.
    pub fn score_entry(&self, query: &str, entry: &CatalogEntry) -> f32 {
        let weights = &self.config.weights;
        let name = similarity(query, &entry.name);
        let summary = similarity(query, &entry.summary);
        let keywords = similarity(query, &entry.keywords_text());

        (name * weights.name + summary * weights.summary + keywords * weights.keywords)
            .clamp(0.0, 1.0)
    }

    /// Scores every entry, drops those under the threshold and keeps the best `top_n`.
    ///
    /// Ties keep catalog order. Textual candidates report `confidence == relevance`.
    pub fn rank(&self, query: &str, entries: &[CatalogEntry]) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = entries
            .iter()
            .filter_map(|entry| {
                let relevance = self.score_entry(query, entry);
                (relevance >= self.config.min_threshold)
                    .then(|| ScoredCandidate::from_entry(entry, relevance, relevance))
            })
            .collect();

        // sort_by is stable, so equal scores stay in catalog order
        scored.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(Ordering::Equal)
        });
        scored.truncate(self.config.top_n);

        debug!(
            query_len = query.len(),
            entries = entries.len(),
            kept = scored.len(),
            top_score = scored.first().map(|c| c.relevance),
            "Textual ranking complete"
        );

        scored
    }
}
