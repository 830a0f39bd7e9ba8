use serde::Serialize;

use crate::catalog::{CatalogEntry, Location};
use crate::constants::{
    DEFAULT_KEYWORDS_WEIGHT, DEFAULT_MIN_THRESHOLD, DEFAULT_NAME_WEIGHT, DEFAULT_SUMMARY_WEIGHT,
    DEFAULT_TOP_N,
};

#[derive(Debug, Clone, Serialize)]
/// A catalog entry scored against one query.
pub struct ScoredCandidate {
    pub id: String,
    pub source: String,
    pub category: String,
    pub name: String,
    pub summary: String,
    pub keywords: Vec<String>,
    /// Match strength in `[0, 1]`.
    pub relevance: f32,
    /// Scorer's certainty in `[0, 1]`.
    pub confidence: f32,
    #[serde(skip)]
    pub location: Option<Location>,
}

impl ScoredCandidate {
    pub fn from_entry(entry: &CatalogEntry, relevance: f32, confidence: f32) -> Self {
        Self {
            id: entry.id.clone(),
            source: entry.source.clone(),
            category: entry.category.clone(),
            name: entry.name.clone(),
            summary: entry.summary.clone(),
            keywords: entry.keywords.clone(),
            relevance,
            confidence,
            location: entry.location,
        }
    }
}

/// Per-field weights of the textual score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingWeights {
    pub name: f32,
    pub summary: f32,
    pub keywords: f32,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME_WEIGHT,
            summary: DEFAULT_SUMMARY_WEIGHT,
            keywords: DEFAULT_KEYWORDS_WEIGHT,
        }
    }
}

impl RankingWeights {
    pub fn new(name: f32, summary: f32, keywords: f32) -> Self {
        Self {
            name,
            summary,
            keywords,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for (label, weight) in [
            ("name", self.name),
            ("summary", self.summary),
            ("keywords", self.keywords),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(format!(
                    "{} weight must be between 0.0 and 1.0, got {}",
                    label, weight
                ));
            }
        }
        Ok(())
    }
}

/// Textual ranker settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    pub weights: RankingWeights,
    /// Entries scoring below this are discarded.
    pub min_threshold: f32,
    /// Candidates kept after sorting.
    pub top_n: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: RankingWeights::default(),
            min_threshold: DEFAULT_MIN_THRESHOLD,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl ScoringConfig {
    pub fn with_weights(mut self, weights: RankingWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_min_threshold(mut self, min_threshold: f32) -> Self {
        self.min_threshold = min_threshold;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        self.weights.validate()?;
        if !(0.0..=1.0).contains(&self.min_threshold) {
            return Err(format!(
                "min_threshold must be between 0.0 and 1.0, got {}",
                self.min_threshold
            ));
        }
        if self.top_n == 0 {
            return Err("top_n must be at least 1".to_string());
        }
        Ok(())
    }
}
