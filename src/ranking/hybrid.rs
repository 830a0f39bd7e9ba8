use tracing::{debug, info, instrument};

use crate::catalog::CatalogEntry;
use crate::oracle::OracleAdapter;
use crate::scoring::TextualRanker;

use super::types::{HybridConfig, RankingOutcome, RankingPath};

/// Textual ranking first; the oracle only when the textual result is doubtful.
#[derive(Debug)]
pub struct HybridRanker {
    textual: TextualRanker,
    adapter: OracleAdapter,
    config: HybridConfig,
}

impl HybridRanker {
    pub fn new(textual: TextualRanker, adapter: OracleAdapter, config: HybridConfig) -> Self {
        Self {
            textual,
            adapter,
            config,
        }
    }

    pub fn textual(&self) -> &TextualRanker {
        &self.textual
    }

    pub fn config(&self) -> &HybridConfig {
        &self.config
    }

    #[instrument(skip(self, entries), fields(entries = entries.len()))]
    pub async fn rank(&self, query: &str, entries: &[CatalogEntry]) -> RankingOutcome {
        let textual = self.textual.rank(query, entries);

        let Some(textual_top) = textual.first().map(|c| c.relevance) else {
            debug!("No textual candidates; skipping oracle");
            return RankingOutcome {
                candidates: textual,
                path: RankingPath::NoMatch,
            };
        };

        if textual_top >= self.config.confidence_threshold {
            info!(
                textual_top,
                threshold = self.config.confidence_threshold,
                "Textual ranking accepted without oracle"
            );
            return RankingOutcome {
                candidates: textual,
                path: RankingPath::TextualAccepted,
            };
        }

        debug!(
            textual_top,
            threshold = self.config.confidence_threshold,
            "Textual ranking below confidence threshold; escalating"
        );

        let oracle = self.adapter.rank_candidates(query, entries).await;
        let Some(oracle_top) = oracle.first().map(|c| c.relevance) else {
            info!(textual_top, "Oracle produced no ranking; keeping textual");
            return RankingOutcome {
                candidates: textual,
                path: RankingPath::OracleFallback,
            };
        };

        if oracle_top > textual_top * self.config.escalation_margin {
            info!(oracle_top, textual_top, "Oracle ranking accepted");
            RankingOutcome {
                candidates: oracle,
                path: RankingPath::OracleAccepted,
            }
        } else {
            info!(
                oracle_top,
                textual_top, "Oracle not convincingly better; keeping textual"
            );
            RankingOutcome {
                candidates: textual,
                path: RankingPath::TextualRetained,
            }
        }
    }
}
