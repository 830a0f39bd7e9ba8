use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::catalog::CatalogEntry;
use crate::constants::{DEFAULT_MIN_THRESHOLD, DEFAULT_TOP_N};
use crate::scoring::ScoredCandidate;

use super::backend::Oracle;
use super::error::OracleResult;
use super::response::{OracleRanking, parse_rankings};
use super::table::build_table;

pub const RANKING_SYSTEM_PROMPT: &str = "\
You are an expert on REST APIs, specifically the Evolution API for WhatsApp.

TASK: given a user query and a table of endpoints, estimate for every row the probability \
that the endpoint matches the user's intent.

Reply with JSON of exactly this shape:
{\"rankings\": [{\"id\": \"endpoint_id\", \"index\": 0, \"probability\": 0.95, \"confidence\": 0.9, \"reasoning\": \"short explanation\"}]}

PROBABILITY SCALE:
- 0.90-1.00: the endpoint does exactly what the user wants
- 0.70-0.89: the endpoint solves the problem with small adaptations
- 0.40-0.69: related but not ideal
- 0.20-0.39: distant relation
- 0.00-0.19: unrelated

Be strict: most endpoints should score below 0.3. Consider synonyms and phrasing \
variants (create/add, fetch/list) and the user's intent (configure, query, delete).";

/// Builds the user payload for a ranking request.
pub fn ranking_user_prompt(query: &str, table: &str) -> String {
    format!(
        "USER QUERY: \"{query}\"\n\n\
         ENDPOINT TABLE:\n{table}\n\n\
         Estimate the match probability of every row. Use the 0-based row index as \"index\"."
    )
}

/// Shapes catalog rankings for the oracle and turns its reply into candidates.
///
/// Every failure collapses to an empty result.
pub struct OracleAdapter {
    oracle: Arc<dyn Oracle>,
    min_threshold: f32,
    top_n: usize,
}

impl std::fmt::Debug for OracleAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleAdapter")
            .field("oracle", &self.oracle.name())
            .field("min_threshold", &self.min_threshold)
            .field("top_n", &self.top_n)
            .finish()
    }
}

impl OracleAdapter {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self {
            oracle,
            min_threshold: DEFAULT_MIN_THRESHOLD,
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_min_threshold(mut self, min_threshold: f32) -> Self {
        self.min_threshold = min_threshold;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Rankings above the threshold, best first, at most `top_n`; empty on any failure.
    #[instrument(skip(self, entries), fields(entries = entries.len(), oracle = self.oracle.name()))]
    pub async fn rank_via_oracle(&self, query: &str, entries: &[CatalogEntry]) -> Vec<OracleRanking> {
        if entries.is_empty() {
            return Vec::new();
        }

        match self.try_rank(query, entries).await {
            Ok(rankings) => rankings,
            Err(e) => {
                warn!(error = %e, "Oracle ranking failed; treating as no result");
                Vec::new()
            }
        }
    }

    async fn try_rank(&self, query: &str, entries: &[CatalogEntry]) -> OracleResult<Vec<OracleRanking>> {
        let table = build_table(entries);
        let raw = self
            .oracle
            .query(RANKING_SYSTEM_PROMPT, &ranking_user_prompt(query, &table))
            .await?;

        let mut rankings: Vec<OracleRanking> = parse_rankings(&raw, entries.len())?
            .into_iter()
            .filter(|r| r.probability >= self.min_threshold)
            .collect();

        rankings.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(Ordering::Equal)
        });
        rankings.truncate(self.top_n);

        debug!(
            kept = rankings.len(),
            top_probability = rankings.first().map(|r| r.probability),
            "Oracle ranking parsed"
        );

        Ok(rankings)
    }

    /// [`rank_via_oracle`](Self::rank_via_oracle) mapped back onto catalog entries.
    ///
    /// Confidence falls back to the probability when the oracle omits it.
    pub async fn rank_candidates(&self, query: &str, entries: &[CatalogEntry]) -> Vec<ScoredCandidate> {
        self.rank_via_oracle(query, entries)
            .await
            .into_iter()
            .filter_map(|r| {
                let entry = entries.get(r.index)?;
                Some(ScoredCandidate::from_entry(
                    entry,
                    r.probability,
                    r.confidence.unwrap_or(r.probability),
                ))
            })
            .collect()
    }
}
