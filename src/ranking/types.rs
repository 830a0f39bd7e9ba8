use crate::constants::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_ESCALATION_MARGIN};
use crate::scoring::ScoredCandidate;

#[derive(Debug, Clone, Copy, PartialEq)]
/// Escalation policy of the hybrid strategy.
pub struct HybridConfig {
    /// Textual top score at or above which the oracle is skipped.
    pub confidence_threshold: f32,
    /// Oracle top score must exceed `textual_top * margin` to replace the textual ranking.
    pub escalation_margin: f32,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            escalation_margin: DEFAULT_ESCALATION_MARGIN,
        }
    }
}

impl HybridConfig {
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    pub fn with_escalation_margin(mut self, margin: f32) -> Self {
        self.escalation_margin = margin;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which branch of the hybrid strategy produced the ranking.
pub enum RankingPath {
    /// Textual ranker found nothing; the oracle was not consulted.
    NoMatch,
    /// Textual top score cleared the confidence threshold.
    TextualAccepted,
    /// Oracle beat the textual top score by the escalation margin.
    OracleAccepted,
    /// Oracle answered but not convincingly enough.
    TextualRetained,
    /// Oracle produced no usable ranking.
    OracleFallback,
}

impl RankingPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoMatch => "no_match",
            Self::TextualAccepted => "textual_accepted",
            Self::OracleAccepted => "oracle_accepted",
            Self::TextualRetained => "textual_retained",
            Self::OracleFallback => "oracle_fallback",
        }
    }

    /// True when the oracle was called.
    pub fn escalated(&self) -> bool {
        matches!(
            self,
            Self::OracleAccepted | Self::TextualRetained | Self::OracleFallback
        )
    }
}

#[derive(Debug, Clone)]
/// Ranked candidates (best first, at most three) plus the path that produced them.
pub struct RankingOutcome {
    pub candidates: Vec<ScoredCandidate>,
    pub path: RankingPath,
}

impl RankingOutcome {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn top_score(&self) -> Option<f32> {
        self.candidates.first().map(|c| c.relevance)
    }
}
