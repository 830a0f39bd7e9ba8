use serde::Serialize;

use crate::constants::{DEFAULT_ACCEPTANCE_SCORE, DEFAULT_CONTEXT_LINES, DEFAULT_DEGRADATION_RATIO};
use crate::scoring::ScoredCandidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// How a validated span is turned into a result.
pub enum StructuringMode {
    /// Literal passthrough; `final_score` is the candidate's relevance.
    #[default]
    Literal,
    /// The oracle structures the span and grades the match.
    Oracle,
}

impl StructuringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Oracle => "oracle",
        }
    }
}

impl std::str::FromStr for StructuringMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "literal" => Ok(Self::Literal),
            "oracle" | "ai" => Ok(Self::Oracle),
            _ => Err(format!("Unknown structuring mode: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Candidate validation and escalation settings.
pub struct ValidationConfig {
    pub structuring: StructuringMode,
    /// Candidate 2 is tried when candidate 1's `final_score < ratio * relevance`.
    pub degradation_ratio: f32,
    /// Candidate 3 is tried when two validated results both score below this.
    pub acceptance_score: f32,
    /// Context lines added around each extracted span.
    pub context_lines: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            structuring: StructuringMode::default(),
            degradation_ratio: DEFAULT_DEGRADATION_RATIO,
            acceptance_score: DEFAULT_ACCEPTANCE_SCORE,
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

impl ValidationConfig {
    pub fn with_structuring(mut self, structuring: StructuringMode) -> Self {
        self.structuring = structuring;
        self
    }

    pub fn with_context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Endpoint metadata carried into the response.
pub struct EndpointSummary {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    pub category: String,
    pub source: String,
    pub summary: String,
}

impl From<&ScoredCandidate> for EndpointSummary {
    fn from(candidate: &ScoredCandidate) -> Self {
        Self {
            id: candidate.id.clone(),
            name: candidate.name.clone(),
            category: candidate.category.clone(),
            source: candidate.source.clone(),
            summary: candidate.summary.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Documentation record for one validated candidate.
pub struct ValidatedResult {
    pub endpoint: EndpointSummary,
    /// Literal documentation span, trimmed.
    pub documentation: String,
    /// Oracle-structured document, when structuring succeeded.
    pub structured: Option<serde_json::Value>,
    pub relevance: f32,
    pub final_score: f32,
    pub confidence: f32,
    pub match_reasoning: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    Validated { final_score: f32 },
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
/// One candidate the validator tried, in order.
pub struct ValidationAttempt {
    pub candidate_id: String,
    pub outcome: AttemptOutcome,
}

#[derive(Debug, Clone)]
/// Selected result plus every attempt made to reach it.
pub struct ValidationReport {
    pub selected: ValidatedResult,
    pub attempts: Vec<ValidationAttempt>,
}

impl ValidationReport {
    pub fn attempted_ids(&self) -> Vec<&str> {
        self.attempts
            .iter()
            .map(|a| a.candidate_id.as_str())
            .collect()
    }
}
