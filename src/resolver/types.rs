use serde::Serialize;
use serde_json::Value;

use crate::enrichment::{ContextCategory, Enrichment};
use crate::ranking::RankingPath;
use crate::validation::{EndpointSummary, ValidatedResult};

/// Returned when no catalog entry clears the ranking threshold.
pub const NO_CANDIDATES_MESSAGE: &str = "Nenhum endpoint encontrado para a consulta";

/// Returned when the primary candidate's documentation cannot be extracted.
pub const NO_DETAILED_RESULT_MESSAGE: &str = "Nenhum resultado detalhado encontrado";

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Selected endpoint with its documentation and supplementary context.
pub struct ResolvedDocument {
    pub endpoint: EndpointSummary,
    #[serde(rename = "documentacao")]
    pub documentation: String,
    #[serde(rename = "estruturado", skip_serializing_if = "Option::is_none")]
    pub structured: Option<Value>,
    pub final_score: f32,
    pub confidence: f32,
    pub match_reasoning: String,
    #[serde(rename = "observacao", skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    #[serde(rename = "complemento-filter", skip_serializing_if = "Option::is_none")]
    pub filter_complement: Option<String>,
    #[serde(rename = "complemento-webhook", skip_serializing_if = "Option::is_none")]
    pub webhook_complement: Option<String>,
    #[serde(skip)]
    pub path: RankingPath,
}

impl ResolvedDocument {
    pub fn new(result: ValidatedResult, mut enrichment: Enrichment, path: RankingPath) -> Self {
        Self {
            endpoint: result.endpoint,
            documentation: result.documentation,
            structured: result.structured,
            final_score: result.final_score,
            confidence: result.confidence,
            match_reasoning: result.match_reasoning,
            observation: enrichment.observation.take(),
            filter_complement: enrichment.complements.remove(&ContextCategory::Filters),
            webhook_complement: enrichment.complements.remove(&ContextCategory::Webhooks),
            path,
        }
    }

    pub fn complement(&self, category: ContextCategory) -> Option<&str> {
        match category {
            ContextCategory::Filters => self.filter_complement.as_deref(),
            ContextCategory::Webhooks => self.webhook_complement.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
/// Outcome of one resolution; failures serialize as `{ "error", "query" }`.
pub enum ResolveResponse {
    Success(Box<ResolvedDocument>),
    Failure { error: String, query: String },
}

impl ResolveResponse {
    pub fn failure(message: impl Into<String>, query: &str) -> Self {
        Self::Failure {
            error: message.into(),
            query: query.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn document(&self) -> Option<&ResolvedDocument> {
        match self {
            Self::Success(document) => Some(document),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { error, .. } => Some(error),
        }
    }
}
