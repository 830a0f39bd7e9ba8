use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::constants::STRUCTURING_FAILURE_PENALTY;
use crate::docs::{DocsError, DocsResult, DocumentSource, extract_span};
use crate::oracle::Oracle;
use crate::oracle::clean_response;
use crate::scoring::ScoredCandidate;

use super::error::{ValidationError, ValidationResult};
use super::types::{
    AttemptOutcome, EndpointSummary, StructuringMode, ValidatedResult, ValidationAttempt,
    ValidationConfig, ValidationReport,
};

pub const STRUCTURING_SYSTEM_PROMPT: &str = "\
You are an expert on REST APIs and the Evolution API.

TASK: structure the documentation of one endpoint as detailed JSON and grade how well \
it matches the user's query.

Reply with a JSON object containing at least:
- \"endpoint\": {\"method\", \"path\", \"name\", \"category\", \"description\", \"purpose\", \"when_to_use\"}
- \"authentication\", \"headers\", \"path_parameters\", \"query_parameters\", \"request_body\", \"responses\", \"examples\"
- \"final_score\": match quality between 0.0 and 1.0
- \"confidence\": your certainty between 0.0 and 1.0

For query strings use the notation \"/path?param1={Query1}&param2={Query2}\" and document \
every parameter. Be strict when grading: a poor match scores below 0.5.";

/// Builds the user payload for a structuring request.
pub fn structuring_user_prompt(query: &str, candidate: &ScoredCandidate, content: &str) -> String {
    format!(
        "ORIGINAL QUERY: \"{query}\"\n\n\
         SELECTED CANDIDATE:\n\
         - ID: {id}\n\
         - Name: {name}\n\
         - Category: {category}\n\
         - Score: {score:.3}\n\
         - Source: {source}\n\n\
         EXTRACTED DOCUMENTATION:\n{content}\n\n\
         Structure this documentation and compute final_score for the original query.",
        id = candidate.id,
        name = candidate.name,
        category = candidate.category,
        score = candidate.relevance,
        source = candidate.source,
    )
}

fn match_reasoning(name: &str, query: &str) -> String {
    format!("Endpoint '{name}' selecionado por correspondência com '{query}'")
}

/// Fetches documentation spans for ranked candidates and picks the best validated one.
pub struct CandidateValidator {
    docs: Arc<dyn DocumentSource>,
    oracle: Arc<dyn Oracle>,
    config: ValidationConfig,
}

impl std::fmt::Debug for CandidateValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateValidator")
            .field("oracle", &self.oracle.name())
            .field("config", &self.config)
            .finish()
    }
}

impl CandidateValidator {
    pub fn new(
        docs: Arc<dyn DocumentSource>,
        oracle: Arc<dyn Oracle>,
        config: ValidationConfig,
    ) -> Self {
        Self {
            docs,
            oracle,
            config,
        }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validates candidates in ranking order with early stopping.
    ///
    /// - Candidate 1 is always validated; its extraction failing is terminal.
    /// - Candidate 2 is validated when candidate 1's `final_score` fell below
    ///   `degradation_ratio * relevance`.
    /// - Candidate 3 is validated when exactly two results exist and neither reached
    ///   `acceptance_score`.
    ///
    /// The highest `final_score` wins; ties go to the earlier candidate.
    #[instrument(skip(self, candidates), fields(candidates = candidates.len()))]
    pub async fn validate(
        &self,
        query: &str,
        candidates: &[ScoredCandidate],
    ) -> ValidationResult<ValidationReport> {
        let primary = candidates.first().ok_or(ValidationError::NoCandidates)?;

        let mut attempts = Vec::with_capacity(3);
        let mut validated = Vec::with_capacity(3);

        let first = self
            .validate_candidate(query, primary)
            .await
            .map_err(|source| {
                warn!(candidate = %primary.id, error = %source, "Primary candidate extraction failed");
                ValidationError::PrimaryExtractionFailed {
                    candidate: primary.id.clone(),
                    source,
                }
            })?;
        attempts.push(ValidationAttempt {
            candidate_id: primary.id.clone(),
            outcome: AttemptOutcome::Validated {
                final_score: first.final_score,
            },
        });
        let degraded = first.final_score < self.config.degradation_ratio * primary.relevance;
        validated.push(first);

        if degraded && let Some(second) = candidates.get(1) {
            debug!(
                candidate = %second.id,
                "Primary final score degraded; validating second candidate"
            );
            self.attempt(query, second, &mut attempts, &mut validated)
                .await;
        }

        let unconvincing = validated
            .iter()
            .all(|r| r.final_score < self.config.acceptance_score);
        if validated.len() == 2
            && unconvincing
            && let Some(third) = candidates.get(2)
        {
            debug!(
                candidate = %third.id,
                "No convincing result among two; validating third candidate"
            );
            self.attempt(query, third, &mut attempts, &mut validated)
                .await;
        }

        let mut best_idx = 0;
        for (idx, result) in validated.iter().enumerate().skip(1) {
            if result.final_score > validated[best_idx].final_score {
                best_idx = idx;
            }
        }
        let selected = validated.swap_remove(best_idx);

        info!(
            endpoint = %selected.endpoint.name,
            final_score = selected.final_score,
            attempts = attempts.len(),
            "Candidate validated"
        );

        Ok(ValidationReport { selected, attempts })
    }

    async fn attempt(
        &self,
        query: &str,
        candidate: &ScoredCandidate,
        attempts: &mut Vec<ValidationAttempt>,
        validated: &mut Vec<ValidatedResult>,
    ) {
        match self.validate_candidate(query, candidate).await {
            Ok(result) => {
                attempts.push(ValidationAttempt {
                    candidate_id: candidate.id.clone(),
                    outcome: AttemptOutcome::Validated {
                        final_score: result.final_score,
                    },
                });
                validated.push(result);
            }
            Err(e) => {
                warn!(candidate = %candidate.id, error = %e, "Skipping candidate");
                attempts.push(ValidationAttempt {
                    candidate_id: candidate.id.clone(),
                    outcome: AttemptOutcome::Skipped {
                        reason: e.to_string(),
                    },
                });
            }
        }
    }

    /// Extracts and structures one candidate.
    pub async fn validate_candidate(
        &self,
        query: &str,
        candidate: &ScoredCandidate,
    ) -> DocsResult<ValidatedResult> {
        let documentation = self.extract(candidate).await?;

        Ok(match self.config.structuring {
            StructuringMode::Literal => literal_result(query, candidate, documentation),
            StructuringMode::Oracle => self.structure(query, candidate, documentation).await,
        })
    }

    /// Literal documentation span for `candidate`.
    ///
    /// The inline catalog location wins; otherwise the source map is searched by exact
    /// endpoint name.
    pub async fn extract(&self, candidate: &ScoredCandidate) -> DocsResult<String> {
        let location = match candidate.location {
            Some(location) => location,
            None => self
                .docs
                .location_map(&candidate.source)
                .await?
                .find(&candidate.name)
                .ok_or_else(|| DocsError::LocationNotFound {
                    name: candidate.name.clone(),
                    source_tag: candidate.source.clone(),
                })?,
        };

        let body = self.docs.documentation(&candidate.source).await?;
        let (start, end) = location.span();
        let span = extract_span(&body, start, end, self.config.context_lines)?;

        debug!(
            candidate = %candidate.id,
            start,
            end,
            bytes = span.len(),
            "Extracted documentation span"
        );

        Ok(span.trim().to_string())
    }

    async fn structure(
        &self,
        query: &str,
        candidate: &ScoredCandidate,
        documentation: String,
    ) -> ValidatedResult {
        let reply = self
            .oracle
            .query(
                STRUCTURING_SYSTEM_PROMPT,
                &structuring_user_prompt(query, candidate, &documentation),
            )
            .await;

        let graded = match reply {
            Ok(raw) => parse_structured(&raw),
            Err(e) => {
                warn!(candidate = %candidate.id, error = %e, "Oracle structuring failed");
                None
            }
        };

        let endpoint = EndpointSummary::from(candidate);
        let reasoning = match_reasoning(&candidate.name, query);

        match graded {
            Some(graded) => ValidatedResult {
                endpoint,
                documentation,
                structured: Some(graded.document),
                relevance: candidate.relevance,
                final_score: graded.final_score,
                confidence: graded.confidence.unwrap_or(candidate.confidence),
                match_reasoning: reasoning,
            },
            None => ValidatedResult {
                endpoint,
                documentation,
                structured: None,
                relevance: candidate.relevance,
                final_score: candidate.relevance * STRUCTURING_FAILURE_PENALTY,
                confidence: candidate.confidence,
                match_reasoning: reasoning,
            },
        }
    }
}

fn literal_result(query: &str, candidate: &ScoredCandidate, documentation: String) -> ValidatedResult {
    ValidatedResult {
        endpoint: EndpointSummary::from(candidate),
        documentation,
        structured: None,
        relevance: candidate.relevance,
        final_score: candidate.relevance,
        confidence: candidate.confidence,
        match_reasoning: match_reasoning(&candidate.name, query),
    }
}

struct GradedDocument {
    document: Value,
    final_score: f32,
    confidence: Option<f32>,
}

/// Parses a structuring reply; `None` unless it is a JSON object with an in-range
/// `final_score`.
fn parse_structured(raw: &str) -> Option<GradedDocument> {
    let document: Value = serde_json::from_str(clean_response(raw)).ok()?;
    if !document.is_object() {
        return None;
    }

    let unit = |key: &str| {
        document
            .get(key)
            .and_then(Value::as_f64)
            .map(|v| v as f32)
            .filter(|v| (0.0..=1.0).contains(v))
    };
    let final_score = unit("final_score")?;
    let confidence = unit("confidence");

    Some(GradedDocument {
        document,
        final_score,
        confidence,
    })
}
