use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::constants::OBSERVATION_WORD_LIMIT;
use crate::docs::{DocumentSource, auxiliary_sections, endpoint_section, render_auxiliary};
use crate::oracle::Oracle;
use crate::scoring::normalize_text;
use crate::validation::EndpointSummary;

use super::types::{ContextCategory, DetectionStrategy, Enrichment, EnrichmentConfig};

fn observation_system_prompt() -> String {
    format!(
        "You are an Evolution API expert.\n\n\
         TASK: read the selected endpoint and its supplementary documentation and write \
         practical observations for the user: points of attention for this endpoint, \
         scenarios related to the original query, common troubleshooting, important \
         settings, and related endpoints.\n\n\
         Be concise and practical, rely on the supplementary material, relate it to the \
         user's query, and use at most {OBSERVATION_WORD_LIMIT} words."
    )
}

fn observation_user_prompt(
    query: &str,
    endpoint_name: &str,
    complements: &BTreeMap<ContextCategory, String>,
    auxiliary: &BTreeMap<ContextCategory, String>,
) -> String {
    let literal = complements
        .iter()
        .map(|(category, content)| {
            format!("=== {} ===\n{}", category.response_key().to_uppercase(), content)
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    let other = auxiliary
        .iter()
        .map(|(category, content)| {
            format!(
                "=== OTHER SECTIONS OF {} ===\n{}",
                category.as_str().to_uppercase(),
                content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "ORIGINAL QUERY: \"{query}\"\n\n\
         SELECTED ENDPOINT: \"{endpoint_name}\"\n\n\
         LITERAL SUPPLEMENT SECTIONS:\n{literal}\n\n\
         OTHER SUPPLEMENT SECTIONS (NOT ENDPOINTS):\n{other}\n\n\
         Write practical observations that put the answer in context for the user."
    )
}

/// Splices literal supplementary sections into a selected endpoint's response.
///
/// Nothing here is fatal: unreadable documents, missing tags and observation
/// failures only shrink the enrichment.
pub struct ContextEnricher {
    docs: Arc<dyn DocumentSource>,
    oracle: Arc<dyn Oracle>,
    config: EnrichmentConfig,
}

impl std::fmt::Debug for ContextEnricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextEnricher")
            .field("oracle", &self.oracle.name())
            .field("detection", &self.config.detection)
            .field("observations", &self.config.observations)
            .finish()
    }
}

impl ContextEnricher {
    pub fn new(
        docs: Arc<dyn DocumentSource>,
        oracle: Arc<dyn Oracle>,
        config: EnrichmentConfig,
    ) -> Self {
        Self {
            docs,
            oracle,
            config,
        }
    }

    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    /// Categories that apply to `endpoint` under the configured strategy.
    pub fn detect(&self, endpoint: &EndpointSummary) -> Vec<ContextCategory> {
        match self.config.detection {
            DetectionStrategy::ExactName => self
                .config
                .rules
                .iter()
                .filter(|rule| rule.endpoints.contains(&endpoint.name))
                .map(|rule| rule.category)
                .collect(),
            DetectionStrategy::KeywordTrigger => {
                let text = normalize_text(&format!(
                    "{} {} {}",
                    endpoint.name, endpoint.category, endpoint.summary
                ));
                self.config
                    .rules
                    .iter()
                    .filter(|rule| rule.triggers.iter().any(|t| text.contains(t.as_str())))
                    .map(|rule| rule.category)
                    .collect()
            }
        }
    }

    #[instrument(skip(self, endpoint), fields(endpoint = %endpoint.name))]
    pub async fn enrich(&self, query: &str, endpoint: &EndpointSummary) -> Enrichment {
        let categories = self.detect(endpoint);
        if categories.is_empty() {
            debug!("No supplementary context applies");
            return Enrichment::default();
        }

        let mut enrichment = Enrichment::default();

        for category in categories {
            let Some(tag) = self.config.tag_for(&endpoint.name) else {
                warn!(category = category.as_str(), "No supplement tag for endpoint");
                continue;
            };
            let Some(rule) = self.config.rule(category) else {
                continue;
            };

            let content = match self.docs.supplement(&rule.document).await {
                Ok(content) => content,
                Err(e) => {
                    warn!(
                        category = category.as_str(),
                        document = %rule.document,
                        error = %e,
                        "Supplement unavailable"
                    );
                    continue;
                }
            };

            match endpoint_section(&content, tag) {
                Some(section) => {
                    enrichment.complements.insert(category, section.to_string());
                }
                None => debug!(tag, document = %rule.document, "Endpoint tag not found in supplement"),
            }

            let sections = auxiliary_sections(&content);
            if !sections.is_empty() {
                enrichment
                    .auxiliary
                    .insert(category, render_auxiliary(&sections));
            }
        }

        let found = !enrichment.complements.is_empty() || !enrichment.auxiliary.is_empty();
        if found && self.config.observations {
            enrichment.observation = self.observe(query, &endpoint.name, &enrichment).await;
        }

        info!(
            complements = enrichment.complements.len(),
            auxiliary = enrichment.auxiliary.len(),
            observation = enrichment.observation.is_some(),
            "Enrichment complete"
        );

        enrichment
    }

    async fn observe(&self, query: &str, endpoint_name: &str, enrichment: &Enrichment) -> Option<String> {
        let user = observation_user_prompt(
            query,
            endpoint_name,
            &enrichment.complements,
            &enrichment.auxiliary,
        );

        match self.oracle.query(&observation_system_prompt(), &user).await {
            Ok(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
            Err(e) => {
                warn!(error = %e, "Observation synthesis failed");
                None
            }
        }
    }
}
