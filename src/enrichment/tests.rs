use std::sync::Arc;

use super::*;
use crate::docs::MockDocumentSource;
use crate::oracle::{DisabledOracle, MockOracle};
use crate::validation::EndpointSummary;

const FILTERS_DOC: &str = "<!-- SECTION:HEADER -->
# Filters
<!-- SECTION:API_ENDPOINTS -->
<!-- ENDPOINT:CREATE_INSTANCE -->
### Criar Instância
Set `filters.audio.minDuration` when creating the instance.
<!-- ENDPOINT:GET_FILTERS -->
### Consultar Filtros
<!-- SECTION:PRACTICAL_SCENARIOS -->
Drop voice notes shorter than two seconds.
";

const WEBHOOK_DOC: &str = "<!-- ENDPOINT:WEBHOOK_HEALTH -->
GET /webhook/health
<!-- SUBSECTION:RESPONSE -->
{ \"status\": \"ok\" }
";

fn endpoint(name: &str, category: &str, summary: &str) -> EndpointSummary {
    EndpointSummary {
        id: "e".to_string(),
        name: name.to_string(),
        category: category.to_string(),
        source: "native".to_string(),
        summary: summary.to_string(),
    }
}

fn docs() -> MockDocumentSource {
    let docs = MockDocumentSource::new();
    docs.insert_supplement("custom/filters.md", FILTERS_DOC);
    docs.insert_supplement("custom/dual-webhook-system.md", WEBHOOK_DOC);
    docs
}

fn enricher(docs: MockDocumentSource, oracle: MockOracle, config: EnrichmentConfig) -> ContextEnricher {
    ContextEnricher::new(Arc::new(docs), Arc::new(oracle), config)
}

#[test]
fn test_default_registry() {
    let config = EnrichmentConfig::default();

    assert_eq!(config.detection, DetectionStrategy::ExactName);
    assert!(config.observations);
    assert_eq!(config.tags.len(), 19);
    assert_eq!(config.tag_for("Criar Instância"), Some("CREATE_INSTANCE"));
    assert_eq!(config.tag_for("Limpar Logs"), Some("DELETE_LOGS"));

    let filters = config.rule(ContextCategory::Filters).expect("filters rule");
    assert_eq!(filters.document, "custom/filters.md");
    assert_eq!(filters.endpoints.len(), 10);
    assert!(filters.endpoints.contains("Consultar Configuração Global"));

    let webhooks = config.rule(ContextCategory::Webhooks).expect("webhooks rule");
    assert_eq!(webhooks.document, "custom/dual-webhook-system.md");
    assert_eq!(webhooks.endpoints.len(), 9);
}

#[test]
fn test_category_response_keys() {
    assert_eq!(ContextCategory::Filters.response_key(), "complemento-filter");
    assert_eq!(ContextCategory::Webhooks.response_key(), "complemento-webhook");
}

#[test]
fn test_exact_detection_is_case_and_accent_sensitive() {
    let e = enricher(docs(), MockOracle::new(), EnrichmentConfig::default());

    assert_eq!(
        e.detect(&endpoint("Criar Instância", "Instance", "")),
        vec![ContextCategory::Filters]
    );
    assert_eq!(
        e.detect(&endpoint("Saúde dos Webhooks", "Monitoring", "")),
        vec![ContextCategory::Webhooks]
    );
    assert!(e.detect(&endpoint("Criar Instancia", "Instance", "")).is_empty());
    assert!(e.detect(&endpoint("criar instância", "Instance", "")).is_empty());
}

#[test]
fn test_keyword_detection_scans_name_category_and_summary() {
    let config = EnrichmentConfig::default().with_detection(DetectionStrategy::KeywordTrigger);
    let e = enricher(docs(), MockOracle::new(), config);

    assert_eq!(
        e.detect(&endpoint("Enviar Áudio", "Message", "")),
        vec![ContextCategory::Filters]
    );
    assert_eq!(
        e.detect(&endpoint("Configurar", "Settings", "retry failed webhook deliveries")),
        vec![ContextCategory::Webhooks]
    );
    assert_eq!(
        e.detect(&endpoint("Webhook Payload", "Message", "")),
        vec![ContextCategory::Filters, ContextCategory::Webhooks]
    );
    assert!(e.detect(&endpoint("Buscar Grupos", "Group", "Lista grupos")).is_empty());
}

#[test]
fn test_detection_strategy_from_str() {
    assert_eq!("exact".parse::<DetectionStrategy>(), Ok(DetectionStrategy::ExactName));
    assert_eq!("Keyword".parse::<DetectionStrategy>(), Ok(DetectionStrategy::KeywordTrigger));
    assert!("fuzzy".parse::<DetectionStrategy>().is_err());
}

#[tokio::test]
async fn test_enrich_splices_section_and_observation() {
    let oracle = MockOracle::new().with_reply("  Lembre-se de configurar minDuration.  ");
    let e = enricher(docs(), oracle.clone(), EnrichmentConfig::default());

    let enrichment = e
        .enrich("como criar uma instância", &endpoint("Criar Instância", "Instance", ""))
        .await;

    let section = enrichment
        .complement(ContextCategory::Filters)
        .expect("filters complement");
    assert!(section.starts_with("<!-- ENDPOINT:CREATE_INSTANCE -->"));
    assert!(section.contains("minDuration"));
    assert!(!section.contains("Consultar Filtros"));

    let auxiliary = &enrichment.auxiliary[&ContextCategory::Filters];
    assert!(auxiliary.starts_with("=== PRACTICAL_SCENARIOS ==="));
    assert!(!auxiliary.contains("API_ENDPOINTS"));

    assert_eq!(
        enrichment.observation.as_deref(),
        Some("Lembre-se de configurar minDuration.")
    );

    let calls = oracle.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].system.contains("200 words"));
    assert!(calls[0].user.contains("=== COMPLEMENTO-FILTER ==="));
    assert!(calls[0].user.contains("=== OTHER SECTIONS OF FILTERS ==="));
}

#[tokio::test]
async fn test_enrich_webhook_section_stops_at_subsection() {
    let e = enricher(
        docs(),
        MockOracle::new(),
        EnrichmentConfig::default().with_observations(false),
    );

    let enrichment = e
        .enrich("saude", &endpoint("Saúde dos Webhooks", "Monitoring", ""))
        .await;

    assert_eq!(
        enrichment.complement(ContextCategory::Webhooks),
        Some("<!-- ENDPOINT:WEBHOOK_HEALTH -->\nGET /webhook/health")
    );
    assert!(enrichment.auxiliary.is_empty());
    assert!(enrichment.observation.is_none());
}

#[tokio::test]
async fn test_unrelated_endpoint_is_untouched() {
    let docs = docs();
    let oracle = MockOracle::new();
    let e = enricher(docs.clone(), oracle.clone(), EnrichmentConfig::default());

    let enrichment = e.enrich("grupos", &endpoint("Buscar Grupos", "Group", "")).await;

    assert!(enrichment.is_empty());
    assert_eq!(docs.reads(), 0);
    assert_eq!(oracle.call_count(), 0);
}

#[tokio::test]
async fn test_observation_failure_is_non_fatal() {
    let e = ContextEnricher::new(
        Arc::new(docs()),
        Arc::new(DisabledOracle),
        EnrichmentConfig::default(),
    );

    let enrichment = e
        .enrich("q", &endpoint("Criar Instância", "Instance", ""))
        .await;

    assert!(enrichment.complement(ContextCategory::Filters).is_some());
    assert!(enrichment.observation.is_none());
}

#[tokio::test]
async fn test_missing_supplement_and_tag_are_non_fatal() {
    let empty_docs = MockDocumentSource::new();
    let e = enricher(empty_docs, MockOracle::new(), EnrichmentConfig::default());
    let enrichment = e
        .enrich("q", &endpoint("Criar Instância", "Instance", ""))
        .await;
    assert!(enrichment.is_empty());

    let keyword = EnrichmentConfig::default().with_detection(DetectionStrategy::KeywordTrigger);
    let oracle = MockOracle::new();
    let e = enricher(docs(), oracle.clone(), keyword);
    let enrichment = e
        .enrich("q", &endpoint("Enviar Áudio", "Message", ""))
        .await;
    assert!(enrichment.is_empty());
    assert_eq!(oracle.call_count(), 0);
}
