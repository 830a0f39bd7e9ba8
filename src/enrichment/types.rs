use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Supplementary documentation families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextCategory {
    Filters,
    Webhooks,
}

impl ContextCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filters => "filters",
            Self::Webhooks => "webhooks",
        }
    }

    /// Response field carrying this category's literal section.
    pub fn response_key(&self) -> &'static str {
        match self {
            Self::Filters => "complemento-filter",
            Self::Webhooks => "complemento-webhook",
        }
    }

    /// Supplement document key under the docs root.
    pub fn default_document(&self) -> &'static str {
        match self {
            Self::Filters => "custom/filters.md",
            Self::Webhooks => "custom/dual-webhook-system.md",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// How the enricher decides which categories apply to an endpoint.
pub enum DetectionStrategy {
    /// Endpoint name must be in the category's exact-name set.
    #[default]
    ExactName,
    /// Any trigger word in the endpoint's name, category or summary.
    KeywordTrigger,
}

impl DetectionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactName => "exact",
            Self::KeywordTrigger => "keyword",
        }
    }
}

impl std::str::FromStr for DetectionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" | "exact_name" | "name" => Ok(Self::ExactName),
            "keyword" | "keywords" | "trigger" => Ok(Self::KeywordTrigger),
            _ => Err(format!("Unknown detection strategy: {}", s)),
        }
    }
}

const FILTER_TAGS: [(&str, &str); 10] = [
    ("Criar Instância", "CREATE_INSTANCE"),
    ("Consultar Filtros", "GET_FILTERS"),
    ("Atualizar Filtros", "UPDATE_FILTERS"),
    ("Consultar Filtros de Áudio", "GET_AUDIO_FILTERS"),
    ("Atualizar Filtros de Áudio", "UPDATE_AUDIO_FILTERS"),
    ("Estatísticas de Filtros de Áudio", "GET_AUDIO_STATS"),
    ("Resetar Estatísticas de Áudio", "RESET_AUDIO_STATS"),
    ("Estatísticas da Fila", "GET_QUEUE_STATS"),
    ("Consultar Configuração Global", "GET_WEBHOOK_CONFIG"),
    ("Criar/Atualizar Configuração Global", "POST_WEBHOOK_CONFIG"),
];

const WEBHOOK_TAGS: [(&str, &str); 9] = [
    ("Saúde dos Webhooks", "WEBHOOK_HEALTH"),
    ("Métricas dos Webhooks", "WEBHOOK_METRICS"),
    ("Consultar Logs", "WEBHOOK_LOGS"),
    ("Exportar Logs", "WEBHOOK_LOGS_EXPORT"),
    ("Listar Falhas", "WEBHOOK_FAILED"),
    ("Remover Falha Específica", "DELETE_FAILED_WEBHOOK"),
    ("Limpar Todas as Falhas", "DELETE_ALL_FAILED"),
    ("Testar Webhook", "WEBHOOK_TEST"),
    ("Limpar Logs", "DELETE_LOGS"),
];

const FILTER_TRIGGERS: [&str; 8] = [
    "filtro", "filter", "audio", "message", "text", "duration", "size", "type",
];

const WEBHOOK_TRIGGERS: [&str; 7] = [
    "webhook",
    "monitoring",
    "dual",
    "health",
    "retry",
    "payload",
    "callback",
];

#[derive(Debug, Clone, PartialEq)]
/// Membership rules and source document for one category.
pub struct CategoryRule {
    pub category: ContextCategory,
    /// Supplement document key.
    pub document: String,
    /// Exact endpoint names that receive this category.
    pub endpoints: BTreeSet<String>,
    /// Lowercase trigger words for [`DetectionStrategy::KeywordTrigger`].
    pub triggers: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: ContextCategory) -> Self {
        Self {
            category,
            document: category.default_document().to_string(),
            endpoints: BTreeSet::new(),
            triggers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Supplement registry and enrichment switches.
pub struct EnrichmentConfig {
    pub detection: DetectionStrategy,
    /// Ask the oracle for an observation when supplements were found.
    pub observations: bool,
    pub rules: Vec<CategoryRule>,
    /// Endpoint name → `<!-- ENDPOINT:<TAG> -->` tag.
    pub tags: BTreeMap<String, String>,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        let mut filters = CategoryRule::new(ContextCategory::Filters);
        filters.endpoints = FILTER_TAGS.iter().map(|(n, _)| n.to_string()).collect();
        filters.triggers = FILTER_TRIGGERS.iter().map(|t| t.to_string()).collect();

        let mut webhooks = CategoryRule::new(ContextCategory::Webhooks);
        webhooks.endpoints = WEBHOOK_TAGS.iter().map(|(n, _)| n.to_string()).collect();
        webhooks.triggers = WEBHOOK_TRIGGERS.iter().map(|t| t.to_string()).collect();

        let tags = FILTER_TAGS
            .iter()
            .chain(WEBHOOK_TAGS.iter())
            .map(|(name, tag)| (name.to_string(), tag.to_string()))
            .collect();

        Self {
            detection: DetectionStrategy::default(),
            observations: true,
            rules: vec![filters, webhooks],
            tags,
        }
    }
}

impl EnrichmentConfig {
    pub fn with_detection(mut self, detection: DetectionStrategy) -> Self {
        self.detection = detection;
        self
    }

    pub fn with_observations(mut self, observations: bool) -> Self {
        self.observations = observations;
        self
    }

    pub fn rule(&self, category: ContextCategory) -> Option<&CategoryRule> {
        self.rules.iter().find(|r| r.category == category)
    }

    pub fn tag_for(&self, endpoint_name: &str) -> Option<&str> {
        self.tags.get(endpoint_name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Supplementary content gathered for one endpoint.
pub struct Enrichment {
    /// Literal endpoint sections, keyed by category.
    pub complements: BTreeMap<ContextCategory, String>,
    /// Rendered auxiliary sections, keyed by category.
    pub auxiliary: BTreeMap<ContextCategory, String>,
    pub observation: Option<String>,
}

impl Enrichment {
    pub fn is_empty(&self) -> bool {
        self.complements.is_empty() && self.auxiliary.is_empty() && self.observation.is_none()
    }

    pub fn complement(&self, category: ContextCategory) -> Option<&str> {
        self.complements.get(&category).map(String::as_str)
    }
}
