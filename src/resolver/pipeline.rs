use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::error::ResolverResult;
use super::types::{
    NO_CANDIDATES_MESSAGE, NO_DETAILED_RESULT_MESSAGE, ResolveResponse, ResolvedDocument,
};
use crate::cache::{CacheConfig, ResultCache};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::docs::{DocumentSource, FsDocumentSource};
use crate::enrichment::{ContextEnricher, EnrichmentConfig};
use crate::hashing::query_fingerprint;
use crate::oracle::{Oracle, OracleAdapter, build_oracle};
use crate::ranking::{HybridConfig, HybridRanker};
use crate::scoring::{ScoringConfig, TextualRanker};
use crate::validation::{CandidateValidator, ValidationConfig};

/// Component settings for one [`Resolver`].
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    pub scoring: ScoringConfig,
    pub hybrid: HybridConfig,
    pub validation: ValidationConfig,
    pub enrichment: EnrichmentConfig,
    pub cache: CacheConfig,
}

impl ResolverConfig {
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_hybrid(mut self, hybrid: HybridConfig) -> Self {
        self.hybrid = hybrid;
        self
    }

    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_enrichment(mut self, enrichment: EnrichmentConfig) -> Self {
        self.enrichment = enrichment;
        self
    }

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }
}

impl From<&Config> for ResolverConfig {
    fn from(config: &Config) -> Self {
        Self {
            scoring: config.scoring,
            hybrid: config.hybrid,
            validation: config.validation,
            enrichment: config.enrichment.clone(),
            cache: config.cache,
        }
    }
}

/// Resolves free-text queries to one documented endpoint.
///
/// Pipeline per query:
/// 1. Result cache lookup (exact raw query).
/// 2. Hybrid ranking (textual first, oracle only when textual is unsure).
/// 3. Candidate validation with backup escalation.
/// 4. Context enrichment (non-fatal).
///
/// Only successful responses are cached.
pub struct Resolver {
    catalog: Arc<Catalog>,
    ranker: HybridRanker,
    validator: CandidateValidator,
    enricher: ContextEnricher,
    cache: ResultCache<ResolveResponse>,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("catalog_entries", &self.catalog.len())
            .field("validator", &self.validator)
            .field("enricher", &self.enricher)
            .field("cache", &self.cache)
            .finish()
    }
}

impl Resolver {
    pub fn new(
        catalog: Arc<Catalog>,
        oracle: Arc<dyn Oracle>,
        docs: Arc<dyn DocumentSource>,
        config: ResolverConfig,
    ) -> Self {
        let adapter = OracleAdapter::new(Arc::clone(&oracle))
            .with_min_threshold(config.scoring.min_threshold)
            .with_top_n(config.scoring.top_n);
        let ranker = HybridRanker::new(TextualRanker::new(config.scoring), adapter, config.hybrid);
        let validator =
            CandidateValidator::new(Arc::clone(&docs), Arc::clone(&oracle), config.validation);
        let enricher = ContextEnricher::new(docs, oracle, config.enrichment);

        Self {
            catalog,
            ranker,
            validator,
            enricher,
            cache: ResultCache::new(config.cache),
        }
    }

    /// Loads the catalog and wires filesystem docs plus the configured oracle backend.
    pub fn from_config(config: &Config) -> ResolverResult<Self> {
        let catalog = Arc::new(Catalog::load(config.catalog_path())?);
        let fs_docs = FsDocumentSource::new(&config.docs_root);
        let oracle = build_oracle(&config.oracle);

        info!(
            docs_root = %fs_docs.root().display(),
            endpoints = catalog.endpoints().len(),
            webhooks = catalog.webhook_count(),
            oracle = oracle.name(),
            structuring = config.validation.structuring.as_str(),
            cache_enabled = config.cache.enabled,
            "Resolver ready"
        );

        let docs: Arc<dyn DocumentSource> = Arc::new(fs_docs);
        Ok(Self::new(catalog, oracle, docs, ResolverConfig::from(config)))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cache(&self) -> &ResultCache<ResolveResponse> {
        &self.cache
    }

    /// Resolves `query`, serving an unexpired cached response when one exists.
    #[instrument(
        skip(self, query),
        fields(
            request_id = %Uuid::new_v4(),
            query_fp = query_fingerprint(query),
            query_len = query.len()
        )
    )]
    pub async fn resolve(&self, query: &str) -> Arc<ResolveResponse> {
        if let Some(cached) = self.cache.get(query) {
            debug!("Serving cached response");
            return cached;
        }

        let response = Arc::new(self.resolve_uncached(query).await);
        if response.is_success() {
            self.cache.insert(query, Arc::clone(&response));
        }
        response
    }

    async fn resolve_uncached(&self, query: &str) -> ResolveResponse {
        let outcome = self.ranker.rank(query, self.catalog.entries()).await;
        if outcome.is_empty() {
            info!(path = outcome.path.as_str(), "No endpoint matched");
            return ResolveResponse::failure(NO_CANDIDATES_MESSAGE, query);
        }

        let report = match self.validator.validate(query, &outcome.candidates).await {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "Validation produced no result");
                return ResolveResponse::failure(NO_DETAILED_RESULT_MESSAGE, query);
            }
        };

        let enrichment = self.enricher.enrich(query, &report.selected.endpoint).await;

        info!(
            endpoint = %report.selected.endpoint.name,
            final_score = report.selected.final_score,
            path = outcome.path.as_str(),
            attempts = report.attempts.len(),
            complements = enrichment.complements.len(),
            enriched = !enrichment.is_empty(),
            "Query resolved"
        );

        ResolveResponse::Success(Box::new(ResolvedDocument::new(
            report.selected,
            enrichment,
            outcome.path,
        )))
    }
}
