//! Scout library crate (used by the `scout` binary and integration tests).
//!
//! Resolves a free-text question about the WhatsApp gateway API to the single
//! best-matching documented endpoint, its documentation slice and any literal
//! supplementary context.
//!
//! # Public API Surface
//!
//! ## Entry Point
//! - [`Resolver`], [`ResolveResponse`] - Cached query resolution
//! - [`Config`], [`ConfigError`] - Environment configuration
//!
//! ## Pipeline Stages
//! - [`TextualRanker`], [`similarity`] - Deterministic lexical ranking
//! - [`Oracle`], [`OracleAdapter`], [`build_oracle`] - Probabilistic re-ranking backend
//! - [`HybridRanker`] - Textual-first escalation policy
//! - [`CandidateValidator`] - Documentation extraction with backup candidates
//! - [`ContextEnricher`] - Supplementary section splicing
//!
//! ## Data
//! - [`Catalog`], [`CatalogEntry`], [`Location`] - Endpoint catalog
//! - [`DocumentSource`], [`FsDocumentSource`] - Documentation storage
//! - [`ResultCache`] - TTL response memo
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod docs;
pub mod enrichment;
pub mod hashing;
pub mod oracle;
pub mod ranking;
pub mod resolver;
pub mod scoring;
pub mod validation;

pub use cache::{CacheConfig, CachedResponse, ResultCache};
pub use catalog::{Catalog, CatalogEntry, CatalogError, CatalogMetadata, Location, SourceMap};
pub use config::{Config, ConfigError};
#[cfg(any(test, feature = "mock"))]
pub use docs::MockDocumentSource;
pub use docs::{DocsError, DocumentSource, FsDocumentSource};
pub use enrichment::{
    ContextCategory, ContextEnricher, DetectionStrategy, Enrichment, EnrichmentConfig,
};
pub use hashing::{hash_query, query_fingerprint};
#[cfg(any(test, feature = "mock"))]
pub use oracle::MockOracle;
pub use oracle::{
    DisabledOracle, GenaiOracle, Oracle, OracleAdapter, OracleConfig, OracleError,
    OracleProvider, build_oracle,
};
pub use ranking::{HybridConfig, HybridRanker, RankingOutcome, RankingPath};
pub use resolver::{
    ResolveResponse, ResolvedDocument, Resolver, ResolverConfig, ResolverError, ResolverResult,
};
pub use scoring::{RankingWeights, ScoredCandidate, ScoringConfig, TextualRanker, similarity};
pub use validation::{
    CandidateValidator, StructuringMode, ValidatedResult, ValidationConfig, ValidationError,
};
