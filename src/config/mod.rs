//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `SCOUT_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::constants::MAX_CACHE_TTL_SECS;
use crate::enrichment::EnrichmentConfig;
use crate::oracle::OracleConfig;
use crate::ranking::HybridConfig;
use crate::scoring::{RankingWeights, ScoringConfig};
use crate::validation::ValidationConfig;

/// Default documentation root.
pub const DEFAULT_DOCS_ROOT: &str = "./endpoints-and-hooks";
/// Catalog file name under the docs root.
pub const DEFAULT_CATALOG_FILENAME: &str = "consolidated-map.json";

/// Resolver configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SCOUT_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of location maps, bodies and supplements. Default: `./endpoints-and-hooks`.
    pub docs_root: PathBuf,

    /// Catalog document. Default: `<docs_root>/consolidated-map.json`.
    pub catalog_path: Option<PathBuf>,

    pub oracle: OracleConfig,
    pub scoring: ScoringConfig,
    pub hybrid: HybridConfig,
    pub validation: ValidationConfig,
    pub enrichment: EnrichmentConfig,
    pub cache: CacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docs_root: PathBuf::from(DEFAULT_DOCS_ROOT),
            catalog_path: None,
            oracle: OracleConfig::default(),
            scoring: ScoringConfig::default(),
            hybrid: HybridConfig::default(),
            validation: ValidationConfig::default(),
            enrichment: EnrichmentConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    const ENV_DOCS_ROOT: &'static str = "SCOUT_DOCS_ROOT";
    const ENV_CATALOG_PATH: &'static str = "SCOUT_CATALOG_PATH";
    const ENV_ORACLE_PROVIDER: &'static str = "SCOUT_ORACLE_PROVIDER";
    const ENV_ORACLE_MODEL: &'static str = "SCOUT_ORACLE_MODEL";
    const ENV_ORACLE_TEMPERATURE: &'static str = "SCOUT_ORACLE_TEMPERATURE";
    const ENV_ORACLE_MAX_TOKENS: &'static str = "SCOUT_ORACLE_MAX_TOKENS";
    const ENV_MIN_THRESHOLD: &'static str = "SCOUT_MIN_THRESHOLD";
    const ENV_NAME_WEIGHT: &'static str = "SCOUT_NAME_WEIGHT";
    const ENV_SUMMARY_WEIGHT: &'static str = "SCOUT_SUMMARY_WEIGHT";
    const ENV_KEYWORDS_WEIGHT: &'static str = "SCOUT_KEYWORDS_WEIGHT";
    const ENV_CONFIDENCE_THRESHOLD: &'static str = "SCOUT_CONFIDENCE_THRESHOLD";
    const ENV_STRUCTURING: &'static str = "SCOUT_STRUCTURING";
    const ENV_ENRICHMENT_DETECTION: &'static str = "SCOUT_ENRICHMENT_DETECTION";
    const ENV_OBSERVATIONS: &'static str = "SCOUT_OBSERVATIONS";
    const ENV_CACHE_ENABLED: &'static str = "SCOUT_CACHE_ENABLED";
    const ENV_CACHE_TTL_SECS: &'static str = "SCOUT_CACHE_TTL_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let docs_root = Self::parse_path_from_env(Self::ENV_DOCS_ROOT, defaults.docs_root);
        let catalog_path = Self::parse_optional_path_from_env(Self::ENV_CATALOG_PATH);

        let mut oracle = OracleConfig::default()
            .with_provider(Self::parse_from_env(
                Self::ENV_ORACLE_PROVIDER,
                defaults.oracle.provider,
            )?)
            .with_temperature(Self::parse_from_env(
                Self::ENV_ORACLE_TEMPERATURE,
                defaults.oracle.temperature,
            )?)
            .with_max_tokens(Self::parse_from_env(
                Self::ENV_ORACLE_MAX_TOKENS,
                defaults.oracle.max_tokens,
            )?);
        if let Some(model) = Self::parse_optional_string_from_env(Self::ENV_ORACLE_MODEL) {
            oracle = oracle.with_model(model);
        }

        let weights = RankingWeights::new(
            Self::parse_from_env(Self::ENV_NAME_WEIGHT, defaults.scoring.weights.name)?,
            Self::parse_from_env(Self::ENV_SUMMARY_WEIGHT, defaults.scoring.weights.summary)?,
            Self::parse_from_env(Self::ENV_KEYWORDS_WEIGHT, defaults.scoring.weights.keywords)?,
        );
        let scoring = defaults
            .scoring
            .with_weights(weights)
            .with_min_threshold(Self::parse_from_env(
                Self::ENV_MIN_THRESHOLD,
                defaults.scoring.min_threshold,
            )?);

        let hybrid = defaults
            .hybrid
            .with_confidence_threshold(Self::parse_from_env(
                Self::ENV_CONFIDENCE_THRESHOLD,
                defaults.hybrid.confidence_threshold,
            )?);

        let validation = defaults.validation.with_structuring(Self::parse_from_env(
            Self::ENV_STRUCTURING,
            defaults.validation.structuring,
        )?);

        let detection =
            Self::parse_from_env(Self::ENV_ENRICHMENT_DETECTION, defaults.enrichment.detection)?;
        let observations =
            Self::parse_bool_from_env(Self::ENV_OBSERVATIONS, defaults.enrichment.observations)?;
        let enrichment = defaults
            .enrichment
            .with_detection(detection)
            .with_observations(observations);

        let cache = defaults
            .cache
            .with_enabled(Self::parse_bool_from_env(
                Self::ENV_CACHE_ENABLED,
                defaults.cache.enabled,
            )?)
            .with_ttl(Duration::from_secs(Self::parse_from_env(
                Self::ENV_CACHE_TTL_SECS,
                defaults.cache.ttl.as_secs(),
            )?));

        Ok(Self {
            docs_root,
            catalog_path,
            oracle,
            scoring,
            hybrid,
            validation,
            enrichment,
            cache,
        })
    }

    /// Resolved catalog path.
    pub fn catalog_path(&self) -> PathBuf {
        self.catalog_path
            .clone()
            .unwrap_or_else(|| self.docs_root.join(DEFAULT_CATALOG_FILENAME))
    }

    /// Validates score ranges, the cache TTL and paths (does not create anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit_values = [
            ("min_threshold", self.scoring.min_threshold),
            ("name_weight", self.scoring.weights.name),
            ("summary_weight", self.scoring.weights.summary),
            ("keywords_weight", self.scoring.weights.keywords),
            ("confidence_threshold", self.hybrid.confidence_threshold),
        ];
        for (name, value) in unit_values {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfUnitRange { name, value });
            }
        }

        self.scoring
            .validate()
            .map_err(|reason| ConfigError::Invalid { reason })?;

        if self.cache.ttl.as_secs() > MAX_CACHE_TTL_SECS {
            return Err(ConfigError::TtlTooLong {
                ttl_secs: self.cache.ttl.as_secs(),
                max_secs: MAX_CACHE_TTL_SECS,
            });
        }

        if self.docs_root.exists() && !self.docs_root.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.docs_root.clone(),
            });
        }

        Self::require_file(&self.catalog_path())
    }

    fn require_file(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_file() {
            return Err(ConfigError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn parse_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidValue {
                    name: var_name,
                    value: value.clone(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    name: var_name,
                    value,
                    reason: "expected true or false".to_string(),
                }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        Self::parse_optional_string_from_env(var_name).map(PathBuf::from)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
