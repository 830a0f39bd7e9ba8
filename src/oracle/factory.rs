use std::sync::Arc;

use tracing::info;

use super::backend::{DisabledOracle, GenaiOracle, Oracle};
use super::config::{OracleConfig, OracleProvider};

/// Builds the [`Oracle`] implementation for the config.
pub fn build_oracle(config: &OracleConfig) -> Arc<dyn Oracle> {
    match config.provider {
        OracleProvider::Anthropic | OracleProvider::OpenAi => {
            info!(
                provider = config.provider.as_str(),
                model = config.model(),
                "Oracle backend configured"
            );
            Arc::new(GenaiOracle::new(config))
        }
        OracleProvider::Disabled => {
            info!("Oracle disabled; ranking stays textual");
            Arc::new(DisabledOracle)
        }
    }
}
