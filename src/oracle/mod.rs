//! The probabilistic re-ranking oracle and the adapter that shapes its requests.
//!
//! Backends implement [`Oracle`] and are selected once by [`build_oracle`]. The
//! [`OracleAdapter`] renders the catalog as a compact table, parses the reply and
//! degrades every failure to an empty ranking.

pub mod adapter;
pub mod backend;
pub mod config;
pub mod error;
pub mod factory;
pub mod response;
pub mod table;


pub use adapter::OracleAdapter;
#[cfg(any(test, feature = "mock"))]
pub use backend::{MockOracle, RecordedCall};
pub use backend::{DisabledOracle, GenaiOracle, Oracle, fold_prompts};
pub use config::{DEFAULT_ANTHROPIC_MODEL, DEFAULT_OPENAI_MODEL, OracleConfig, OracleProvider};
pub use error::{OracleError, OracleResult};
pub use factory::build_oracle;
pub use response::{OracleRanking, clean_response, parse_rankings};
pub use table::build_table;
