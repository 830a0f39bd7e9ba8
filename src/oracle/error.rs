use thiserror::Error;

#[derive(Error, Debug)]
/// Failures talking to (or decoding) the ranking oracle.
pub enum OracleError {
    #[error("oracle backend '{backend}' is not available")]
    Unsupported { backend: String },

    #[error("oracle request to {model} failed: {reason}")]
    Request { model: String, reason: String },

    #[error("oracle returned an empty response from {model}")]
    EmptyResponse { model: String },

    #[error("malformed oracle response: {0}")]
    Malformed(String),
}

pub type OracleResult<T> = Result<T, OracleError>;
