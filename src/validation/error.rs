use thiserror::Error;

use crate::docs::DocsError;

#[derive(Error, Debug)]
/// Terminal validation failures. Later candidates failing extraction are skipped, not
/// reported here.
pub enum ValidationError {
    #[error("no candidates to validate")]
    NoCandidates,

    #[error("extraction failed for primary candidate '{candidate}': {source}")]
    PrimaryExtractionFailed {
        candidate: String,
        #[source]
        source: DocsError,
    },
}

pub type ValidationResult<T> = Result<T, ValidationError>;
