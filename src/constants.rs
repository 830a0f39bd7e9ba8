//! Cross-cutting, shared constants.
//!
//! Component configs (`RankingWeights`, `HybridConfig`, `ValidationConfig`, ...) take
//! their `Default` values from here so the env layer and the components cannot drift.

/// Weight of the name field in the textual score.
pub const DEFAULT_NAME_WEIGHT: f32 = 0.40;
/// Weight of the summary field in the textual score.
pub const DEFAULT_SUMMARY_WEIGHT: f32 = 0.35;
/// Weight of the joined-keywords field in the textual score.
pub const DEFAULT_KEYWORDS_WEIGHT: f32 = 0.25;

/// Candidates (textual or oracle) scoring below this are discarded.
pub const DEFAULT_MIN_THRESHOLD: f32 = 0.2;

/// Textual top score at or above which the oracle is skipped.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.75;

/// The oracle must beat the textual top score by this factor to win.
pub const DEFAULT_ESCALATION_MARGIN: f32 = 1.1;

/// Number of candidates carried from ranking into validation.
pub const DEFAULT_TOP_N: usize = 3;

/// Discount applied to partial (substring) token hits.
pub const SUBSTRING_DISCOUNT: f32 = 0.7;

/// Query tokens must be longer than this (in chars) to count as partial hits.
pub const MIN_PARTIAL_TOKEN_CHARS: usize = 3;

/// Candidate 2 is validated when `final_score < ratio * relevance` for candidate 1.
pub const DEFAULT_DEGRADATION_RATIO: f32 = 0.8;

/// Candidate 3 is validated when no earlier candidate reached this final score.
pub const DEFAULT_ACCEPTANCE_SCORE: f32 = 0.7;

/// Lines of context added on each side of an extracted documentation span.
pub const DEFAULT_CONTEXT_LINES: usize = 2;

/// Final score multiplier when oracle structuring fails.
pub const STRUCTURING_FAILURE_PENALTY: f32 = 0.5;

/// Default response cache time-to-live.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Longest TTL the cache backend accepts (1000 years).
pub const MAX_CACHE_TTL_SECS: u64 = 1000 * 365 * 24 * 3600;

/// Oracle table column limits.
pub const TABLE_NAME_MAX_CHARS: usize = 50;
pub const TABLE_SUMMARY_MAX_CHARS: usize = 100;
pub const TABLE_MAX_KEYWORDS: usize = 5;

/// Word budget requested for synthesized observations.
pub const OBSERVATION_WORD_LIMIT: usize = 200;

/// Oracle sampling temperature.
pub const DEFAULT_ORACLE_TEMPERATURE: f32 = 0.1;

/// Oracle response token cap.
pub const DEFAULT_ORACLE_MAX_TOKENS: u32 = 8000;
