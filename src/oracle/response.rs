use serde::Deserialize;

use super::error::{OracleError, OracleResult};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// One row of the oracle's ranking reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OracleRanking {
    /// 0-based row of the table sent to the oracle.
    pub index: usize,
    pub probability: f32,
    #[serde(default)]
    pub confidence: Option<f32>,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RankingReply {
    rankings: Vec<OracleRanking>,
}

/// Strips a surrounding markdown code fence, preferring a ```` ```json ```` fence.
///
/// An unterminated fence leaves the (trimmed) text unchanged.
pub fn clean_response(raw: &str) -> &str {
    let opener = if raw.contains(JSON_FENCE) {
        JSON_FENCE
    } else if raw.contains(FENCE) {
        FENCE
    } else {
        return raw.trim();
    };

    let Some(open) = raw.find(opener) else {
        return raw.trim();
    };
    let body_start = open + opener.len();
    match raw[body_start..].find(FENCE) {
        Some(len) => raw[body_start..body_start + len].trim(),
        None => raw.trim(),
    }
}

/// Parses a ranking reply, rejecting it whole if any row is invalid.
///
/// A row is invalid when its index is outside `0..row_count` or its probability or
/// confidence lies outside `[0, 1]`.
pub fn parse_rankings(raw: &str, row_count: usize) -> OracleResult<Vec<OracleRanking>> {
    let reply: RankingReply = serde_json::from_str(clean_response(raw))
        .map_err(|e| OracleError::Malformed(e.to_string()))?;

    for ranking in &reply.rankings {
        if ranking.index >= row_count {
            return Err(OracleError::Malformed(format!(
                "index {} outside table of {} rows",
                ranking.index, row_count
            )));
        }
        if !in_unit_interval(ranking.probability) {
            return Err(OracleError::Malformed(format!(
                "probability {} for row {} outside [0, 1]",
                ranking.probability, ranking.index
            )));
        }
        if let Some(confidence) = ranking.confidence
            && !in_unit_interval(confidence)
        {
            return Err(OracleError::Malformed(format!(
                "confidence {} for row {} outside [0, 1]",
                confidence, ranking.index
            )));
        }
    }

    Ok(reply.rankings)
}

pub(crate) fn in_unit_interval(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}
