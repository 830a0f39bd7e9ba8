use std::sync::Arc;

use super::*;
use crate::catalog::{CatalogEntry, Location, SourceMap};
use crate::docs::{DocsError, MockDocumentSource};
use crate::oracle::{DisabledOracle, MockOracle};
use crate::scoring::ScoredCandidate;

fn numbered_body(lines: usize) -> String {
    (1..=lines).map(|i| format!("line {}\n", i)).collect()
}

fn docs() -> MockDocumentSource {
    let docs = MockDocumentSource::new();
    docs.insert_body("native", &numbered_body(30));
    let mut map = SourceMap::default();
    map.insert("Instance", "Mapped Endpoint", Location::new(20, 21));
    docs.insert_map("native", map);
    docs
}

fn located(id: &str, relevance: f32, start: usize, end: usize) -> ScoredCandidate {
    let entry = CatalogEntry::new(id, "native", "Instance", id, "summary", vec![])
        .with_location(Location::new(start, end));
    ScoredCandidate::from_entry(&entry, relevance, relevance)
}

fn unlocated(id: &str, name: &str, relevance: f32) -> ScoredCandidate {
    let entry = CatalogEntry::new(id, "native", "Instance", name, "summary", vec![]);
    ScoredCandidate::from_entry(&entry, relevance, relevance)
}

fn graded(final_score: f32) -> String {
    format!("```json\n{{\"endpoint\": {{\"method\": \"POST\"}}, \"final_score\": {final_score}, \"confidence\": 0.6}}\n```")
}

fn oracle_validator(docs: MockDocumentSource, oracle: MockOracle) -> CandidateValidator {
    CandidateValidator::new(
        Arc::new(docs),
        Arc::new(oracle),
        ValidationConfig::default().with_structuring(StructuringMode::Oracle),
    )
}

#[tokio::test]
async fn test_literal_validation_uses_relevance_and_context() {
    let validator = CandidateValidator::new(
        Arc::new(docs()),
        Arc::new(DisabledOracle),
        ValidationConfig::default(),
    );
    let candidates = vec![located("a", 0.9, 10, 12)];

    let report = validator
        .validate("criar instância", &candidates)
        .await
        .expect("validation succeeds");

    let selected = &report.selected;
    assert_eq!(selected.documentation, "line 8\nline 9\nline 10\nline 11\nline 12\nline 13\nline 14");
    assert_eq!(selected.final_score, 0.9);
    assert_eq!(selected.confidence, 0.9);
    assert!(selected.structured.is_none());
    assert_eq!(
        selected.match_reasoning,
        "Endpoint 'a' selecionado por correspondência com 'criar instância'"
    );
    assert_eq!(report.attempted_ids(), vec!["a"]);
}

#[tokio::test]
async fn test_location_falls_back_to_source_map() {
    let validator = CandidateValidator::new(
        Arc::new(docs()),
        Arc::new(DisabledOracle),
        ValidationConfig::default().with_context_lines(0),
    );

    let span = validator
        .extract(&unlocated("m", "Mapped Endpoint", 0.5))
        .await
        .expect("map lookup");

    assert_eq!(span, "line 20\nline 21");
}

#[tokio::test]
async fn test_response_end_line_extends_span() {
    let entry = CatalogEntry::new("r", "native", "Instance", "r", "", vec![])
        .with_location(Location::new(5, 5).with_response_end(7));
    let candidate = ScoredCandidate::from_entry(&entry, 0.8, 0.8);
    let validator = CandidateValidator::new(
        Arc::new(docs()),
        Arc::new(DisabledOracle),
        ValidationConfig::default().with_context_lines(0),
    );

    let span = validator.extract(&candidate).await.expect("span");

    assert_eq!(span, "line 5\nline 6\nline 7");
}

#[tokio::test]
async fn test_convincing_primary_stops_early() {
    let oracle = MockOracle::new().with_reply(graded(0.9));
    let validator = oracle_validator(docs(), oracle.clone());
    let candidates = vec![located("a", 0.8, 1, 2), located("b", 0.7, 3, 4)];

    let report = validator.validate("q", &candidates).await.expect("validated");

    assert_eq!(report.selected.endpoint.id, "a");
    assert_eq!(report.selected.final_score, 0.9);
    assert_eq!(report.selected.confidence, 0.6);
    assert!(report.selected.structured.is_some());
    assert_eq!(report.attempted_ids(), vec!["a"]);
    assert_eq!(oracle.call_count(), 1);
}

#[tokio::test]
async fn test_degraded_primary_escalates_to_third_candidate() {
    let oracle = MockOracle::new()
        .with_reply(graded(0.5))
        .with_reply(graded(0.6))
        .with_reply(graded(0.65));
    let validator = oracle_validator(docs(), oracle.clone());
    let candidates = vec![
        located("a", 0.9, 1, 2),
        located("b", 0.8, 3, 4),
        located("c", 0.7, 5, 6),
    ];

    let report = validator.validate("q", &candidates).await.expect("validated");

    assert_eq!(report.attempted_ids(), vec!["a", "b", "c"]);
    assert_eq!(report.selected.endpoint.id, "c");
    assert_eq!(oracle.call_count(), 3);
}

#[tokio::test]
async fn test_convincing_second_candidate_skips_third() {
    let oracle = MockOracle::new()
        .with_reply(graded(0.5))
        .with_reply(graded(0.8));
    let validator = oracle_validator(docs(), oracle.clone());
    let candidates = vec![
        located("a", 0.9, 1, 2),
        located("b", 0.8, 3, 4),
        located("c", 0.7, 5, 6),
    ];

    let report = validator.validate("q", &candidates).await.expect("validated");

    assert_eq!(report.attempted_ids(), vec!["a", "b"]);
    assert_eq!(report.selected.endpoint.id, "b");
}

#[tokio::test]
async fn test_ties_keep_earlier_candidate() {
    let oracle = MockOracle::new()
        .with_reply(graded(0.5))
        .with_reply(graded(0.5))
        .with_reply(graded(0.5));
    let validator = oracle_validator(docs(), oracle);
    let candidates = vec![
        located("a", 0.9, 1, 2),
        located("b", 0.8, 3, 4),
        located("c", 0.7, 5, 6),
    ];

    let report = validator.validate("q", &candidates).await.expect("validated");

    assert_eq!(report.attempts.len(), 3);
    assert_eq!(report.selected.endpoint.id, "a");
}

#[tokio::test]
async fn test_structuring_failure_halves_relevance() {
    let oracle = MockOracle::new()
        .with_failure("rate limited")
        .with_reply(graded(0.95));
    let validator = oracle_validator(docs(), oracle);
    let candidates = vec![located("a", 0.9, 1, 2), located("b", 0.8, 3, 4)];

    let report = validator.validate("q", &candidates).await.expect("validated");

    assert_eq!(
        report.attempts[0].outcome,
        AttemptOutcome::Validated { final_score: 0.45 }
    );
    assert_eq!(report.selected.endpoint.id, "b");
}

#[tokio::test]
async fn test_structuring_reply_without_score_is_a_failure() {
    let oracle = MockOracle::new().with_reply(r#"{"endpoint": {}, "final_score": 3.0}"#);
    let validator = oracle_validator(docs(), oracle);

    let result = validator
        .validate_candidate("q", &located("a", 0.6, 1, 2))
        .await
        .expect("extraction succeeds");

    assert!(result.structured.is_none());
    assert!((result.final_score - 0.3).abs() < 1e-6);
    assert!(!result.documentation.is_empty());
}

#[tokio::test]
async fn test_primary_extraction_failure_is_terminal() {
    let validator = oracle_validator(docs(), MockOracle::new());
    let candidates = vec![
        unlocated("ghost", "Not In Map", 0.9),
        located("b", 0.8, 3, 4),
    ];

    let err = validator.validate("q", &candidates).await.unwrap_err();

    match err {
        ValidationError::PrimaryExtractionFailed { candidate, source } => {
            assert_eq!(candidate, "ghost");
            assert!(matches!(source, DocsError::LocationNotFound { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_backup_is_skipped_and_stops_escalation() {
    let oracle = MockOracle::new().with_reply(graded(0.2));
    let validator = oracle_validator(docs(), oracle.clone());
    let candidates = vec![
        located("a", 0.9, 1, 2),
        located("broken", 0.8, 99, 100),
        located("c", 0.7, 5, 6),
    ];

    let report = validator.validate("q", &candidates).await.expect("validated");

    assert_eq!(report.attempted_ids(), vec!["a", "broken"]);
    assert!(matches!(
        report.attempts[1].outcome,
        AttemptOutcome::Skipped { .. }
    ));
    assert_eq!(report.selected.endpoint.id, "a");
    assert_eq!(oracle.call_count(), 1);
}

#[tokio::test]
async fn test_no_candidates() {
    let validator = oracle_validator(docs(), MockOracle::new());
    assert!(matches!(
        validator.validate("q", &[]).await,
        Err(ValidationError::NoCandidates)
    ));
}

#[test]
fn test_structuring_mode_from_str() {
    assert_eq!("literal".parse::<StructuringMode>(), Ok(StructuringMode::Literal));
    assert_eq!("ORACLE".parse::<StructuringMode>(), Ok(StructuringMode::Oracle));
    assert!("magic".parse::<StructuringMode>().is_err());
}
