use super::*;
use crate::catalog::CatalogEntry;

fn entry(id: &str, name: &str, summary: &str, keywords: &[&str]) -> CatalogEntry {
    CatalogEntry::new(
        id,
        "native",
        "Instance",
        name,
        summary,
        keywords.iter().map(|k| k.to_string()).collect(),
    )
}

#[test]
fn test_normalize_text_folds_case_and_accents() {
    assert_eq!(normalize_text("Áudio"), "audio");
    assert_eq!(normalize_text("Criar Instância"), "criar instancia");
    assert_eq!(normalize_text("ESTATÍSTICAS"), "estatisticas");
}

#[test]
fn test_similarity_containment_is_full_match() {
    assert_eq!(similarity("Áudio", "filtros de audio"), 1.0);
    assert_eq!(similarity("AUDIO", "áudio"), 1.0);
    assert_eq!(similarity("criar instância", "Criar Instancia"), 1.0);
}

#[test]
fn test_similarity_accented_text_matches_plain_text() {
    let accented = similarity("audio", "áudio filtros");
    assert!(accented > 0.0);
    assert_eq!(accented, similarity("audio", "audio filtros"));
    assert_eq!(similarity("instancia", "Criar Instância"), similarity("instancia", "criar instancia"));
}

#[test]
fn test_similarity_empty_inputs() {
    assert_eq!(similarity("anything", ""), 0.0);
    assert_eq!(similarity("", "anything"), 0.0);
    assert_eq!(similarity("   ", "a b c"), 0.0);
}

#[test]
fn test_similarity_whole_token_overlap() {
    let score = similarity("create instance now", "create instance");
    assert!((score - 2.0 / 3.0).abs() < 1e-6, "got {score}");
}

#[test]
fn test_similarity_partial_token_overlap_is_discounted() {
    let score = similarity("instancias", "instancia");
    assert!((score - 0.7).abs() < 1e-6, "got {score}");
}

#[test]
fn test_similarity_short_tokens_never_partially_match() {
    assert_eq!(similarity("abc xyz", "abcd"), 0.0);
}

#[test]
fn test_similarity_partial_hits_counted_once_per_query_token() {
    let score = similarity("filtros zzzz", "filtro filtro2");
    assert!((score - 0.35).abs() < 1e-6, "got {score}");
}

#[test]
fn test_similarity_stays_in_unit_interval() {
    let pairs = [
        ("send text message", "send message text message"),
        ("webhook webhook webhook", "webhook"),
        ("a", "a b c d"),
        ("filtros de áudio", "áudio"),
    ];
    for (query, text) in pairs {
        let score = similarity(query, text);
        assert!((0.0..=1.0).contains(&score), "{query:?} vs {text:?} = {score}");
    }
}

#[test]
fn test_default_weights_sum_to_one() {
    let w = RankingWeights::default();
    assert!((w.name + w.summary + w.keywords - 1.0).abs() < 1e-6);
    assert!(w.validate().is_ok());
    assert!(RankingWeights::new(1.5, 0.0, 0.0).validate().is_err());
}

#[test]
fn test_score_entry_weights_fields() {
    let ranker = TextualRanker::default();
    let full = entry("e0", "Send Message", "send message to a chat", &["message", "send"]);
    assert!((ranker.score_entry("send message", &full) - 1.0).abs() < 1e-6);

    let name_only = entry("e1", "Send Message", "", &[]);
    assert!((ranker.score_entry("send message", &name_only) - 0.4).abs() < 1e-6);
}

#[test]
fn test_rank_threshold_is_inclusive() {
    let ranker = TextualRanker::default();
    let entries = vec![entry("e0", "alpha gamma", "", &[])];

    let ranked = ranker.rank("alpha beta", &entries);

    assert_eq!(ranked.len(), 1);
    assert!((ranked[0].relevance - 0.2).abs() < 1e-6);
}

#[test]
fn test_rank_drops_entries_below_threshold() {
    let ranker = TextualRanker::default();
    let entries = vec![entry("e0", "alpha zzzz", "", &[])];

    assert!(ranker.rank("alpha beta gamma delta", &entries).is_empty());
}

#[test]
fn test_rank_sorts_truncates_and_keeps_ties_in_catalog_order() {
    let ranker = TextualRanker::default();
    let entries = vec![
        entry("weak", "audio", "", &[]),
        entry("tie_a", "audio filters", "audio filters", &[]),
        entry("tie_b", "audio filters", "audio filters", &[]),
        entry("best", "audio filters", "audio filters", &["audio", "filters"]),
        entry("none", "instance", "", &[]),
    ];

    let ranked = ranker.rank("audio filters", &entries);
    let ids: Vec<&str> = ranked.iter().map(|c| c.id.as_str()).collect();

    assert_eq!(ids, vec!["best", "tie_a", "tie_b"]);
    for candidate in &ranked {
        assert_eq!(candidate.confidence, candidate.relevance);
    }
}

#[test]
fn test_rank_empty_catalog_or_query() {
    let ranker = TextualRanker::default();
    assert!(ranker.rank("audio", &[]).is_empty());
    assert!(
        ranker
            .rank("", &[entry("e0", "audio", "audio", &["audio"])])
            .is_empty()
    );
}

#[test]
fn test_scoring_config_validation() {
    assert!(ScoringConfig::default().validate().is_ok());
    assert!(
        ScoringConfig::default()
            .with_min_threshold(1.2)
            .validate()
            .is_err()
    );
    let zero_top = ScoringConfig {
        top_n: 0,
        ..ScoringConfig::default()
    };
    assert!(zero_top.validate().is_err());
}
