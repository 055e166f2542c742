//! Integration tests for prepared queries.

use cardprint::prelude::*;
use cardprint::query::{ClauseKind, QueryClause};

fn annotated(cards: Vec<Card>) -> Result<Vec<ProcessedCard>> {
    let annotator = Annotator::new(
        FieldConfiguration::default(),
        &ConceptMap::from_cards(&cards),
        SynonymMap::new(),
    )?;
    Ok(cards
        .into_iter()
        .map(|card| annotator.annotate(card, FallbackTextMap::new()))
        .collect())
}

#[test]
fn test_single_word_query_has_one_required_clause_per_field() {
    let fields = FieldConfiguration::default();
    let query = PreparedQuery::new("dogs", &fields);

    assert_eq!(query.words(), ["dog"]);
    assert_eq!(query.field_clauses().len(), fields.len());
    for descriptor in fields.iter() {
        let clauses = query.clauses_for(descriptor.field);
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].kind, ClauseKind::Phrase);
        assert!(clauses[0].required);
        assert_eq!(
            Some(clauses[0].weight),
            fields.relative_weight(descriptor.field)
        );
    }
}

#[test]
fn test_two_word_query_weights() {
    let query = PreparedQuery::new("foo bar", &FieldConfiguration::default());
    let title: &[QueryClause] = query.clauses_for(TextField::Title);

    assert_eq!(title.len(), 4);
    assert_eq!(title[0].kind, ClauseKind::Phrase);
    assert_eq!(title[0].weight, 1.0);
    assert_eq!(title[1].kind, ClauseKind::AllWords);
    assert_eq!(title[1].weight, 0.5);
    for clause in &title[2..] {
        assert_eq!(clause.kind, ClauseKind::Word);
        assert!(!clause.required);
        assert!(clause.weight > 0.0 && clause.weight < 0.1);
    }

    let body = query.clauses_for(TextField::Body);
    assert_eq!(body[0].weight, 0.5);
    assert_eq!(body[1].weight, 0.25);
}

#[test]
fn test_filters_are_extracted_anywhere() {
    let fields = FieldConfiguration::default();

    for raw in [
        "filter:work graph theory",
        "graph filter:work theory",
        "graph theory filter:work",
        "graph theory FILTER:work",
    ] {
        let query = PreparedQuery::new(raw, &fields);
        assert_eq!(query.words(), ["graph", "theori"], "query {raw:?}");
        assert_eq!(query.filters(), ["work"], "query {raw:?}");
    }

    let (text, filters) = extract_filters_from_query("filter:a x filter:b");
    assert_eq!(text, "x");
    assert_eq!(filters, ["a", "b"]);
}

#[test]
fn test_hyphenated_query_adds_pair_clauses() {
    let query = PreparedQuery::new("state-of-the-art search", &FieldConfiguration::default());
    let pairs: Vec<&QueryClause> = query
        .clauses_for(TextField::Title)
        .iter()
        .filter(|clause| clause.kind == ClauseKind::HyphenPair)
        .collect();

    assert!(!pairs.is_empty());
    assert!(pairs.iter().all(|clause| !clause.required));
    assert!(pairs.iter().any(|clause| clause.words == [stem_join(&["state", "of"])]));
}

#[test]
fn test_full_matches_rank_first() -> Result<()> {
    let cards = annotated(vec![
        Card::builder("words-apart")
            .title("Search")
            .body("<p>Neural networks learn. A search is a walk.</p>")
            .build(),
        Card::builder("phrase")
            .title("Neural search")
            .build(),
        Card::builder("one-word")
            .title("Neural")
            .build(),
        Card::builder("unrelated")
            .title("Bread")
            .build(),
    ])?;
    let query = PreparedQuery::new("neural search", &FieldConfiguration::default());
    let hits = query.rank(&cards);

    let ids: Vec<&str> = hits.iter().map(|hit| hit.id.as_str()).collect();
    assert_eq!(ids[0], "phrase");
    assert!(hits[0].full_match);
    assert!(!ids.contains(&"unrelated"));
    assert!(hits.iter().all(|hit| hit.score > 0.0 && hit.score <= 1.0));

    let apart = hits.iter().find(|hit| hit.id.as_str() == "words-apart");
    assert!(apart.is_some_and(|hit| !hit.full_match));
    Ok(())
}

#[test]
fn test_empty_query_matches_nothing() -> Result<()> {
    let cards = annotated(vec![Card::builder("a").title("Anything").build()])?;
    let query = PreparedQuery::new("filter:work", &FieldConfiguration::default());

    assert!(query.is_empty());
    assert!(query.field_clauses().is_empty());
    assert_eq!(query.card_score(&cards[0]), (0.0, false));
    assert!(query.rank(&cards).is_empty());
    Ok(())
}

#[test]
fn test_exact_title_phrase_beats_words_spread_over_fields() -> Result<()> {
    let mut fallback = FallbackTextMap::new();
    fallback.insert(ReferenceType::Citation, "Theory of graph".to_string());
    let annotator = Annotator::new(FieldConfiguration::default(), &ConceptMap::new(), SynonymMap::new())?;
    let cards = vec![
        annotator.annotate(
            Card::builder("exact").title("Graph theory").build(),
            FallbackTextMap::new(),
        ),
        annotator.annotate(
            Card::builder("spread")
                .title("Theory of graph")
                .title_alternate("Theory of graph")
                .body("<p>The theory of a graph.</p>")
                .inbound_reference("source", ReferenceType::Citation, "")
                .build(),
            fallback,
        ),
    ];
    let query = PreparedQuery::new("graph theory", &FieldConfiguration::default());

    let (exact, exact_full) = query.card_score(&cards[0]);
    let (spread, spread_full) = query.card_score(&cards[1]);
    assert!(exact_full);
    assert!(!spread_full);
    assert_eq!(exact, 1.0);
    assert!(exact > spread, "exact {exact} spread {spread}");

    let hits = query.rank(&cards);
    assert_eq!(hits[0].id.as_str(), "exact");
    assert!(hits.iter().all(|hit| hit.score <= hits[0].score));
    Ok(())
}
