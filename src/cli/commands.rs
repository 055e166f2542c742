//! Command implementations for the cardprint CLI.

use crate::card::concept::suggested_concept_references;
use crate::card::types::{CardId, CardType};
use crate::cli::args::*;
use crate::cli::corpus::Corpus;
use crate::cli::output::*;
use crate::error::{CardprintError, Result};
use crate::query::prepared::PreparedQuery;

/// Execute a CLI command.
pub fn execute_command(args: CardprintArgs) -> Result<()> {
    match &args.command {
        Command::Fingerprint(fingerprint_args) => show_fingerprint(fingerprint_args, &args),
        Command::Title(title_args) => show_title(title_args, &args),
        Command::Related(related_args) => show_related(related_args, &args),
        Command::Search(search_args) => search_cards(search_args, &args),
        Command::Concepts(concepts_args) => suggest_concepts(concepts_args, &args),
    }
}

fn card_ids(ids: &[String]) -> Vec<CardId> {
    ids.iter().map(|id| CardId::from(id.as_str())).collect()
}

fn card_title(corpus: &Corpus, id: &CardId) -> String {
    corpus
        .generator
        .card(id)
        .map(|card| card.card().title.clone())
        .unwrap_or_default()
}

/// Show a card's (or several cards' combined) fingerprint.
fn show_fingerprint(args: &FingerprintArgs, cli_args: &CardprintArgs) -> Result<()> {
    let corpus = Corpus::open(&args.corpus)?;
    output_result("Fingerprint", &fingerprint_result(&corpus, args)?, cli_args)
}

/// Build the fingerprint command's result.
pub fn fingerprint_result(corpus: &Corpus, args: &FingerprintArgs) -> Result<FingerprintResult> {
    let ids = card_ids(&args.card_ids);

    let fingerprint = corpus.generator.fingerprint_for_card_id_list(&ids)?;
    let shown = fingerprint.truncated(args.limit);
    let phrases = shown.pretty_items(args.stop_word_phrases);

    let terms = shown
        .items()
        .iter()
        .zip(phrases)
        .map(|(item, phrase)| FingerprintTerm {
            term: item.term.clone(),
            phrase,
            weight: item.weight,
        })
        .collect();

    Ok(FingerprintResult {
        card_ids: args.card_ids.clone(),
        total_terms: fingerprint.len(),
        terms,
    })
}

/// Synthesize a title for a group of cards.
fn show_title(args: &TitleArgs, cli_args: &CardprintArgs) -> Result<()> {
    let corpus = Corpus::open(&args.corpus)?;
    output_result("Suggested title", &title_result(&corpus, args)?, cli_args)
}

/// Build the title command's result.
pub fn title_result(corpus: &Corpus, args: &TitleArgs) -> Result<TitleResult> {
    let ids = card_ids(&args.card_ids);
    let title = corpus.generator.title_for_card_ids(&ids, args.max_phrases)?;

    Ok(TitleResult {
        card_ids: args.card_ids.clone(),
        title,
    })
}

/// Rank cards related to one card.
fn show_related(args: &RelatedArgs, cli_args: &CardprintArgs) -> Result<()> {
    let corpus = Corpus::open(&args.corpus)?;
    output_result(
        &format!("Cards related to {}", args.card_id),
        &related_result(&corpus, args)?,
        cli_args,
    )
}

/// Build the related command's result.
pub fn related_result(corpus: &Corpus, args: &RelatedArgs) -> Result<RelatedResults> {
    let id = CardId::from(args.card_id.as_str());

    let keep: &dyn Fn(&CardId) -> bool = &|other| {
        args.card_types.is_empty()
            || corpus
                .generator
                .card(other)
                .is_some_and(|card| args.card_types.contains(&card.card().card_type))
    };
    let ranked = corpus.generator.closest_overlapping_items(&id, Some(keep))?;

    let cards = ranked
        .into_iter()
        .take(args.limit)
        .map(|(other, score)| ScoredCard {
            title: card_title(corpus, &other),
            id: other.to_string(),
            score,
            full_match: None,
        })
        .collect();

    Ok(RelatedResults {
        card_id: args.card_id.clone(),
        cards,
    })
}

/// Search the corpus.
fn search_cards(args: &SearchArgs, cli_args: &CardprintArgs) -> Result<()> {
    let corpus = Corpus::open(&args.corpus)?;
    let results = search_result(&corpus, args)?;
    output_result(
        &format!("Search results for '{}'", results.query),
        &results,
        cli_args,
    )
}

/// Build the search command's result.
///
/// Filters that name a card type restrict the hits to that type; other
/// filters are ignored.
pub fn search_result(corpus: &Corpus, args: &SearchArgs) -> Result<SearchResults> {
    let query = PreparedQuery::new(&args.query, corpus.generator.fields());
    if query.is_empty() {
        return Err(CardprintError::query("query has no searchable words"));
    }

    let mut card_types: Vec<CardType> = Vec::new();
    for filter in query.filters() {
        match filter.to_lowercase().parse::<CardType>() {
            Ok(card_type) => card_types.push(card_type),
            Err(_) => log::warn!("Ignoring unknown filter '{filter}'"),
        }
    }

    let candidates = corpus
        .generator
        .cards()
        .filter(|card| card_types.is_empty() || card_types.contains(&card.card().card_type));
    let matches = query.rank(candidates);
    let total_hits = matches.len();

    let hits = matches
        .into_iter()
        .take(args.limit)
        .map(|m| ScoredCard {
            title: card_title(corpus, &m.id),
            id: m.id.to_string(),
            score: m.score,
            full_match: Some(m.full_match),
        })
        .collect();

    Ok(SearchResults {
        query: query.text().to_string(),
        filters: query.filters().to_vec(),
        total_hits,
        hits,
    })
}

/// Suggest concept references for a card.
fn suggest_concepts(args: &ConceptsArgs, cli_args: &CardprintArgs) -> Result<()> {
    let corpus = Corpus::open(&args.corpus)?;
    output_result(
        &format!("Concept suggestions for {}", args.card_id),
        &concepts_result(&corpus, args)?,
        cli_args,
    )
}

/// Build the concepts command's result.
pub fn concepts_result(corpus: &Corpus, args: &ConceptsArgs) -> Result<ConceptResults> {
    let id = CardId::from(args.card_id.as_str());
    let card = corpus
        .generator
        .card(&id)
        .ok_or_else(|| CardprintError::not_found(format!("card '{id}'")))?;

    let suggestions = suggested_concept_references(card, &corpus.concepts)
        .into_iter()
        .map(|concept| ConceptSuggestion {
            phrase: corpus
                .concepts
                .canonical_phrase(&concept)
                .unwrap_or_default()
                .to_string(),
            id: concept.to_string(),
        })
        .collect();

    Ok(ConceptResults {
        card_id: args.card_id.clone(),
        suggestions,
    })
}
