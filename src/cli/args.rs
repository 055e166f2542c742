//! Command line argument parsing for the cardprint CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::card::types::CardType;

/// cardprint - semantic fingerprints and search for knowledge cards
#[derive(Parser, Debug, Clone)]
#[command(name = "cardprint")]
#[command(about = "Semantic fingerprints, titles, related cards and search over a card corpus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct CardprintArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl CardprintArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the fingerprint of one card or the combined fingerprint of several
    Fingerprint(FingerprintArgs),

    /// Synthesize a title from the cards' dominant phrases
    Title(TitleArgs),

    /// Rank other cards by fingerprint overlap
    Related(RelatedArgs),

    /// Search cards with a free-text query
    Search(SearchArgs),

    /// Suggest concept cards a card mentions but does not reference
    Concepts(ConceptsArgs),
}

/// Arguments for showing fingerprints
#[derive(Parser, Debug, Clone)]
pub struct FingerprintArgs {
    /// Corpus file (JSON)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Card ids; several ids are summed into one fingerprint
    #[arg(value_name = "CARD_ID", required = true)]
    pub card_ids: Vec<String>,

    /// Maximum number of terms to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Render multi-word terms with their original stop words
    #[arg(long)]
    pub stop_word_phrases: bool,
}

/// Arguments for title synthesis
#[derive(Parser, Debug, Clone)]
pub struct TitleArgs {
    /// Corpus file (JSON)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Card ids to title together
    #[arg(value_name = "CARD_ID", required = true)]
    pub card_ids: Vec<String>,

    /// Maximum number of phrases in the title
    #[arg(short, long, default_value = "5")]
    pub max_phrases: usize,
}

/// Arguments for related cards
#[derive(Parser, Debug, Clone)]
pub struct RelatedArgs {
    /// Corpus file (JSON)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Card id to find related cards for
    #[arg(value_name = "CARD_ID")]
    pub card_id: String,

    /// Maximum number of results to return
    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    /// Only consider cards of these types
    #[arg(long = "card-type", value_parser = parse_card_type)]
    pub card_types: Vec<CardType>,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Corpus file (JSON)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Query string; `filter:<card-type>` tokens restrict results
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Maximum number of results to return
    #[arg(short, long, default_value = "10")]
    pub limit: usize,
}

/// Arguments for concept suggestion
#[derive(Parser, Debug, Clone)]
pub struct ConceptsArgs {
    /// Corpus file (JSON)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Card id to suggest concepts for
    #[arg(value_name = "CARD_ID")]
    pub card_id: String,
}

fn parse_card_type(s: &str) -> Result<CardType, String> {
    s.parse().map_err(|e| format!("{e}"))
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
