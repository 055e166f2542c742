//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{CardprintArgs, OutputFormat};
use crate::error::Result;

/// One term of a fingerprint.
#[derive(Debug, Serialize, Deserialize)]
pub struct FingerprintTerm {
    pub term: String,
    pub phrase: String,
    pub weight: f64,
}

/// Result structure for the fingerprint command.
#[derive(Debug, Serialize, Deserialize)]
pub struct FingerprintResult {
    pub card_ids: Vec<String>,
    pub total_terms: usize,
    pub terms: Vec<FingerprintTerm>,
}

/// Result structure for the title command.
#[derive(Debug, Serialize, Deserialize)]
pub struct TitleResult {
    pub card_ids: Vec<String>,
    pub title: String,
}

/// A card with a score.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScoredCard {
    pub id: String,
    pub title: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_match: Option<bool>,
}

/// Result structure for the related command.
#[derive(Debug, Serialize, Deserialize)]
pub struct RelatedResults {
    pub card_id: String,
    pub cards: Vec<ScoredCard>,
}

/// Result structure for the search command.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub filters: Vec<String>,
    pub total_hits: usize,
    pub hits: Vec<ScoredCard>,
}

/// A suggested concept card.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConceptSuggestion {
    pub id: String,
    pub phrase: String,
}

/// Result structure for the concepts command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConceptResults {
    pub card_id: String,
    pub suggestions: Vec<ConceptSuggestion>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &CardprintArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &CardprintArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    match std::any::type_name::<T>() {
        name if name.ends_with("FingerprintResult") => output_fingerprint_human(&value),
        name if name.ends_with("RelatedResults") => output_scored_cards_human(&value, "cards"),
        name if name.ends_with("SearchResults") => output_scored_cards_human(&value, "hits"),
        _ => output_generic_human(&value),
    }
}

/// Output a fingerprint in human format.
fn output_fingerprint_human(value: &serde_json::Value) -> Result<()> {
    if let Some(terms) = value.get("terms").and_then(|t| t.as_array()) {
        for (i, term) in terms.iter().enumerate() {
            println!(
                "{:>3}. {:<40} {:.4}",
                i + 1,
                term.get("phrase").and_then(|p| p.as_str()).unwrap_or(""),
                term.get("weight").and_then(|w| w.as_f64()).unwrap_or(0.0)
            );
        }
    }
    if let Some(total) = value.get("total_terms").and_then(|t| t.as_u64()) {
        println!();
        println!("Total terms: {total}");
    }
    Ok(())
}

/// Output ranked cards in human format.
fn output_scored_cards_human(value: &serde_json::Value, key: &str) -> Result<()> {
    let Some(cards) = value.get(key).and_then(|c| c.as_array()) else {
        return Ok(());
    };

    if cards.is_empty() {
        println!("No matching cards.");
        return Ok(());
    }

    for (i, card) in cards.iter().enumerate() {
        let marker = match card.get("full_match").and_then(|m| m.as_bool()) {
            Some(true) => " *",
            _ => "",
        };
        println!(
            "{:>3}. [{}] {} (Score: {:.3}){marker}",
            i + 1,
            card.get("id").and_then(|id| id.as_str()).unwrap_or("?"),
            card.get("title").and_then(|t| t.as_str()).unwrap_or(""),
            card.get("score").and_then(|s| s.as_f64()).unwrap_or(0.0)
        );
    }
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &CardprintArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(obj) => {
            let formatted_values = obj
                .iter()
                .map(|(k, v)| format!("{k}={}", format_value(v)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{formatted_values}}}")
        }
        serde_json::Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!("text")), "text");
        assert_eq!(format_value(&json!([1, "a", true])), "[1, a, true]");
        assert_eq!(format_value(&json!({"id": "c", "phrase": "Graph"})), "{id=c, phrase=Graph}");
        assert_eq!(format_value(&json!(null)), "null");
    }

    #[test]
    fn test_scored_card_serialization() {
        let card = ScoredCard {
            id: "a".to_string(),
            title: "Title".to_string(),
            score: 0.5,
            full_match: None,
        };
        let value = serde_json::to_value(&card).unwrap();
        assert!(value.get("full_match").is_none());
    }
}
