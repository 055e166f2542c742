//! `filter:<name>` tokens in search queries.

/// Prefix that marks a filter token, matched case-insensitively.
pub const FILTER_PREFIX: &str = "filter:";

/// Split filter tokens out of a raw query.
///
/// Every whitespace-separated token starting with `filter:` is removed
/// wherever it appears and its name collected in order. The remaining
/// tokens are re-joined with single spaces. A bare `filter:` token is
/// removed without producing a name.
///
/// # Examples
///
/// ```
/// use cardprint::query::filter::extract_filters_from_query;
///
/// let (text, filters) = extract_filters_from_query("filter:work game theory FILTER:Person");
/// assert_eq!(text, "game theory");
/// assert_eq!(filters, vec!["work", "Person"]);
/// ```
pub fn extract_filters_from_query(raw: &str) -> (String, Vec<String>) {
    let mut words = Vec::new();
    let mut filters = Vec::new();

    for token in raw.split_whitespace() {
        match filter_name(token) {
            Some(name) => {
                if !name.is_empty() {
                    filters.push(name.to_string());
                }
            }
            None => words.push(token),
        }
    }

    (words.join(" "), filters)
}

fn filter_name(token: &str) -> Option<&str> {
    let prefix = token.get(..FILTER_PREFIX.len())?;
    if prefix.eq_ignore_ascii_case(FILTER_PREFIX) {
        Some(&token[FILTER_PREFIX.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters() {
        assert_eq!(
            extract_filters_from_query("  plain   query "),
            ("plain query".to_string(), vec![])
        );
        assert_eq!(extract_filters_from_query(""), (String::new(), vec![]));
    }

    #[test]
    fn test_filters_anywhere() {
        let (text, filters) = extract_filters_from_query("a filter:one b filter:two c");
        assert_eq!(text, "a b c");
        assert_eq!(filters, vec!["one", "two"]);
    }

    #[test]
    fn test_bare_and_lookalike_tokens() {
        let (text, filters) = extract_filters_from_query("filter: filters:x filterx é");
        assert_eq!(text, "filters:x filterx é");
        assert!(filters.is_empty());
    }
}
