//! Run splitting for HTML-bearing fields.
//!
//! Each block-level element becomes one run holding its inner text with tags
//! stripped and whitespace collapsed. Text that sits outside any block (bare
//! text at the top level, or between blocks inside a container) forms its own
//! run, and a `<br>` ends the current loose run.

use std::sync::LazyLock;

use ahash::AHashSet;
use scraper::{ElementRef, Html};

/// Elements whose whole inner text forms one run.
const BLOCK_TAGS: &[&str] = &[
    "p", "li", "h1", "h2", "h3", "h4", "h5", "h6", "pre", "dt", "dd", "td", "th", "figcaption",
    "caption",
];

/// Elements that only group other blocks.
const CONTAINER_TAGS: &[&str] = &[
    "html", "body", "div", "section", "article", "main", "aside", "header", "footer", "nav",
    "ul", "ol", "dl", "blockquote", "table", "thead", "tbody", "tfoot", "tr", "figure",
];

/// Elements whose text is never content.
const SKIPPED_TAGS: &[&str] = &["script", "style", "template"];

static BLOCKS: LazyLock<AHashSet<&'static str>> =
    LazyLock::new(|| BLOCK_TAGS.iter().copied().collect());
static CONTAINERS: LazyLock<AHashSet<&'static str>> =
    LazyLock::new(|| CONTAINER_TAGS.iter().copied().collect());

/// Split an HTML fragment into runs of plain text.
///
/// # Examples
///
/// ```
/// use cardprint::analysis::html::split_html_runs;
///
/// let runs = split_html_runs("<p>First <b>para</b></p><ul><li>one</li><li>two</li></ul>");
/// assert_eq!(runs, vec!["First para", "one", "two"]);
/// ```
pub fn split_html_runs(html: &str) -> Vec<String> {
    if html.trim().is_empty() {
        return Vec::new();
    }

    let fragment = Html::parse_fragment(html);
    let mut runs = Vec::new();
    let mut loose = String::new();
    walk(fragment.root_element(), &mut runs, &mut loose);
    flush(&mut loose, &mut runs);
    runs
}

fn walk(element: ElementRef<'_>, runs: &mut Vec<String>, loose: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            loose.push_str(text);
            continue;
        }

        let Some(child_element) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child_element.value().name();

        if SKIPPED_TAGS.contains(&name) {
            continue;
        } else if BLOCKS.contains(name) {
            flush(loose, runs);
            push_run(&child_element.text().collect::<String>(), runs);
        } else if CONTAINERS.contains(name) {
            flush(loose, runs);
            walk(child_element, runs, loose);
            flush(loose, runs);
        } else if name == "br" {
            flush(loose, runs);
        } else {
            // Inline element: its text continues the current loose run.
            walk(child_element, runs, loose);
        }
    }
}

fn flush(loose: &mut String, runs: &mut Vec<String>) {
    push_run(loose, runs);
    loose.clear();
}

fn push_run(text: &str, runs: &mut Vec<String>) {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if !collapsed.is_empty() {
        runs.push(collapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_runs() {
        let runs = split_html_runs("<p>Hello <em>world</em>.</p>\n<p>Second   paragraph</p>");
        assert_eq!(runs, vec!["Hello world.", "Second paragraph"]);
    }

    #[test]
    fn test_loose_text_and_breaks() {
        let runs = split_html_runs("intro text<br>after break<div><p>inside</p>tail</div>");
        assert_eq!(runs, vec!["intro text", "after break", "inside", "tail"]);
    }

    #[test]
    fn test_nested_blocks_emit_outer_only() {
        let runs = split_html_runs("<ul><li><p>nested para</p> more</li></ul>");
        assert_eq!(runs, vec!["nested para more"]);
    }

    #[test]
    fn test_empty_and_script() {
        assert!(split_html_runs("").is_empty());
        assert!(split_html_runs("<p>  </p>").is_empty());
        assert_eq!(
            split_html_runs("<script>var x = 1;</script><p>shown</p>"),
            vec!["shown"]
        );
    }

    #[test]
    fn test_plain_text_is_one_run() {
        assert_eq!(split_html_runs("just some words"), vec!["just some words"]);
    }
}
