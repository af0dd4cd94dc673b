//! Lexical search over the index, with an optional content-scan fallback.
//!
//! Index search scores pages against normalized query terms with a fixed
//! additive scheme and sorts stably, so equal scores keep the index's
//! path-lexicographic order. Content search fetches page bodies and is only
//! used to top up under-filled result lists, against a bounded candidate
//! prefix, because every candidate costs a network fetch.

use std::collections::HashSet;

use serde::Serialize;

use super::fetcher::Fetcher;
use super::index::{DocsIndex, Page};

/// Score for a term equal to the page title (or its `q-` prefixed form).
const SCORE_TITLE_EXACT: u32 = 100;
/// Score for a term contained in the title.
const SCORE_TITLE_PARTIAL: u32 = 50;
/// Score for a term contained in the path.
const SCORE_PATH: u32 = 30;
/// Score for a keyword equal to a term (or its `q-` prefixed form).
const SCORE_KEYWORD_EXACT: u32 = 40;
/// Score for a keyword containing a term.
const SCORE_KEYWORD_PARTIAL: u32 = 20;
/// Score for a term contained in the section name.
const SCORE_SECTION: u32 = 15;
/// Score per term found anywhere in page content.
const SCORE_CONTENT: u32 = 10;

/// Context window around a content match: characters kept before and after.
const SNIPPET_BEFORE: usize = 50;
const SNIPPET_AFTER: usize = 100;

/// One ranked hit. Ephemeral; built fresh per search call.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Page title.
    pub title: String,
    /// Root-relative page path.
    pub path: String,
    /// Section slug.
    pub section: String,
    /// Public documentation URL.
    pub url: String,
    /// Contextual excerpt, or section-derived fallback text.
    pub snippet: String,
    /// Additive relevance score; higher is more relevant.
    pub score: u32,
}

/// Normalizes a raw query into match terms: lowercase, strip everything
/// outside `[a-z0-9\s-]`, split on whitespace, drop tokens of length <= 1.
pub fn normalize_query(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect::<String>()
        .split_whitespace()
        .filter(|token| token.len() > 1)
        .map(str::to_string)
        .collect()
}

/// Scores one page against the normalized terms. Additive over terms and
/// over independent criteria per term.
pub fn score_page(page: &Page, terms: &[String]) -> u32 {
    let title = page.title.to_lowercase();
    let path = page.path.to_lowercase();
    let section = page.section.to_lowercase();
    let mut score = 0;

    for term in terms {
        let prefixed = format!("q-{term}");
        if title == *term || title == prefixed {
            score += SCORE_TITLE_EXACT;
        } else if title.contains(term.as_str()) {
            score += SCORE_TITLE_PARTIAL;
        }
        if path.contains(term.as_str()) {
            score += SCORE_PATH;
        }
        if page.keywords.iter().any(|k| *k == *term || *k == prefixed) {
            score += SCORE_KEYWORD_EXACT;
        } else if page.keywords.iter().any(|k| k.contains(term.as_str())) {
            score += SCORE_KEYWORD_PARTIAL;
        }
        if section.contains(term.as_str()) {
            score += SCORE_SECTION;
        }
    }
    score
}

fn result_for(page: &Page, snippet: String, score: u32) -> SearchResult {
    SearchResult {
        title: page.title.clone(),
        path: page.path.clone(),
        section: page.section.clone(),
        url: page.url.clone(),
        snippet,
        score,
    }
}

/// Section-derived fallback snippet for metadata-only matches.
fn section_snippet(index: &DocsIndex, page: &Page) -> String {
    index
        .section(&page.section)
        .map(|section| section.description.clone())
        .unwrap_or_else(|| format!("Documentation page in '{}'", page.section))
}

/// Searches a pre-filtered page list, returning up to `limit` results
/// ranked by descending score. The sort is stable, so ties keep the input
/// (path-lexicographic) order. Zero-score pages are excluded.
pub fn search_pages(
    index: &DocsIndex,
    pages: &[&Page],
    query: &str,
    limit: usize,
) -> Vec<SearchResult> {
    let terms = normalize_query(query);
    if terms.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(u32, &Page)> = pages
        .iter()
        .filter_map(|page| {
            let score = score_page(page, &terms);
            (score > 0).then_some((score, *page))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(limit);

    scored
        .into_iter()
        .map(|(score, page)| result_for(page, section_snippet(index, page), score))
        .collect()
}

/// Searches the whole index.
pub fn search_index(index: &DocsIndex, query: &str, limit: usize) -> Vec<SearchResult> {
    let pages: Vec<&Page> = index.pages.iter().collect();
    search_pages(index, &pages, query, limit)
}

/// Extracts a context window around a match, collapsing newlines and
/// marking clipped edges with an ellipsis.
fn extract_snippet(content: &str, match_start: usize, match_len: usize) -> String {
    let mut start = match_start.saturating_sub(SNIPPET_BEFORE);
    while start > 0 && !content.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (match_start + match_len + SNIPPET_AFTER).min(content.len());
    while end < content.len() && !content.is_char_boundary(end) {
        end += 1;
    }

    let window = content[start..end]
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let prefix = if start > 0 { "..." } else { "" };
    let suffix = if end < content.len() { "..." } else { "" };
    format!("{prefix}{window}{suffix}")
}

/// Scans candidate page bodies for the query terms.
///
/// Each term found anywhere in the content scores +10; the first matching
/// term supplies the snippet. Stops once `limit` results are collected.
pub async fn search_content(
    fetcher: &dyn Fetcher,
    index: &DocsIndex,
    query: &str,
    candidates: &[&Page],
    limit: usize,
) -> Vec<SearchResult> {
    let terms = normalize_query(query);
    if terms.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for page in candidates {
        if results.len() >= limit {
            break;
        }
        let Some(content) = fetcher.fetch_file(&page.path).await.into_option() else {
            continue;
        };
        let lowered = content.to_lowercase();

        let mut score = 0;
        let mut snippet = None;
        for term in &terms {
            if let Some(pos) = lowered.find(term.as_str()) {
                score += SCORE_CONTENT;
                if snippet.is_none() {
                    snippet = Some(extract_snippet(&content, pos, term.len()));
                }
            }
        }
        if score > 0 {
            let snippet = snippet.unwrap_or_else(|| section_snippet(index, page));
            results.push(result_for(page, snippet, score));
        }
    }
    results
}

/// Appends content-search results to index-search results, skipping paths
/// already present and preserving first-seen order.
pub fn merge_results(primary: Vec<SearchResult>, secondary: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen: HashSet<String> = primary.iter().map(|r| r.path.clone()).collect();
    let mut merged = primary;
    for result in secondary {
        if seen.insert(result.path.clone()) {
            merged.push(result);
        }
    }
    merged
}
