//! Query front-end: section filtering, pagination and the response size
//! budget.
//!
//! Search requests overfetch past `offset + limit` so the content-search
//! fallback decision is made once, then slice the requested window out of
//! the combined result list. Oversized responses get exactly one correction
//! pass: halve the returned results (minimum 1), flag the response as
//! truncated and re-serialize. Never a shrink loop.

use std::sync::Arc;

use serde::Serialize;

use crate::config::RESPONSE_CHAR_BUDGET;

use super::fetcher::Fetcher;
use super::index::{DocsIndex, Page};
use super::search::{SearchResult, merge_results, search_content, search_pages};

/// Extra results fetched past `offset + limit` to amortize the fallback
/// decision.
pub const OVERFETCH_MARGIN: usize = 10;

/// Upper bound on pages whose content the fallback search will fetch.
/// Content search costs one network fetch per candidate.
pub const CONTENT_SEARCH_CANDIDATES: usize = 25;

/// A validated search request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Free-text query.
    pub query: String,
    /// Optional case-insensitive section filter.
    pub section: Option<String>,
    /// Page size.
    pub limit: usize,
    /// Offset of the first result to return.
    pub offset: usize,
    /// Whether the content-scan fallback may run.
    pub include_content: bool,
}

/// One page of ranked results with continuation metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    /// The query as received.
    pub query: String,
    /// The section filter, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Results in the `[offset, offset + limit)` window.
    pub results: Vec<SearchResult>,
    /// Total candidate count (bounded by the overfetch window).
    pub total: usize,
    /// Offset this page starts at.
    pub offset: usize,
    /// True when more candidates exist past this page.
    pub has_more: bool,
    /// Offset to continue from; present only when `has_more`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<usize>,
    /// True when the size budget forced a reduced page.
    pub truncated: bool,
    /// Human-readable truncation notice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Outcome of a search call.
#[derive(Debug)]
pub enum SearchOutcome {
    /// The section filter matched no pages; lists the valid names.
    SectionNotFound {
        /// The filter as received.
        requested: String,
        /// All valid section names.
        available: Vec<String>,
    },
    /// A result page, possibly empty.
    Results(SearchPage),
}

/// Filters index pages by section: case-insensitive, exact or substring.
pub fn filter_section<'a>(index: &'a DocsIndex, filter: &str) -> Vec<&'a Page> {
    let needle = filter.to_lowercase();
    index
        .pages
        .iter()
        .filter(|page| {
            let section = page.section.to_lowercase();
            section == needle || section.contains(&needle)
        })
        .collect()
}

/// Runs the full search pipeline: filter, index search, optional content
/// fallback, merge and slice.
pub async fn run_search(
    fetcher: &Arc<dyn Fetcher>,
    index: &DocsIndex,
    request: &SearchRequest,
) -> SearchOutcome {
    let pages: Vec<&Page> = match &request.section {
        Some(filter) => {
            let filtered = filter_section(index, filter);
            if filtered.is_empty() {
                return SearchOutcome::SectionNotFound {
                    requested: filter.clone(),
                    available: index.sections.iter().map(|s| s.name.clone()).collect(),
                };
            }
            filtered
        }
        None => index.pages.iter().collect(),
    };

    let want = request.offset + request.limit + OVERFETCH_MARGIN;
    let mut results = search_pages(index, &pages, &request.query, want);

    // Content scan only tops up an under-filled list, and only over a
    // bounded prefix of the candidate pages.
    if request.include_content && results.len() < want {
        let candidates: Vec<&Page> = pages
            .iter()
            .take(CONTENT_SEARCH_CANDIDATES)
            .copied()
            .collect();
        let extra = search_content(
            fetcher.as_ref(),
            index,
            &request.query,
            &candidates,
            want - results.len(),
        )
        .await;
        results = merge_results(results, extra);
    }

    let total = results.len();
    let start = request.offset.min(total);
    let end = (request.offset + request.limit).min(total);
    let window = results[start..end].to_vec();

    let has_more = total > request.offset + window.len();
    let next_offset = has_more.then(|| request.offset + window.len());

    SearchOutcome::Results(SearchPage {
        query: request.query.clone(),
        section: request.section.clone(),
        results: window,
        total,
        offset: request.offset,
        has_more,
        next_offset,
        truncated: false,
        notice: None,
    })
}

/// Serializes a result page, applying the single-pass truncation correction
/// when the rendered output exceeds the character budget.
///
/// The halving rule: keep `max(1, n / 2)` results, set `truncated`,
/// recompute `has_more`/`next_offset` against the reduced window and render
/// once more. The second render is final even if still over budget.
pub fn enforce_budget<F>(page: &mut SearchPage, render: F) -> String
where
    F: Fn(&SearchPage) -> String,
{
    let rendered = render(page);
    if rendered.len() <= RESPONSE_CHAR_BUDGET {
        return rendered;
    }

    let shown = page.results.len();
    let keep = (shown / 2).max(1);
    page.results.truncate(keep);
    page.truncated = true;
    page.notice = Some(format!(
        "Response exceeded the {RESPONSE_CHAR_BUDGET} character budget; \
         showing {keep} of {shown} results. Use offset to fetch the rest."
    ));
    page.has_more = page.total > page.offset + page.results.len();
    page.next_offset = page
        .has_more
        .then(|| page.offset + page.results.len());
    render(page)
}

/// Clips a single rendered document to the character budget, appending a
/// visible notice when content was dropped.
pub fn clip_to_budget(rendered: String) -> (String, bool) {
    if rendered.len() <= RESPONSE_CHAR_BUDGET {
        return (rendered, false);
    }
    let mut cut = RESPONSE_CHAR_BUDGET;
    while cut > 0 && !rendered.is_char_boundary(cut) {
        cut -= 1;
    }
    let mut clipped = rendered[..cut].to_string();
    clipped.push_str("\n\n[Content truncated: response exceeded the size budget.]");
    (clipped, true)
}
