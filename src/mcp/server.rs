//! MCP server implementation for quasar-docs-mcp.
//!
//! This module contains the `QuasarDocs` struct that implements the MCP
//! server with documentation retrieval and search tools backed by the
//! remote Quasar repository.

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::wrapper::Parameters,
    model::{
        CallToolResult, Content, ErrorCode, Implementation, ProtocolVersion, ServerCapabilities,
        ServerInfo,
    },
    tool, tool_handler, tool_router,
};
use serde_json::json;

use crate::docs::cache::IndexCache;
use crate::docs::fetcher::Fetcher;
use crate::docs::index::DocsIndex;
use crate::docs::query::{self, SearchOutcome, SearchPage, SearchRequest};
use crate::docs::resolve::{component_variants, resolve_component, resolve_page};
use crate::error::ValidationError;

use super::tools::{
    GetComponentParams, GetPageParams, ListSectionsParams, ResponseFormat, SearchDocsParams,
};

/// MCP server exposing Quasar documentation tools.
#[derive(Clone)]
pub struct QuasarDocs {
    /// Remote content access, shared with the index cache.
    fetcher: Arc<dyn Fetcher>,
    /// Process-wide index holder.
    index_cache: Arc<IndexCache>,
    tool_router: ToolRouter<QuasarDocs>,
}

impl QuasarDocs {
    /// Creates a new `QuasarDocs` server over the given fetcher.
    pub fn new(fetcher: Arc<dyn Fetcher>, index_ttl: Duration) -> Self {
        Self {
            index_cache: Arc::new(IndexCache::new(Arc::clone(&fetcher), index_ttl)),
            fetcher,
            tool_router: Self::tool_router(),
        }
    }

    /// The index cache, exposed for integration tests.
    pub fn index_cache(&self) -> &Arc<IndexCache> {
        &self.index_cache
    }
}

// Helper functions for formatting tool responses.

fn invalid_params(err: ValidationError) -> McpError {
    McpError::new(ErrorCode::INVALID_PARAMS, err.to_string(), None)
}

fn text_result(body: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(body)])
}

fn error_result(body: String) -> CallToolResult {
    CallToolResult::error(vec![Content::text(body)])
}

/// Renders a retrieved page in the requested encoding, clipping to the
/// response budget.
fn render_page(format: ResponseFormat, path: &str, url: &str, content: String) -> CallToolResult {
    match format {
        ResponseFormat::Markdown => {
            let rendered = format!("# {path}\n\nSource: {url}\n\n---\n\n{content}");
            let (body, _) = query::clip_to_budget(rendered);
            text_result(body)
        }
        ResponseFormat::Json => {
            let (content, truncated) = query::clip_to_budget(content);
            let payload = json!({
                "path": path,
                "url": url,
                "content": content,
                "truncated": truncated,
            });
            text_result(payload.to_string())
        }
    }
}

/// A structured not-found reply. Tool-level error, never a protocol error.
fn render_not_found(format: ResponseFormat, message: &str, suggestion: &str) -> CallToolResult {
    match format {
        ResponseFormat::Markdown => error_result(format!("{message}\n\n{suggestion}")),
        ResponseFormat::Json => error_result(
            json!({
                "error": "not_found",
                "message": message,
                "suggestion": suggestion,
            })
            .to_string(),
        ),
    }
}

/// The structured reply for a section filter that matched nothing.
fn render_section_not_found(
    format: ResponseFormat,
    requested: &str,
    available: &[String],
) -> CallToolResult {
    match format {
        ResponseFormat::Markdown => {
            let mut body = format!(
                "Section '{requested}' was not found. Valid sections:\n\n"
            );
            for name in available {
                let _ = writeln!(body, "- {name}");
            }
            body.push_str("\nUse list-sections to browse a section's pages.");
            text_result(body)
        }
        ResponseFormat::Json => text_result(
            json!({
                "error": "section_not_found",
                "requested": requested,
                "availableSections": available,
            })
            .to_string(),
        ),
    }
}

fn format_search_markdown(page: &SearchPage) -> String {
    let mut body = format!("# Search results for \"{}\"\n\n", page.query);
    if let Some(section) = &page.section {
        let _ = writeln!(body, "Section filter: {section}\n");
    }
    if page.results.is_empty() {
        body.push_str("No matching pages. Try broader keywords or drop the section filter.\n");
        return body;
    }
    let _ = writeln!(
        body,
        "Showing {} of {} results (offset {}).\n",
        page.results.len(),
        page.total,
        page.offset
    );
    for result in &page.results {
        let _ = writeln!(body, "## {}", result.title);
        let _ = writeln!(body, "- Path: `{}`", result.path);
        let _ = writeln!(body, "- Section: {}", result.section);
        let _ = writeln!(body, "- URL: {}", result.url);
        let _ = writeln!(body, "- Score: {}", result.score);
        let _ = writeln!(body, "\n{}\n", result.snippet);
    }
    if let Some(notice) = &page.notice {
        let _ = writeln!(body, "> {notice}\n");
    }
    if page.has_more && let Some(next) = page.next_offset {
        let _ = writeln!(
            body,
            "More results available. Repeat the search with offset={next}."
        );
    }
    body
}

fn render_search(format: ResponseFormat, mut page: SearchPage) -> CallToolResult {
    let body = match format {
        ResponseFormat::Markdown => query::enforce_budget(&mut page, format_search_markdown),
        ResponseFormat::Json => query::enforce_budget(&mut page, |p| {
            serde_json::to_string_pretty(p).unwrap_or_default()
        }),
    };
    text_result(body)
}

fn format_sections_markdown(index: &DocsIndex) -> String {
    let mut body = String::from("# Documentation sections\n\n");
    for section in &index.sections {
        let _ = writeln!(
            body,
            "## {} (`{}`)\n\n{} — {} pages\n",
            section.title,
            section.name,
            section.description,
            index.page_count(&section.name)
        );
    }
    body.push_str("Use list-sections with a section name to see its pages.\n");
    body
}

fn render_sections(format: ResponseFormat, index: &DocsIndex) -> CallToolResult {
    match format {
        ResponseFormat::Markdown => {
            let (body, _) = query::clip_to_budget(format_sections_markdown(index));
            text_result(body)
        }
        ResponseFormat::Json => {
            let sections: Vec<_> = index
                .sections
                .iter()
                .map(|section| {
                    json!({
                        "name": section.name,
                        "title": section.title,
                        "description": section.description,
                        "pages": index.page_count(&section.name),
                    })
                })
                .collect();
            text_result(json!({ "sections": sections }).to_string())
        }
    }
}

fn render_section_pages(
    format: ResponseFormat,
    index: &DocsIndex,
    filter: &str,
) -> CallToolResult {
    let pages = query::filter_section(index, filter);
    if pages.is_empty() {
        let available: Vec<String> = index.sections.iter().map(|s| s.name.clone()).collect();
        return render_section_not_found(format, filter, &available);
    }
    match format {
        ResponseFormat::Markdown => {
            let mut body = format!("# Pages in '{filter}'\n\n");
            for page in &pages {
                let _ = writeln!(body, "- **{}** — `{}` — {}", page.title, page.path, page.url);
            }
            let (body, _) = query::clip_to_budget(body);
            text_result(body)
        }
        ResponseFormat::Json => {
            let listed: Vec<_> = pages
                .iter()
                .map(|page| {
                    json!({
                        "title": page.title,
                        "path": page.path,
                        "section": page.section,
                        "url": page.url,
                    })
                })
                .collect();
            text_result(json!({ "section": filter, "pages": listed }).to_string())
        }
    }
}

/// Tool implementations for `QuasarDocs`.
#[tool_router]
impl QuasarDocs {
    /// Fetch one component's documentation page by name.
    #[tool(
        name = "get-component",
        description = "Get the documentation page for a Quasar component by name, e.g. 'btn', 'QBtn' or 'button'. Resolves common aliases and naming variants."
    )]
    pub async fn get_component(
        &self,
        Parameters(params): Parameters<GetComponentParams>,
    ) -> Result<CallToolResult, McpError> {
        params.validate().map_err(invalid_params)?;

        match resolve_component(self.fetcher.as_ref(), &params.component).await {
            Some((path, content)) => {
                let url = self.fetcher.public_url(&path);
                Ok(render_page(params.format, &path, &url, content))
            }
            None => {
                let tried = component_variants(&params.component).join("', '");
                Ok(render_not_found(
                    params.format,
                    &format!(
                        "No documentation page found for component '{}' (tried '{tried}').",
                        params.component
                    ),
                    "Use search-docs to find the component by keyword.",
                ))
            }
        }
    }

    /// Fetch one documentation page by path.
    #[tool(
        name = "get-page",
        description = "Get a documentation page by its path, e.g. 'style/color-palette'. The extension is optional and index pages are found automatically."
    )]
    pub async fn get_page(
        &self,
        Parameters(params): Parameters<GetPageParams>,
    ) -> Result<CallToolResult, McpError> {
        params.validate().map_err(invalid_params)?;

        match resolve_page(self.fetcher.as_ref(), &params.path).await {
            Some((path, content)) => {
                let url = self.fetcher.public_url(&path);
                Ok(render_page(params.format, &path, &url, content))
            }
            None => Ok(render_not_found(
                params.format,
                &format!("No documentation page found at '{}'.", params.path),
                "Use list-sections to browse available pages, or search-docs to find them by keyword.",
            )),
        }
    }

    /// Search the documentation index, optionally scanning page content.
    #[tool(
        name = "search-docs",
        description = "Search Quasar documentation by keywords. Supports section filtering, pagination via offset, and an optional deeper content scan."
    )]
    pub async fn search_docs(
        &self,
        Parameters(params): Parameters<SearchDocsParams>,
    ) -> Result<CallToolResult, McpError> {
        params.validate().map_err(invalid_params)?;

        let index = self.index_cache.get().await;
        let request = SearchRequest {
            query: params.query.clone(),
            section: params.section.clone(),
            limit: params.limit,
            offset: params.offset,
            include_content: params.include_content,
        };

        match query::run_search(&self.fetcher, &index, &request).await {
            SearchOutcome::SectionNotFound {
                requested,
                available,
            } => Ok(render_section_not_found(params.format, &requested, &available)),
            SearchOutcome::Results(page) => Ok(render_search(params.format, page)),
        }
    }

    /// List all sections, or the pages of one section.
    #[tool(
        name = "list-sections",
        description = "List all documentation sections with page counts, or pass a section name to list the pages it contains."
    )]
    pub async fn list_sections(
        &self,
        Parameters(params): Parameters<ListSectionsParams>,
    ) -> Result<CallToolResult, McpError> {
        params.validate().map_err(invalid_params)?;

        let index = self.index_cache.get().await;
        match &params.section {
            Some(filter) => Ok(render_section_pages(params.format, &index, filter)),
            None => Ok(render_sections(params.format, &index)),
        }
    }
}

#[tool_handler]
impl ServerHandler for QuasarDocs {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "quasar-docs-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Quasar Framework documentation access. Look up component docs by name \
                 (get-component), fetch any page by path (get-page), search across all \
                 documentation (search-docs) and browse the section tree (list-sections). \
                 All content is fetched from the official Quasar repository and cached \
                 in-process."
                    .into(),
            ),
        }
    }
}
