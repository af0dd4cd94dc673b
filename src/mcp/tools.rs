//! MCP tool parameter types for the docs server.
//!
//! Each tool's inputs are a schemars-derived struct validated before any
//! core logic runs; violations surface as structured invalid-params errors
//! naming the offending constraint.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum length of a component name.
pub const MAX_COMPONENT_LEN: usize = 100;
/// Maximum length of a page path.
pub const MAX_PATH_LEN: usize = 500;
/// Maximum length of a search query.
pub const MAX_QUERY_LEN: usize = 200;
/// Maximum length of a section filter.
pub const MAX_SECTION_LEN: usize = 100;
/// Allowed result page size.
pub const MIN_LIMIT: usize = 1;
/// Upper bound of the result page size.
pub const MAX_LIMIT: usize = 50;
/// Default result page size.
pub const DEFAULT_LIMIT: usize = 10;

/// Output encoding, selected per request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Human-readable markdown prose.
    #[default]
    Markdown,
    /// Field-complete JSON derived from the same data.
    Json,
}

fn check_length(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

fn check_optional_length(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::TooLong { field, max }),
        _ => Ok(()),
    }
}

/// Parameters for the `get-component` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetComponentParams {
    /// The component name to look up.
    #[schemars(description = "Component name, e.g. 'btn', 'QBtn' or 'button'")]
    pub component: String,
    /// Output encoding.
    #[serde(default)]
    #[schemars(description = "Response format: 'markdown' (default) or 'json'")]
    pub format: ResponseFormat,
}

impl GetComponentParams {
    /// Checks the documented constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_length("component", &self.component, MAX_COMPONENT_LEN)
    }
}

/// Parameters for the `get-page` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetPageParams {
    /// Root-relative documentation path.
    #[schemars(description = "Page path, e.g. 'style/color-palette' (extension optional)")]
    pub path: String,
    /// Output encoding.
    #[serde(default)]
    #[schemars(description = "Response format: 'markdown' (default) or 'json'")]
    pub format: ResponseFormat,
}

impl GetPageParams {
    /// Checks the documented constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_length("path", &self.path, MAX_PATH_LEN)
    }
}

/// Parameters for the `search-docs` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocsParams {
    /// Free-text query.
    #[schemars(description = "Search query: keywords, component names or phrases")]
    pub query: String,
    /// Optional section filter.
    #[schemars(description = "Restrict results to one section, e.g. 'vue-components'")]
    pub section: Option<String>,
    /// Page size (1-50).
    #[serde(default = "default_limit")]
    #[schemars(description = "Maximum number of results to return (1-50, default 10)")]
    pub limit: usize,
    /// Offset of the first result.
    #[serde(default)]
    #[schemars(description = "Number of results to skip, for pagination (default 0)")]
    pub offset: usize,
    /// Whether to scan page bodies when metadata search under-fills.
    #[serde(default)]
    #[schemars(description = "Also scan page content when metadata matches are sparse (slower)")]
    pub include_content: bool,
    /// Output encoding.
    #[serde(default)]
    #[schemars(description = "Response format: 'markdown' (default) or 'json'")]
    pub format: ResponseFormat,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl SearchDocsParams {
    /// Checks the documented constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_length("query", &self.query, MAX_QUERY_LEN)?;
        check_optional_length("section", self.section.as_deref(), MAX_SECTION_LEN)?;
        if self.limit < MIN_LIMIT || self.limit > MAX_LIMIT {
            return Err(ValidationError::OutOfRange {
                field: "limit",
                min: MIN_LIMIT,
                max: MAX_LIMIT,
            });
        }
        Ok(())
    }
}

/// Parameters for the `list-sections` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListSectionsParams {
    /// Optional section to expand into its page list.
    #[schemars(description = "Section name to list pages for; omit to list all sections")]
    pub section: Option<String>,
    /// Output encoding.
    #[serde(default)]
    #[schemars(description = "Response format: 'markdown' (default) or 'json'")]
    pub format: ResponseFormat,
}

impl ListSectionsParams {
    /// Checks the documented constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_optional_length("section", self.section.as_deref(), MAX_SECTION_LEN)
    }
}
