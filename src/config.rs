//! Runtime configuration for the docs server.
//!
//! All remote endpoints, cache TTLs and the response size budget live here.
//! The configuration is assembled once at startup from CLI flags and the
//! environment and then shared read-only across the process.

use std::time::Duration;

/// Owner/repo of the documentation source on GitHub.
pub const SOURCE_REPO: &str = "quasarframework/quasar";

/// Repo-relative directory holding the markdown documentation pages.
pub const DOCS_ROOT: &str = "docs/src/pages";

/// Base URL of the published documentation site.
pub const PUBLIC_BASE_URL: &str = "https://quasar.dev";

/// Maximum number of characters in any single formatted tool response.
///
/// Responses over this budget go through a single truncation correction
/// pass (see [`crate::docs::query`]).
pub const RESPONSE_CHAR_BUDGET: usize = 25_000;

/// Default TTL for cached remote file and directory fetches.
pub const DEFAULT_FILE_TTL: Duration = Duration::from_secs(30 * 60);

/// Default TTL for the in-memory documentation index.
pub const DEFAULT_INDEX_TTL: Duration = Duration::from_secs(60 * 60);

/// Environment variable holding an optional GitHub bearer token.
///
/// The token is passed through unchanged to raise API rate limits; no other
/// authentication is performed.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Configuration shared by the fetcher and the MCP server.
#[derive(Debug, Clone)]
pub struct DocsConfig {
    /// Branch of the source repository to read from.
    pub branch: String,
    /// Base URL for raw file retrieval.
    pub raw_base: String,
    /// Base URL for directory listings (GitHub contents API).
    pub api_base: String,
    /// Base URL of the published documentation site.
    pub public_base: String,
    /// Optional bearer token attached to API requests.
    pub github_token: Option<String>,
    /// TTL for cached remote fetches.
    pub file_ttl: Duration,
    /// TTL for the built documentation index.
    pub index_ttl: Duration,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            branch: "dev".to_string(),
            raw_base: format!("https://raw.githubusercontent.com/{SOURCE_REPO}"),
            api_base: format!("https://api.github.com/repos/{SOURCE_REPO}/contents"),
            public_base: PUBLIC_BASE_URL.to_string(),
            github_token: None,
            file_ttl: DEFAULT_FILE_TTL,
            index_ttl: DEFAULT_INDEX_TTL,
        }
    }
}

impl DocsConfig {
    /// Builds a configuration from CLI-provided values, picking up the
    /// optional GitHub token from the environment.
    pub fn from_env(branch: String, file_ttl: Duration, index_ttl: Duration) -> Self {
        Self {
            branch,
            github_token: std::env::var(GITHUB_TOKEN_ENV)
                .ok()
                .filter(|t| !t.trim().is_empty()),
            file_ttl,
            index_ttl,
            ..Self::default()
        }
    }
}
