//! Remote content fetcher with a TTL cache.
//!
//! Retrieves raw markdown files and directory listings from the Quasar
//! repository on GitHub. Every successful fetch is cached for a configurable
//! TTL; expired entries are evicted lazily on the next lookup. There is no
//! background sweep.
//!
//! Failure semantics are deliberate: network and HTTP errors never propagate
//! as errors. They are recorded as [`Fetched::Upstream`] internally, logged,
//! and treated by every caller exactly like "the file does not exist" /
//! "the directory is empty".

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{DOCS_ROOT, DocsConfig};
use crate::error::FetchError;

/// Outcome of a remote fetch.
///
/// `Upstream` keeps the failure detail visible inside the crate; callers
/// collapse it to absence via [`Fetched::into_option`].
#[derive(Debug, Clone)]
pub enum Fetched<T> {
    /// The content was retrieved (or served from cache).
    Hit(T),
    /// The remote reports that the path does not exist.
    NotFound,
    /// The remote could not be reached or answered abnormally.
    Upstream(String),
}

impl<T> Fetched<T> {
    /// Collapses the outcome to an `Option`, dropping the upstream detail.
    pub fn into_option(self) -> Option<T> {
        match self {
            Fetched::Hit(value) => Some(value),
            Fetched::NotFound | Fetched::Upstream(_) => None,
        }
    }

    /// Returns true for a successful fetch.
    pub fn is_hit(&self) -> bool {
        matches!(self, Fetched::Hit(_))
    }
}

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A subdirectory.
    Dir,
}

/// One entry of a remote directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    /// Bare entry name.
    pub name: String,
    /// Path relative to the documentation root.
    pub path: String,
    /// File or directory.
    pub kind: EntryKind,
}

/// Access to the remote documentation source.
///
/// The server holds this as `Arc<dyn Fetcher>` so tests can substitute an
/// in-memory tree for the GitHub-backed implementation.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches one file's text content by root-relative path.
    async fn fetch_file(&self, path: &str) -> Fetched<String>;

    /// Lists one directory. Failures reduce to an empty listing.
    async fn fetch_dir(&self, path: &str) -> Vec<DirEntry>;

    /// Derives the public documentation URL for a page path. Pure.
    fn public_url(&self, path: &str) -> String;
}

/// Derives the public documentation URL for a page path.
///
/// Strips the `.md` extension and a trailing `/index` segment, then joins
/// onto the public base. Same path always yields the same URL.
pub fn public_url(base: &str, path: &str) -> String {
    let trimmed = path.trim_matches('/');
    let without_ext = trimmed.strip_suffix(".md").unwrap_or(trimmed);
    let without_index = without_ext.strip_suffix("/index").unwrap_or(without_ext);
    format!("{}/{}", base.trim_end_matches('/'), without_index)
}

struct CacheEntry {
    value: String,
    fetched_at: Instant,
}

/// A TTL cache over string values, keyed by fetch operation + path.
///
/// Lookups take an explicit `now` so tests can drive expiry with fake
/// instants instead of sleeping.
pub(crate) struct TtlCache {
    ttl: std::time::Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl TtlCache {
    pub(crate) fn new(ttl: std::time::Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached value if present and unexpired. Expired entries
    /// are evicted on the spot.
    pub(crate) fn get(&self, key: &str, now: Instant) -> Option<String> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match entries.get(key) {
            Some(entry) if now.duration_since(entry.fetched_at) < self.ttl => {
                Some(entry.value.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub(crate) fn insert(&self, key: &str, value: String, now: Instant) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                fetched_at: now,
            },
        );
    }
}

/// One item of a GitHub contents API listing.
#[derive(Debug, Deserialize)]
struct ContentsItem {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

/// GitHub-backed [`Fetcher`].
///
/// Raw files come from `raw.githubusercontent.com`; directory listings come
/// from the contents API. An optional bearer token raises the API rate
/// limit. Both endpoints are treated as unreliable.
pub struct GithubFetcher {
    client: reqwest::Client,
    config: DocsConfig,
    cache: TtlCache,
}

impl GithubFetcher {
    /// Creates a fetcher with a fresh HTTP client and an empty cache.
    pub fn new(config: DocsConfig) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("quasar-docs-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::from)?;
        Ok(Self {
            client,
            cache: TtlCache::new(config.file_ttl),
            config,
        })
    }

    fn raw_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.config.raw_base, self.config.branch, DOCS_ROOT, path
        )
    }

    fn listing_url(&self, path: &str) -> String {
        let dir = if path.is_empty() {
            DOCS_ROOT.to_string()
        } else {
            format!("{DOCS_ROOT}/{path}")
        };
        format!("{}/{}?ref={}", self.config.api_base, dir, self.config.branch)
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.config.github_token {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?)
    }

    async fn fetch_file_uncached(&self, path: &str) -> Fetched<String> {
        let url = self.raw_url(path);
        debug!(%url, "fetching remote file");
        let response = match self.get(&url).await {
            Ok(response) => response,
            Err(err) => return Fetched::Upstream(err.to_string()),
        };
        match response.status() {
            status if status.is_success() => match response.text().await {
                Ok(body) => Fetched::Hit(body),
                Err(err) => Fetched::Upstream(FetchError::Decode(err.to_string()).to_string()),
            },
            status if status == reqwest::StatusCode::NOT_FOUND => Fetched::NotFound,
            status => Fetched::Upstream(
                FetchError::Status {
                    status: status.as_u16(),
                    path: path.to_string(),
                }
                .to_string(),
            ),
        }
    }

    async fn fetch_dir_uncached(&self, path: &str) -> Fetched<Vec<DirEntry>> {
        let url = self.listing_url(path);
        debug!(%url, "fetching remote directory listing");
        let response = match self.get(&url).await {
            Ok(response) => response,
            Err(err) => return Fetched::Upstream(err.to_string()),
        };
        match response.status() {
            status if status.is_success() => {
                match response.json::<Vec<ContentsItem>>().await {
                    Ok(items) => Fetched::Hit(
                        items
                            .into_iter()
                            .filter_map(|item| {
                                let kind = match item.kind.as_str() {
                                    "file" => EntryKind::File,
                                    "dir" => EntryKind::Dir,
                                    // symlinks, submodules
                                    _ => return None,
                                };
                                // The API returns repo-relative paths; strip
                                // the docs root so entries stay root-relative.
                                let path = item
                                    .path
                                    .strip_prefix(DOCS_ROOT)
                                    .map(|p| p.trim_start_matches('/').to_string())
                                    .unwrap_or(item.path);
                                Some(DirEntry {
                                    name: item.name,
                                    path,
                                    kind,
                                })
                            })
                            .collect(),
                    ),
                    Err(err) => Fetched::Upstream(FetchError::Decode(err.to_string()).to_string()),
                }
            }
            status if status == reqwest::StatusCode::NOT_FOUND => Fetched::NotFound,
            status => Fetched::Upstream(
                FetchError::Status {
                    status: status.as_u16(),
                    path: path.to_string(),
                }
                .to_string(),
            ),
        }
    }
}

#[async_trait]
impl Fetcher for GithubFetcher {
    async fn fetch_file(&self, path: &str) -> Fetched<String> {
        let key = format!("file:{path}");
        if let Some(cached) = self.cache.get(&key, Instant::now()) {
            return Fetched::Hit(cached);
        }
        let fetched = self.fetch_file_uncached(path).await;
        match &fetched {
            Fetched::Hit(body) => self.cache.insert(&key, body.clone(), Instant::now()),
            Fetched::Upstream(detail) => {
                warn!(path, detail, "remote fetch failed; treating file as missing");
            }
            Fetched::NotFound => {}
        }
        fetched
    }

    async fn fetch_dir(&self, path: &str) -> Vec<DirEntry> {
        let key = format!("dir:{path}");
        if let Some(cached) = self.cache.get(&key, Instant::now())
            && let Ok(entries) = serde_json::from_str::<Vec<DirEntry>>(&cached)
        {
            return entries;
        }
        match self.fetch_dir_uncached(path).await {
            Fetched::Hit(entries) => {
                if let Ok(serialized) = serde_json::to_string(&entries) {
                    self.cache.insert(&key, serialized, Instant::now());
                }
                entries
            }
            Fetched::NotFound => Vec::new(),
            Fetched::Upstream(detail) => {
                warn!(path, detail, "listing fetch failed; treating directory as empty");
                Vec::new()
            }
        }
    }

    fn public_url(&self, path: &str) -> String {
        public_url(&self.config.public_base, path)
    }
}
