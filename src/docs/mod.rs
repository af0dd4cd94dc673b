//! Documentation access: fetching, indexing, caching and search.
//!
//! This module owns everything between the MCP tool surface and the remote
//! repository:
//!
//! - [`fetcher`] - remote content retrieval with a TTL cache
//! - [`index`] - the in-memory page/section index and its builder
//! - [`cache`] - the TTL-gated holder of the single live index
//! - [`search`] - lexical scoring plus the content-scan fallback
//! - [`query`] - section filtering, pagination and size-budget truncation
//! - [`resolve`] - page path and component name resolution

pub mod cache;
pub mod fetcher;
pub mod index;
pub mod query;
pub mod resolve;
pub mod search;

pub use cache::IndexCache;
pub use fetcher::{DirEntry, EntryKind, Fetched, Fetcher, GithubFetcher};
pub use index::{DocsIndex, IndexBuilder, Page, Section};
pub use query::{SearchOutcome, SearchPage, SearchRequest};
pub use search::SearchResult;
