//! In-memory [`Fetcher`] backed by a map of path -> content.
//!
//! Directory listings are derived from the stored paths, and every call is
//! counted so tests can assert on cache behavior (e.g. that a fresh index
//! is served without re-crawling the remote tree).

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use quasar_docs_mcp::docs::fetcher::{DirEntry, EntryKind, Fetched, Fetcher, public_url};

/// Fake remote source for tests.
#[derive(Default)]
pub struct FakeFetcher {
    files: BTreeMap<String, String>,
    /// Paths that appear in listings but fail to fetch, for degradation
    /// tests.
    missing_content: HashSet<String>,
    file_calls: AtomicUsize,
    dir_calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one file to the fake tree.
    pub fn add_file(&mut self, path: &str, content: &str) {
        self.files.insert(path.to_string(), content.to_string());
    }

    /// Keeps `path` visible in directory listings but makes its content
    /// fetch fail upstream.
    pub fn break_content(&mut self, path: &str) {
        self.missing_content.insert(path.to_string());
    }

    /// Number of file fetches performed so far.
    pub fn file_calls(&self) -> usize {
        self.file_calls.load(Ordering::SeqCst)
    }

    /// Number of directory listings performed so far.
    pub fn dir_calls(&self) -> usize {
        self.dir_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch_file(&self, path: &str) -> Fetched<String> {
        self.file_calls.fetch_add(1, Ordering::SeqCst);
        if self.missing_content.contains(path) {
            return Fetched::Upstream("simulated remote failure".to_string());
        }
        match self.files.get(path) {
            Some(content) => Fetched::Hit(content.clone()),
            None => Fetched::NotFound,
        }
    }

    async fn fetch_dir(&self, path: &str) -> Vec<DirEntry> {
        self.dir_calls.fetch_add(1, Ordering::SeqCst);
        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{path}/")
        };

        let mut dirs = BTreeSet::new();
        let mut entries = Vec::new();
        for key in self.files.keys() {
            let Some(rest) = key.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((dir, _)) => {
                    dirs.insert(dir.to_string());
                }
                None => entries.push(DirEntry {
                    name: rest.to_string(),
                    path: key.clone(),
                    kind: EntryKind::File,
                }),
            }
        }
        for dir in dirs {
            entries.push(DirEntry {
                name: dir.clone(),
                path: format!("{prefix}{dir}"),
                kind: EntryKind::Dir,
            });
        }
        entries
    }

    fn public_url(&self, path: &str) -> String {
        public_url("https://quasar.dev", path)
    }
}
