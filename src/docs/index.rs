//! In-memory documentation index and its builder.
//!
//! The index is a snapshot of every markdown page under the remote docs
//! root, grouped into sections by the first path segment. It is rebuilt
//! wholesale; nothing is mutated in place after construction.

use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::SystemTime;

use regex::Regex;
use tracing::{debug, info};

use super::fetcher::{EntryKind, Fetcher};

/// Curated titles and descriptions for the known top-level sections.
/// Anything outside this table gets a synthesized title and a generic
/// description.
const KNOWN_SECTIONS: &[(&str, &str, &str)] = &[
    (
        "layout",
        "Layout and Grid",
        "Layout components, the flex grid and spacing utilities",
    ),
    (
        "options",
        "Options & Helpers",
        "App configuration options, helpers and utilities",
    ),
    (
        "quasar-cli-vite",
        "Quasar CLI (Vite)",
        "Developing with the Vite-based Quasar CLI",
    ),
    (
        "quasar-cli-webpack",
        "Quasar CLI (Webpack)",
        "Developing with the Webpack-based Quasar CLI",
    ),
    (
        "quasar-plugins",
        "Quasar Plugins",
        "Built-in plugins such as Notify, Dialog and Loading",
    ),
    (
        "security",
        "Security",
        "Security practices for Quasar applications",
    ),
    (
        "start",
        "Getting Started",
        "Installation and first steps with Quasar",
    ),
    (
        "style",
        "Style & Identity",
        "Color palette, typography, dark mode and style utilities",
    ),
    (
        "vue-components",
        "Vue Components",
        "Quasar's Vue component catalog",
    ),
    (
        "vue-composables",
        "Vue Composables",
        "Composition API utilities provided by Quasar",
    ),
    (
        "vue-directives",
        "Vue Directives",
        "Directives such as Ripple, Intersection and TouchPan",
    ),
];

/// Structural terms promoted to keywords when found in page content.
const STRUCTURAL_KEYWORDS: &[&str] = &["api", "props", "events", "slots", "methods", "examples"];

static FRONTMATTER_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^title:\s*(.+?)\s*$").expect("frontmatter title regex is valid")
});

static FRONTMATTER_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^keywords:\s*(.+?)\s*$").expect("frontmatter keywords regex is valid")
});

static FIRST_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+?)\s*$").expect("heading regex is valid"));

/// A top-level grouping of documentation pages.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Section {
    /// Unique lowercase slug, equal to the first path segment.
    pub name: String,
    /// Relative root of the section.
    pub path: String,
    /// Display title.
    pub title: String,
    /// One-line description.
    pub description: String,
}

impl Section {
    /// Resolves a section slug against the curated table, synthesizing a
    /// title-cased name and generic description for unknown slugs.
    pub fn for_slug(slug: &str) -> Self {
        if let Some((name, title, description)) =
            KNOWN_SECTIONS.iter().find(|(name, _, _)| *name == slug)
        {
            return Self {
                name: (*name).to_string(),
                path: (*name).to_string(),
                title: (*title).to_string(),
                description: (*description).to_string(),
            };
        }
        Self {
            name: slug.to_string(),
            path: slug.to_string(),
            title: title_from_slug(slug),
            description: format!("Quasar documentation section '{slug}'"),
        }
    }
}

/// One documentation page.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Page {
    /// Unique root-relative path, including the `.md` extension.
    pub path: String,
    /// Extracted or filename-derived title.
    pub title: String,
    /// Section slug, always the first segment of `path`.
    pub section: String,
    /// Lowercase tokens used for matching.
    pub keywords: Vec<String>,
    /// Public documentation URL.
    pub url: String,
}

/// Snapshot of the whole documentation tree.
#[derive(Debug, Clone)]
pub struct DocsIndex {
    /// Server version that built this index.
    pub version: String,
    /// Wall-clock timestamp of construction.
    pub built_at: SystemTime,
    /// Sections sorted by name, de-duplicated.
    pub sections: Vec<Section>,
    /// Pages sorted by path, one per remote markdown file.
    pub pages: Vec<Page>,
}

impl DocsIndex {
    /// Looks up a section by exact slug.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Counts the pages belonging to one section.
    pub fn page_count(&self, section: &str) -> usize {
        self.pages.iter().filter(|p| p.section == section).count()
    }
}

/// Title-cases a slug: hyphens become spaces, each word capitalized.
pub fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn file_stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.strip_suffix(".md").unwrap_or(name)
}

fn section_of(path: &str) -> &str {
    path.split('/').next().unwrap_or(path)
}

/// Keywords every page gets regardless of mode: lowercase path segments,
/// the bare component name, its `q-` alias and the section slug.
fn base_keywords(path: &str) -> Vec<String> {
    let stem = file_stem(path).to_lowercase();
    let mut keywords: Vec<String> = path
        .to_lowercase()
        .split('/')
        .map(|segment| segment.strip_suffix(".md").unwrap_or(segment).to_string())
        .collect();
    if !keywords.contains(&stem) {
        keywords.push(stem.clone());
    }
    keywords.push(format!("q-{stem}"));
    keywords.dedup();
    keywords
}

/// Pulls the title out of page content: frontmatter `title:` first, then
/// the first top-level heading. Returns `None` when neither is present.
fn extract_title(content: &str) -> Option<String> {
    FRONTMATTER_TITLE
        .captures(content)
        .or_else(|| FIRST_HEADING.captures(content))
        .map(|captures| captures[1].trim_matches(['\'', '"']).to_string())
}

/// Pulls frontmatter keywords plus any structural vocabulary found in the
/// content body.
fn extract_keywords(content: &str) -> Vec<String> {
    let mut keywords = Vec::new();
    if let Some(captures) = FRONTMATTER_KEYWORDS.captures(content) {
        for keyword in captures[1].trim_matches(['[', ']']).split(',') {
            let keyword = keyword.trim().trim_matches(['\'', '"']).to_lowercase();
            if !keyword.is_empty() {
                keywords.push(keyword);
            }
        }
    }
    let lowered = content.to_lowercase();
    for term in STRUCTURAL_KEYWORDS {
        if lowered.contains(term) {
            keywords.push((*term).to_string());
        }
    }
    keywords
}

/// Builds a [`DocsIndex`] by crawling the remote tree through a [`Fetcher`].
pub struct IndexBuilder<'a> {
    fetcher: &'a dyn Fetcher,
}

impl<'a> IndexBuilder<'a> {
    /// Creates a builder over the given fetcher.
    pub fn new(fetcher: &'a dyn Fetcher) -> Self {
        Self { fetcher }
    }

    /// Crawls the remote tree and builds the index.
    ///
    /// In lightweight mode titles and keywords derive purely from paths; no
    /// content is fetched beyond the directory crawl. In full mode each
    /// page's content is fetched for frontmatter extraction, and any single
    /// fetch failure degrades that page to filename-derived metadata.
    pub async fn build(&self, lightweight: bool) -> DocsIndex {
        let mut pending = vec![String::new()];
        let mut files = Vec::new();

        // Depth-first over a worklist; the remote source is a tree, so no
        // cycle detection is needed.
        while let Some(dir) = pending.pop() {
            for entry in self.fetcher.fetch_dir(&dir).await {
                match entry.kind {
                    EntryKind::Dir => pending.push(entry.path),
                    EntryKind::File if entry.path.ends_with(".md") => files.push(entry.path),
                    EntryKind::File => {}
                }
            }
        }
        files.sort();
        debug!(files = files.len(), lightweight, "docs crawl complete");

        let mut pages = Vec::with_capacity(files.len());
        let mut sections: BTreeMap<String, Section> = BTreeMap::new();

        for path in files {
            let section = section_of(&path).to_string();
            sections
                .entry(section.clone())
                .or_insert_with(|| Section::for_slug(&section));

            let mut title = title_from_slug(file_stem(&path));
            let mut keywords = base_keywords(&path);
            keywords.push(section.to_lowercase());

            if !lightweight
                && let Some(content) = self.fetcher.fetch_file(&path).await.into_option()
            {
                if let Some(extracted) = extract_title(&content) {
                    title = extracted;
                }
                keywords.extend(extract_keywords(&content));
            }

            keywords.sort();
            keywords.dedup();

            let url = self.fetcher.public_url(&path);
            pages.push(Page {
                path,
                title,
                section,
                keywords,
                url,
            });
        }

        let index = DocsIndex {
            version: env!("CARGO_PKG_VERSION").to_string(),
            built_at: SystemTime::now(),
            sections: sections.into_values().collect(),
            pages,
        };
        info!(
            pages = index.pages.len(),
            sections = index.sections.len(),
            "documentation index built"
        );
        index
    }
}
