//! Page path and component name resolution.
//!
//! Component lookup: case-fold, strip the conventional `q-` prefix, apply
//! the static alias table, and on a direct-path miss try delimiter
//! variants (hyphen removal, camelCase to kebab-case) before giving up.
//! The alias table and the variant order are load-bearing; call sites
//! depend on them.

use super::fetcher::Fetcher;

/// Static table mapping common component names to their docs page slug.
const COMPONENT_ALIASES: &[(&str, &str)] = &[
    ("autocomplete", "select"),
    ("button", "btn"),
    ("button-dropdown", "btn-dropdown"),
    ("button-group", "btn-group"),
    ("button-toggle", "btn-toggle"),
    ("date-picker", "date"),
    ("datepicker", "date"),
    ("dropdown", "btn-dropdown"),
    ("modal", "dialog"),
    ("notification", "banner"),
    ("popup", "popup-proxy"),
    ("progress", "linear-progress"),
    ("swipe", "touch-swipe"),
    ("switch", "toggle"),
    ("text-field", "input"),
    ("textfield", "input"),
    ("time-picker", "time"),
    ("timepicker", "time"),
];

/// Case-folds a component name, strips the `q-` prefix and applies the
/// alias table.
pub fn canonical_component(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let stripped = lowered.strip_prefix("q-").unwrap_or(&lowered);
    COMPONENT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == stripped)
        .map_or_else(|| stripped.to_string(), |(_, slug)| (*slug).to_string())
}

fn camel_to_kebab(name: &str) -> String {
    let mut kebab = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                kebab.push('-');
            }
            kebab.push(c.to_ascii_lowercase());
        } else {
            kebab.push(c);
        }
    }
    kebab
}

/// Candidate page slugs for a component name, in lookup order: the
/// canonical form first, then the hyphen-removed and camel-to-kebab
/// fallbacks.
pub fn component_variants(name: &str) -> Vec<String> {
    let trimmed = name.trim();
    let raw = trimmed
        .strip_prefix("q-")
        .or_else(|| trimmed.strip_prefix("Q"))
        .unwrap_or(trimmed);

    let canonical = canonical_component(trimmed);
    let mut variants = vec![canonical.clone()];

    let dehyphenated = canonical.replace('-', "");
    if !dehyphenated.is_empty() && !variants.contains(&dehyphenated) {
        variants.push(dehyphenated);
    }

    let kebab = canonical_component(&camel_to_kebab(raw));
    if !variants.contains(&kebab) {
        variants.push(kebab);
    }

    variants
}

/// Normalizes a raw page path: trim surrounding slashes and whitespace,
/// append the markdown extension when absent.
pub fn normalize_page_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.ends_with(".md") {
        trimmed.to_string()
    } else {
        format!("{trimmed}.md")
    }
}

/// Secondary lookup path: `<path>/index.md`.
pub fn index_fallback_path(path: &str) -> String {
    format!("{}/index.md", path.strip_suffix(".md").unwrap_or(path))
}

/// Resolves a page path to its content, trying the normalized path first
/// and `<path>/index.md` on a miss. Returns the resolved path with the
/// content.
pub async fn resolve_page(fetcher: &dyn Fetcher, path: &str) -> Option<(String, String)> {
    let primary = normalize_page_path(path);
    if let Some(content) = fetcher.fetch_file(&primary).await.into_option() {
        return Some((primary, content));
    }
    let fallback = index_fallback_path(&primary);
    fetcher
        .fetch_file(&fallback)
        .await
        .into_option()
        .map(|content| (fallback, content))
}

/// Resolves a component name to its documentation page under
/// `vue-components/`, trying each variant in order.
pub async fn resolve_component(fetcher: &dyn Fetcher, name: &str) -> Option<(String, String)> {
    for variant in component_variants(name) {
        let path = format!("vue-components/{variant}.md");
        if let Some(content) = fetcher.fetch_file(&path).await.into_option() {
            return Some((path, content));
        }
    }
    None
}
