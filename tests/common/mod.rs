//! Common test helpers and utilities.

#![allow(dead_code)]

pub mod fake_fetcher;

// Re-export for convenience
pub use fake_fetcher::FakeFetcher;

/// A small documentation tree modeled on the real Quasar docs layout.
///
/// Covers the cases the tools care about: aliased components, frontmatter
/// titles and keywords, an `index.md` page, an unknown section, and a word
/// ("kerning") that appears only in page content.
pub fn docs_fixture() -> FakeFetcher {
    let mut fetcher = FakeFetcher::new();
    fetcher.add_file(
        "vue-components/btn.md",
        "---\ntitle: Btn\nkeywords: button, click, action\n---\n\
         # Btn\n\nThe QBtn component renders buttons with ripple support.\n\
         See the props table, events and slots below.\n",
    );
    fetcher.add_file(
        "vue-components/btn-group.md",
        "---\ntitle: Btn Group\n---\n# Btn Group\n\nGroups several buttons together.\n",
    );
    fetcher.add_file(
        "vue-components/input.md",
        "---\ntitle: Input\nkeywords: text, field, form\n---\n# Input\n\nText input fields.\n",
    );
    fetcher.add_file(
        "vue-components/select.md",
        "---\ntitle: Select\n---\n# Select\n\nDropdown selection with autocomplete.\n",
    );
    fetcher.add_file(
        "vue-components/date.md",
        "---\ntitle: Date\n---\n# Date\n\nCalendar date picking.\n",
    );
    fetcher.add_file(
        "vue-components/dialog.md",
        "---\ntitle: Dialog\n---\n# Dialog\n\nModal dialogs.\n",
    );
    fetcher.add_file(
        "vue-components/toggle.md",
        "---\ntitle: Toggle\n---\n# Toggle\n\nOn/off switches.\n",
    );
    fetcher.add_file(
        "style/color-palette.md",
        "---\ntitle: Color Palette\n---\n# Color Palette\n\nBrand colors and shades.\n",
    );
    fetcher.add_file(
        "style/typography.md",
        "---\ntitle: Typography\n---\n# Typography\n\nFont families, sizing and kerning.\n",
    );
    fetcher.add_file(
        "layout/grid/index.md",
        "---\ntitle: Flex Grid\n---\n# Flex Grid\n\nThe responsive flex grid.\n",
    );
    fetcher.add_file(
        "start/installation.md",
        "---\ntitle: Installation\n---\n# Installation\n\nGetting Quasar installed.\n",
    );
    fetcher.add_file(
        "app-extensions/introduction.md",
        "---\ntitle: App Extensions\n---\n# App Extensions\n\nExtending the CLI.\n",
    );
    fetcher
}
