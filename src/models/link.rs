//! Deck entries loaded from the links file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One copyable entry: a URL plus an optional display label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl Link {
    /// Label shown in the deck; falls back to the URL itself.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.url)
    }
}

/// The full deck, parsed from the `[[links]]` tables of the links file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkList {
    #[serde(default)]
    pub links: Vec<Link>,
}

impl LinkList {
    /// Load the deck from a TOML links file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read links file {}", path.display()))?;
        let list: LinkList = toml::from_str(&content)
            .with_context(|| format!("failed to parse links file {}", path.display()))?;
        Ok(list)
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_links_with_and_without_labels() {
        let list: LinkList = toml::from_str(
            r#"
            [[links]]
            label = "Example"
            url = "https://example.com/a"

            [[links]]
            url = "https://example.com/b"
            "#,
        )
        .unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.links[0].display_label(), "Example");
        assert_eq!(list.links[0].url, "https://example.com/a");
        assert_eq!(list.links[1].display_label(), "https://example.com/b");
    }

    #[test]
    fn empty_file_is_an_empty_deck() {
        let list: LinkList = toml::from_str("").unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn loads_from_a_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.toml");
        std::fs::write(
            &path,
            "[[links]]\nurl = \"https://example.com/a\"\n",
        )
        .unwrap();

        let list = LinkList::from_file(&path).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.links[0].url, "https://example.com/a");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = LinkList::from_file(Path::new("/nonexistent/links.toml")).unwrap_err();
        assert!(err.to_string().contains("links file"));
    }
}
