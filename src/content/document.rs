//! Records produced by the content index

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One content item (a blog post) as exposed to the components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// URL path of the document, unique across the collection
    pub slug: String,
    pub title: Option<String>,
    /// Publish date, already formatted for display
    pub date: String,
    pub description: Option<String>,
    /// Plain-text fallback for `description`
    pub excerpt: String,
}

impl DocumentRecord {
    /// The title to show: `title` when non-empty, else the slug
    pub fn display_title(&self) -> &str {
        non_empty(self.title.as_deref()).unwrap_or(&self.slug)
    }

    /// The body to show: `description` when non-empty, else the excerpt
    ///
    /// The result is trusted markup from the content source.
    pub fn display_body(&self) -> &str {
        non_empty(self.description.as_deref()).unwrap_or(&self.excerpt)
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Documents in the order the index returned them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentCollection(Vec<DocumentRecord>);

impl DocumentCollection {
    pub fn new(records: Vec<DocumentRecord>) -> Self {
        Self(records)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocumentRecord> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[DocumentRecord] {
        &self.0
    }

    /// The newer and older neighbours of `slug`
    pub fn neighbours(&self, slug: &str) -> (Option<&DocumentRecord>, Option<&DocumentRecord>) {
        match self.0.iter().position(|r| r.slug == slug) {
            Some(pos) => (
                pos.checked_sub(1).and_then(|i| self.0.get(i)),
                self.0.get(pos + 1),
            ),
            None => (None, None),
        }
    }
}

impl<'a> IntoIterator for &'a DocumentCollection {
    type Item = &'a DocumentRecord;
    type IntoIter = std::slice::Iter<'a, DocumentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Opaque descriptor of a processed image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageAsset {
    /// Original file on disk
    pub source: PathBuf,
    /// Site path the processed image is published under, without prefix
    pub public_path: String,
    pub width: u32,
    pub height: u32,
}

/// Author shown by the identity card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorProfile {
    pub name: String,
    pub summary: String,
    pub avatar: ImageAsset,
}

/// Site-wide metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteMetadata {
    pub title: String,
    pub description: String,
    pub language: String,
    pub url: String,
}
