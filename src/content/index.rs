//! Content query interface
//!
//! Components never read files themselves. They ask a [`ContentIndex`] for
//! records, so the same rendering code runs against the filesystem-backed
//! [`SourceIndex`](super::SourceIndex) during a build and against
//! [`MemoryIndex`](super::MemoryIndex) fixtures in tests.

use chrono::NaiveDateTime;
use regex::Regex;
use std::cmp::Ordering;
use std::path::PathBuf;

use super::{AuthorProfile, DocumentCollection, DocumentRecord, SiteMetadata};
use crate::error::{Error, Result};

/// Build-time data source for the components
pub trait ContentIndex {
    /// Site-wide metadata
    fn site_metadata(&self) -> Result<SiteMetadata>;

    /// Run a document query
    fn documents(&self, query: &DocumentQuery) -> Result<DocumentCollection>;

    /// Rendered HTML body of a document
    fn document_body(&self, slug: &str) -> Result<Option<String>>;

    /// The author profile together with exactly one avatar asset
    fn author(&self) -> Result<AuthorProfile>;
}

/// Which documents a query returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentFilter {
    /// Everything except drafts
    #[default]
    Published,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Date,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

/// A structured document request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentQuery {
    pub filter: ContentFilter,
    pub sort: SortSpec,
}

impl DocumentQuery {
    /// Published documents, newest first
    pub fn newest_first() -> Self {
        Self {
            filter: ContentFilter::Published,
            sort: SortSpec {
                field: SortField::Date,
                order: SortOrder::Desc,
            },
        }
    }
}

impl Default for DocumentQuery {
    fn default() -> Self {
        Self::newest_first()
    }
}

/// A document as stored by an index, with the fields queries need
#[derive(Debug, Clone)]
pub struct IndexedDocument {
    pub record: DocumentRecord,
    pub published: Option<NaiveDateTime>,
    pub draft: bool,
    pub html: String,
}

/// Filter and sort stored documents into a collection
///
/// Sorting is stable, so ties keep the order the documents were stored in.
/// Undated documents always come after dated ones.
pub fn apply_query(documents: &[IndexedDocument], query: &DocumentQuery) -> DocumentCollection {
    let mut selected: Vec<&IndexedDocument> = documents
        .iter()
        .filter(|doc| query.filter == ContentFilter::All || !doc.draft)
        .collect();

    match query.sort.field {
        SortField::Date => selected.sort_by(|a, b| {
            let ord = match (a.published, b.published) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => return Ordering::Less,
                (None, Some(_)) => return Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            match query.sort.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        }),
        SortField::Title => selected.sort_by(|a, b| {
            let ord = a.record.display_title().cmp(b.record.display_title());
            match query.sort.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        }),
    }

    DocumentCollection::new(selected.into_iter().map(|doc| doc.record.clone()).collect())
}

/// Pick the single asset whose path matches `pattern`
///
/// `candidates` pairs each file with the path string the pattern is matched
/// against. Zero or several matches are errors.
pub fn match_single_asset(pattern: &str, candidates: &[(PathBuf, String)]) -> Result<PathBuf> {
    let re = Regex::new(pattern).map_err(|e| Error::AvatarPattern(pattern.to_string(), e))?;

    let matches: Vec<&PathBuf> = candidates
        .iter()
        .filter(|(_, name)| re.is_match(name))
        .map(|(path, _)| path)
        .collect();

    match matches.as_slice() {
        [single] => Ok((*single).clone()),
        [] => Err(Error::AvatarNotFound(pattern.to_string())),
        many => Err(Error::AmbiguousAvatar {
            pattern: pattern.to_string(),
            count: many.len(),
        }),
    }
}
