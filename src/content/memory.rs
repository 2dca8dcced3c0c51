//! In-memory content index for fixtures and embedding

use chrono::NaiveDateTime;

use super::index::{apply_query, IndexedDocument};
use super::{
    AuthorProfile, ContentIndex, DocumentCollection, DocumentQuery, DocumentRecord, SiteMetadata,
};
use crate::error::{Error, Result};

/// A content index over records supplied directly by the caller
#[derive(Debug, Clone)]
pub struct MemoryIndex {
    site: SiteMetadata,
    documents: Vec<IndexedDocument>,
    authors: Vec<AuthorProfile>,
}

impl MemoryIndex {
    pub fn new(site: SiteMetadata) -> Self {
        Self {
            site,
            documents: Vec::new(),
            authors: Vec::new(),
        }
    }

    /// Add a published document
    pub fn with_document(self, record: DocumentRecord, published: Option<NaiveDateTime>) -> Self {
        self.with_indexed(IndexedDocument {
            record,
            published,
            draft: false,
            html: String::new(),
        })
    }

    /// Add a fully specified document
    pub fn with_indexed(mut self, document: IndexedDocument) -> Self {
        self.documents.push(document);
        self
    }

    /// Add an author; `author()` requires exactly one
    pub fn with_author(mut self, author: AuthorProfile) -> Self {
        self.authors.push(author);
        self
    }
}

impl ContentIndex for MemoryIndex {
    fn site_metadata(&self) -> Result<SiteMetadata> {
        Ok(self.site.clone())
    }

    fn documents(&self, query: &DocumentQuery) -> Result<DocumentCollection> {
        Ok(apply_query(&self.documents, query))
    }

    fn document_body(&self, slug: &str) -> Result<Option<String>> {
        Ok(self
            .documents
            .iter()
            .find(|doc| doc.record.slug == slug)
            .map(|doc| doc.html.clone()))
    }

    fn author(&self) -> Result<AuthorProfile> {
        match self.authors.as_slice() {
            [author] => Ok(author.clone()),
            [] => Err(Error::AvatarNotFound("<memory>".to_string())),
            many => Err(Error::AmbiguousAvatar {
                pattern: "<memory>".to_string(),
                count: many.len(),
            }),
        }
    }
}
