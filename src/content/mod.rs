//! Content module - the build-time content index and the records it serves

mod document;
mod frontmatter;
pub mod index;
mod markdown;
mod memory;
mod source;

pub use document::{AuthorProfile, DocumentCollection, DocumentRecord, ImageAsset, SiteMetadata};
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use index::{ContentFilter, ContentIndex, DocumentQuery, SortField, SortOrder, SortSpec};
pub use markdown::MarkdownRenderer;
pub use memory::MemoryIndex;
pub use source::{slug_for, SourceIndex, STATIC_DIR};
