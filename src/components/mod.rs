//! Page components
//!
//! Every component is a function from its inputs to a [`Node`] tree. The
//! collaborators a component needs (content, links, images, page metadata)
//! are reached through the [`RenderContext`] so pages can be rendered
//! against fixtures.

pub mod author;
pub mod listing;
pub mod not_found;
pub mod post;
pub mod shell;

use std::cell::RefCell;

use crate::content::{ContentIndex, ImageAsset};
use crate::helpers::url_for;
use crate::markup::{Element, Node};

pub use author::{ProfileLink, PROFILE_LINKS};
pub use listing::ListingData;
pub use shell::{NavigationContext, ShellState};

/// Produces a clickable element pointing at a site path or external URL
pub trait Navigator {
    fn link(&self, path: &str, title: Option<&str>, children: Vec<Node>) -> Node;
}

/// Turns a processed image descriptor into markup
pub trait ImageRenderer {
    fn render(&self, asset: &ImageAsset, alt: &str) -> Node;
}

/// Receives the page title for the document head
pub trait SeoSink {
    fn set_page_meta(&self, title: &str);
}

/// Collaborators shared by all components during one page render
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub index: &'a dyn ContentIndex,
    pub navigator: &'a dyn Navigator,
    pub images: &'a dyn ImageRenderer,
    pub seo: &'a dyn SeoSink,
    /// Path prefix the site is served under, `""` or `/segment`
    pub path_prefix: &'a str,
}

impl RenderContext<'_> {
    /// Absolute path of a site-relative path
    pub fn path(&self, path: &str) -> String {
        url_for(self.path_prefix, path)
    }
}

/// Where the page being rendered lives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub pathname: Option<String>,
}

impl Location {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: Some(pathname.into()),
        }
    }
}

/// Plain anchors with the path prefix applied to internal targets
#[derive(Debug, Clone, Default)]
pub struct SiteLinker {
    prefix: String,
}

impl SiteLinker {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Navigator for SiteLinker {
    fn link(&self, path: &str, title: Option<&str>, children: Vec<Node>) -> Node {
        let mut anchor = Element::new("a").attr("href", url_for(&self.prefix, path));
        if let Some(title) = title {
            anchor = anchor.attr("title", title);
        }
        anchor.children(children).into()
    }
}

/// Fixed-size images served from the published asset path
#[derive(Debug, Clone, Default)]
pub struct FixedImage {
    prefix: String,
}

impl FixedImage {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl ImageRenderer for FixedImage {
    fn render(&self, asset: &ImageAsset, alt: &str) -> Node {
        Element::new("div")
            .class("image-wrapper")
            .attr(
                "style",
                format!("width:{}px;height:{}px", asset.width, asset.height),
            )
            .child(
                Element::new("img")
                    .attr("src", url_for(&self.prefix, &asset.public_path))
                    .attr("alt", alt)
                    .attr("width", asset.width.to_string())
                    .attr("height", asset.height.to_string())
                    .attr("loading", "lazy"),
            )
            .into()
    }
}

/// Collects the title for the `<head>` of the page being rendered
#[derive(Debug, Default)]
pub struct HeadMeta {
    title: RefCell<Option<String>>,
}

impl HeadMeta {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last title set during the render
    pub fn title(&self) -> Option<String> {
        self.title.borrow().clone()
    }
}

impl SeoSink for HeadMeta {
    fn set_page_meta(&self, title: &str) {
        *self.title.borrow_mut() = Some(title.to_string());
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Shared fixture data for component tests

    use chrono::{NaiveDate, NaiveDateTime};
    use std::path::PathBuf;

    use super::*;
    use crate::content::{AuthorProfile, DocumentRecord, MemoryIndex, SiteMetadata};

    pub const PREFIX: &str = "/blog";

    pub fn date(y: i32, m: u32, d: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(y, m, d).and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    pub fn record(slug: &str, title: &str, date: &str) -> DocumentRecord {
        DocumentRecord {
            slug: slug.to_string(),
            title: Some(title.to_string()),
            date: date.to_string(),
            description: None,
            excerpt: format!("excerpt of {}", title),
        }
    }

    pub fn author() -> AuthorProfile {
        AuthorProfile {
            name: "Ada".to_string(),
            summary: "Writes things.".to_string(),
            avatar: ImageAsset {
                source: PathBuf::from("content/assets/profile-pic.jpg"),
                public_path: "/static/profile-pic.jpg".to_string(),
                width: 250,
                height: 250,
            },
        }
    }

    pub fn site() -> SiteMetadata {
        SiteMetadata {
            title: "Fixture Blog".to_string(),
            description: String::new(),
            language: "en".to_string(),
            url: "https://example.com".to_string(),
        }
    }

    pub fn index() -> MemoryIndex {
        MemoryIndex::new(site()).with_author(author())
    }

    /// Owns the collaborators a `RenderContext` borrows
    pub struct Harness {
        pub index: MemoryIndex,
        pub navigator: SiteLinker,
        pub images: FixedImage,
        pub seo: HeadMeta,
    }

    impl Harness {
        pub fn new(index: MemoryIndex) -> Self {
            Self {
                index,
                navigator: SiteLinker::new(PREFIX),
                images: FixedImage::new(PREFIX),
                seo: HeadMeta::new(),
            }
        }

        pub fn ctx(&self) -> RenderContext<'_> {
            RenderContext {
                index: &self.index,
                navigator: &self.navigator,
                images: &self.images,
                seo: &self.seo,
                path_prefix: PREFIX,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_site_linker_applies_prefix() {
        let linker = SiteLinker::new(PREFIX);
        let html = linker
            .link("/hello/", Some("Hello"), vec![Node::text("Hello")])
            .to_html();
        assert_eq!(html, r#"<a href="/blog/hello/" title="Hello">Hello</a>"#);
    }

    #[test]
    fn test_site_linker_leaves_external_links() {
        let linker = SiteLinker::new(PREFIX);
        let html = linker
            .link("https://github.com/am-77", None, vec![Node::text("github")])
            .to_html();
        assert_eq!(html, r#"<a href="https://github.com/am-77">github</a>"#);
    }

    #[test]
    fn test_fixed_image() {
        let html = FixedImage::new(PREFIX).render(&author().avatar, "Ada").to_html();
        assert!(html.contains(r#"src="/blog/static/profile-pic.jpg""#));
        assert!(html.contains(r#"alt="Ada""#));
        assert!(html.contains(r#"width="250""#));
    }

    #[test]
    fn test_head_meta_keeps_last_title() {
        let meta = HeadMeta::new();
        assert_eq!(meta.title(), None);
        meta.set_page_meta("one");
        meta.set_page_meta("two");
        assert_eq!(meta.title().as_deref(), Some("two"));
    }
}
