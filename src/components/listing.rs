//! Home page listing every post

use super::shell::{self, NavigationContext};
use super::{author, Location, RenderContext};
use crate::content::{ContentIndex, DocumentCollection, DocumentQuery, DocumentRecord};
use crate::error::Result;
use crate::markup::{duplicate_keys, Element, Node};

/// Title handed to the SEO sink for the home page
pub const SEO_TITLE: &str = "AM77 blog";

/// Query result the listing renders from
#[derive(Debug, Clone, PartialEq)]
pub struct ListingData {
    pub site_title: String,
    pub documents: DocumentCollection,
}

impl ListingData {
    /// Fetch the site title and every published document, newest first
    pub fn query(index: &dyn ContentIndex) -> Result<Self> {
        Ok(Self {
            site_title: index.site_metadata()?.title,
            documents: index.documents(&DocumentQuery::newest_first())?,
        })
    }
}

/// Render the home page
///
/// Documents are rendered in the order given; nothing is re-sorted.
pub fn render(ctx: &RenderContext<'_>, data: &ListingData, location: &Location) -> Result<Node> {
    ctx.seo.set_page_meta(SEO_TITLE);

    let entries: Vec<Node> = data.documents.iter().map(|r| entry(ctx, r)).collect();
    for key in duplicate_keys(&entries) {
        tracing::warn!("Duplicate post slug {:?} in listing, entries share a key", key);
    }

    let content = Element::new("div")
        .class("home-container")
        .child(author::render(ctx)?)
        .child(Element::new("div").class("all-posts").children(entries));

    let nav = NavigationContext {
        current_path: location.pathname.clone(),
        page_title: data.site_title.clone(),
    };
    Ok(shell::render(ctx, &nav, content.into()))
}

/// One card in the listing, keyed by slug
pub fn entry(ctx: &RenderContext<'_>, record: &DocumentRecord) -> Node {
    let title = record.display_title();

    Element::new("article")
        .class("post-card")
        .key(&record.slug)
        .child(
            Element::new("header")
                .child(
                    Element::new("h3").class("post-title link").child(ctx.navigator.link(
                        &record.slug,
                        None,
                        vec![Node::text(title)],
                    )),
                )
                .child(Element::new("p").class("post-date").text(&record.date)),
        )
        .child(
            Element::new("section")
                .child(Element::new("p").child(Node::raw(record.display_body()))),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::fixtures::*;
    use crate::content::DocumentRecord;

    fn listing(harness: &Harness) -> Node {
        let data = ListingData::query(&harness.index).unwrap();
        render(&harness.ctx(), &data, &Location::new("/blog/")).unwrap()
    }

    fn card_titles(node: &Node) -> Vec<String> {
        node.find_by_class("post-title")
            .into_iter()
            .map(|el| Node::Element(el.clone()).text_content())
            .collect()
    }

    #[test]
    fn test_entries_newest_first() {
        let index = index()
            .with_document(record("/old/", "Old", "May 05, 2023"), date(2023, 5, 5))
            .with_document(record("/new/", "New", "January 01, 2024"), date(2024, 1, 1));
        let harness = Harness::new(index);
        let node = listing(&harness);

        assert_eq!(card_titles(&node), vec!["New", "Old"]);
        let dates: Vec<String> = node
            .find_by_class("post-date")
            .into_iter()
            .map(|el| Node::Element(el.clone()).text_content())
            .collect();
        assert_eq!(dates, vec!["January 01, 2024", "May 05, 2023"]);
    }

    #[test]
    fn test_render_keeps_collection_order() {
        let harness = Harness::new(index());
        let data = ListingData {
            site_title: "T".to_string(),
            documents: DocumentCollection::new(vec![
                record("/b/", "B", ""),
                record("/a/", "A", ""),
                record("/c/", "C", ""),
            ]),
        };
        let node = render(&harness.ctx(), &data, &Location::new("/blog/")).unwrap();
        assert_eq!(card_titles(&node), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_entry_fallbacks() {
        let harness = Harness::new(index());
        let record = DocumentRecord {
            slug: "/untitled/".to_string(),
            title: Some(String::new()),
            date: "June 21, 2019".to_string(),
            description: None,
            excerpt: "An <em>excerpt</em>".to_string(),
        };
        let html = entry(&harness.ctx(), &record).to_html();
        assert_eq!(
            html,
            concat!(
                r#"<article class="post-card"><header><h3 class="post-title link">"#,
                r#"<a href="/blog/untitled/">/untitled/</a></h3>"#,
                r#"<p class="post-date">June 21, 2019</p></header>"#,
                r#"<section><p>An <em>excerpt</em></p></section></article>"#
            )
        );
    }

    #[test]
    fn test_description_wins_over_excerpt() {
        let harness = Harness::new(index());
        let mut record = record("/a/", "A", "");
        record.description = Some("<b>desc</b>".to_string());
        let html = entry(&harness.ctx(), &record).to_html();
        assert!(html.contains("<p><b>desc</b></p>"));
        assert!(!html.contains("excerpt of A"));
    }

    #[test]
    fn test_home_layout_and_seo() {
        let harness = Harness::new(index().with_document(record("/a/", "A", ""), None));
        let node = listing(&harness);

        // Only the post card header; the shell adds none on the home page
        assert_eq!(node.find_all("header").len(), 1);
        assert_eq!(node.find_by_class("home").len(), 1);
        assert_eq!(node.find_by_class("bio-container").len(), 1);
        assert_eq!(harness.seo.title().as_deref(), Some(SEO_TITLE));
    }

    #[test]
    fn test_subpage_location_shows_site_title() {
        let harness = Harness::new(index());
        let data = ListingData::query(&harness.index).unwrap();
        let node = render(&harness.ctx(), &data, &Location::new("/blog/page/2")).unwrap();

        let shell_header = node
            .find_all("h3")
            .into_iter()
            .find(|h| h.has_class("link") && !h.has_class("post-title"))
            .map(|h| Node::Element(h.clone()).text_content());
        assert_eq!(shell_header.as_deref(), Some("Fixture Blog"));
    }

    #[test]
    fn test_duplicate_slugs_both_render() {
        let harness = Harness::new(
            index()
                .with_document(record("dup", "First", ""), date(2024, 1, 1))
                .with_document(record("dup", "Second", ""), date(2023, 1, 1)),
        );
        let node = listing(&harness);

        assert_eq!(card_titles(&node), vec!["First", "Second"]);
        let all_posts = node.find_by_class("all-posts")[0];
        assert_eq!(duplicate_keys(&all_posts.children), vec!["dup".to_string()]);
    }

    #[test]
    fn test_missing_author_fails_render() {
        let harness = Harness::new(crate::content::MemoryIndex::new(site()));
        let data = ListingData::query(&harness.index).unwrap();
        assert!(render(&harness.ctx(), &data, &Location::new("/blog/")).is_err());
    }
}
