//! Single post page

use super::shell::{self, NavigationContext};
use super::{author, RenderContext};
use crate::content::DocumentRecord;
use crate::error::Result;
use crate::markup::{Element, Node};

/// A post with its rendered body and its neighbours in the listing
#[derive(Debug, Clone, Copy)]
pub struct PostView<'a> {
    pub site_title: &'a str,
    pub record: &'a DocumentRecord,
    pub body_html: &'a str,
    pub newer: Option<&'a DocumentRecord>,
    pub older: Option<&'a DocumentRecord>,
}

/// Render a post page
pub fn render(ctx: &RenderContext<'_>, view: &PostView<'_>) -> Result<Node> {
    let record = view.record;
    ctx.seo.set_page_meta(record.display_title());

    let article = Element::new("article")
        .class("post")
        .child(
            Element::new("header")
                .child(Element::new("h1").class("post-title").text(record.display_title()))
                .child(Element::new("p").class("post-date").text(&record.date)),
        )
        .child(Element::new("section").child(Node::raw(view.body_html)))
        .child(Element::new("hr"))
        .child(Element::new("footer").child(author::render(ctx)?));

    let mut pager = Element::new("ul").class("post-nav");
    pager = pager.child(pager_item(ctx, view.older, "prev", |t| format!("← {}", t)));
    pager = pager.child(pager_item(ctx, view.newer, "next", |t| format!("{} →", t)));

    let content = Node::Fragment(vec![
        article.into(),
        Element::new("nav").child(pager).into(),
    ]);

    let nav = NavigationContext {
        current_path: Some(ctx.path(&record.slug)),
        page_title: view.site_title.to_string(),
    };
    Ok(shell::render(ctx, &nav, content))
}

/// A pager slot; empty when there is no neighbour
fn pager_item(
    ctx: &RenderContext<'_>,
    neighbour: Option<&DocumentRecord>,
    class: &str,
    label: impl Fn(&str) -> String,
) -> Element {
    let item = Element::new("li").class(class);
    match neighbour {
        Some(r) => item.child(ctx.navigator.link(
            &r.slug,
            None,
            vec![Node::text(label(r.display_title()))],
        )),
        None => item,
    }
}
