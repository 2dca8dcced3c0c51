//! Page for unknown routes

use super::shell::{self, NavigationContext};
use super::{Location, RenderContext};
use crate::markup::{Element, Node};

pub const SEO_TITLE: &str = "404: Not Found";

pub fn render(ctx: &RenderContext<'_>, site_title: &str, location: &Location) -> Node {
    ctx.seo.set_page_meta(SEO_TITLE);

    let content = Element::new("div")
        .class("not-found")
        .child(Element::new("h1").text("Not Found"))
        .child(Element::new("p").text("You just hit a route that doesn't exist... the sadness."));

    let nav = NavigationContext {
        current_path: location.pathname.clone(),
        page_title: site_title.to_string(),
    };
    shell::render(ctx, &nav, content.into())
}
