//! Author identity card

use super::RenderContext;
use crate::error::Result;
use crate::markup::{Element, Node};

/// An outbound link to one of the author's profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileLink {
    pub destination_url: &'static str,
    pub display_label: &'static str,
    pub title_attribute: &'static str,
}

/// Profiles listed on the card, in display order
pub const PROFILE_LINKS: [ProfileLink; 8] = [
    ProfileLink {
        destination_url: "https://am-77.github.io/",
        display_label: "website",
        title_attribute: "AM-77",
    },
    ProfileLink {
        destination_url: "https://github.com/am-77",
        display_label: "github",
        title_attribute: "AM-77",
    },
    ProfileLink {
        destination_url: "https://twitter.com/__AM77__",
        display_label: "twitter",
        title_attribute: "__AM77__",
    },
    ProfileLink {
        destination_url: "https://www.linkedin.com/in/mohamed-amine-griche",
        display_label: "linkedin",
        title_attribute: "mohamed-amine-griche",
    },
    ProfileLink {
        destination_url: "https://www.npmjs.com/~am-77",
        display_label: "npm",
        title_attribute: "AM-77",
    },
    ProfileLink {
        destination_url: "https://dev.to/am77",
        display_label: "dev.to",
        title_attribute: "AM-77",
    },
    ProfileLink {
        destination_url: "https://stackoverflow.com/users/10564525",
        display_label: "stackoverflow",
        title_attribute: "AM-77",
    },
    ProfileLink {
        destination_url: "https://codepen.io/am-77",
        display_label: "codepen",
        title_attribute: "AM-77",
    },
];

/// Render the identity card
///
/// Fails when the index cannot produce exactly one author avatar.
pub fn render(ctx: &RenderContext<'_>) -> Result<Node> {
    let author = ctx.index.author()?;

    let links = PROFILE_LINKS.iter().map(|link| {
        ctx.navigator.link(
            link.destination_url,
            Some(link.title_attribute),
            vec![Node::text(link.display_label)],
        )
    });

    let card = Element::new("div")
        .class("bio-container")
        .child(
            Element::new("div")
                .class("header")
                .child(
                    Element::new("div")
                        .class("author-pic")
                        .child(ctx.images.render(&author.avatar, &author.name)),
                )
                .child(
                    Element::new("div")
                        .class("author-info")
                        .child(Element::new("p").class("author-name").text(&author.name))
                        .child(
                            Element::new("p")
                                .class("author-summary")
                                .text(&author.summary),
                        ),
                ),
        )
        .child(
            Element::new("div")
                .class("footer")
                .child(Element::new("p").text("You can find me here: "))
                .child(Element::new("div").class("links").children(links)),
        );

    Ok(card.into())
}
