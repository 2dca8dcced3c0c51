//! Layout shell shared by every page

use super::RenderContext;
use crate::markup::{Element, Node};

/// Header visibility, decided per render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    /// The site root: no header
    Home,
    /// Any other page: header linking back to the root
    Subpage,
}

impl ShellState {
    /// `Home` only when `current_path` is exactly the root path; an unknown
    /// path shows navigation
    pub fn select(current_path: Option<&str>, root_prefix: &str) -> Self {
        match current_path {
            Some(path) if path == format!("{}/", root_prefix) => ShellState::Home,
            _ => ShellState::Subpage,
        }
    }
}

/// Current path and title handed to the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationContext {
    pub current_path: Option<String>,
    pub page_title: String,
}

/// Wrap `children` in the layout container
pub fn render(ctx: &RenderContext<'_>, nav: &NavigationContext, children: Node) -> Node {
    let state = ShellState::select(nav.current_path.as_deref(), ctx.path_prefix);

    let mut container = Element::new("div");
    match state {
        ShellState::Home => {
            container = container.class("layout-container home");
        }
        ShellState::Subpage => {
            let home_link = ctx
                .navigator
                .link("/", None, vec![Node::text(&nav.page_title)]);
            container = container.class("layout-container").child(
                Element::new("header").child(Element::new("h3").class("link").child(home_link)),
            );
        }
    }

    container.child(Element::new("main").child(children)).into()
}
