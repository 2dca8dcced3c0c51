//! Renderable node tree produced by the components
//!
//! A [`Node`] is a small, owned stand-in for a UI tree. Components build it
//! with the [`Element`] builder, the generator serializes it with
//! [`Node::to_html`], and tests inspect it with the query helpers.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt::Write;

use crate::helpers::html_escape;

/// Elements that never have a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// A node in the markup tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Text content, escaped on output
    Text(String),
    /// Trusted markup, emitted verbatim
    Raw(String),
    /// A group of siblings without a wrapping element
    Fragment(Vec<Node>),
}

/// An HTML element
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: IndexMap<String, String>,
    /// Identity among siblings; not serialized
    pub key: Option<String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            key: None,
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append text content
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Whether the `class` attribute contains `class`
    pub fn has_class(&self, class: &str) -> bool {
        self.attrs
            .get("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn raw(html: impl Into<String>) -> Self {
        Node::Raw(html.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Serialize to an HTML string
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&html_escape(text)),
            Node::Raw(html) => out.push_str(html),
            Node::Fragment(nodes) => {
                for node in nodes {
                    node.write_html(out);
                }
            }
            Node::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in &el.attrs {
                    let _ = write!(out, r#" {}="{}""#, name, html_escape(value));
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                    return;
                }
                for child in &el.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", el.tag);
            }
        }
    }

    /// Depth-first walk over all elements, including `self`
    pub fn elements(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_elements(&mut found);
        found
    }

    fn collect_elements<'a>(&'a self, found: &mut Vec<&'a Element>) {
        match self {
            Node::Element(el) => {
                found.push(el);
                for child in &el.children {
                    child.collect_elements(found);
                }
            }
            Node::Fragment(nodes) => {
                for node in nodes {
                    node.collect_elements(found);
                }
            }
            Node::Text(_) | Node::Raw(_) => {}
        }
    }

    /// All elements with the given tag, in document order
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        self.elements()
            .into_iter()
            .filter(|el| el.tag == tag)
            .collect()
    }

    /// All elements carrying the given class, in document order
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.elements()
            .into_iter()
            .filter(|el| el.has_class(class))
            .collect()
    }

    /// Concatenated text of this node and its descendants; raw markup is included as-is
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) | Node::Raw(text) => text.clone(),
            Node::Fragment(nodes) => nodes.iter().map(Node::text_content).collect(),
            Node::Element(el) => el.children.iter().map(Node::text_content).collect(),
        }
    }
}

/// Keys that appear on more than one sibling, in order of first collision
pub fn duplicate_keys(siblings: &[Node]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut duplicates = Vec::new();

    for key in siblings
        .iter()
        .filter_map(Node::as_element)
        .filter_map(|el| el.key.as_deref())
    {
        let count = seen.entry(key).or_insert(0);
        *count += 1;
        if *count == 2 {
            duplicates.push(key.to_string());
        }
    }

    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_html_escapes_text_and_attrs() {
        let node: Node = Element::new("a")
            .attr("href", "/a?b=1&c=2")
            .attr("title", "\"quoted\"")
            .text("Tom & Jerry")
            .into();
        assert_eq!(
            node.to_html(),
            r#"<a href="/a?b=1&amp;c=2" title="&quot;quoted&quot;">Tom &amp; Jerry</a>"#
        );
    }

    #[test]
    fn test_raw_is_verbatim() {
        let node: Node = Element::new("p").child(Node::raw("<em>hi</em>")).into();
        assert_eq!(node.to_html(), "<p><em>hi</em></p>");
    }

    #[test]
    fn test_void_elements_and_fragments() {
        let node = Node::Fragment(vec![
            Element::new("img").attr("src", "/a.jpg").into(),
            Element::new("br").into(),
            Node::text("x"),
        ]);
        assert_eq!(node.to_html(), r#"<img src="/a.jpg"><br>x"#);
    }

    #[test]
    fn test_attribute_order_is_insertion_order() {
        let node: Node = Element::new("div")
            .class("z")
            .attr("id", "a")
            .into();
        assert_eq!(node.to_html(), r#"<div class="z" id="a"></div>"#);
    }

    #[test]
    fn test_queries() {
        let node: Node = Element::new("div")
            .class("outer home")
            .child(Element::new("p").class("x").text("one"))
            .child(Node::Fragment(vec![Element::new("p").text("two").into()]))
            .into();

        assert_eq!(node.find_all("p").len(), 2);
        assert_eq!(node.find_by_class("home").len(), 1);
        assert_eq!(node.find_by_class("x")[0].tag, "p");
        assert_eq!(node.text_content(), "onetwo");
    }

    #[test]
    fn test_duplicate_keys() {
        let siblings: Vec<Node> = ["a", "dup", "b", "dup", "dup"]
            .iter()
            .map(|k| Element::new("li").key(*k).into())
            .collect();
        assert_eq!(duplicate_keys(&siblings), vec!["dup".to_string()]);
        assert!(duplicate_keys(&siblings[..3]).is_empty());
    }
}
