//! Owned node tree used while converting a single fragment.
//!
//! The fragment is parsed once with `scraper`, lifted into [`Node`]s and then
//! threaded through a series of [`rewrite`] passes. Each pass consumes the
//! previous tree and returns a new one; replaced elements become plain text
//! that later passes never inspect again.

use bridge_logging::bridge_debug;
use ego_tree::iter::Edge;
use ego_tree::NodeRef;
use scraper::node::Node as HtmlNode;
use scraper::Html;

use crate::convert::is_container;

/// Deepest element nesting kept as structure; deeper subtrees become text.
pub(crate) const MAX_DEPTH: usize = 256;

/// Elements that end a line when a subtree is flattened.
const LINE_BREAK_TAGS: &[&str] = &[
    "p", "br", "hr", "li", "pre", "blockquote", "tr", "h1", "h2", "h3", "h4", "h5", "h6",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Text(String),
    Element(Element),
}

impl Node {
    pub(crate) fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Element {
    pub(crate) name: String,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) children: Vec<Node>,
}

impl Element {
    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn text_content(&self) -> String {
        text_content(&self.children)
    }

    /// First descendant (document order) matching `pred`, excluding `self`.
    pub(crate) fn find_descendant(&self, pred: &impl Fn(&Element) -> bool) -> Option<&Element> {
        self.children
            .iter()
            .filter_map(Node::as_element)
            .find_map(|child| {
                if pred(child) {
                    Some(child)
                } else {
                    child.find_descendant(pred)
                }
            })
    }
}

/// What a pass does with a visited element.
pub(crate) enum Rewrite {
    /// Leave the element in place and keep walking its children.
    Keep,
    /// Replace the element (and its whole subtree) with text.
    Replace(String),
    /// Rewrite the children, splice them into the parent and append `suffix`.
    Unwrap { suffix: &'static str },
}

/// Parses an HTML fragment the way a browser fills `innerHTML`, never failing.
pub(crate) fn parse_fragment(html: &str) -> Vec<Node> {
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .children()
        .filter_map(|child| lift(child, 0))
        .collect()
}

fn lift(node: NodeRef<'_, HtmlNode>, depth: usize) -> Option<Node> {
    match node.value() {
        HtmlNode::Text(text) => {
            let text: &str = text;
            Some(Node::Text(text.to_owned()))
        }
        HtmlNode::Element(element) if depth >= MAX_DEPTH => {
            bridge_debug!("flattening <{}> nested past depth {}", element.name(), MAX_DEPTH);
            Some(Node::Text(flatten(node)))
        }
        HtmlNode::Element(element) => Some(Node::Element(Element {
            name: element.name().to_ascii_lowercase(),
            attrs: element
                .attrs()
                .map(|(key, value)| (key.to_owned(), value.to_owned()))
                .collect(),
            children: node
                .children()
                .filter_map(|child| lift(child, depth + 1))
                .collect(),
        })),
        // comments, doctypes and processing instructions carry no text
        _ => None,
    }
}

/// Text of a subtree in document order, with a line break after each block.
fn flatten(node: NodeRef<'_, HtmlNode>) -> String {
    let mut out = String::new();
    for edge in node.traverse() {
        match edge {
            Edge::Open(open) => {
                if let HtmlNode::Text(text) = open.value() {
                    out.push_str(text);
                }
            }
            Edge::Close(close) => {
                if let HtmlNode::Element(element) = close.value() {
                    let name = element.name();
                    if LINE_BREAK_TAGS.contains(&name) || is_container(name) {
                        out.push('\n');
                    }
                }
            }
        }
    }
    out
}

/// Concatenated text of every text node below `nodes`, like DOM `textContent`.
pub(crate) fn text_content(nodes: &[Node]) -> String {
    let mut out = String::new();
    push_text(nodes, &mut out);
    out
}

fn push_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => push_text(&element.children, out),
        }
    }
}

/// Runs one pre-order pass over the tree.
///
/// `rule` sees each element together with its parent's tag name (`None` at
/// the fragment root). Children of a replaced element are not visited.
pub(crate) fn rewrite<F>(nodes: Vec<Node>, mut rule: F) -> Vec<Node>
where
    F: FnMut(&Element, Option<&str>) -> Rewrite,
{
    rewrite_level(nodes, None, &mut rule)
}

fn rewrite_level<F>(nodes: Vec<Node>, parent: Option<&str>, rule: &mut F) -> Vec<Node>
where
    F: FnMut(&Element, Option<&str>) -> Rewrite,
{
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        let element = match node {
            Node::Element(element) => element,
            text @ Node::Text(_) => {
                out.push(text);
                continue;
            }
        };
        match rule(&element, parent) {
            Rewrite::Keep => {
                let Element {
                    name,
                    attrs,
                    children,
                } = element;
                let children = rewrite_level(children, Some(name.as_str()), rule);
                out.push(Node::Element(Element {
                    name,
                    attrs,
                    children,
                }));
            }
            Rewrite::Replace(text) => out.push(Node::Text(text)),
            Rewrite::Unwrap { suffix } => {
                out.extend(rewrite_level(element.children, Some(element.name.as_str()), rule));
                out.push(Node::Text(suffix.to_owned()));
            }
        }
    }
    out
}
