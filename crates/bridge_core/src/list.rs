use std::fmt::Write;

use crate::convert::is_container;
use crate::tree::{rewrite, Element, Node, Rewrite};

const INDENT: &str = "  ";

/// Replaces every `ul`/`ol` with its Markdown rendering.
///
/// Lists sitting directly in a container (or at the fragment root) go first;
/// a second sweep picks up lists placed anywhere else. Rendered lists are
/// plain text afterwards, so running this again leaves the tree unchanged.
pub(crate) fn render_lists(nodes: Vec<Node>) -> Vec<Node> {
    let nodes = rewrite(nodes, |element, parent| {
        if is_list(element) && parent.map_or(true, is_container) {
            Rewrite::Replace(format!("\n{}", render_list(element, 0)))
        } else {
            Rewrite::Keep
        }
    });
    rewrite(nodes, |element, _| {
        if is_list(element) {
            Rewrite::Replace(format!("\n{}", render_list(element, 0)))
        } else {
            Rewrite::Keep
        }
    })
}

pub(crate) fn render_list(list: &Element, indent: usize) -> String {
    let ordered = list.name == "ol";
    let mut out = String::new();
    let mut counter = 1;

    for item in list
        .children
        .iter()
        .filter_map(Node::as_element)
        .filter(|child| child.name == "li")
    {
        out.push_str(&INDENT.repeat(indent));
        if ordered {
            let _ = write!(out, "{counter}. ");
            counter += 1;
        } else {
            out.push_str("- ");
        }
        out.push_str(&item_text(item));
        out.push('\n');

        if let Some(nested) = item.find_descendant(&is_list) {
            out.push_str(&render_list(nested, indent + 1));
        }
    }
    out
}

/// Direct text and non-list children of an item, each trimmed, joined as-is.
fn item_text(item: &Element) -> String {
    item.children
        .iter()
        .filter_map(|child| match child {
            Node::Text(text) => Some(text.trim().to_owned()),
            Node::Element(element) if !is_list(element) => {
                Some(element.text_content().trim().to_owned())
            }
            Node::Element(_) => None,
        })
        .collect()
}

fn is_list(element: &Element) -> bool {
    matches!(element.name.as_str(), "ul" | "ol")
}
