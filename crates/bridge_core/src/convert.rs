use bridge_logging::bridge_trace;

use crate::list::render_lists;
use crate::tree::{self, rewrite, Element, Rewrite};

pub trait Converter: Send + Sync {
    fn to_markdown(&self, html: &str) -> String;
}

/// Converter for the element set chat renderers emit.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownConverter;

impl Converter for MarkdownConverter {
    fn to_markdown(&self, html: &str) -> String {
        convert(html)
    }
}

/// Block elements that only contribute a line boundary.
const CONTAINER_TAGS: &[&str] = &[
    "div", "section", "article", "main", "header", "footer", "nav", "aside", "figure",
    "figcaption", "details", "summary",
];

pub(crate) fn is_container(name: &str) -> bool {
    CONTAINER_TAGS.contains(&name)
}

/// Converts an HTML fragment to Markdown-flavoured plain text.
///
/// Passes run in a fixed order: code blocks, headings, emphasis, inline code,
/// links, lists, paragraphs, line breaks, containers. Everything left over
/// dissolves to its text. Never fails; malformed markup is recovered by the
/// HTML5 parser.
pub fn convert(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let mut nodes = tree::parse_fragment(html);
    nodes = rewrite(nodes, |element, _| fence_code_block(element));
    for level in 1..=6 {
        let tag = format!("h{level}");
        nodes = rewrite(nodes, |element, _| {
            if element.name == tag {
                Rewrite::Replace(format!(
                    "\n{} {}\n",
                    "#".repeat(level),
                    element.text_content()
                ))
            } else {
                Rewrite::Keep
            }
        });
    }
    nodes = rewrite(nodes, |element, _| wrap(element, &["strong", "b"], "**"));
    nodes = rewrite(nodes, |element, _| wrap(element, &["em", "i"], "*"));
    nodes = rewrite(nodes, |element, _| wrap(element, &["code"], "`"));
    nodes = rewrite(nodes, |element, _| link(element));
    nodes = render_lists(nodes);
    nodes = rewrite(nodes, |element, _| match element.name.as_str() {
        "p" => Rewrite::Replace(format!("{}\n\n", element.text_content())),
        _ => Rewrite::Keep,
    });
    nodes = rewrite(nodes, |element, _| match element.name.as_str() {
        "br" => Rewrite::Replace("\n".to_owned()),
        "hr" => Rewrite::Replace("\n---\n".to_owned()),
        _ => Rewrite::Keep,
    });
    nodes = rewrite(nodes, |element, _| {
        if is_container(&element.name) {
            Rewrite::Unwrap { suffix: "\n" }
        } else {
            Rewrite::Keep
        }
    });

    let text = tree::text_content(&nodes);
    let markdown = collapse_blank_lines(&text).trim().to_owned();
    bridge_trace!(
        "converted {} bytes of html into {} bytes of markdown",
        html.len(),
        markdown.len()
    );
    markdown
}

fn fence_code_block(element: &Element) -> Rewrite {
    if element.name != "pre" {
        return Rewrite::Keep;
    }
    let code = element.find_descendant(&|child: &Element| child.name == "code");
    let body = code.map_or_else(|| element.text_content(), Element::text_content);
    let lang = code
        .and_then(|code| code.attr("class"))
        .and_then(language_from_class)
        .unwrap_or_default();
    Rewrite::Replace(format!("\n```{lang}\n{body}\n```\n"))
}

/// Language name from the first `language-xxx` class token.
fn language_from_class(class: &str) -> Option<&str> {
    class.split_whitespace().find_map(|token| {
        let rest = token.strip_prefix("language-")?;
        let end = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        (end > 0).then(|| &rest[..end])
    })
}

fn wrap(element: &Element, tags: &[&str], marker: &str) -> Rewrite {
    if tags.contains(&element.name.as_str()) {
        Rewrite::Replace(format!("{marker}{}{marker}", element.text_content()))
    } else {
        Rewrite::Keep
    }
}

fn link(element: &Element) -> Rewrite {
    if element.name != "a" {
        return Rewrite::Keep;
    }
    let href = element.attr("href").unwrap_or_default();
    Rewrite::Replace(format!("[{}]({href})", element.text_content()))
}

/// Caps every run of newlines at two.
fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0;
    for ch in text.chars() {
        if ch == '\n' {
            run += 1;
            if run > 2 {
                continue;
            }
        } else {
            run = 0;
        }
        out.push(ch);
    }
    out
}
