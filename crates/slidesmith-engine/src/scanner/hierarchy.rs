//! Element outline for the document, built from tag events.
//!
//! Used to show the nesting of a deck and to jump the editor cursor to an
//! element. Recovery is lenient: a closing tag closes the nearest open
//! element with the same name along with everything opened after it, and a
//! closing tag with no open counterpart is ignored.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::scan_tags;
use crate::text::{LineIndex, Span};

static ID_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bid\s*=\s*["']([^"']+)["']"#).unwrap());
static CLASS_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bclass\s*=\s*["']([^"']+)["']"#).unwrap());
static ANY_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)\s*=\s*["']([^"']+)["']"#).unwrap());

#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub tag_name: String,
    pub id: Option<String>,
    pub class_name: Option<String>,
    /// Attributes other than `id` and `class`, keys lowercased.
    pub attributes: BTreeMap<String, String>,
    /// From the `<` of the opening tag to the `>` of the closing tag (or
    /// document end when never closed).
    pub span: Span,
    /// 1-based line of the opening tag.
    pub line: usize,
    pub children: Vec<ElementNode>,
    pub is_self_closing: bool,
}

impl ElementNode {
    /// Depth-first count of this node and all descendants.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(ElementNode::count).sum::<usize>()
    }
}

/// Builds the element forest for `html`.
pub fn parse_html_hierarchy(html: &str) -> Vec<ElementNode> {
    let lines = LineIndex::new(html);
    let mut roots: Vec<ElementNode> = Vec::new();
    // Open elements, innermost last. Children are attached when an element
    // is popped so the stack can own its nodes.
    let mut stack: Vec<ElementNode> = Vec::new();

    for tag in scan_tags(html) {
        if tag.is_closing {
            let Some(pos) = stack.iter().rposition(|n| n.tag_name == tag.name) else {
                continue;
            };
            while stack.len() > pos {
                let Some(mut node) = stack.pop() else { break };
                if stack.len() == pos {
                    node.span.end = tag.end();
                } else {
                    // Implicitly closed by an ancestor's end tag
                    node.span.end = tag.start();
                }
                attach(&mut stack, &mut roots, node);
            }
            continue;
        }

        let is_self_closing =
            tag.is_self_closing() || tag.raw_attributes.trim_end().ends_with('/');
        let mut node = ElementNode {
            tag_name: tag.name.clone(),
            id: None,
            class_name: None,
            attributes: BTreeMap::new(),
            span: Span::new(tag.start(), tag.end()),
            line: lines.line(tag.start()),
            children: Vec::new(),
            is_self_closing,
        };
        parse_attributes(tag.raw_attributes, &mut node);

        if is_self_closing {
            attach(&mut stack, &mut roots, node);
        } else {
            stack.push(node);
        }
    }

    while let Some(mut node) = stack.pop() {
        node.span.end = html.len();
        attach(&mut stack, &mut roots, node);
    }

    roots
}

fn attach(stack: &mut [ElementNode], roots: &mut Vec<ElementNode>, node: ElementNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

fn parse_attributes(raw: &str, node: &mut ElementNode) {
    if raw.trim().is_empty() {
        return;
    }
    node.id = ID_ATTR_RE.captures(raw).map(|c| c[1].to_string());
    node.class_name = CLASS_ATTR_RE.captures(raw).map(|c| c[1].to_string());
    for caps in ANY_ATTR_RE.captures_iter(raw) {
        let key = caps[1].to_ascii_lowercase();
        if key != "id" && key != "class" {
            node.attributes.insert(key, caps[2].to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_nested_tree_with_spans() {
        let html = "<div class=\"slide\">\n  <h1 id=\"t\">Hi</h1>\n</div>";
        let roots = parse_html_hierarchy(html);
        assert_eq!(roots.len(), 1);
        let slide = &roots[0];
        assert_eq!(slide.tag_name, "div");
        assert_eq!(slide.class_name.as_deref(), Some("slide"));
        assert_eq!(slide.span, Span::new(0, html.len()));
        assert_eq!(slide.children.len(), 1);

        let h1 = &slide.children[0];
        assert_eq!(h1.id.as_deref(), Some("t"));
        assert_eq!(h1.line, 2);
        assert_eq!(h1.span.slice(html), "<h1 id=\"t\">Hi</h1>");
    }

    #[test]
    fn void_elements_have_no_children_and_do_not_nest() {
        let html = "<p><img src=\"a.png\" alt=\"x\"><br>text</p>";
        let roots = parse_html_hierarchy(html);
        let p = &roots[0];
        assert_eq!(p.children.len(), 2);
        assert!(p.children.iter().all(|c| c.is_self_closing));
        assert_eq!(p.children[0].attributes.get("src").map(String::as_str), Some("a.png"));
        assert_eq!(p.children[0].attributes.get("alt").map(String::as_str), Some("x"));
    }

    #[test]
    fn closing_an_ancestor_closes_open_descendants() {
        let html = "<div><span>text</div>";
        let roots = parse_html_hierarchy(html);
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].span.end, html.len());
        let span = &roots[0].children[0];
        assert_eq!(span.tag_name, "span");
        assert_eq!(span.span.end, html.find("</div>").unwrap());
    }

    #[test]
    fn unclosed_elements_run_to_document_end() {
        let html = "<section><p>one";
        let roots = parse_html_hierarchy(html);
        assert_eq!(roots[0].span.end, html.len());
        assert_eq!(roots[0].children[0].span.end, html.len());
        assert_eq!(roots[0].count(), 2);
    }

    #[test]
    fn stray_closing_tags_are_ignored() {
        let roots = parse_html_hierarchy("</b><i>x</i>");
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].tag_name, "i");
    }
}
