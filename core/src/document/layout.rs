//! Indentation detection for inserted elements.

use super::{Document, NodeId};

/// Detects the indentation string of the line a node starts on.
///
/// Only whitespace that contains a line break counts. The root element is
/// considered unindented when nothing precedes it.
pub(super) fn indent_before(doc: &Document, node: NodeId) -> Option<String> {
    let parent = doc.parent(node)?;
    let siblings = doc.children(parent);
    let pos = siblings.iter().position(|s| *s == node)?;

    let prev = pos.checked_sub(1).map(|p| siblings[p]);
    match prev.and_then(|p| line_indent(doc, p)) {
        Some(indent) => Some(indent),
        None if node == doc.root() => Some(String::new()),
        None => None,
    }
}

/// Position of the whitespace before the parent's closing tag, if it ends on its own line.
pub(super) fn closing_whitespace(doc: &Document, parent: NodeId) -> Option<usize> {
    let children = doc.children(parent);
    let last = *children.last()?;
    line_indent(doc, last).map(|_| children.len() - 1)
}

/// Indentation for a new child element of `parent`.
pub(super) fn child_indent(doc: &Document, parent: NodeId) -> Option<String> {
    let mut elements = doc.child_elements(parent).peekable();
    if elements.peek().is_some() {
        return elements.find_map(|e| indent_before(doc, e));
    }

    let outer = indent_before(doc, parent)?;
    let unit = indent_unit(doc)?;
    Some(format!("{}{}", outer, unit))
}

/// The document's line break: `\r\n` when its first line break is one, `\n` otherwise.
pub(super) fn line_break(doc: &Document) -> &'static str {
    let crlf = doc
        .descendants(doc.top())
        .into_iter()
        .filter(|node| doc.is_whitespace(*node))
        .filter_map(|node| doc.text_value(node))
        .find_map(|text| text.find('\n').map(|pos| text[..pos].ends_with('\r')));
    if crlf == Some(true) {
        "\r\n"
    } else {
        "\n"
    }
}

/// The step between the root and its first indented child.
fn indent_unit(doc: &Document) -> Option<String> {
    let root = doc.root();
    let root_indent = indent_before(doc, root).unwrap_or_default();
    let child = doc
        .child_elements(root)
        .find_map(|e| indent_before(doc, e))?;

    let unit = child.strip_prefix(root_indent.as_str()).unwrap_or(&child);
    (!unit.is_empty()).then(|| unit.to_string())
}

fn line_indent(doc: &Document, node: NodeId) -> Option<String> {
    if !doc.is_whitespace(node) {
        return None;
    }
    let text = doc.text_value(node)?;
    text.rfind('\n').map(|pos| text[pos + 1..].to_string())
}
