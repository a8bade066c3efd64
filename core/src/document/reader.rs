//! Builds a [`Document`] from descriptor text.

use super::{Document, ElementData, NodeId, NodeKind};
use crate::error::{AppError, AppResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Reads the whole input into an arena, keeping whitespace and markup so the
/// document can be written back with its original layout.
pub(super) fn read_document(text: &str) -> AppResult<Document> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(false);

    let mut doc = Document::empty();
    let mut stack: Vec<NodeId> = vec![doc.top()];
    let mut root: Option<NodeId> = None;
    let mut entities: HashMap<String, String> = HashMap::new();

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .map_err(|e| AppError::parse(format!("{} (at byte {})", e, position)))?;

        let parent = *stack.last().unwrap_or(&doc.top());
        let at_top = stack.len() == 1;

        match event {
            Event::Start(start) => {
                let id = open_element(&mut doc, parent, &start, false, &entities)?;
                claim_root(&mut root, at_top, id, position)?;
                stack.push(id);
            }
            Event::Empty(start) => {
                let id = open_element(&mut doc, parent, &start, true, &entities)?;
                claim_root(&mut root, at_top, id, position)?;
            }
            Event::End(_) => {
                // quick-xml has already matched the end tag against its start tag.
                if stack.len() > 1 {
                    stack.pop();
                }
            }
            Event::Text(t) => {
                let value = t
                    .unescape_with(|name| entities.get(name).map(String::as_str))
                    .map_err(AppError::parse)?
                    .into_owned();
                if at_top && !value.trim().is_empty() {
                    return Err(AppError::parse(format!(
                        "text outside of the root element (at byte {})",
                        position
                    )));
                }
                doc.push_child(
                    parent,
                    NodeKind::Text {
                        value,
                        cdata: false,
                    },
                );
            }
            Event::CData(c) => {
                if at_top {
                    return Err(AppError::parse(format!(
                        "CDATA outside of the root element (at byte {})",
                        position
                    )));
                }
                let value = String::from_utf8_lossy(&c.into_inner()).into_owned();
                doc.push_child(parent, NodeKind::Text { value, cdata: true });
            }
            Event::DocType(doctype) => {
                entities.extend(declared_entities(&String::from_utf8_lossy(&doctype)));
                doc.push_child(parent, NodeKind::Markup(Event::DocType(doctype.into_owned())));
            }
            Event::Eof => break,
            other => {
                doc.push_child(parent, NodeKind::Markup(other.into_owned()));
            }
        }
    }

    if stack.len() > 1 {
        let open = stack
            .last()
            .and_then(|id| doc.element(*id))
            .map(|e| e.name.clone())
            .unwrap_or_default();
        return Err(AppError::parse(format!(
            "unexpected end of input: <{}> is not closed",
            open
        )));
    }

    let root = root.ok_or_else(|| AppError::parse("document has no root element"))?;
    doc.set_root(root);
    Ok(doc)
}

fn open_element(
    doc: &mut Document,
    parent: NodeId,
    start: &BytesStart<'_>,
    self_closing: bool,
    entities: &HashMap<String, String>,
) -> AppResult<NodeId> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(AppError::parse)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value_with(|name| entities.get(name).map(String::as_str))
            .map_err(AppError::parse)?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(doc.push_child(
        parent,
        NodeKind::Element(ElementData {
            name,
            attributes,
            self_closing,
        }),
    ))
}

/// Internal general entities declared in a doctype's internal subset.
///
/// External (`SYSTEM`/`PUBLIC`) and parameter (`%`) entities are not resolved.
fn declared_entities(doctype: &str) -> Vec<(String, String)> {
    static ENTITY_RE: OnceLock<Regex> = OnceLock::new();
    let entity = ENTITY_RE.get_or_init(|| {
        Regex::new(r#"<!ENTITY\s+([^\s%"']+)\s+(?:"([^"]*)"|'([^']*)')\s*>"#)
            .expect("Invalid regex")
    });

    entity
        .captures_iter(doctype)
        .filter_map(|caps| {
            let value = caps.get(2).or_else(|| caps.get(3))?;
            Some((caps[1].to_string(), value.as_str().to_string()))
        })
        .collect()
}

fn claim_root(
    root: &mut Option<NodeId>,
    at_top: bool,
    id: NodeId,
    position: impl std::fmt::Display,
) -> AppResult<()> {
    if !at_top {
        return Ok(());
    }
    if root.is_some() {
        return Err(AppError::parse(format!(
            "more than one root element (at byte {})",
            position
        )));
    }
    *root = Some(id);
    Ok(())
}
