#![deny(missing_docs)]

//! # Serializer
//!
//! Renders a [`Document`] back to text through `quick-xml`'s writer.
//!
//! Whitespace nodes are written as they were read, so an untouched document
//! keeps its layout. Entity references come back as plain characters (except
//! `<`, `>` and `&`), and attribute values are always double-quoted.

use crate::document::{Document, NodeId, NodeKind};
use crate::error::{AppError, AppResult};
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Serializes the whole document, prolog included.
pub fn serialize(doc: &Document) -> AppResult<String> {
    let mut writer = Writer::new(Vec::new());
    write_node(doc, doc.top(), &mut writer)?;

    String::from_utf8(writer.into_inner())
        .map_err(|e| AppError::General(format!("Serialized document is not UTF-8: {}", e)))
}

fn write_node(doc: &Document, id: NodeId, writer: &mut Writer<Vec<u8>>) -> AppResult<()> {
    match doc.kind(id) {
        NodeKind::Document => {
            for child in doc.children(id) {
                write_node(doc, *child, writer)?;
            }
        }
        NodeKind::Element(data) => {
            let mut start = BytesStart::new(data.name.as_str());
            for (key, value) in &data.attributes {
                start.push_attribute((key.as_str(), value.as_str()));
            }

            let children = doc.children(id);
            if children.is_empty() && data.self_closing {
                emit(writer, Event::Empty(start))?;
            } else {
                emit(writer, Event::Start(start))?;
                for child in children {
                    write_node(doc, *child, writer)?;
                }
                emit(writer, Event::End(BytesEnd::new(data.name.as_str())))?;
            }
        }
        NodeKind::Text { value, cdata: true } => {
            emit(writer, Event::CData(BytesCData::new(value.as_str())))?;
        }
        NodeKind::Text { value, cdata: false } => {
            emit(
                writer,
                Event::Text(BytesText::from_escaped(partial_escape(value))),
            )?;
        }
        NodeKind::Markup(event) => emit(writer, event.clone())?,
    }
    Ok(())
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> AppResult<()> {
    writer
        .write_event(event)
        .map_err(|e| AppError::General(format!("Failed to write XML: {}", e)))
}
