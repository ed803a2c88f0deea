//! Build an [`XmlDocument`] from XML text.

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesRef, BytesStart, Event};

use crate::error::{Error, Result};
use crate::util::{decode_text, extract_xml_encoding};

use super::arena::{Attribute, NodeId, XmlDocument};

/// Parse XML bytes, detecting the encoding first.
pub fn parse_bytes(bytes: &[u8]) -> Result<XmlDocument> {
    let hint_encoding = extract_xml_encoding(bytes);
    let content = decode_text(bytes, hint_encoding);
    parse_str(&content)
}

/// Parse an XML string into a fully materialized tree.
///
/// Comments, processing instructions and the DOCTYPE are dropped. Text
/// outside the document element is ignored.
pub fn parse_str(content: &str) -> Result<XmlDocument> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(false);

    let mut doc = XmlDocument::new();
    let mut stack: Vec<NodeId> = vec![doc.document()];

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let id = element_from(&mut doc, &e)?;
                let parent = current(&stack, &doc);
                doc.append(parent, id);
                stack.push(id);
            }
            Event::Empty(e) => {
                let id = element_from(&mut doc, &e)?;
                let parent = current(&stack, &doc);
                doc.append(parent, id);
            }
            Event::End(e) => {
                if stack.len() <= 1 {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    return Err(Error::MalformedXml(format!("unexpected end tag </{name}>")));
                }
                stack.pop();
            }
            Event::Text(e) => {
                if stack.len() > 1 {
                    doc.append_text(current(&stack, &doc), &String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::CData(e) => {
                if stack.len() > 1 {
                    doc.append_text(current(&stack, &doc), &String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::GeneralRef(e) => {
                if stack.len() > 1 {
                    let text = resolve_reference(&e)?;
                    doc.append_text(current(&stack, &doc), &text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(&open) = stack.get(1) {
        let name = doc.element_name(open).unwrap_or_default().to_string();
        return Err(Error::MalformedXml(format!("unclosed element <{name}>")));
    }
    if doc.root_element().is_none() {
        return Err(Error::MalformedXml("no root element".to_string()));
    }

    Ok(doc)
}

fn current(stack: &[NodeId], doc: &XmlDocument) -> NodeId {
    stack.last().copied().unwrap_or(doc.document())
}

/// Character references and the five predefined entities are resolved.
/// Other named entities are kept as `&name;`.
fn resolve_reference(e: &BytesRef<'_>) -> Result<String> {
    if let Some(ch) = e.resolve_char_ref()? {
        return Ok(ch.to_string());
    }
    let name = e.decode().map_err(quick_xml::Error::from)?;
    Ok(match resolve_predefined_entity(&name) {
        Some(text) => text.to_string(),
        None => format!("&{name};"),
    })
}

fn element_from(doc: &mut XmlDocument, e: &BytesStart<'_>) -> Result<NodeId> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| Error::MalformedXml(format!("<{name}>: {err}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        let value =
            unescape(&raw).map_err(|err| Error::MalformedXml(format!("<{name} {key}>: {err}")))?;
        attrs.push(Attribute::new(key, value));
    }

    Ok(doc.create_element(name, attrs))
}
