//! Documentation markup parser.
//!
//! Turns the raw XML documentation attached to a symbol into a [`DocElement`]
//! tree. Content is wrapped in a synthetic `<doc>` root so that fragments with
//! several top-level tags (`<summary/><remarks/>`) parse as one document; a
//! single `<member>`/`<doc>` wrapper from the front end is unwrapped.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{RenderError, Result};
use crate::parser::types::{DocElement, DocNode};

const ROOT_TAG: &str = "doc";

/// Parses the documentation markup of symbol `id`.
///
/// Empty markup yields an empty root element.
///
/// # Errors
///
/// Returns [`RenderError::MalformedMarkup`] when the markup is not well-formed.
pub fn parse_markup(id: &str, markup: &str) -> Result<DocElement> {
    let malformed = |message: String| RenderError::MalformedMarkup {
        id: id.to_string(),
        message,
    };

    let wrapped = format!("<{ROOT_TAG}>{markup}</{ROOT_TAG}>");
    let mut reader = Reader::from_str(&wrapped);
    reader.config_mut().trim_text(false);

    // Open elements, innermost last
    let mut stack: Vec<DocElement> = Vec::new();
    let mut root: Option<DocElement> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                let position = reader.error_position();
                return Err(malformed(format!("{e} at byte {position}")));
            }
        };

        match event {
            Event::Start(e) => {
                stack.push(start_element(&e).map_err(malformed)?);
            }
            Event::Empty(e) => {
                let element = start_element(&e).map_err(malformed)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(DocNode::Element(element)),
                    None => return Err(malformed("content outside of root".to_string())),
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| malformed("unbalanced end tag".to_string()))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(DocNode::Element(element)),
                    None => root = Some(element),
                }
            }
            Event::Text(e) => {
                let text = reader
                    .decoder()
                    .decode(&e)
                    .map_err(|e| malformed(e.to_string()))?;
                append_text(&mut stack, &text);
            }
            Event::GeneralRef(e) => {
                let entity = reader
                    .decoder()
                    .decode(&e)
                    .map_err(|e| malformed(e.to_string()))?;
                let text = decode_entity(&entity)
                    .ok_or_else(|| malformed(format!("unknown entity &{entity};")))?;
                append_text(&mut stack, &text);
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                append_text(&mut stack, &text);
            }
            Event::Eof => break,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    if !stack.is_empty() {
        return Err(malformed("unclosed element".to_string()));
    }

    let root = root.ok_or_else(|| malformed("empty document".to_string()))?;
    Ok(unwrap_member(root))
}

fn start_element(e: &BytesStart) -> std::result::Result<DocElement, String> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| e.to_string())?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(DocElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn append_text(stack: &mut [DocElement], text: &str) {
    let Some(parent) = stack.last_mut() else {
        return;
    };

    // Merge adjacent text so entity references don't split words
    if let Some(DocNode::Text(last)) = parent.children.last_mut() {
        last.push_str(text);
    } else {
        parent.children.push(DocNode::Text(text.to_string()));
    }
}

/// Strips a lone `<member>` or `<doc>` wrapper emitted by the front end.
fn unwrap_member(root: DocElement) -> DocElement {
    let mut significant = root.children.iter().filter(|child| !is_blank(child));
    let is_wrapper = matches!(
        (significant.next(), significant.next()),
        (Some(DocNode::Element(only)), None) if only.name == "member" || only.name == ROOT_TAG
    );
    if !is_wrapper {
        return root;
    }

    match root.children.into_iter().find(|child| !is_blank(child)) {
        Some(DocNode::Element(mut inner)) => {
            inner.name = ROOT_TAG.to_string();
            inner
        }
        _ => DocElement::new(ROOT_TAG),
    }
}

fn is_blank(node: &DocNode) -> bool {
    matches!(node, DocNode::Text(text) if text.trim().is_empty())
}

fn decode_entity(entity: &str) -> Option<String> {
    match entity {
        "lt" => Some("<".to_string()),
        "gt" => Some(">".to_string()),
        "amp" => Some("&".to_string()),
        "apos" => Some("'".to_string()),
        "quot" => Some("\"".to_string()),
        s if s.starts_with("#x") || s.starts_with("#X") => u32::from_str_radix(&s[2..], 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from),
        s if s.starts_with('#') => s[1..]
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from),
        _ => None,
    }
}
