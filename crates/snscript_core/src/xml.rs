//! Generic XML tree.
//!
//! Update-set exports are small, so the whole document is read into an owned
//! [`XmlNode`] tree with `quick-xml`'s pull reader and shape matching happens
//! on the tree afterwards.

use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde::Serialize;

use crate::error::{Result, SnScriptError};

/// One element of a parsed XML document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct XmlNode {
    /// Element name, including any namespace prefix
    pub name: String,
    /// Attributes in document order
    pub attributes: IndexMap<String, String>,
    /// Child elements in document order
    pub children: Vec<XmlNode>,
    /// Concatenated direct text and CDATA content, whitespace preserved
    pub text: String,
}

impl XmlNode {
    /// First direct child with the given element name
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Text of the first direct child with the given element name
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }
}

/// Parse a complete XML document and return its root element.
///
/// Fails with [`SnScriptError::Parse`] on malformed input, including a missing
/// root, several roots, unclosed elements and stray text outside the root.
pub fn parse_document(input: &str) -> Result<XmlNode> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut reader = Reader::from_str(input);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|e| SnScriptError::parse(reader.error_position() as u64, e.to_string()))?;

        match event {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(SnScriptError::parse(position, "multiple root elements"));
                }
                stack.push(element_from_start(&start, position)?);
            }
            Event::Empty(start) => {
                let node = element_from_start(&start, position)?;
                attach(&mut stack, &mut root, node, position)?;
            }
            Event::End(_) => {
                // quick-xml already rejects end tags that do not match the open element
                let node = stack
                    .pop()
                    .ok_or_else(|| SnScriptError::parse(position, "unexpected end tag"))?;
                attach(&mut stack, &mut root, node, position)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| SnScriptError::parse(position, e.to_string()))?;
                match stack.last_mut() {
                    Some(open) => open.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(SnScriptError::parse(
                            position,
                            "text outside of root element",
                        ));
                    }
                }
            }
            Event::CData(cdata) => {
                let text = std::str::from_utf8(&cdata)
                    .map_err(|e| SnScriptError::parse(position, e.to_string()))?;
                match stack.last_mut() {
                    Some(open) => open.text.push_str(text),
                    None => {
                        return Err(SnScriptError::parse(
                            position,
                            "CDATA outside of root element",
                        ));
                    }
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, DOCTYPE
            _ => {}
        }
    }

    let end = reader.buffer_position() as u64;
    if let Some(open) = stack.last() {
        return Err(SnScriptError::parse(
            end,
            format!("unclosed element <{}>", open.name),
        ));
    }
    root.ok_or_else(|| SnScriptError::parse(end, "no root element"))
}

fn element_from_start(start: &BytesStart<'_>, position: u64) -> Result<XmlNode> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| SnScriptError::parse(position, e.to_string()))?
        .to_string();

    let mut attributes = IndexMap::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| SnScriptError::parse(position, e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| SnScriptError::parse(position, e.to_string()))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| SnScriptError::parse(position, e.to_string()))?
            .into_owned();
        attributes.insert(key, value);
    }

    Ok(XmlNode {
        name,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

/// Append a finished element to its parent, or make it the document root
fn attach(
    stack: &mut [XmlNode],
    root: &mut Option<XmlNode>,
    node: XmlNode,
    position: u64,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_some() => {
            return Err(SnScriptError::parse(position, "multiple root elements"));
        }
        None => *root = Some(node),
    }
    Ok(())
}
