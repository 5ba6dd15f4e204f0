//! Owned element tree built from quick-xml events
//!
//! The bulletin is small (a few hundred stations) so the whole document is
//! materialized before extraction. Attribute values are kept in their raw,
//! escaped form and decoded on access: a broken escape inside one station's
//! attributes must only cost that station, not the whole document.

use quick_xml::Reader;
use quick_xml::escape::{EscapeError, unescape};
use quick_xml::events::{BytesStart, Event};
use std::borrow::Cow;

use crate::{Error, Result};

/// A single XML element with its attributes, direct text and children
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Parse a complete document and return its root element
    pub fn parse_document(input: &str) -> Result<Self> {
        let mut reader = Reader::from_str(input);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                Error::malformed(format!("{} at position {}", e, reader.buffer_position()))
            })?;

            match event {
                Event::Start(start) => {
                    if root.is_some() {
                        return Err(Error::malformed("content after the document element"));
                    }
                    stack.push(Self::from_start(&start)?);
                }
                Event::Empty(start) => {
                    let element = Self::from_start(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    // Name matching is checked by the reader itself
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::malformed("closing tag without an open element"))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|e| {
                        Error::malformed(format!(
                            "{} at position {}",
                            e,
                            reader.buffer_position()
                        ))
                    })?;
                    append_text(&mut stack, &text)?;
                }
                Event::CData(cdata) => {
                    let text = std::str::from_utf8(&cdata)
                        .map_err(|e| Error::malformed(format!("invalid CDATA section: {}", e)))?;
                    append_text(&mut stack, text)?;
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions, doctype
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::malformed(format!(
                "unexpected end of document: <{}> is not closed",
                open.name
            )));
        }

        root.ok_or_else(|| Error::malformed("document has no root element"))
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = decode_name(start.local_name().as_ref())?;

        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute
                .map_err(|e| Error::malformed(format!("bad attribute on <{}>: {}", name, e)))?;
            let key = decode_name(attribute.key.local_name().as_ref())?;
            let value = std::str::from_utf8(&attribute.value)
                .map_err(|e| Error::malformed(format!("attribute '{}' is not UTF-8: {}", key, e)))?
                .to_string();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            ..Default::default()
        })
    }

    /// Element local name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw (still escaped) attribute value
    pub fn raw_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Decoded attribute value, failing when the value holds a broken escape
    pub fn attr(&self, name: &str) -> std::result::Result<Option<Cow<'_, str>>, EscapeError> {
        self.raw_attr(name).map(unescape).transpose()
    }

    /// Decoded attribute value, treating an undecodable value as absent
    pub fn attr_lossy(&self, name: &str) -> Option<Cow<'_, str>> {
        self.attr(name).ok().flatten()
    }

    /// Trimmed direct text content, `None` when empty
    pub fn text(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    }

    /// All child elements in document order
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Child elements with the given name, in document order
    pub fn children_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// First child with the given name whose attribute equals `value`
    pub fn child_with_attr(&self, name: &str, attr: &str, value: &str) -> Option<&XmlElement> {
        self.children
            .iter()
            .find(|child| child.name == name && child.attr_lossy(attr).as_deref() == Some(value))
    }

    /// Text of the named child element
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(XmlElement::text)
    }
}

fn decode_name(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| Error::malformed(format!("element name is not UTF-8: {}", e)))
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(Error::malformed("content after the document element")),
    }
    Ok(())
}

fn append_text(stack: &mut [XmlElement], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(current) => current.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => return Err(Error::malformed("text outside the document element")),
    }
    Ok(())
}
