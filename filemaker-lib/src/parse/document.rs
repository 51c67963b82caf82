//! Owned XML element tree built from quick-xml events.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::BytesRef;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;

use crate::error::ParseError;

/// Deepest element nesting accepted. Responses with related records stay
/// well under ten levels.
pub(crate) const MAX_DEPTH: usize = 64;

/// A parsed XML element: name, attributes in document order, child
/// elements in document order, and its concatenated character data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn from_start(start: &BytesStart<'_>, decoder: Decoder) -> Result<Self, ParseError> {
        let name = decoder
            .decode(start.name().as_ref())
            .map_err(quick_xml::Error::from)?
            .into_owned();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = decoder
                .decode(attr.key.as_ref())
                .map_err(quick_xml::Error::from)?
                .into_owned();
            let value = attr.decode_and_unescape_value(decoder)?.into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    /// Returns the element name.
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value of an attribute, if present.
    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the value of an attribute that the grammar requires.
    pub(crate) fn required_attr(&self, name: &str) -> Result<&str, ParseError> {
        self.attr(name)
            .ok_or_else(|| ParseError::missing_attribute(&self.name, name))
    }

    /// Parses a required attribute as a decimal integer.
    pub(crate) fn required_int<T: std::str::FromStr>(&self, name: &str) -> Result<T, ParseError> {
        let raw = self.required_attr(name)?;
        raw.trim()
            .parse()
            .map_err(|_| ParseError::invalid_integer(&self.name, name, raw))
    }

    /// Parses an optional attribute as a decimal integer. Present but
    /// unparsable values are still an error.
    pub(crate) fn optional_int<T: std::str::FromStr>(&self, name: &str) -> Result<Option<T>, ParseError> {
        match self.attr(name) {
            Some(_) => self.required_int(name).map(Some),
            None => Ok(None),
        }
    }

    /// Returns the first child element with the given name.
    pub(crate) fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Returns the first child element with the given name, or a
    /// missing-element error naming `parent/name`.
    pub(crate) fn required_child(&self, name: &str) -> Result<&Element, ParseError> {
        self.child(name)
            .ok_or_else(|| ParseError::MissingElement(format!("{}/{}", self.name, name)))
    }

    /// Iterates over child elements with the given name, in document order.
    pub(crate) fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Returns the character data directly inside this element.
    pub(crate) fn text(&self) -> &str {
        &self.text
    }
}

/// Parses a complete XML document into its root element.
///
/// Fails on any reader error, on unknown entity references, on elements
/// left open at end of input, on nesting deeper than [`MAX_DEPTH`], on a
/// second top-level element, and on input with no element at all.
pub(crate) fn parse_document(xml: &str) -> Result<Element, ParseError> {
    let mut reader = Reader::from_str(xml);
    let decoder = reader.decoder();

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(ParseError::TooDeep { limit: MAX_DEPTH });
                }
                stack.push(Element::from_start(&start, decoder)?);
            }
            Event::Empty(start) => {
                let element = Element::from_start(&start, decoder)?;
                close(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                // The reader rejects mismatched end tags itself.
                if let Some(element) = stack.pop() {
                    close(element, &mut stack, &mut root)?;
                }
            }
            Event::Text(text) => {
                if let Some(open) = stack.last_mut() {
                    let text = text.decode().map_err(quick_xml::Error::from)?;
                    open.text.push_str(&text);
                }
            }
            Event::CData(cdata) => {
                if let Some(open) = stack.last_mut() {
                    let text = cdata.decode().map_err(quick_xml::Error::from)?;
                    open.text.push_str(&text);
                }
            }
            Event::GeneralRef(reference) => {
                if let Some(open) = stack.last_mut() {
                    let resolved = resolve_reference(&reference)?;
                    open.text.push_str(&resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::UnclosedElement(open.name));
    }

    root.ok_or(ParseError::EmptyDocument)
}

/// Attaches a finished element to its parent, or makes it the root.
fn close(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }

    if root.is_some() {
        return Err(ParseError::TrailingElement(element.name));
    }

    *root = Some(element);
    Ok(())
}

/// Resolves `&name;` or `&#NN;` / `&#xHH;` inside character data.
fn resolve_reference(reference: &BytesRef<'_>) -> Result<Cow<'static, str>, ParseError> {
    let name = reference.decode().map_err(quick_xml::Error::from)?;

    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        return value
            .and_then(char::from_u32)
            .map(|c| Cow::Owned(c.to_string()))
            .ok_or_else(|| ParseError::UnknownEntity(name.into_owned()));
    }

    resolve_predefined_entity(&name)
        .map(Cow::Borrowed)
        .ok_or_else(|| ParseError::UnknownEntity(name.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_shape() {
        let root = parse_document(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <root a="1"><item n="x"/><item n="y"/><other/></root>"#,
        )
        .unwrap();

        assert_eq!(root.name(), "root");
        assert_eq!(root.attr("a"), Some("1"));
        let names: Vec<_> = root.children("item").filter_map(|c| c.attr("n")).collect();
        assert_eq!(names, ["x", "y"]);
        assert!(root.child("other").is_some());
        assert!(root.child("missing").is_none());
    }

    #[test]
    fn test_text_and_entities() {
        let root = parse_document(
            "<data>Smith &amp; Sons &#65;&#x42; <![CDATA[<raw>]]></data>",
        )
        .unwrap();
        assert_eq!(root.text(), "Smith & Sons AB <raw>");
    }

    #[test]
    fn test_escaped_attribute() {
        let root = parse_document(r#"<f name="Q&amp;A"/>"#).unwrap();
        assert_eq!(root.attr("name"), Some("Q&A"));
    }

    #[test]
    fn test_required_int() {
        let root = parse_document(r#"<r count="12" bad="x"/>"#).unwrap();
        assert_eq!(root.required_int::<u64>("count").unwrap(), 12);
        assert!(matches!(
            root.required_int::<u64>("bad"),
            Err(ParseError::InvalidInteger { .. })
        ));
        assert!(matches!(
            root.required_int::<u64>("absent"),
            Err(ParseError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_nesting_limit() {
        let depth = 100_000;
        let xml = format!("{}{}", "<a>".repeat(depth), "</a>".repeat(depth));
        assert!(matches!(
            parse_document(&xml),
            Err(ParseError::TooDeep { limit: MAX_DEPTH })
        ));

        let xml = format!("{}{}", "<a>".repeat(MAX_DEPTH), "</a>".repeat(MAX_DEPTH));
        assert!(parse_document(&xml).is_ok());
    }

    #[test]
    fn test_malformed_inputs() {
        assert!(parse_document("").is_err());
        assert!(parse_document("<a><b></a>").is_err());
        assert!(parse_document("<a>").is_err());
        assert!(parse_document("<a/><b/>").is_err());
        assert!(matches!(
            parse_document("<a>&bogus;</a>"),
            Err(ParseError::UnknownEntity(_))
        ));
    }
}
