use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::ParseError;

/// An owned XML element: the document tree the extractors walk.
///
/// Element matching is done on `local_name`, so `xs:element` and `xsd:element` are
/// treated alike. Attribute values are kept verbatim, prefixes included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    /// Qualified name as written, e.g. `xs:complexType`.
    pub name: String,
    /// Name without its prefix, e.g. `complexType`.
    pub local_name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    /// Concatenated, trimmed character data directly inside this element.
    pub text: String,
}

impl XmlElement {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            local_name: local_part(name).to_string(),
            ..Self::default()
        }
    }

    /// Value of the attribute with the given key.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements with the given local name, in document order.
    pub fn children_named<'a, 'n>(
        &'a self,
        local: &'n str,
    ) -> impl Iterator<Item = &'a XmlElement> + use<'a, 'n> {
        self.children.iter().filter(move |c| c.local_name == local)
    }

    /// First child element with the given local name.
    pub fn child<'a>(&'a self, local: &str) -> Option<&'a XmlElement> {
        self.children_named(local).next()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

fn local_part(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

/// Parse an XML document into its root element.
pub fn parse_document(xml: &str) -> Result<XmlElement, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                stack.push(element_from_start(&e)?);
            }
            Event::Empty(e) => {
                let element = element_from_start(&e)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(e) => {
                let element = stack.pop().ok_or_else(|| {
                    ParseError::UnbalancedTag(String::from_utf8_lossy(e.name().as_ref()).to_string())
                })?;
                attach(&mut stack, &mut root, element);
            }
            Event::Text(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(e.unescape()?.trim());
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    let bytes = e.into_inner();
                    current.text.push_str(std::str::from_utf8(&bytes)?.trim());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::UnbalancedTag(open.name));
    }
    root.ok_or(ParseError::EmptyDocument)
}

fn element_from_start(e: &BytesStart<'_>) -> Result<XmlElement, ParseError> {
    let name = std::str::from_utf8(e.name().as_ref())?.to_string();
    let mut element = XmlElement::new(&name);
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.unescape_value()?.to_string();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            // Only the first top-level element is the document element.
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}
