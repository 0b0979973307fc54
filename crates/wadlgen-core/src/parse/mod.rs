pub mod wadl;
pub mod xml;
pub mod xsd;

use crate::error::ParseError;
use xml::XmlElement;

/// The two kinds of input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// A structural schema (`.xsd`).
    Schema,
    /// A resource description (`.wadl`).
    Resource,
}

impl DocumentKind {
    /// Classify a file by its extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "xsd" => Some(DocumentKind::Schema),
            "wadl" => Some(DocumentKind::Resource),
            _ => None,
        }
    }

    /// Local name of the expected document element.
    pub fn root_name(&self) -> &'static str {
        match self {
            DocumentKind::Schema => "schema",
            DocumentKind::Resource => "application",
        }
    }
}

/// Parse a document and check that its root element matches `kind`.
pub fn from_xml(input: &str, kind: DocumentKind) -> Result<XmlElement, ParseError> {
    let doc = xml::parse_document(input)?;
    if doc.local_name != kind.root_name() {
        return Err(ParseError::UnexpectedRoot {
            expected: kind.root_name().to_string(),
            found: doc.name,
        });
    }
    Ok(doc)
}
