use std::fmt;

use serde::Serialize;

use crate::transform::path_uniquifier::SuffixCollision;

use super::schemas::IrType;

/// The resolved, renderer-ready model: one descriptor per emitted type, in registry
/// order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IrSpec {
    pub types: Vec<IrType>,
    pub diagnostics: Vec<Diagnostic>,
}

impl IrSpec {
    pub fn collisions(&self) -> impl Iterator<Item = &SuffixCollision> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::SuffixCollision(c) => Some(c),
            _ => None,
        })
    }
}

/// A recoverable anomaly found while compiling. None of these stop generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Two collection endpoints of one type computed the same suffix; both are emitted
    /// and need manual disambiguation.
    SuffixCollision(SuffixCollision),
    /// A resource body referenced an element with no registered type.
    UnregisteredReference {
        document: String,
        path: String,
        element: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SuffixCollision(c) => write!(
                f,
                "collection {}: {} and {} both map to suffix \"{}\"",
                c.type_name, c.first_path, c.second_path, c.suffix
            ),
            Diagnostic::UnregisteredReference {
                document,
                path,
                element,
            } => write!(f, "{document}: {path} references unregistered type {element}"),
        }
    }
}

/// A name paired with its camel-cased identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedName {
    pub original: String,
    pub camel_case: String,
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}
