use serde::Serialize;

use super::operations::{IrCollection, IrModel};
use super::types::NormalizedName;

/// One emitted type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IrType {
    Enumeration(IrEnum),
    Record(IrRecord),
}

impl IrType {
    pub fn name(&self) -> &NormalizedName {
        match self {
            IrType::Enumeration(e) => &e.name,
            IrType::Record(r) => &r.name,
        }
    }

    pub fn source_dir(&self) -> &str {
        match self {
            IrType::Enumeration(e) => &e.source_dir,
            IrType::Record(r) => &r.source_dir,
        }
    }
}

/// An enumeration and its members.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrEnum {
    pub name: NormalizedName,
    pub source_dir: String,
    pub variants: Vec<IrEnumVariant>,
}

/// `key : "value"` in the generated object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IrEnumVariant {
    pub key: String,
    pub value: String,
}

/// A record type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrRecord {
    pub name: NormalizedName,
    pub source_dir: String,
    /// `None` for a type without members.
    pub constructor: Option<IrConstructor>,
    /// `None` for a type no path reaches.
    pub model: Option<IrModel>,
    pub collection: Option<IrCollection>,
}

/// The data constructor of a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrConstructor {
    /// In member declaration order.
    pub fields: Vec<IrField>,
    /// Registered, non-placeholder base type the constructor delegates to.
    pub base: Option<IrTypeLink>,
    /// Member types with a constructor of their own, base excluded.
    pub requires: Vec<IrTypeLink>,
    /// Member types that are registered but have no members, hence no constructor.
    pub memberless_requires: Vec<IrTypeLink>,
}

/// One constructor parameter and the member it sets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrField {
    pub name: NormalizedName,
    /// `<camelName>Param`.
    pub param: String,
    /// Declared type without its namespace prefix.
    pub type_label: String,
    /// First line of the member documentation.
    pub doc: Option<String>,
}

/// A reference to another emitted type, enough to build a `require(..)` for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IrTypeLink {
    pub name: NormalizedName,
    pub source_dir: String,
}
