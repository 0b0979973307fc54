use serde::Serialize;

use crate::transform::path_uniquifier::CollectionEndpoint;

use super::schemas::IrRecord;
use super::types::NormalizedName;

/// The REST-bound model of a record reachable through at least one path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrModel {
    /// Canonical path the model reads and writes.
    pub url: String,
    /// Every path of the type with its methods, in declaration order.
    pub paths: Vec<IrPathMethods>,
    pub accessors: Vec<IrAccessor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IrPathMethods {
    pub path: String,
    pub methods: Vec<String>,
}

/// Attribute-name constant plus getter/setter for one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IrAccessor {
    pub member: String,
    pub attr_name: String,
    pub getter: String,
    pub setter: String,
}

/// A list type folded into the record it lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrCollection {
    /// The list type itself. It keeps its constructor but never gets a model.
    pub list: Box<IrRecord>,
    /// One collection model per endpoint.
    pub endpoints: Vec<CollectionEndpoint>,
}

impl IrCollection {
    pub fn list_name(&self) -> &NormalizedName {
        &self.list.name
    }
}
