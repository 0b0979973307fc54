use std::collections::HashMap;

use crate::registry::{BaseType, Type, TypeRef};
use crate::transform::name_normalizer::{enum_key, enum_value, is_primitive, strip_ns};

use super::xml::XmlElement;

/// Default type of an attribute without a `type`.
const DEFAULT_ATTRIBUTE_TYPE: &str = "xs:string";
/// Type recorded for a named element declared without a `type`.
const UNTYPED_ELEMENT_TYPE: &str = "xs:anyType";

/// `minOccurs`/`maxOccurs` of a sequence element. `max` is `None` for `unbounded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurs {
    pub min: u32,
    pub max: Option<u32>,
}

impl Default for Occurs {
    fn default() -> Self {
        Self {
            min: 1,
            max: Some(1),
        }
    }
}

/// Read the cardinality markers of an element. Missing or malformed values keep the
/// XML Schema default of exactly one.
pub fn parse_occurs(element: &XmlElement) -> Occurs {
    let mut occurs = Occurs::default();
    if let Some(min) = element.attr("minOccurs").and_then(|v| v.parse().ok()) {
        occurs.min = min;
    }
    match element.attr("maxOccurs") {
        Some("unbounded") => occurs.max = None,
        Some(v) => {
            if let Ok(max) = v.parse() {
                occurs.max = Some(max);
            }
        }
        None => {}
    }
    occurs
}

/// Extract every type defined by one schema document.
///
/// `source_name` is the document's file stem; it prefixes the names of types whose
/// target namespace does not contain `home_namespace`. Simple types come first, in
/// document order, followed by complex types.
pub fn extract_types(schema: &XmlElement, source_name: &str, home_namespace: &str) -> Vec<Type> {
    let namespace = schema.attr("targetNamespace").unwrap_or_default();
    let prefix = if namespace.contains(home_namespace) {
        String::new()
    } else {
        format!("{source_name}-")
    };

    let Some(root_element) = schema.child("element") else {
        log::debug!("{source_name}: no top-level element, no types extracted");
        return Vec::new();
    };
    let root_name = root_element.attr("name").unwrap_or(source_name);

    let new_type = |name: &str| {
        let mut ty = Type::new(format!("{prefix}{name}"), namespace);
        ty.prefix = prefix.clone();
        ty
    };

    let mut types = Vec::new();
    let complex_types = find_complex_types(schema);
    let has_complex_types = !complex_types.is_empty();

    for simple in schema.children_named("simpleType") {
        // Without complex types the document is about its root element, which is
        // what resource documents reference.
        let name = if has_complex_types {
            simple.attr("name").unwrap_or(root_name)
        } else {
            root_name
        };

        let literals = simple
            .child("restriction")
            .filter(|r| r.attr("base").is_some_and(is_string_base))
            .map(|r| {
                r.children_named("enumeration")
                    .filter_map(|e| e.attr("value"))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let mut ty = new_type(name);
        if literals.is_empty() {
            log::debug!(
                "{source_name}: {name} is not a string enumeration, registered as a placeholder"
            );
            ty.base_type = Some(BaseType::ListOfUnknown);
        } else {
            ty.is_enumeration = true;
            for literal in literals {
                insert_literal(&mut ty, literal);
            }
        }
        types.push(ty);
    }

    if !has_complex_types {
        return types;
    }

    let aliases = build_alias_map(schema, root_element);

    for (name, complex) in complex_types {
        let type_name = aliases.lookup(&name).unwrap_or(name.as_str()).to_string();
        let mut ty = new_type(&type_name);

        collect_members(complex, &aliases, &mut ty);
        if let Some(extension) = complex
            .child("complexContent")
            .and_then(|content| content.child("extension"))
        {
            if let Some(base) = extension.attr("base") {
                ty.base_type = Some(BaseType::Named {
                    target: TypeRef::unresolved(aliases.substitute(base)),
                });
            }
            collect_members(extension, &aliases, &mut ty);
        }

        types.push(ty);
    }

    types
}

fn is_string_base(base: &str) -> bool {
    is_primitive(base) && strip_ns(base) == "string"
}

/// Add an enumeration literal. A key already taken by an earlier literal gets a
/// numeric suffix so that no literal is lost.
fn insert_literal(ty: &mut Type, literal: &str) {
    let value = enum_value(literal);
    let mut key = enum_key(&value);
    if ty.members.contains_key(&key) {
        let taken = key;
        key = (2..)
            .map(|n| format!("{taken}_{n}"))
            .find(|candidate| !ty.members.contains_key(candidate))
            .unwrap_or_default();
        log::warn!(
            "{}: enumeration literal '{literal}' collides with key {taken}, stored as {key}",
            ty.name
        );
    }
    ty.members.insert(key, TypeRef::literal(value));
}

/// Complex types declared at the top level or under (possibly nested) elements, paired
/// with their effective names. Anonymous ones take the enclosing element's name.
fn find_complex_types(schema: &XmlElement) -> Vec<(String, &XmlElement)> {
    fn walk<'a>(node: &'a XmlElement, out: &mut Vec<(String, &'a XmlElement)>) {
        let enclosing = if node.local_name == "element" {
            node.attr("name")
        } else {
            None
        };
        for complex in node.children_named("complexType") {
            if let Some(name) = complex.attr("name").or(enclosing) {
                out.push((name.to_string(), complex));
            }
        }
        for element in node.children_named("element") {
            walk(element, out);
        }
    }

    let mut out = Vec::new();
    walk(schema, &mut out);
    out
}

/// Type-name substitutions for one document, keyed by unprefixed name.
struct AliasMap(HashMap<String, String>);

impl AliasMap {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.0.get(strip_ns(name)).map(String::as_str)
    }

    /// Apply the substitution to a declared type. Primitives are never substituted.
    fn substitute(&self, raw: &str) -> String {
        if is_primitive(raw) {
            return raw.to_string();
        }
        self.lookup(raw).unwrap_or(raw).to_string()
    }
}

fn build_alias_map(schema: &XmlElement, root_element: &XmlElement) -> AliasMap {
    let mut map = HashMap::new();

    if let (Some(name), Some(ty)) = (root_element.attr("name"), root_element.attr("type")) {
        map.insert(strip_ns(ty).to_string(), name.to_string());
    }

    for simple in schema.children_named("simpleType") {
        let (Some(name), Some(restriction)) = (simple.attr("name"), simple.child("restriction"))
        else {
            continue;
        };
        let Some(base) = restriction.attr("base") else {
            continue;
        };
        let values: Vec<&str> = restriction
            .children_named("enumeration")
            .filter_map(|e| e.attr("value"))
            .collect();
        let alias = if values.is_empty() {
            base.to_string()
        } else {
            format!("{name} {{{}}}", values.join(","))
        };
        map.insert(name.to_string(), alias);
    }

    for element in schema.children_named("element") {
        if let (Some(name), Some(ty)) = (element.attr("name"), element.attr("type")) {
            map.insert(strip_ns(ty).to_string(), name.to_string());
        }
    }

    AliasMap(map)
}

/// Gather members from the attributes and the first sequence of `node`.
fn collect_members(node: &XmlElement, aliases: &AliasMap, ty: &mut Type) {
    for attribute in node.children_named("attribute") {
        let Some(name) = attribute.attr("name") else {
            continue;
        };
        let declared = attribute.attr("type").unwrap_or(DEFAULT_ATTRIBUTE_TYPE);
        ty.members.insert(
            name.to_string(),
            TypeRef::unresolved(aliases.substitute(declared)),
        );
        if let Some(doc) = documentation(attribute) {
            ty.docs.insert(name.to_string(), doc);
        }
    }

    let Some(sequence) = node.child("sequence") else {
        return;
    };

    for element in sequence.children_named("element") {
        let (member, declared) = if let Some(name) = element.attr("name") {
            let declared = element.attr("type").unwrap_or(UNTYPED_ELEMENT_TYPE);
            (name.to_string(), aliases.substitute(declared))
        } else if let Some(reference) = element.attr("ref") {
            let occurs = parse_occurs(element);
            log::trace!("{}: {reference} occurs {occurs:?}", ty.name);
            (strip_ns(reference).to_string(), reference.to_string())
        } else {
            continue;
        };

        if let Some(doc) = documentation(element) {
            ty.docs.insert(member.clone(), doc);
        }
        ty.members.insert(member, TypeRef::unresolved(declared));
    }
}

/// Trimmed `annotation/documentation` text, if it is plain text.
fn documentation(node: &XmlElement) -> Option<String> {
    let doc = node.child("annotation")?.child("documentation")?;
    if doc.has_children() || doc.text.trim().is_empty() {
        return None;
    }
    Some(doc.text.trim().to_string())
}
