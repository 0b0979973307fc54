use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::transform::name_normalizer::{is_path_param, is_primitive, strip_ns};

/// Key of a type in the [`TypeRegistry`]: its (possibly prefixed) type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub String);

impl TypeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The declared type of a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    /// Points at a registered type. `raw` keeps the reference as written.
    Resolved { id: TypeId, raw: String },
    /// A primitive, an alias, or a reference to something outside the registry.
    Unresolved { raw: String },
    /// The value of an enumeration member.
    Literal { value: String },
}

impl TypeRef {
    pub fn unresolved(raw: impl Into<String>) -> Self {
        TypeRef::Unresolved { raw: raw.into() }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        TypeRef::Literal {
            value: value.into(),
        }
    }

    /// The reference as written in the schema.
    pub fn raw(&self) -> &str {
        match self {
            TypeRef::Resolved { raw, .. } | TypeRef::Unresolved { raw } => raw,
            TypeRef::Literal { value } => value,
        }
    }

    pub fn resolved_id(&self) -> Option<&TypeId> {
        match self {
            TypeRef::Resolved { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// What a type derives from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BaseType {
    /// Marker carried by placeholder types created from non-enumeration simple types.
    ListOfUnknown,
    Named { target: TypeRef },
}

/// A type extracted from a schema document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Type {
    /// Registry key, including the disambiguation prefix for foreign namespaces.
    pub name: String,
    pub namespace: String,
    /// `"<source>-"` for types from a foreign namespace, empty otherwise.
    pub prefix: String,
    pub is_enumeration: bool,
    pub base_type: Option<BaseType>,
    /// Member name to member type, in declaration order.
    pub members: IndexMap<String, TypeRef>,
    pub docs: IndexMap<String, String>,
    /// Path to the methods declared on it, both in declaration order.
    pub paths: IndexMap<String, Vec<String>>,
    /// The list type folded into this one by the collection reducer.
    pub collection: Option<Box<Type>>,
    /// Directory of the source document relative to the input root (`""` for the root).
    pub source_dir: String,
}

impl Type {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            prefix: String::new(),
            is_enumeration: false,
            base_type: None,
            members: IndexMap::new(),
            docs: IndexMap::new(),
            paths: IndexMap::new(),
            collection: None,
            source_dir: String::new(),
        }
    }

    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.namespace, self.name)
    }

    /// Record that `method` is available on `path`. Returns `false` if it already was.
    pub fn add_method(&mut self, method: &str, path: &str) -> bool {
        let methods = self.paths.entry(path.to_string()).or_default();
        if methods.iter().any(|m| m == method) {
            return false;
        }
        methods.push(method.to_string());
        true
    }

    /// Number of paths declaring `method`.
    pub fn method_count(&self, method: &str) -> usize {
        self.paths
            .values()
            .filter(|methods| methods.iter().any(|m| m == method))
            .count()
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    pub fn has_paths(&self) -> bool {
        !self.paths.is_empty()
    }

    pub fn is_list_placeholder(&self) -> bool {
        matches!(self.base_type, Some(BaseType::ListOfUnknown))
    }

    /// The path a model binds to: parameter-free paths win, then the shortest, then the
    /// first declared.
    pub fn canonical_path(&self) -> Option<&str> {
        self.paths
            .keys()
            .map(String::as_str)
            .min_by_key(|path| (has_path_params(path), path.len()))
    }
}

fn has_path_params(path: &str) -> bool {
    path.split('/').any(is_path_param)
}

/// All types known to one compilation, keyed by type name in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypeRegistry {
    types: IndexMap<String, Type>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type, returning the type it replaced if the name was taken.
    pub fn insert(&mut self, ty: Type) -> Option<Type> {
        let replaced = self.types.insert(ty.name.clone(), ty);
        if let Some(ref old) = replaced {
            log::warn!(
                "type {} redefined; keeping the definition from {}",
                old.name,
                self.types[&old.name].qualified_name()
            );
        }
        replaced
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Type> {
        self.types.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Type> {
        self.types.values()
    }

    pub fn remove(&mut self, name: &str) -> Option<Type> {
        self.types.shift_remove(name)
    }

    /// Find a type by name, including list types folded into a collection.
    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.types.get(name).or_else(|| {
            self.types
                .values()
                .filter_map(|t| t.collection.as_deref())
                .find(|c| c.name == name)
        })
    }

    /// Annotate the named type with a method on a path. Returns `false` if no such type
    /// is registered.
    pub fn add_method(&mut self, name: &str, method: &str, path: &str) -> bool {
        match self.types.get_mut(name) {
            Some(ty) => {
                ty.add_method(method, path);
                true
            }
            None => false,
        }
    }

    /// Turn every member and base reference that names a registered type into
    /// `TypeRef::Resolved`. Returns the number of non-primitive references left
    /// unresolved.
    pub fn resolve_references(&mut self) -> usize {
        let known: HashSet<String> = self.types.keys().cloned().collect();
        let mut unresolved = 0;

        for ty in self.types.values_mut() {
            let prefix = ty.prefix.clone();
            let owner = ty.name.clone();
            for (member, type_ref) in ty.members.iter_mut() {
                if !resolve_ref(type_ref, &prefix, &known) {
                    log::debug!(
                        "{owner}.{member}: no registered type for {}",
                        type_ref.raw()
                    );
                    unresolved += 1;
                }
            }
            if let Some(BaseType::Named { target }) = ty.base_type.as_mut()
                && !resolve_ref(target, &prefix, &known)
            {
                log::debug!("{owner}: base type {} is not registered", target.raw());
                unresolved += 1;
            }
        }

        unresolved
    }
}

/// Resolve one reference in place. Returns `false` for a non-primitive reference that
/// names no registered type.
fn resolve_ref(type_ref: &mut TypeRef, prefix: &str, known: &HashSet<String>) -> bool {
    let TypeRef::Unresolved { raw } = type_ref else {
        return true;
    };
    if is_primitive(raw) {
        return true;
    }
    let local = strip_ns(raw);
    let prefixed = format!("{prefix}{local}");
    let target = if !prefix.is_empty() && known.contains(&prefixed) {
        prefixed
    } else if known.contains(local) {
        local.to_string()
    } else {
        return false;
    };
    *type_ref = TypeRef::Resolved {
        id: TypeId(target),
        raw: raw.clone(),
    };
    true
}

impl<'a> IntoIterator for &'a TypeRegistry {
    type Item = &'a Type;
    type IntoIter = indexmap::map::Values<'a, String, Type>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.values()
    }
}
