use std::collections::HashSet;

use crate::ir::*;
use crate::registry::{BaseType, Type, TypeRegistry};

use super::name_normalizer::{camel_case_type, normalize_name, strip_ns};
use super::path_uniquifier::unique_path_map;

/// Build renderer descriptors for every type of a resolved, reduced registry.
///
/// Types keep registry order. A type holding a collection carries the folded list
/// type and one endpoint per read path of the list.
pub fn registry_to_ir(registry: &TypeRegistry, read_method: &str) -> IrSpec {
    let mut ir = IrSpec::default();

    for ty in registry {
        if ty.is_enumeration {
            ir.types.push(IrType::Enumeration(enum_to_ir(ty)));
            continue;
        }

        let mut record = record_to_ir(registry, ty, true);
        if let Some(list) = ty.collection.as_deref() {
            let unique = unique_path_map(&ty.name, &list.paths, read_method);
            ir.diagnostics.extend(
                unique
                    .collisions
                    .into_iter()
                    .map(Diagnostic::SuffixCollision),
            );
            record.collection = Some(IrCollection {
                list: Box::new(record_to_ir(registry, list, false)),
                endpoints: unique.endpoints,
            });
        }
        ir.types.push(IrType::Record(record));
    }

    ir
}

fn enum_to_ir(ty: &Type) -> IrEnum {
    IrEnum {
        name: normalize_name(&ty.name),
        source_dir: ty.source_dir.clone(),
        variants: ty
            .members
            .iter()
            .map(|(key, value)| IrEnumVariant {
                key: key.clone(),
                value: value.raw().to_string(),
            })
            .collect(),
    }
}

fn record_to_ir(registry: &TypeRegistry, ty: &Type, with_model: bool) -> IrRecord {
    let constructor = if ty.members.is_empty() {
        log::info!("{} has no members; no constructor generated", ty.name);
        None
    } else {
        Some(constructor_to_ir(registry, ty))
    };

    IrRecord {
        name: normalize_name(&ty.name),
        source_dir: ty.source_dir.clone(),
        constructor,
        model: if with_model { model_to_ir(ty) } else { None },
        collection: None,
    }
}

fn constructor_to_ir(registry: &TypeRegistry, ty: &Type) -> IrConstructor {
    let fields = ty
        .members
        .iter()
        .map(|(member, type_ref)| {
            let name = normalize_name(member);
            IrField {
                param: format!("{}Param", name.camel_case),
                type_label: strip_ns(type_ref.raw()).to_string(),
                doc: ty
                    .docs
                    .get(member)
                    .and_then(|doc| doc.lines().next())
                    .map(|line| line.trim().to_string()),
                name,
            }
        })
        .collect();

    let base = match &ty.base_type {
        Some(BaseType::Named { target }) => target
            .resolved_id()
            .and_then(|id| registry.lookup(id.as_str()))
            .filter(|base| !base.is_list_placeholder()),
        _ => None,
    };

    // The base is required on its own, ahead of the constructor.
    let mut seen: HashSet<&str> = base.iter().map(|b| b.name.as_str()).collect();
    seen.insert(ty.name.as_str());

    let mut requires = Vec::new();
    let mut memberless_requires = Vec::new();
    for type_ref in ty.members.values() {
        let Some(id) = type_ref.resolved_id().map(|id| id.as_str()) else {
            continue;
        };
        if !seen.insert(id) {
            continue;
        }
        let Some(target) = registry.lookup(id) else {
            continue;
        };
        if target.members.is_empty() {
            memberless_requires.push(type_link(target));
        } else {
            requires.push(type_link(target));
        }
    }

    IrConstructor {
        fields,
        base: base.map(type_link),
        requires,
        memberless_requires,
    }
}

fn model_to_ir(ty: &Type) -> Option<IrModel> {
    let url = ty.canonical_path()?.to_string();
    Some(IrModel {
        url,
        paths: ty
            .paths
            .iter()
            .map(|(path, methods)| IrPathMethods {
                path: path.clone(),
                methods: methods.clone(),
            })
            .collect(),
        accessors: ty.members.keys().map(|member| accessor(member)).collect(),
    })
}

fn accessor(member: &str) -> IrAccessor {
    IrAccessor {
        member: member.to_string(),
        attr_name: format!("{}AttrName", camel_case_type(member)),
        getter: camel_case_type(&format!("get-{member}")),
        setter: camel_case_type(&format!("set-{member}")),
    }
}

fn type_link(ty: &Type) -> IrTypeLink {
    IrTypeLink {
        name: normalize_name(&ty.name),
        source_dir: ty.source_dir.clone(),
    }
}
