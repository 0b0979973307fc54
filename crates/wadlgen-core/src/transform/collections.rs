use std::collections::HashSet;

use crate::registry::{Type, TypeRegistry};

/// Fold list companions into the `collection` of the type they list.
///
/// A type named like `plcm-user-list` (every occurrence of `list_suffix` removed gives
/// `plcm-user`) is folded into `plcm-user` when
/// - `plcm-user` is registered and is a different type,
/// - `plcm-user` is reachable through at least one path,
/// - the list type declares `read_method` on at least one path,
/// - the list type has a member named after `plcm-user` or resolved to it.
///
/// Folded list types leave the registry. One pass only: a type that already holds a
/// collection is never given another, which also makes the reduction idempotent.
pub fn reduce_collections(
    mut registry: TypeRegistry,
    list_suffix: &str,
    read_method: &str,
) -> TypeRegistry {
    if list_suffix.is_empty() {
        return registry;
    }

    let mut folds: Vec<(String, String)> = Vec::new();
    let mut claimed: HashSet<String> = HashSet::new();

    for list in registry.iter() {
        if !list.name.contains(list_suffix) {
            continue;
        }
        let singular_name = list.name.replace(list_suffix, "").trim().to_string();
        if singular_name.contains(list_suffix) {
            continue;
        }
        let Some(singular) = registry.get(&singular_name) else {
            continue;
        };
        if singular.name == list.name {
            continue;
        }
        if singular.collection.is_some() || claimed.contains(&singular_name) {
            log::debug!(
                "{} already has a collection; {} is left as a standalone type",
                singular.name,
                list.name
            );
            continue;
        }
        if !is_collection_of(list, singular, read_method) {
            continue;
        }

        claimed.insert(singular_name.clone());
        folds.push((list.name.clone(), singular_name));
    }

    for (list_name, singular_name) in folds {
        let Some(list) = registry.remove(&list_name) else {
            continue;
        };
        if let Some(singular) = registry.get_mut(&singular_name) {
            log::info!("folding {list_name} into {singular_name} as its collection");
            singular.collection = Some(Box::new(list));
        }
    }

    registry
}

/// The structural test for `list` being a list wrapper around `singular`.
pub fn is_collection_of(list: &Type, singular: &Type, read_method: &str) -> bool {
    singular.has_paths()
        && list.method_count(read_method) > 0
        && (list.has_member(&singular.name)
            || list
                .members
                .values()
                .filter_map(|type_ref| type_ref.resolved_id())
                .any(|id| id.as_str() == singular.name))
}
