use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use super::name_normalizer::{camel_case_type, capitalize, is_path_param};

/// One collection accessor: the name suffix and the path it reads from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionEndpoint {
    pub suffix: String,
    pub path: String,
}

/// Two read paths of one collection that reduce to the same suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuffixCollision {
    pub type_name: String,
    pub suffix: String,
    pub first_path: String,
    pub second_path: String,
}

/// Result of [`unique_path_map`]. Every read path has an endpoint, collisions included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniquePaths {
    pub endpoints: Vec<CollectionEndpoint>,
    pub collisions: Vec<SuffixCollision>,
}

impl UniquePaths {
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

/// Compute a distinct accessor suffix for every path of `paths` that declares
/// `read_method`.
///
/// A single read path gets the empty suffix. With several, paths are ordered by segment
/// count (ties keep declaration order), the shortest keeps the empty suffix, and every
/// other path is named by its non-parameter segments past the common prefix:
/// `/users` and `/groups/{id}/users` give `""` and `GroupsUsers`.
pub fn unique_path_map(
    type_name: &str,
    paths: &IndexMap<String, Vec<String>>,
    read_method: &str,
) -> UniquePaths {
    let mut parts: Vec<Vec<&str>> = paths
        .iter()
        .filter(|(_, methods)| methods.iter().any(|m| m == read_method))
        .map(|(path, _)| path.split('/').collect())
        .collect();

    let mut result = UniquePaths::default();
    match parts.len() {
        0 => return result,
        1 => {
            result.endpoints.push(CollectionEndpoint {
                suffix: String::new(),
                path: parts[0].join("/"),
            });
            return result;
        }
        _ => {}
    }

    parts.sort_by_key(|segments| segments.len());
    let prefix_len = common_prefix_len(&parts);

    let mut seen: HashMap<String, String> = HashMap::new();
    for (i, segments) in parts.iter().enumerate() {
        let suffix = if i == 0 {
            String::new()
        } else {
            segments[prefix_len..]
                .iter()
                .filter(|segment| !is_path_param(segment))
                .map(|segment| camel_case_type(&capitalize(segment)))
                .collect()
        };
        let path = segments.join("/");

        if let Some(first_path) = seen.get(&suffix) {
            log::error!(
                "{path} already has suffix \"{suffix}\" (from {first_path}); cannot reduce paths for collection {type_name} to unique names"
            );
            result.collisions.push(SuffixCollision {
                type_name: type_name.to_string(),
                suffix: suffix.clone(),
                first_path: first_path.clone(),
                second_path: path.clone(),
            });
        } else {
            seen.insert(suffix.clone(), path.clone());
        }
        result.endpoints.push(CollectionEndpoint { suffix, path });
    }

    log::info!(
        "multiple collection suffixes generated for {type_name}: {}",
        result
            .endpoints
            .iter()
            .map(|e| format!("\"{}\" => {}", e.suffix, e.path))
            .collect::<Vec<_>>()
            .join(", ")
    );
    result
}

/// Number of leading segments shared by every path. `parts[0]` must be the shortest.
fn common_prefix_len(parts: &[Vec<&str>]) -> usize {
    let shortest = &parts[0];
    let mut index = 0;
    while index < shortest.len()
        && parts
            .iter()
            .all(|segments| segments.get(index) == Some(&shortest[index]))
    {
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(entries: &[(&str, &[&str])]) -> IndexMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(path, methods)| {
                (
                    path.to_string(),
                    methods.iter().map(|m| m.to_string()).collect(),
                )
            })
            .collect()
    }

    fn summary(unique: &UniquePaths) -> String {
        unique
            .endpoints
            .iter()
            .map(|e| format!("{}={}", e.suffix, e.path))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_no_read_paths() {
        let unique = unique_path_map("user", &paths(&[("/users", &["POST"])]), "GET");
        assert!(unique.is_empty());
        assert!(unique.collisions.is_empty());
    }

    #[test]
    fn test_single_read_path() {
        let unique = unique_path_map(
            "user",
            &paths(&[("/users", &["POST"]), ("/users/all", &["GET", "POST"])]),
            "GET",
        );
        assert_eq!(
            unique.endpoints,
            vec![CollectionEndpoint {
                suffix: String::new(),
                path: "/users/all".to_string(),
            }]
        );
    }

    #[test]
    fn test_flat_and_nested_collection() {
        let unique = unique_path_map(
            "user",
            &paths(&[("/groups/{id}/users", &["GET"]), ("/users", &["GET"])]),
            "GET",
        );
        insta::assert_snapshot!(summary(&unique), @"=/users GroupsUsers=/groups/{id}/users");
        assert!(unique.collisions.is_empty());
    }

    #[test]
    fn test_common_prefix_is_skipped() {
        let unique = unique_path_map(
            "plcm-device",
            &paths(&[
                ("/api/rest/devices", &["GET"]),
                ("/api/rest/device-groups/{group-id}/devices", &["GET"]),
                ("/api/rest/rooms/{room-id}/active-devices", &["GET"]),
            ]),
            "GET",
        );
        let suffixes: Vec<&str> = unique.endpoints.iter().map(|e| e.suffix.as_str()).collect();
        assert_eq!(suffixes, vec!["", "DeviceGroupsDevices", "RoomsActiveDevices"]);
    }

    #[test]
    fn test_collision_keeps_both_paths() {
        let unique = unique_path_map(
            "user",
            &paths(&[
                ("/users", &["GET"]),
                ("/a/{x}/users", &["GET"]),
                ("/a/{y}/users", &["GET"]),
            ]),
            "GET",
        );
        assert_eq!(unique.endpoints.len(), 3);
        assert_eq!(unique.endpoints[1].suffix, "AUsers");
        assert_eq!(unique.endpoints[2].suffix, "AUsers");
        assert_eq!(
            unique.collisions,
            vec![SuffixCollision {
                type_name: "user".to_string(),
                suffix: "AUsers".to_string(),
                first_path: "/a/{x}/users".to_string(),
                second_path: "/a/{y}/users".to_string(),
            }]
        );
    }

    #[test]
    fn test_parameter_only_tail_collides_with_empty_suffix() {
        let unique = unique_path_map(
            "user",
            &paths(&[("/users", &["GET"]), ("/users/{id}", &["GET"])]),
            "GET",
        );
        assert_eq!(unique.endpoints.len(), 2);
        assert_eq!(unique.collisions.len(), 1);
        assert_eq!(unique.collisions[0].suffix, "");
    }
}
