use crate::registry::TypeRegistry;
use crate::transform::name_normalizer::strip_ns;

use super::xml::XmlElement;

/// Outcome of walking one resource document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathReport {
    /// Number of (type, method, path) annotations applied.
    pub annotated: usize,
    /// Referenced elements with no registered type, as `(path, element)`.
    pub unregistered: Vec<(String, String)>,
}

/// Relative base path of a `resources/@base` URL: scheme and host are dropped and the
/// result always ends with a single `/`.
///
/// `http://host:8443/api/rest` → `/api/rest/`
pub fn base_path(url: &str) -> String {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .unwrap_or(url);
    let start = rest.find('/').unwrap_or(rest.len());
    collapse_separators(&format!("{}/", &rest[start..]))
}

/// Join a parent path and a child resource path with a single separator.
pub fn append_paths(base: &str, child: &str) -> String {
    if child.is_empty() || child == "/" {
        return base.to_string();
    }
    collapse_separators(&format!("{base}/{child}"))
}

fn collapse_separators(path: &str) -> String {
    let mut result = String::with_capacity(path.len());
    for ch in path.chars() {
        if ch == '/' && result.ends_with('/') {
            continue;
        }
        result.push(ch);
    }
    result
}

/// Walk a resource document and record every (method, path) pair on the types its
/// request and success-response representations reference.
///
/// References to unregistered types are skipped and reported, never fatal.
pub fn collect_paths(
    application: &XmlElement,
    registry: &mut TypeRegistry,
    success_statuses: &[String],
) -> PathReport {
    let mut report = PathReport::default();

    let Some(resources) = application.child("resources") else {
        log::warn!("no resources found in resource document");
        return report;
    };
    let base = base_path(resources.attr("base").unwrap_or_default());

    let mut collector = Collector {
        registry,
        success_statuses,
        report: &mut report,
    };
    collector.walk(resources, &base);
    report
}

struct Collector<'a> {
    registry: &'a mut TypeRegistry,
    success_statuses: &'a [String],
    report: &'a mut PathReport,
}

impl Collector<'_> {
    fn walk(&mut self, parent: &XmlElement, parent_path: &str) {
        for resource in parent.children_named("resource") {
            let path = append_paths(parent_path, resource.attr("path").unwrap_or_default());

            for method in resource.children_named("method") {
                let Some(name) = method.attr("name").filter(|n| !n.is_empty()) else {
                    log::debug!("{path}: skipping method without a name");
                    continue;
                };
                for request in method.children_named("request") {
                    self.annotate(request, name, &path);
                }
                for response in method.children_named("response") {
                    if self.is_success(response) {
                        self.annotate(response, name, &path);
                    }
                }
            }

            self.walk(resource, &path);
        }
    }

    fn is_success(&self, response: &XmlElement) -> bool {
        response
            .attr("status")
            .is_some_and(|status| {
                status
                    .split_whitespace()
                    .any(|s| self.success_statuses.iter().any(|ok| ok == s))
            })
    }

    fn annotate(&mut self, body: &XmlElement, method: &str, path: &str) {
        for representation in body.children_named("representation") {
            let Some(element) = representation.attr("element") else {
                continue;
            };
            let type_name = strip_ns(element);
            if self.registry.add_method(type_name, method, path) {
                self.report.annotated += 1;
            } else {
                log::debug!("{method} {path}: no registered type for {element}, skipping");
                self.report
                    .unregistered
                    .push((path.to_string(), type_name.to_string()));
            }
        }
    }
}
