pub mod constructor;
pub mod enumeration;
pub mod index;
pub mod model;

use minijinja::{Environment, Value};
use wadlgen_core::error::GeneratorError;

/// Build a file path under a type's source directory.
///
/// - `source_dir = "users"` → `"users/plcm-user.js"`
/// - `source_dir = ""` → `"plcm-user.js"`
pub fn source_path(source_dir: &str, file: &str) -> String {
    if source_dir.is_empty() {
        file.to_string()
    } else {
        format!("{source_dir}/{file}")
    }
}

/// Module path that a file in `from_dir` passes to `require` to load `file` from `to_dir`.
/// Both directories are relative to the same output root.
///
/// - `("users", "users", "plcm-role")` → `"./plcm-role"`
/// - `("users", "roles", "plcm-role")` → `"../roles/plcm-role"`
/// - `("", "roles", "plcm-role")` → `"./roles/plcm-role"`
pub fn require_path(from_dir: &str, to_dir: &str, file: &str) -> String {
    let from: Vec<&str> = from_dir.split('/').filter(|s| !s.is_empty()).collect();
    let to: Vec<&str> = to_dir.split('/').filter(|s| !s.is_empty()).collect();
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut parts = vec![".."; from.len() - common];
    if parts.is_empty() {
        parts.push(".");
    }
    parts.extend(&to[common..]);
    parts.push(file);
    parts.join("/")
}

/// Render one template with the emitter settings shared by every artifact.
pub(crate) fn render(
    name: &'static str,
    source: &'static str,
    ctx: Value,
) -> Result<String, GeneratorError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_template(name, source).map_err(template_error)?;
    let tmpl = env.get_template(name).map_err(template_error)?;
    tmpl.render(ctx).map_err(template_error)
}

fn template_error(err: minijinja::Error) -> GeneratorError {
    GeneratorError::Template(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_path() {
        assert_eq!(source_path("users", "plcm-user.js"), "users/plcm-user.js");
        assert_eq!(source_path("", "index.js"), "index.js");
    }

    #[test]
    fn test_require_path() {
        assert_eq!(require_path("users", "users", "plcm-role"), "./plcm-role");
        assert_eq!(require_path("users", "roles", "plcm-role"), "../roles/plcm-role");
        assert_eq!(require_path("", "roles", "plcm-role"), "./roles/plcm-role");
        assert_eq!(require_path("", "", "plcm-role"), "./plcm-role");
        assert_eq!(require_path("a/b", "a", "x"), "../x");
        assert_eq!(require_path("a/b", "a/c/d", "x"), "../c/d/x");
    }
}
