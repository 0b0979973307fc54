use minijinja::context;
use serde::Serialize;
use wadlgen_core::error::GeneratorError;

use super::render;

/// One constructor exported by the server index.
#[derive(Debug, Clone, Serialize)]
pub struct IndexEntry {
    pub camel: String,
    /// Require path relative to the server output root.
    pub path: String,
}

/// Emit `index.js`, re-exporting every generated server constructor.
pub fn emit_index(entries: &[IndexEntry]) -> Result<String, GeneratorError> {
    render(
        "index.j2",
        include_str!("../../templates/index.j2"),
        context! { entries => entries },
    )
}
