use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use wadlgen_core::parse::DocumentKind;

/// An input document found under the api root.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub kind: DocumentKind,
    /// File stem.
    pub name: String,
    /// Parent directory relative to the root, `/`-separated, `""` at the root.
    pub source_dir: String,
}

/// Recursively collect `.xsd` and `.wadl` files under `root`.
///
/// Entries are visited in file-name order, so the result is stable across runs and
/// platforms. Unreadable entries are logged and skipped.
pub fn discover(root: &Path) -> Vec<DiscoveredFile> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name().follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                log::warn!("failed to read directory entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(kind) = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(DocumentKind::from_extension)
        else {
            continue;
        };
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            log::warn!("skipping {}: file name is not valid UTF-8", path.display());
            continue;
        };

        files.push(DiscoveredFile {
            path: path.to_path_buf(),
            kind,
            name: name.to_string(),
            source_dir: relative_dir(root, path),
        });
    }

    files
}

fn relative_dir(root: &Path, path: &Path) -> String {
    path.parent()
        .and_then(|parent| parent.strip_prefix(root).ok())
        .map(|rel| {
            rel.components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default()
}
