use serde::Serialize;

use crate::config::WadlgenConfig;
use crate::error::ParseError;
use crate::ir::{Diagnostic, IrSpec};
use crate::parse::wadl::collect_paths;
use crate::parse::xml::XmlElement;
use crate::parse::xsd::extract_types;
use crate::parse::{DocumentKind, from_xml};
use crate::registry::TypeRegistry;

use super::collections::reduce_collections;
use super::registry_to_ir::registry_to_ir;

/// A parsed input document.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Path as displayed in diagnostics.
    pub path: String,
    /// File stem; prefixes types from foreign namespaces.
    pub name: String,
    /// Directory relative to the input root, `""` for the root itself.
    pub source_dir: String,
    pub kind: DocumentKind,
    pub root: XmlElement,
}

impl SourceDocument {
    /// Parse document text, checking that its root element matches `kind`.
    pub fn parse(
        path: impl Into<String>,
        name: impl Into<String>,
        source_dir: impl Into<String>,
        kind: DocumentKind,
        text: &str,
    ) -> Result<Self, ParseError> {
        Ok(Self {
            path: path.into(),
            name: name.into(),
            source_dir: source_dir.into(),
            kind,
            root: from_xml(text, kind)?,
        })
    }
}

/// Options controlling how documents are compiled into the IR.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub home_namespace: String,
    pub list_suffix: String,
    pub read_method: String,
    pub success_statuses: Vec<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self::from(&WadlgenConfig::default())
    }
}

impl From<&WadlgenConfig> for CompileOptions {
    fn from(config: &WadlgenConfig) -> Self {
        Self {
            home_namespace: config.naming.home_namespace.clone(),
            list_suffix: config.naming.list_suffix.clone(),
            read_method: config.http.read_method.clone(),
            success_statuses: config.http.success_statuses.clone(),
        }
    }
}

/// Counters describing one compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompileStats {
    pub schemas: usize,
    pub resources: usize,
    pub types: usize,
    pub annotations: usize,
    pub unresolved_references: usize,
    pub collections: usize,
}

/// Everything produced by [`compile`].
#[derive(Debug, Clone)]
pub struct Compilation {
    /// The resolved and reduced registry.
    pub registry: TypeRegistry,
    pub ir: IrSpec,
    pub stats: CompileStats,
}

/// Compile parsed documents into the IR.
///
/// Every schema is extracted before any resource is walked, so paths can be attached
/// to types regardless of document order. References are resolved once all documents
/// are in.
pub fn compile(documents: &[SourceDocument], options: &CompileOptions) -> Compilation {
    let mut stats = CompileStats::default();
    let mut registry = TypeRegistry::new();

    // Phase 1: Extract types from schemas
    for doc in documents.iter().filter(|d| d.kind == DocumentKind::Schema) {
        stats.schemas += 1;
        let types = extract_types(&doc.root, &doc.name, &options.home_namespace);
        log::debug!("{}: {} types", doc.path, types.len());
        for mut ty in types {
            ty.source_dir = doc.source_dir.clone();
            registry.insert(ty);
        }
    }

    // Phase 2: Attach paths from resource descriptions
    let mut diagnostics = Vec::new();
    for doc in documents.iter().filter(|d| d.kind == DocumentKind::Resource) {
        stats.resources += 1;
        let report = collect_paths(&doc.root, &mut registry, &options.success_statuses);
        stats.annotations += report.annotated;
        diagnostics.extend(report.unregistered.into_iter().map(|(path, element)| {
            Diagnostic::UnregisteredReference {
                document: doc.path.clone(),
                path,
                element,
            }
        }));
    }

    // Phase 3: Resolve member and base references
    stats.unresolved_references = registry.resolve_references();

    // Phase 4: Fold list types into collections
    let registry = reduce_collections(registry, &options.list_suffix, &options.read_method);
    stats.types = registry.len();
    stats.collections = registry.iter().filter(|t| t.collection.is_some()).count();

    // Phase 5: Build renderer descriptors
    let mut ir = registry_to_ir(&registry, &options.read_method);
    diagnostics.append(&mut ir.diagnostics);
    ir.diagnostics = diagnostics;

    log::info!(
        "compiled {} schemas and {} resource documents into {} types ({} collections)",
        stats.schemas,
        stats.resources,
        stats.types,
        stats.collections
    );

    Compilation {
        registry,
        ir,
        stats,
    }
}
