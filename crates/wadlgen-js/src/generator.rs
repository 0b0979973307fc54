use std::iter;

use wadlgen_core::config::WadlgenConfig;
use wadlgen_core::error::GeneratorError;
use wadlgen_core::ir::{IrRecord, IrSpec, IrType};
use wadlgen_core::{CodeGenerator, GeneratedFile};

use crate::emitters;
use crate::emitters::index::IndexEntry;
use crate::emitters::{require_path, source_path};

/// Server-side generator: one CommonJS constructor per type with members, grouped by
/// source directory, plus `index.js` re-exporting all of them.
pub struct ServerGenerator;

impl CodeGenerator for ServerGenerator {
    type Config = WadlgenConfig;
    type Error = GeneratorError;

    fn generate(
        &self,
        ir: &IrSpec,
        _config: &WadlgenConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let mut files = Vec::new();
        let mut index = Vec::new();

        for ty in &ir.types {
            match ty {
                IrType::Enumeration(enumeration) => {
                    files.push(GeneratedFile {
                        path: source_path(
                            &enumeration.source_dir,
                            &format!("{}.js", enumeration.name.original),
                        ),
                        content: emitters::enumeration::emit_enum(enumeration, true)?,
                    });
                    index.push(index_entry(ty));
                }
                IrType::Record(record) => {
                    // Folded list types keep their server constructor.
                    let list = record.collection.as_ref().map(|c| c.list.as_ref());
                    for record in iter::once(record).chain(list) {
                        if let Some(file) = server_constructor(record)? {
                            files.push(file);
                            index.push(IndexEntry {
                                camel: record.name.camel_case.clone(),
                                path: require_path("", &record.source_dir, &record.name.original),
                            });
                        }
                    }
                }
            }
        }

        files.push(GeneratedFile {
            path: "index.js".to_string(),
            content: emitters::index::emit_index(&index)?,
        });
        Ok(files)
    }
}

fn server_constructor(record: &IrRecord) -> Result<Option<GeneratedFile>, GeneratorError> {
    let Some(content) = emitters::constructor::emit_constructor(record, true)? else {
        log::info!("{} has no members; skipping constructor", record.name);
        return Ok(None);
    };
    Ok(Some(GeneratedFile {
        path: source_path(&record.source_dir, &format!("{}.js", record.name.original)),
        content,
    }))
}

fn index_entry(ty: &IrType) -> IndexEntry {
    IndexEntry {
        camel: ty.name().camel_case.clone(),
        path: require_path("", ty.source_dir(), &ty.name().original),
    }
}

/// Client-side generator: `<type>-enum.js` per enumeration and `<type>-model.js` per
/// record reachable through a path.
pub struct ClientGenerator;

impl CodeGenerator for ClientGenerator {
    type Config = WadlgenConfig;
    type Error = GeneratorError;

    fn generate(
        &self,
        ir: &IrSpec,
        config: &WadlgenConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let mut files = Vec::new();

        for ty in &ir.types {
            match ty {
                IrType::Enumeration(enumeration) => files.push(GeneratedFile {
                    path: source_path(
                        &enumeration.source_dir,
                        &format!("{}-enum.js", enumeration.name.original),
                    ),
                    content: emitters::enumeration::emit_enum(enumeration, false)?,
                }),
                IrType::Record(record) => {
                    match emitters::model::emit_model(record, &config.client)? {
                        Some(content) => files.push(GeneratedFile {
                            path: source_path(
                                &record.source_dir,
                                &format!("{}-model.js", record.name.original),
                            ),
                            content,
                        }),
                        None => log::debug!("{} has no paths; no model generated", record.name),
                    }
                }
            }
        }

        Ok(files)
    }
}
