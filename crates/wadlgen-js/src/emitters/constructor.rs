use minijinja::context;
use wadlgen_core::error::GeneratorError;
use wadlgen_core::ir::{IrRecord, IrTypeLink};

use super::{render, require_path};

/// Emit the data constructor of a record, or `None` when it has no members.
///
/// The server form is a CommonJS module: it exports the constructor and requires the
/// constructors of its member types. The client form is the bare constructor.
pub fn emit_constructor(record: &IrRecord, server: bool) -> Result<Option<String>, GeneratorError> {
    let Some(ctor) = record.constructor.as_ref() else {
        return Ok(None);
    };

    let fields: Vec<minijinja::Value> = ctor
        .fields
        .iter()
        .map(|field| {
            let comment = match &field.doc {
                Some(doc) => format!("{} {doc}", field.type_label),
                None => field.type_label.clone(),
            };
            context! {
                member => field.name.original.clone(),
                param => field.param.clone(),
                comment => comment,
            }
        })
        .collect();
    let params: Vec<&str> = ctor.fields.iter().map(|f| f.param.as_str()).collect();

    let link = |target: &IrTypeLink| {
        context! {
            camel => target.name.camel_case.clone(),
            path => require_path(&record.source_dir, &target.source_dir, &target.name.original),
        }
    };

    let content = render(
        "constructor.j2",
        include_str!("../../templates/constructor.j2"),
        context! {
            server => server,
            name => record.name.camel_case.clone(),
            params => params.join(", "),
            base => ctor.base.as_ref().map(link),
            fields => fields,
            requires => ctor.requires.iter().map(link).collect::<Vec<_>>(),
            memberless => ctor.memberless_requires.iter().map(link).collect::<Vec<_>>(),
        },
    )?;
    Ok(Some(content))
}
