use minijinja::context;
use wadlgen_core::error::GeneratorError;
use wadlgen_core::ir::IrEnum;

use super::render;

/// Emit an enumeration as a frozen-shape object literal, `Key : "Value"` per member.
pub fn emit_enum(enumeration: &IrEnum, server: bool) -> Result<String, GeneratorError> {
    let entries: Vec<String> = enumeration
        .variants
        .iter()
        .map(|v| format!("{} : \"{}\"", v.key, v.value))
        .collect();

    render(
        "enum.j2",
        include_str!("../../templates/enum.j2"),
        context! {
            server => server,
            name => enumeration.name.camel_case.clone(),
            entries => entries,
        },
    )
}
