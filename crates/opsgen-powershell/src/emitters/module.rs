use minijinja::{Environment, context};
use opsgen_core::error::GeneratorError;
use opsgen_core::ir::ModuleDescriptor;
use serde::Serialize;

use super::{render, single_line};

#[derive(Debug, Serialize)]
struct ModuleView {
    name: String,
    title: String,
    version: String,
    base_url: Option<String>,
    level: String,
}

/// Emit `<Module>.psm1`.
///
/// With `functions` the rendered functions are inlined; without, the module
/// dot-sources `Public/<Function>.ps1` for every exported name.
pub fn emit_module(
    env: &Environment<'_>,
    module: &ModuleDescriptor,
    exports: &[String],
    functions: Option<&[String]>,
) -> Result<String, GeneratorError> {
    let view = ModuleView {
        name: module.name.clone(),
        title: single_line(&module.info.title),
        version: single_line(&module.info.version),
        base_url: module.base_url.clone(),
        level: module.level.to_string(),
    };
    render(
        env,
        "module.psm1.j2",
        context! {
            module => view,
            inline => functions.is_some(),
            functions => functions.unwrap_or_default(),
            exports => exports,
        },
    )
}
